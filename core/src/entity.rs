//! Entities populating the garden and their identifiers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{AmmoKind, ToolKind, UpgradeKind, UPGRADE_TIERS};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(u32);

        impl $name {
            /// Creates a new identifier with the provided numeric value.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Retrieves the numeric representation of the identifier.
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier assigned to a pest.
    PestId
);
entity_id!(
    /// Unique identifier assigned to a projectile.
    ProjectileId
);
entity_id!(
    /// Unique identifier assigned to a coin.
    CoinId
);
entity_id!(
    /// Unique identifier assigned to an ammo pickup.
    PickupId
);
entity_id!(
    /// Unique identifier assigned to an active power.
    PowerId
);

/// Character occupying the garden: the player or the companion.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    /// Centre of the actor.
    pub position: Vec2,
    /// Collision radius.
    pub radius: f32,
    /// Remaining energy.
    pub health: f32,
    /// Energy ceiling.
    pub max_health: f32,
    /// Base movement speed in world units per second.
    pub speed: f32,
    /// Whether contact damage is currently ignored.
    pub invulnerable: bool,
    /// Seconds of invulnerability left.
    pub invulnerable_time: f32,
}

impl Actor {
    /// Creates a vulnerable actor at full health.
    #[must_use]
    pub fn new(position: Vec2, radius: f32, max_health: f32, speed: f32) -> Self {
        Self {
            position,
            radius,
            health: max_health,
            max_health,
            speed,
            invulnerable: false,
            invulnerable_time: 0.0,
        }
    }

    /// Reports whether the actor still has energy left.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Makes the actor invulnerable for the given number of seconds.
    pub fn grant_invulnerability(&mut self, seconds: f32) {
        self.invulnerable = true;
        self.invulnerable_time = seconds;
    }

    /// Counts down the invulnerability timer, clearing the flag once it expires.
    pub fn decay_invulnerability(&mut self, dt: f32) {
        if !self.invulnerable {
            return;
        }
        self.invulnerable_time = (self.invulnerable_time - dt).max(0.0);
        if self.invulnerable_time <= 0.0 {
            self.invulnerable = false;
        }
    }

    /// Restores energy without exceeding the ceiling.
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }
}

/// Secondary actor that can be driven by the AI controller.
#[derive(Clone, Debug, PartialEq)]
pub struct Companion {
    /// Body shared with the player character.
    pub actor: Actor,
    /// Simulation time of the companion's previous shot.
    pub last_fire: Option<f32>,
    /// Tool the companion fires with.
    pub tool: ToolKind,
}

/// Moving damage-dealing entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Identifier allocated by the world.
    pub id: ProjectileId,
    /// Centre of the projectile.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Collision radius.
    pub radius: f32,
    /// Damage applied on contact.
    pub damage: f32,
    /// Ammo kind governing collision behaviour.
    pub ammo: AmmoKind,
    /// Whether the explosive splash has already been applied.
    pub exploded: bool,
    /// Pests already struck by a piercing projectile.
    pub pierced: Vec<PestId>,
}

impl Projectile {
    /// Creates a projectile that has not struck anything yet.
    #[must_use]
    pub fn new(
        id: ProjectileId,
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        damage: f32,
        ammo: AmmoKind,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            radius,
            damage,
            ammo,
            exploded: false,
            pierced: Vec::new(),
        }
    }
}

/// Kinds of pests, each with a distinct stat profile.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PestKind {
    /// Baseline pest.
    Weed,
    /// Small, fast, fragile pest.
    Bug,
    /// Large, slow, tough pest that hits harder.
    Crow,
}

/// Stats derived for a pest of a given kind in a given season.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PestProfile {
    /// Starting and maximum health.
    pub health: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Damage dealt on contact with an actor.
    pub damage: f32,
    /// Collision radius.
    pub radius: f32,
}

impl PestKind {
    /// Every pest kind.
    pub const ALL: [PestKind; 3] = [PestKind::Weed, PestKind::Bug, PestKind::Crow];

    /// Derives the stat profile for the kind in the provided season.
    ///
    /// Base health is `20 + 5·season`, base speed `35 + 5·season` and base
    /// damage `5 + ⌊season / 2⌋`; bugs and crows scale those bases.
    #[must_use]
    pub fn profile(self, season: u32) -> PestProfile {
        let season_f = season as f32;
        let base = PestProfile {
            health: 20.0 + 5.0 * season_f,
            speed: 35.0 + 5.0 * season_f,
            damage: 5.0 + (season / 2) as f32,
            radius: 15.0,
        };

        match self {
            Self::Weed => base,
            Self::Bug => PestProfile {
                health: base.health * 0.7,
                speed: base.speed * 1.5,
                radius: 10.0,
                ..base
            },
            Self::Crow => PestProfile {
                health: base.health * 1.3,
                speed: base.speed * 0.8,
                damage: base.damage * 1.5,
                radius: 18.0,
            },
        }
    }
}

/// Enemy seeking the nearest actor.
#[derive(Clone, Debug, PartialEq)]
pub struct Pest {
    /// Identifier allocated by the world.
    pub id: PestId,
    /// Centre of the pest.
    pub position: Vec2,
    /// Stat profile family.
    pub kind: PestKind,
    /// Remaining health.
    pub health: f32,
    /// Health at spawn.
    pub max_health: f32,
    /// Movement speed before slowing.
    pub speed: f32,
    /// Damage dealt on contact.
    pub damage: f32,
    /// Collision radius.
    pub radius: f32,
    /// Whether a root trap currently slows the pest.
    pub slowed: bool,
}

impl Pest {
    /// Multiplier applied to the speed of slowed pests.
    pub const SLOW_FACTOR: f32 = 0.3;

    /// Creates a pest from a stat profile.
    #[must_use]
    pub fn from_profile(id: PestId, kind: PestKind, position: Vec2, profile: PestProfile) -> Self {
        Self {
            id,
            position,
            kind,
            health: profile.health,
            max_health: profile.health,
            speed: profile.speed,
            damage: profile.damage,
            radius: profile.radius,
            slowed: false,
        }
    }

    /// Speed after applying any slowing effect.
    #[must_use]
    pub fn effective_speed(&self) -> f32 {
        if self.slowed {
            self.speed * Self::SLOW_FACTOR
        } else {
            self.speed
        }
    }

    /// Reports whether the pest has been destroyed.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// Credit drop left by a destroyed pest.
#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    /// Identifier allocated by the world.
    pub id: CoinId,
    /// Location of the coin.
    pub position: Vec2,
    /// Credits granted on collection.
    pub value: u32,
    /// Seconds until the coin disappears.
    pub lifetime: f32,
}

/// Ammo drop left by a destroyed pest.
#[derive(Clone, Debug, PartialEq)]
pub struct AmmoPickup {
    /// Identifier allocated by the world.
    pub id: PickupId,
    /// Location of the pickup.
    pub position: Vec2,
    /// Ammo kind granted.
    pub ammo: AmmoKind,
    /// Units granted on collection.
    pub amount: u32,
    /// Seconds until the pickup disappears.
    pub lifetime: f32,
}

/// Kinds of time-extended ability effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivePowerKind {
    /// Stationary defender that fires at nearby pests.
    Scarecrow,
}

/// Time-extended ability effect present in the garden.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivePower {
    /// Identifier allocated by the world.
    pub id: PowerId,
    /// Kind of effect.
    pub kind: ActivePowerKind,
    /// Location of the effect.
    pub position: Vec2,
    /// Seconds until the effect expires.
    pub lifetime: f32,
    /// Seconds until the effect may fire again.
    pub fire_timer: f32,
}

/// Purchase progress of a single tiered upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Upgrade {
    kind: UpgradeKind,
    tier: usize,
}

impl Upgrade {
    /// Creates an upgrade with no tiers bought.
    #[must_use]
    pub const fn new(kind: UpgradeKind) -> Self {
        Self { kind, tier: 0 }
    }

    /// Upgrade family.
    #[must_use]
    pub const fn kind(&self) -> UpgradeKind {
        self.kind
    }

    /// Display name of the upgrade.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Number of tiers bought so far.
    #[must_use]
    pub const fn tier(&self) -> usize {
        self.tier
    }

    /// Reports whether every tier has been bought.
    #[must_use]
    pub const fn is_maxed(&self) -> bool {
        self.tier >= UPGRADE_TIERS
    }

    /// Price of the next tier, if any remain.
    #[must_use]
    pub fn next_cost(&self) -> Option<u32> {
        self.kind.tier_costs().get(self.tier).copied()
    }

    /// Description of the next tier, if any remain.
    #[must_use]
    pub fn next_description(&self) -> Option<&'static str> {
        self.kind.tier_descriptions().get(self.tier).copied()
    }

    /// Multiplier `1 + step·tier` used by percentage upgrades.
    #[must_use]
    pub fn bonus(&self, step: f32) -> f32 {
        1.0 + step * self.tier as f32
    }

    /// Marks the next tier as bought, saturating at the final tier.
    pub fn advance(&mut self) {
        if !self.is_maxed() {
            self.tier += 1;
        }
    }
}
