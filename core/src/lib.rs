#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Garden Guardian engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! changed. Rejected commands never mutate the world; they surface as
//! rejection events carrying a typed reason instead.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod catalog;
mod entity;

pub use catalog::{AbilityKind, ToolKind, ToolStats, UpgradeKind, UPGRADE_TIERS};
pub use entity::{
    Actor, ActivePower, ActivePowerKind, AmmoPickup, Coin, CoinId, Companion, Pest, PestId,
    PestKind, PestProfile, PickupId, PowerId, Projectile, ProjectileId, Upgrade,
};
pub use glam::Vec2;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Garden Guardian.";

/// Default width of the play-field measured in world units.
pub const PLAY_FIELD_WIDTH: f32 = 800.0;

/// Default height of the play-field measured in world units.
pub const PLAY_FIELD_HEIGHT: f32 = 600.0;

/// Rectangular arena, anchored at the origin, in which the simulation runs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    width: f32,
    height: f32,
}

impl PlayField {
    /// Creates a play-field with the provided dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the play-field in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the play-field in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Reports whether the point lies within the field expanded by `margin` on every side.
    ///
    /// Edges are exclusive so a point resting exactly on the expanded border
    /// counts as outside.
    #[must_use]
    pub fn contains_with_margin(&self, point: Vec2, margin: f32) -> bool {
        point.x > -margin
            && point.x < self.width + margin
            && point.y > -margin
            && point.y < self.height + margin
    }

    /// Clamps a body of the given radius so it stays entirely inside the field.
    #[must_use]
    pub fn clamp_body(&self, point: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            point.x.max(radius).min(self.width - radius),
            point.y.max(radius).min(self.height - radius),
        )
    }
}

impl Default for PlayField {
    fn default() -> Self {
        Self::new(PLAY_FIELD_WIDTH, PLAY_FIELD_HEIGHT)
    }
}

/// Classification of a projectile governing its pattern and collision rules.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AmmoKind {
    /// Unlimited single shot fired by every tool.
    Standard,
    /// Five-way fan of projectiles.
    Spread,
    /// Passes through pests, striking each at most once.
    Piercing,
    /// Detonates on first contact, splashing nearby pests.
    Explosive,
    /// Steers toward the nearest pest every tick.
    Homing,
    /// Projectiles emitted by abilities and active powers.
    Power,
}

impl AmmoKind {
    /// Ammo kinds tracked by a finite counter and granted by pickups.
    pub const LIMITED: [AmmoKind; 4] = [
        AmmoKind::Spread,
        AmmoKind::Piercing,
        AmmoKind::Explosive,
        AmmoKind::Homing,
    ];

    /// Reports whether the kind is drawn from a finite counter.
    #[must_use]
    pub const fn is_limited(self) -> bool {
        matches!(
            self,
            Self::Spread | Self::Piercing | Self::Explosive | Self::Homing
        )
    }
}

/// Degree of autonomy granted to the AI controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiMode {
    /// Both actors are driven manually; the companion idles.
    #[default]
    Off,
    /// The companion acts autonomously while the player stays manual.
    Assist,
    /// Both the companion and the player act autonomously.
    Auto,
}

impl AiMode {
    /// Returns the mode that follows `self` in the off → assist → auto cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::Assist,
            Self::Assist => Self::Auto,
            Self::Auto => Self::Off,
        }
    }

    /// Reports whether the companion is driven by the AI controller.
    #[must_use]
    pub const fn drives_companion(self) -> bool {
        matches!(self, Self::Assist | Self::Auto)
    }

    /// Reports whether the player character is driven by the AI controller.
    #[must_use]
    pub const fn drives_player(self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Item offered by the shop, tagged by category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseItem {
    /// A projectile tool.
    Tool(ToolKind),
    /// A cooldown-gated ability.
    Ability(AbilityKind),
    /// The next tier of a tiered upgrade.
    Upgrade(UpgradeKind),
}

/// Logical movement and trigger keys held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    /// Move toward decreasing y.
    pub up: bool,
    /// Move toward increasing y.
    pub down: bool,
    /// Move toward decreasing x.
    pub left: bool,
    /// Move toward increasing x.
    pub right: bool,
    /// Fire the selected ammo toward the pointer.
    pub fire: bool,
}

impl KeyState {
    /// Unnormalised movement direction implied by the held keys.
    #[must_use]
    pub fn direction(&self) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if self.up {
            direction.y -= 1.0;
        }
        if self.down {
            direction.y += 1.0;
        }
        if self.left {
            direction.x -= 1.0;
        }
        if self.right {
            direction.x += 1.0;
        }
        direction
    }
}

/// Pointer location in world units and whether its button is held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerState {
    /// Pointer location within the play-field.
    pub position: Vec2,
    /// Whether the primary button is held.
    pub pressed: bool,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one frame.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
        /// Keys held during the frame.
        keys: KeyState,
        /// Pointer state during the frame.
        pointer: PointerState,
    },
    /// Fires the player's current tool along the provided aim.
    Fire {
        /// Aim direction in radians, measured from the positive x axis.
        aim_angle: f32,
        /// Ammo requested for the shot.
        ammo: AmmoKind,
    },
    /// Equips an owned tool.
    SwitchTool {
        /// Tool to equip.
        tool: ToolKind,
    },
    /// Selects the ammo used by subsequent manual shots.
    SelectAmmo {
        /// Ammo to select.
        ammo: AmmoKind,
    },
    /// Triggers an owned ability that is off cooldown.
    ActivateAbility {
        /// Ability to trigger.
        ability: AbilityKind,
        /// Pointer state used by aimed abilities.
        pointer: PointerState,
    },
    /// Buys a shop item with credits.
    Purchase {
        /// Item to buy.
        item: PurchaseItem,
    },
    /// Sets the AI mode explicitly.
    SetAiMode {
        /// Mode to activate.
        mode: AiMode,
    },
    /// Advances the AI mode to the next mode in its cycle.
    CycleAiMode,
    /// Restores the initial world, preserving the high score.
    Reset,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that projectiles entered the world.
    ProjectilesFired {
        /// Ammo kind of the emitted projectiles.
        ammo: AmmoKind,
        /// Number of projectiles emitted.
        count: usize,
    },
    /// Reports that a fire request was rejected.
    FireRejected {
        /// Specific reason the shot was refused.
        reason: FireError,
    },
    /// Reports that a depleted ammo selection fell back to standard ammo.
    AmmoFallback {
        /// Depleted kind that was previously requested.
        depleted: AmmoKind,
    },
    /// Confirms that a pest entered the world.
    PestSpawned {
        /// Identifier assigned to the pest.
        pest: PestId,
        /// Kind of pest spawned.
        kind: PestKind,
    },
    /// Confirms that a pest was destroyed.
    PestKilled {
        /// Identifier of the destroyed pest.
        pest: PestId,
        /// Kind of the destroyed pest.
        kind: PestKind,
        /// Location at which the pest died.
        position: Vec2,
    },
    /// Reports that an actor was struck by a pest.
    ActorDamaged {
        /// Whether the struck actor is the player character.
        player: bool,
        /// Contact damage applied.
        amount: f32,
    },
    /// Confirms that credits were collected from coins.
    CreditsCollected {
        /// Total credits gained.
        amount: u32,
    },
    /// Confirms that ammo was collected from a pickup.
    AmmoCollected {
        /// Kind of ammo gained.
        ammo: AmmoKind,
        /// Quantity gained.
        amount: u32,
    },
    /// Announces that the season's kill quota was met.
    SeasonCompleted {
        /// Season that was completed.
        season: u32,
    },
    /// Confirms that an ability took effect.
    AbilityActivated {
        /// Ability that was triggered.
        ability: AbilityKind,
    },
    /// Reports that an ability request was rejected.
    AbilityRejected {
        /// Ability requested.
        ability: AbilityKind,
        /// Specific reason the request failed.
        reason: AbilityError,
    },
    /// Confirms that an item was bought.
    PurchaseCompleted {
        /// Item that was bought.
        item: PurchaseItem,
        /// Credits debited.
        cost: u32,
    },
    /// Reports that a purchase was rejected.
    PurchaseRejected {
        /// Item requested.
        item: PurchaseItem,
        /// Specific reason the purchase failed.
        reason: PurchaseError,
    },
    /// Confirms that the player equipped a tool.
    ToolSwitched {
        /// Tool now equipped.
        tool: ToolKind,
    },
    /// Reports that a tool switch was rejected.
    ToolSwitchRejected {
        /// Tool requested.
        tool: ToolKind,
        /// Specific reason the switch failed.
        reason: ToolError,
    },
    /// Confirms that the ammo selection changed.
    AmmoSelected {
        /// Ammo now selected.
        ammo: AmmoKind,
    },
    /// Reports that an ammo selection was rejected.
    AmmoSelectionRejected {
        /// Ammo requested.
        ammo: AmmoKind,
        /// Specific reason the selection failed.
        reason: AmmoError,
    },
    /// Announces that the AI mode changed.
    AiModeChanged {
        /// Mode now active.
        mode: AiMode,
    },
    /// Announces that the player's energy was exhausted.
    GameOver {
        /// Final score of the run.
        score: u32,
        /// High score after folding in the final score.
        high_score: u32,
    },
    /// Confirms that the world was restored to its initial state.
    GameReset {
        /// High score carried into the new run.
        high_score: u32,
    },
}

/// Reasons a purchase may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PurchaseError {
    /// The tool or ability is already owned.
    #[error("item is already owned")]
    AlreadyOwned,
    /// Every tier of the upgrade has been bought.
    #[error("upgrade is already at its highest tier")]
    Maxed,
    /// The credit balance does not cover the price.
    #[error("insufficient credits: need {cost}, have {available}")]
    InsufficientCredits {
        /// Price of the item.
        cost: u32,
        /// Credits available at the time of the request.
        available: u32,
    },
}

/// Reasons an ability activation may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Error)]
pub enum AbilityError {
    /// The ability has not been bought.
    #[error("ability is not owned")]
    NotOwned,
    /// The ability is still recharging.
    #[error("ability is cooling down for {remaining:.2}s")]
    CoolingDown {
        /// Seconds left before the ability is ready.
        remaining: f32,
    },
}

/// Reasons a tool switch may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum ToolError {
    /// The tool has not been bought.
    #[error("tool is not owned")]
    NotOwned,
}

/// Reasons an ammo selection may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum AmmoError {
    /// No units of the requested limited ammo remain.
    #[error("ammo is depleted")]
    Depleted,
    /// The kind is reserved for ability projectiles.
    #[error("ammo kind cannot be selected")]
    Unselectable,
}

/// Reasons a fire request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum FireError {
    /// The equipped tool has not recovered from its previous shot.
    #[error("tool is still recovering from the previous shot")]
    Recovering,
    /// The kind is reserved for ability projectiles.
    #[error("ammo kind cannot be fired by tools")]
    Unselectable,
    /// The game is over and no longer accepts input.
    #[error("the game is over")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::{AiMode, AmmoKind, PlayField, PurchaseError, PurchaseItem, UpgradeKind, Vec2};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn purchase_rejection_round_trips_through_bincode() {
        assert_round_trip(&PurchaseError::InsufficientCredits {
            cost: 200,
            available: 50,
        });
        assert_round_trip(&PurchaseItem::Upgrade(UpgradeKind::FireRate));
    }

    #[test]
    fn ai_mode_cycles_through_all_modes() {
        assert_eq!(AiMode::Off.next(), AiMode::Assist);
        assert_eq!(AiMode::Assist.next(), AiMode::Auto);
        assert_eq!(AiMode::Auto.next(), AiMode::Off);
        assert!(!AiMode::Off.drives_companion());
        assert!(AiMode::Assist.drives_companion());
        assert!(!AiMode::Assist.drives_player());
        assert!(AiMode::Auto.drives_player());
    }

    #[test]
    fn only_pickup_kinds_are_limited() {
        assert!(!AmmoKind::Standard.is_limited());
        assert!(!AmmoKind::Power.is_limited());
        assert!(AmmoKind::LIMITED.iter().all(|kind| kind.is_limited()));
    }

    #[test]
    fn bounds_margin_is_exclusive() {
        let field = PlayField::default();
        assert!(field.contains_with_margin(Vec2::new(-49.0, 10.0), 50.0));
        assert!(!field.contains_with_margin(Vec2::new(-50.0, 10.0), 50.0));
        assert!(!field.contains_with_margin(Vec2::new(400.0, 651.0), 50.0));
    }

    #[test]
    fn clamp_body_keeps_radius_inside() {
        let field = PlayField::default();
        let clamped = field.clamp_body(Vec2::new(-10.0, 900.0), 20.0);
        assert_eq!(clamped, Vec2::new(20.0, 580.0));
    }

    #[test]
    fn rejection_reasons_render_messages() {
        let message = PurchaseError::InsufficientCredits {
            cost: 150,
            available: 40,
        }
        .to_string();
        assert_eq!(message, "insufficient credits: need 150, have 40");
    }
}
