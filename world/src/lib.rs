#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Garden Guardian.
//!
//! The [`World`] is mutated exclusively through [`apply`]. Every accepted
//! mutation is reported as an [`Event`]; rejected commands leave the world
//! untouched and surface as rejection events carrying a typed reason.

use std::collections::{BTreeMap, BTreeSet};

use garden_guardian_core::{
    AbilityKind, ActivePower, Actor, AiMode, AmmoKind, AmmoPickup, Coin, Command, Companion,
    Event, Pest, PlayField, Projectile, ToolKind, Upgrade, UpgradeKind, Vec2, WELCOME_BANNER,
};
use garden_guardian_system_autopilot::{Autopilot, AutopilotTuning};
use garden_guardian_system_combat::Combat;
use garden_guardian_system_wave_director::{self as wave_director, WaveDirector};
use log::{info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod abilities;
mod economy;
mod firing;
mod ids;
mod schedule;
mod tick;

#[cfg(any(test, feature = "scaffolding"))]
pub mod scaffolding;

pub use economy::AmmoBelt;

use ids::IdAllocator;
use schedule::Schedule;

const ACTOR_RADIUS: f32 = 20.0;
const BASE_ENERGY: f32 = 100.0;
const PLAYER_SPEED: f32 = 150.0;
const COMPANION_SPEED: f32 = 135.0;
const COMPANION_OFFSET: Vec2 = Vec2::new(-50.0, 0.0);
const STARTING_CREDITS: u32 = 50;
const DEFAULT_SPAWN_INTERVAL: f32 = 3.0;
const DIRECTOR_SEED_SALT: u64 = 0x5eed_d1ec_7042_a11e;

/// Parameters used to build a fresh world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Seed for every random stream owned by the world.
    pub seed: u64,
    /// High score carried in from persistent storage.
    pub high_score: u32,
    /// Arena dimensions.
    pub field: PlayField,
    /// Seconds between spawns during the first season.
    pub spawn_interval: f32,
    /// Kills required to complete the first season.
    pub first_season_quota: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            high_score: 0,
            field: PlayField::default(),
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            first_season_quota: 20,
        }
    }
}

impl WorldConfig {
    fn director(&self) -> wave_director::Config {
        wave_director::Config::new(self.spawn_interval, self.seed ^ DIRECTOR_SEED_SALT)
            .with_initial_quota(self.first_season_quota)
    }
}

/// Represents the authoritative Garden Guardian world state.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    banner: &'static str,
    config: WorldConfig,
    clock: f32,
    ids: IdAllocator,
    rng: ChaCha8Rng,
    player: Actor,
    companion: Companion,
    projectiles: Vec<Projectile>,
    pests: Vec<Pest>,
    coins: Vec<Coin>,
    pickups: Vec<AmmoPickup>,
    powers: Vec<ActivePower>,
    ammo: AmmoBelt,
    selected_ammo: AmmoKind,
    selected_tool: ToolKind,
    last_fire: Option<f32>,
    owned_tools: BTreeSet<ToolKind>,
    owned_abilities: BTreeSet<AbilityKind>,
    cooldowns: BTreeMap<AbilityKind, f32>,
    upgrades: BTreeMap<UpgradeKind, Upgrade>,
    director: WaveDirector,
    credits: u32,
    score: u32,
    high_score: u32,
    ai_mode: AiMode,
    game_over: bool,
    schedule: Schedule,
    combat: Combat,
    autopilot: Autopilot,
}

impl World {
    /// Creates a new world with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates a new world from the provided configuration.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self::fresh(config, IdAllocator::default())
    }

    fn fresh(config: WorldConfig, ids: IdAllocator) -> Self {
        let field = config.field;
        let centre = Vec2::new(field.width() / 2.0, field.height() / 2.0);

        Self {
            banner: WELCOME_BANNER,
            config,
            clock: 0.0,
            ids,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player: Actor::new(centre, ACTOR_RADIUS, BASE_ENERGY, PLAYER_SPEED),
            companion: Companion {
                actor: Actor::new(
                    centre + COMPANION_OFFSET,
                    ACTOR_RADIUS,
                    BASE_ENERGY,
                    COMPANION_SPEED,
                ),
                last_fire: None,
                tool: ToolKind::WateringCan,
            },
            projectiles: Vec::new(),
            pests: Vec::new(),
            coins: Vec::new(),
            pickups: Vec::new(),
            powers: Vec::new(),
            ammo: AmmoBelt::starting(),
            selected_ammo: AmmoKind::Standard,
            selected_tool: ToolKind::WateringCan,
            last_fire: None,
            owned_tools: BTreeSet::from([ToolKind::WateringCan]),
            owned_abilities: BTreeSet::new(),
            cooldowns: BTreeMap::new(),
            upgrades: UpgradeKind::ALL
                .iter()
                .map(|kind| (*kind, Upgrade::new(*kind)))
                .collect(),
            director: WaveDirector::new(config.director()),
            credits: STARTING_CREDITS,
            score: 0,
            high_score: config.high_score,
            ai_mode: AiMode::Off,
            game_over: false,
            schedule: Schedule::default(),
            combat: Combat::new(),
            autopilot: Autopilot::new(AutopilotTuning::default()),
        }
    }

    fn reset(&mut self) {
        let high_score = self.high_score.max(self.score);
        let config = WorldConfig {
            high_score,
            ..self.config
        };
        let ids = std::mem::take(&mut self.ids);
        *self = Self::fresh(config, ids);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt, keys, pointer } => {
            out_events.push(Event::TimeAdvanced { dt });
            tick::run(world, dt.as_secs_f32(), keys, pointer, out_events);
        }
        Command::Fire { aim_angle, ammo } => match firing::fire_player(world, aim_angle, ammo) {
            Ok(volley) => volley.report(out_events),
            Err(reason) => {
                trace!("fire rejected: {reason}");
                out_events.push(Event::FireRejected { reason });
            }
        },
        Command::SwitchTool { tool } => match economy::switch_tool(world, tool) {
            Ok(()) => out_events.push(Event::ToolSwitched { tool }),
            Err(reason) => {
                trace!("switch to {tool:?} rejected: {reason}");
                out_events.push(Event::ToolSwitchRejected { tool, reason });
            }
        },
        Command::SelectAmmo { ammo } => match economy::select_ammo(world, ammo) {
            Ok(()) => out_events.push(Event::AmmoSelected { ammo }),
            Err(reason) => {
                trace!("{ammo:?} selection rejected: {reason}");
                out_events.push(Event::AmmoSelectionRejected { ammo, reason });
            }
        },
        Command::ActivateAbility { ability, pointer } => {
            match abilities::activate(world, ability, pointer) {
                Ok(activation) => activation.report(out_events),
                Err(reason) => {
                    trace!("{} rejected: {reason}", ability.name());
                    out_events.push(Event::AbilityRejected { ability, reason });
                }
            }
        }
        Command::Purchase { item } => match economy::purchase(world, item) {
            Ok(cost) => out_events.push(Event::PurchaseCompleted { item, cost }),
            Err(reason) => {
                trace!("purchase of {item:?} rejected: {reason}");
                out_events.push(Event::PurchaseRejected { item, reason });
            }
        },
        Command::SetAiMode { mode } => {
            if world.ai_mode != mode {
                world.ai_mode = mode;
                out_events.push(Event::AiModeChanged { mode });
            }
        }
        Command::CycleAiMode => {
            world.ai_mode = world.ai_mode.next();
            out_events.push(Event::AiModeChanged {
                mode: world.ai_mode,
            });
        }
        Command::Reset => {
            world.reset();
            info!("world reset; high score {}", world.high_score);
            out_events.push(Event::GameReset {
                high_score: world.high_score,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use garden_guardian_core::{
        AbilityKind, ActivePower, Actor, AiMode, AmmoKind, AmmoPickup, Coin, Companion, Pest,
        PlayField, Projectile, ToolKind, Upgrade, UpgradeKind,
    };

    use super::{AmmoBelt, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Arena in which the simulation runs.
    #[must_use]
    pub fn play_field(world: &World) -> PlayField {
        world.config.field
    }

    /// Seconds of simulated time elapsed since the world was created or reset.
    #[must_use]
    pub fn clock(world: &World) -> f32 {
        world.clock
    }

    /// The player character.
    #[must_use]
    pub fn player(world: &World) -> &Actor {
        &world.player
    }

    /// The companion character.
    #[must_use]
    pub fn companion(world: &World) -> &Companion {
        &world.companion
    }

    /// Projectiles currently in flight.
    #[must_use]
    pub fn projectiles(world: &World) -> &[Projectile] {
        &world.projectiles
    }

    /// Pests currently in the garden.
    #[must_use]
    pub fn pests(world: &World) -> &[Pest] {
        &world.pests
    }

    /// Coins waiting to be collected.
    #[must_use]
    pub fn coins(world: &World) -> &[Coin] {
        &world.coins
    }

    /// Ammo pickups waiting to be collected.
    #[must_use]
    pub fn ammo_pickups(world: &World) -> &[AmmoPickup] {
        &world.pickups
    }

    /// Time-extended ability effects currently active.
    #[must_use]
    pub fn active_powers(world: &World) -> &[ActivePower] {
        &world.powers
    }

    /// Remaining units of every limited ammo kind.
    #[must_use]
    pub fn ammo(world: &World) -> &AmmoBelt {
        &world.ammo
    }

    /// Ammo used by manual shots.
    #[must_use]
    pub fn selected_ammo(world: &World) -> AmmoKind {
        world.selected_ammo
    }

    /// Tool equipped by the player.
    #[must_use]
    pub fn selected_tool(world: &World) -> ToolKind {
        world.selected_tool
    }

    /// Reports whether the player owns the tool.
    #[must_use]
    pub fn owns_tool(world: &World, tool: ToolKind) -> bool {
        world.owned_tools.contains(&tool)
    }

    /// Reports whether the player owns the ability.
    #[must_use]
    pub fn owns_ability(world: &World, ability: AbilityKind) -> bool {
        world.owned_abilities.contains(&ability)
    }

    /// Seconds until the ability may be activated again; zero when ready.
    #[must_use]
    pub fn cooldown(world: &World, ability: AbilityKind) -> f32 {
        world.cooldowns.get(&ability).copied().unwrap_or(0.0)
    }

    /// Purchase progress of the upgrade.
    #[must_use]
    pub fn upgrade(world: &World, kind: UpgradeKind) -> Upgrade {
        world.upgrade(kind)
    }

    /// Current season, starting at one.
    #[must_use]
    pub fn season(world: &World) -> u32 {
        world.director.season()
    }

    /// Kills required to complete the current season.
    #[must_use]
    pub fn pests_per_season(world: &World) -> u32 {
        world.director.quota()
    }

    /// Kills tallied during the current season.
    #[must_use]
    pub fn pests_killed_this_season(world: &World) -> u32 {
        world.director.killed()
    }

    /// Seconds until the next spawn attempt.
    #[must_use]
    pub fn spawn_timer(world: &World) -> f32 {
        world.director.spawn_timer()
    }

    /// Seconds between spawns in the current season.
    #[must_use]
    pub fn spawn_interval(world: &World) -> f32 {
        world.director.spawn_interval()
    }

    /// Spendable credit balance.
    #[must_use]
    pub fn credits(world: &World) -> u32 {
        world.credits
    }

    /// Score of the current run.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Best score seen, including runs before this one.
    #[must_use]
    pub fn high_score(world: &World) -> u32 {
        world.high_score
    }

    /// Degree of autonomy granted to the AI controller.
    #[must_use]
    pub fn ai_mode(world: &World) -> AiMode {
        world.ai_mode
    }

    /// Reports whether the player's energy has run out.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.game_over
    }

    /// Number of delayed actions waiting to fire.
    #[must_use]
    pub fn pending_actions(world: &World) -> usize {
        world.schedule.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_guardian_core::{AbilityKind, PurchaseItem};

    #[test]
    fn new_world_matches_starting_layout() {
        let world = World::new();

        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
        assert_eq!(query::player(&world).position, Vec2::new(400.0, 300.0));
        assert_eq!(query::companion(&world).actor.position, Vec2::new(350.0, 300.0));
        assert_eq!(query::companion(&world).actor.speed, 135.0);
        assert_eq!(query::credits(&world), 50);
        assert_eq!(query::season(&world), 1);
        assert_eq!(query::pests_per_season(&world), 20);
        assert_eq!(query::spawn_interval(&world), 3.0);
        assert_eq!(query::ammo(&world).count(AmmoKind::Spread), Some(30));
        assert_eq!(query::ammo(&world).count(AmmoKind::Homing), Some(10));
        assert_eq!(query::ammo(&world).count(AmmoKind::Standard), None);
        assert!(query::owns_tool(&world, ToolKind::WateringCan));
        assert_eq!(query::ai_mode(&world), AiMode::Off);
    }

    #[test]
    fn cycle_ai_mode_wraps_back_to_off() {
        let mut world = World::new();
        let mut events = Vec::new();
        for _ in 0..3 {
            apply(&mut world, Command::CycleAiMode, &mut events);
        }
        assert_eq!(query::ai_mode(&world), AiMode::Off);
        assert_eq!(
            events.last(),
            Some(&Event::AiModeChanged { mode: AiMode::Off })
        );
    }

    #[test]
    fn reset_preserves_high_score_and_id_allocator() {
        let mut world = World::with_config(WorldConfig {
            high_score: 40,
            ..WorldConfig::default()
        });
        world.score = 70;
        world.credits = 1_000;
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Purchase {
                item: PurchaseItem::Ability(AbilityKind::BeeSwarm),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::ActivateAbility {
                ability: AbilityKind::BeeSwarm,
                pointer: Default::default(),
            },
            &mut events,
        );
        assert_eq!(query::pending_actions(&world), 10);
        let ids_before = world.ids.clone();

        apply(&mut world, Command::Reset, &mut events);

        assert_eq!(query::high_score(&world), 70);
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::credits(&world), 50);
        assert_eq!(query::pending_actions(&world), 0);
        assert!(!query::owns_ability(&world, AbilityKind::BeeSwarm));
        assert_eq!(world.ids, ids_before);
        assert_eq!(events.last(), Some(&Event::GameReset { high_score: 70 }));
    }
}
