#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure AI controller that picks targets and steers autonomous actors.
//!
//! Targets are chosen by priority: the nearest ammo pickup in range, then the
//! nearest coin in range, then the nearest pest at any distance. When nothing
//! qualifies the actor falls back to its idle behaviour, which for the
//! companion is guarding the player's back.

use garden_guardian_core::{
    AmmoPickup, Coin, CoinId, Pest, PestId, PickupId, PlayField, Vec2,
};

/// Distances that shape the controller's behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutopilotTuning {
    /// Pickups farther than this are ignored.
    pub pickup_range: f32,
    /// Coins farther than this are ignored.
    pub coin_range: f32,
    /// Distance behind the player, opposite the aim, at which the companion guards.
    pub guard_distance: f32,
    /// Guard offset from the player used when the aim is too short to trust.
    pub guard_fallback_offset: Vec2,
    /// Aim vectors shorter than this fall back to the fixed guard offset.
    pub aim_deadband: f32,
    /// The guard point is considered reached within this distance.
    pub guard_deadband: f32,
    /// A target is considered reached within this distance.
    pub arrival_deadband: f32,
}

impl Default for AutopilotTuning {
    fn default() -> Self {
        Self {
            pickup_range: 300.0,
            coin_range: 250.0,
            guard_distance: 80.0,
            guard_fallback_offset: Vec2::new(-40.0, 40.0),
            aim_deadband: 10.0,
            guard_deadband: 15.0,
            arrival_deadband: 5.0,
        }
    }
}

/// Actor being steered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pilot {
    /// Current centre of the actor.
    pub position: Vec2,
    /// Collision radius, used to keep the actor inside the field.
    pub radius: f32,
    /// Movement speed including upgrades, in world units per second.
    pub speed: f32,
}

/// Entities the controller may pursue.
#[derive(Clone, Copy, Debug)]
pub struct Surroundings<'a> {
    /// Ammo pickups lying in the garden.
    pub pickups: &'a [AmmoPickup],
    /// Coins lying in the garden.
    pub coins: &'a [Coin],
    /// Live pests.
    pub pests: &'a [Pest],
}

/// Behaviour used when no target qualifies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fallback {
    /// Stand behind the player, opposite the direction they aim.
    Guard {
        /// Player position.
        player: Vec2,
        /// Pointer position the player aims at.
        pointer: Vec2,
    },
    /// Stay in place.
    Hold,
}

/// Entity selected as the actor's current objective.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target {
    /// Ammo pickup to collect.
    Pickup(PickupId),
    /// Coin to collect.
    Coin(CoinId),
    /// Pest to chase and shoot.
    Pest {
        /// Identifier of the pest.
        id: PestId,
        /// Location of the pest.
        position: Vec2,
    },
}

/// Outcome of a single controller step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Maneuver {
    /// Actor position after moving and clamping to the field.
    pub position: Vec2,
    /// Objective chosen this step.
    pub target: Option<Target>,
}

impl Maneuver {
    /// Location of the pest the actor should fire at, if a pest is the objective.
    #[must_use]
    pub fn firing_solution(&self) -> Option<Vec2> {
        match self.target {
            Some(Target::Pest { position, .. }) => Some(position),
            _ => None,
        }
    }
}

/// Priority-based controller driving the companion and, in auto mode, the player.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Autopilot {
    tuning: AutopilotTuning,
}

impl Autopilot {
    /// Creates a controller with the provided tuning.
    #[must_use]
    pub fn new(tuning: AutopilotTuning) -> Self {
        Self { tuning }
    }

    /// Chooses an objective for the pilot and moves it for `dt` seconds.
    #[must_use]
    pub fn handle(
        &self,
        pilot: &Pilot,
        surroundings: &Surroundings<'_>,
        fallback: Fallback,
        dt: f32,
        field: PlayField,
    ) -> Maneuver {
        let origin = pilot.position;
        let target = self.acquire(origin, surroundings);

        let heading = match target {
            Some((_, destination)) => {
                toward(origin, destination, self.tuning.arrival_deadband)
            }
            None => match fallback {
                Fallback::Guard { player, pointer } => toward(
                    origin,
                    self.guard_point(player, pointer),
                    self.tuning.guard_deadband,
                ),
                Fallback::Hold => Vec2::ZERO,
            },
        };

        let moved = origin + heading * pilot.speed * dt;
        Maneuver {
            position: field.clamp_body(moved, pilot.radius),
            target: target.map(|(target, _)| target),
        }
    }

    /// Point the companion guards: behind the player, opposite the pointer.
    #[must_use]
    pub fn guard_point(&self, player: Vec2, pointer: Vec2) -> Vec2 {
        let aim = pointer - player;
        let aim_length = aim.length();
        if aim_length > self.tuning.aim_deadband {
            player - aim / aim_length * self.tuning.guard_distance
        } else {
            player + self.tuning.guard_fallback_offset
        }
    }

    fn acquire(&self, origin: Vec2, surroundings: &Surroundings<'_>) -> Option<(Target, Vec2)> {
        let pickup = nearest(
            origin,
            self.tuning.pickup_range,
            surroundings
                .pickups
                .iter()
                .map(|pickup| (pickup.id.get(), pickup.position, Target::Pickup(pickup.id))),
        );
        if pickup.is_some() {
            return pickup;
        }

        let coin = nearest(
            origin,
            self.tuning.coin_range,
            surroundings
                .coins
                .iter()
                .map(|coin| (coin.id.get(), coin.position, Target::Coin(coin.id))),
        );
        if coin.is_some() {
            return coin;
        }

        nearest(
            origin,
            f32::INFINITY,
            surroundings
                .pests
                .iter()
                .filter(|pest| !pest.is_dead())
                .map(|pest| {
                    (
                        pest.id.get(),
                        pest.position,
                        Target::Pest {
                            id: pest.id,
                            position: pest.position,
                        },
                    )
                }),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    distance: f32,
    id: u32,
    position: Vec2,
    target: Target,
}

impl Candidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance != other.distance {
            return self.distance < other.distance;
        }
        self.id < other.id
    }
}

fn nearest(
    origin: Vec2,
    range: f32,
    candidates: impl Iterator<Item = (u32, Vec2, Target)>,
) -> Option<(Target, Vec2)> {
    let mut best: Option<Candidate> = None;

    for (id, position, target) in candidates {
        let distance = origin.distance(position);
        if distance >= range {
            continue;
        }

        let current = Candidate {
            distance,
            id,
            position,
            target,
        };
        match &mut best {
            Some(existing) => {
                if current.precedes(existing) {
                    *existing = current;
                }
            }
            None => best = Some(current),
        }
    }

    best.map(|candidate| (candidate.target, candidate.position))
}

fn toward(origin: Vec2, destination: Vec2, deadband: f32) -> Vec2 {
    let offset = destination - origin;
    let distance = offset.length();
    if distance > deadband {
        offset / distance
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_guardian_core::{AmmoKind, PestKind};

    fn pest(id: u32, x: f32, y: f32) -> Pest {
        Pest::from_profile(
            PestId::new(id),
            PestKind::Bug,
            Vec2::new(x, y),
            PestKind::Bug.profile(1),
        )
    }

    fn coin(id: u32, x: f32, y: f32) -> Coin {
        Coin {
            id: CoinId::new(id),
            position: Vec2::new(x, y),
            value: 5,
            lifetime: 10.0,
        }
    }

    fn pickup(id: u32, x: f32, y: f32) -> AmmoPickup {
        AmmoPickup {
            id: PickupId::new(id),
            position: Vec2::new(x, y),
            ammo: AmmoKind::Homing,
            amount: 3,
            lifetime: 15.0,
        }
    }

    fn pilot(x: f32, y: f32) -> Pilot {
        Pilot {
            position: Vec2::new(x, y),
            radius: 20.0,
            speed: 100.0,
        }
    }

    #[test]
    fn pickups_outrank_coins_and_pests() {
        let autopilot = Autopilot::default();
        let pickups = [pickup(7, 500.0, 300.0)];
        let coins = [coin(3, 410.0, 300.0)];
        let pests = [pest(1, 405.0, 300.0)];
        let surroundings = Surroundings {
            pickups: &pickups,
            coins: &coins,
            pests: &pests,
        };

        let maneuver = autopilot.handle(
            &pilot(400.0, 300.0),
            &surroundings,
            Fallback::Hold,
            0.1,
            PlayField::default(),
        );

        assert_eq!(maneuver.target, Some(Target::Pickup(PickupId::new(7))));
        assert_eq!(maneuver.firing_solution(), None);
        assert!((maneuver.position.x - 410.0).abs() < 1e-4);
    }

    #[test]
    fn out_of_range_coin_yields_to_pest() {
        let autopilot = Autopilot::default();
        let coins = [coin(3, 400.0, 560.0)];
        let pests = [pest(1, 700.0, 300.0)];
        let surroundings = Surroundings {
            pickups: &[],
            coins: &coins,
            pests: &pests,
        };

        let maneuver = autopilot.handle(
            &pilot(400.0, 300.0),
            &surroundings,
            Fallback::Hold,
            0.1,
            PlayField::default(),
        );

        assert_eq!(maneuver.firing_solution(), Some(Vec2::new(700.0, 300.0)));
    }

    #[test]
    fn guard_point_sits_opposite_the_aim() {
        let autopilot = Autopilot::default();
        let guard = autopilot.guard_point(Vec2::new(400.0, 300.0), Vec2::new(400.0, 220.0));
        assert!((guard - Vec2::new(400.0, 380.0)).length() < 1e-4);
    }

    #[test]
    fn short_aim_uses_fixed_guard_offset() {
        let autopilot = Autopilot::default();
        let guard = autopilot.guard_point(Vec2::new(400.0, 300.0), Vec2::new(405.0, 300.0));
        assert_eq!(guard, Vec2::new(360.0, 340.0));
    }

    #[test]
    fn hold_fallback_stays_put() {
        let autopilot = Autopilot::default();
        let surroundings = Surroundings {
            pickups: &[],
            coins: &[],
            pests: &[],
        };
        let maneuver = autopilot.handle(
            &pilot(100.0, 100.0),
            &surroundings,
            Fallback::Hold,
            1.0,
            PlayField::default(),
        );
        assert_eq!(maneuver.position, Vec2::new(100.0, 100.0));
        assert_eq!(maneuver.target, None);
    }

    #[test]
    fn equidistant_pests_prefer_smaller_id() {
        let autopilot = Autopilot::default();
        let pests = [pest(8, 300.0, 300.0), pest(2, 500.0, 300.0)];
        let surroundings = Surroundings {
            pickups: &[],
            coins: &[],
            pests: &pests,
        };
        let maneuver = autopilot.handle(
            &pilot(400.0, 300.0),
            &surroundings,
            Fallback::Hold,
            0.0,
            PlayField::default(),
        );
        assert_eq!(
            maneuver.target,
            Some(Target::Pest {
                id: PestId::new(2),
                position: Vec2::new(500.0, 300.0),
            })
        );
    }
}
