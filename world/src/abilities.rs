//! Cooldown-gated ability effects.

use std::f32::consts::TAU;

use garden_guardian_core::{
    AbilityError, AbilityKind, ActivePower, ActivePowerKind, AmmoKind, Event, PointerState, Vec2,
};
use log::debug;
use rand::Rng;

use crate::{
    firing::{bearing, heading},
    schedule::DelayedAction,
    World,
};

const FERTILIZER_RADIUS: f32 = 150.0;
const FERTILIZER_DAMAGE: f32 = 100.0;

const PESTICIDE_SHOTS: usize = 16;
const PESTICIDE_SPEED: f32 = 300.0;
const PESTICIDE_DAMAGE: f32 = 15.0;
const PESTICIDE_RADIUS: f32 = 6.0;

const SCARECROW_LIFETIME: f32 = 10.0;
pub(crate) const SCARECROW_RANGE: f32 = 200.0;
pub(crate) const SCARECROW_INTERVAL: f32 = 0.5;
pub(crate) const SCARECROW_SPEED: f32 = 400.0;
pub(crate) const SCARECROW_DAMAGE: f32 = 20.0;
pub(crate) const SCARECROW_RADIUS: f32 = 5.0;

const SHIELD_SECONDS: f32 = 5.0;
const COMPOST_HEAL: f32 = 50.0;

const SEED_SHOTS: usize = 20;
const SEED_SPEED: f32 = 350.0;
const SEED_DAMAGE: f32 = 12.0;
const SEED_RADIUS: f32 = 5.0;

const BEE_COUNT: usize = 10;
const BEE_STAGGER: f32 = 0.1;
const BEE_SPEED: f32 = 250.0;
const BEE_DAMAGE: f32 = 8.0;
const BEE_RADIUS: f32 = 4.0;

const ROOT_RADIUS: f32 = 200.0;
const ROOT_SECONDS: f32 = 5.0;

const SUN_BEAM_SEGMENTS: usize = 5;
const SUN_BEAM_SPACING: f32 = 30.0;
const SUN_BEAM_SPEED: f32 = 600.0;
const SUN_BEAM_DAMAGE: f32 = 40.0;
const SUN_BEAM_RADIUS: f32 = 12.0;

const HARVEST_RADIUS: f32 = 200.0;

/// Immediate effects of an accepted activation.
#[derive(Debug, PartialEq)]
pub(crate) struct Activation {
    ability: AbilityKind,
    fired: usize,
    harvested: u32,
}

impl Activation {
    pub(crate) fn report(self, out_events: &mut Vec<Event>) {
        out_events.push(Event::AbilityActivated {
            ability: self.ability,
        });
        if self.fired > 0 {
            out_events.push(Event::ProjectilesFired {
                ammo: AmmoKind::Power,
                count: self.fired,
            });
        }
        if self.harvested > 0 {
            out_events.push(Event::CreditsCollected {
                amount: self.harvested,
            });
        }
    }
}

/// Triggers an owned, recharged ability and starts its cooldown.
pub(crate) fn activate(
    world: &mut World,
    ability: AbilityKind,
    pointer: PointerState,
) -> Result<Activation, AbilityError> {
    if !world.owned_abilities.contains(&ability) {
        return Err(AbilityError::NotOwned);
    }
    let remaining = world.cooldowns.get(&ability).copied().unwrap_or(0.0);
    if remaining > 0.0 {
        return Err(AbilityError::CoolingDown { remaining });
    }

    let _ = world.cooldowns.insert(ability, ability.cooldown());
    let origin = world.player.position;
    let mut activation = Activation {
        ability,
        fired: 0,
        harvested: 0,
    };

    match ability {
        AbilityKind::FertilizerBomb => {
            for pest in &mut world.pests {
                if pest.position.distance(origin) < FERTILIZER_RADIUS {
                    pest.health -= FERTILIZER_DAMAGE;
                }
            }
        }
        AbilityKind::PesticideSpray => {
            for index in 0..PESTICIDE_SHOTS {
                let angle = index as f32 / PESTICIDE_SHOTS as f32 * TAU;
                world.launch(
                    origin,
                    heading(angle) * PESTICIDE_SPEED,
                    PESTICIDE_RADIUS,
                    PESTICIDE_DAMAGE,
                    AmmoKind::Power,
                );
            }
            activation.fired = PESTICIDE_SHOTS;
        }
        AbilityKind::Scarecrow => {
            let id = world.ids.power();
            world.powers.push(ActivePower {
                id,
                kind: ActivePowerKind::Scarecrow,
                position: origin,
                lifetime: SCARECROW_LIFETIME,
                fire_timer: 0.0,
            });
        }
        AbilityKind::GreenhouseShield => world.player.grant_invulnerability(SHIELD_SECONDS),
        AbilityKind::CompostHeal => world.player.heal(COMPOST_HEAL),
        AbilityKind::SeedBurst => {
            for _ in 0..SEED_SHOTS {
                let angle = world.rng.gen::<f32>() * TAU;
                world.launch(
                    origin,
                    heading(angle) * SEED_SPEED,
                    SEED_RADIUS,
                    SEED_DAMAGE,
                    AmmoKind::Power,
                );
            }
            activation.fired = SEED_SHOTS;
        }
        AbilityKind::BeeSwarm => {
            for index in 0..BEE_COUNT {
                world.schedule.push(
                    world.clock + index as f32 * BEE_STAGGER,
                    DelayedAction::ReleaseBee { origin },
                );
            }
        }
        AbilityKind::RootTrap => {
            let due = world.clock + ROOT_SECONDS;
            for pest in &mut world.pests {
                if pest.position.distance(origin) < ROOT_RADIUS {
                    pest.slowed = true;
                    world
                        .schedule
                        .push(due, DelayedAction::ReleaseRoots { pest: pest.id });
                }
            }
        }
        AbilityKind::SunBeam => {
            let direction = heading(bearing(origin, pointer.position));
            for index in 0..SUN_BEAM_SEGMENTS {
                world.launch(
                    origin + direction * (index as f32 * SUN_BEAM_SPACING),
                    direction * SUN_BEAM_SPEED,
                    SUN_BEAM_RADIUS,
                    SUN_BEAM_DAMAGE,
                    AmmoKind::Power,
                );
            }
            activation.fired = SUN_BEAM_SEGMENTS;
        }
        AbilityKind::QuickHarvest => {
            let mut harvested = 0u32;
            world.coins.retain(|coin| {
                if coin.position.distance(origin) < HARVEST_RADIUS {
                    harvested = harvested.saturating_add(coin.value);
                    false
                } else {
                    true
                }
            });
            world.credits = world.credits.saturating_add(harvested);
            activation.harvested = harvested;
        }
    }

    debug!("{} activated at {:.2}s", ability.name(), world.clock);
    Ok(activation)
}

/// Carries out a delayed action that has come due.
pub(crate) fn run_delayed(world: &mut World, action: DelayedAction, out_events: &mut Vec<Event>) {
    match action {
        DelayedAction::ReleaseBee { origin } => {
            let angle = world.rng.gen::<f32>() * TAU;
            world.launch(
                origin,
                heading(angle) * BEE_SPEED,
                BEE_RADIUS,
                BEE_DAMAGE,
                AmmoKind::Power,
            );
            out_events.push(Event::ProjectilesFired {
                ammo: AmmoKind::Power,
                count: 1,
            });
        }
        DelayedAction::ReleaseRoots { pest } => {
            if let Some(pest) = world.pests.iter_mut().find(|candidate| candidate.id == pest) {
                pest.slowed = false;
                debug!("roots released pest {}", pest.id.get());
            }
        }
    }
}

/// Scarecrow shot aimed from `position` at `target`.
pub(crate) fn scarecrow_shot(world: &mut World, position: Vec2, target: Vec2) {
    world.launch(
        position,
        heading(bearing(position, target)) * SCARECROW_SPEED,
        SCARECROW_RADIUS,
        SCARECROW_DAMAGE,
        AmmoKind::Power,
    );
}
