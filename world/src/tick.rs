//! Fixed-order phase pipeline advancing the world by one frame.
//!
//! Later phases observe the results of earlier ones within the same tick:
//! timers, projectile flight, spawning, pest movement, collisions, collection,
//! active powers, then the AI controller.

use garden_guardian_core::{
    Actor, AmmoKind, AmmoPickup, Coin, Event, KeyState, Pest, PointerState, Vec2,
};
use garden_guardian_system_autopilot::{Fallback, Pilot, Surroundings};
use garden_guardian_system_combat::nearest_pest;
use log::info;
use rand::Rng;

use crate::{
    abilities::{self, SCARECROW_INTERVAL, SCARECROW_RANGE},
    firing::{self, bearing, recovered, Shooter},
    World,
};

const CONTACT_INVULNERABILITY: f32 = 1.0;
const KILL_SCORE: u32 = 10;

const COIN_LIFETIME: f32 = 10.0;
const COIN_REACH: f32 = 10.0;
const PICKUP_CHANCE: f32 = 0.4;
const PICKUP_JITTER: f32 = 30.0;
const PICKUP_LIFETIME: f32 = 15.0;
const PICKUP_REACH: f32 = 12.0;

pub(crate) fn run(
    world: &mut World,
    dt: f32,
    keys: KeyState,
    pointer: PointerState,
    out_events: &mut Vec<Event>,
) {
    if world.game_over || dt <= 0.0 {
        return;
    }

    if !world.ai_mode.drives_player() {
        steer_player(world, keys, dt);
        if keys.fire || pointer.pressed {
            let aim = bearing(world.player.position, pointer.position);
            let selected = world.selected_ammo;
            if let Ok(volley) = firing::fire_player(world, aim, selected) {
                volley.report(out_events);
            }
        }
    }

    advance_timers(world, dt, out_events);
    world
        .combat
        .advance(&mut world.projectiles, &world.pests, dt, world.config.field);
    spawn_pests(world, dt, out_events);
    move_pests(world, dt, out_events);
    resolve_hits(world, out_events);
    collect_loot(world, dt, out_events);
    run_powers(world, dt, out_events);
    drive_autopilot(world, dt, pointer, out_events);

    if !world.player.is_alive() {
        world.game_over = true;
        world.high_score = world.high_score.max(world.score);
        info!(
            "game over at season {} with score {} (high score {})",
            world.director.season(),
            world.score,
            world.high_score
        );
        out_events.push(Event::GameOver {
            score: world.score,
            high_score: world.high_score,
        });
    }
}

fn steer_player(world: &mut World, keys: KeyState, dt: f32) {
    let direction = keys.direction().normalize_or_zero();
    if direction == Vec2::ZERO {
        return;
    }
    let speed = world.player.speed * world.move_bonus();
    let moved = world.player.position + direction * speed * dt;
    world.player.position = world.config.field.clamp_body(moved, world.player.radius);
}

fn advance_timers(world: &mut World, dt: f32, out_events: &mut Vec<Event>) {
    world.clock += dt;
    world.player.decay_invulnerability(dt);
    world.companion.actor.decay_invulnerability(dt);
    for remaining in world.cooldowns.values_mut() {
        *remaining = (*remaining - dt).max(0.0);
    }

    let mut due = Vec::new();
    world.schedule.drain_due(world.clock, &mut due);
    for action in due {
        abilities::run_delayed(world, action, out_events);
    }
}

fn spawn_pests(world: &mut World, dt: f32, out_events: &mut Vec<Event>) {
    let mut spawns = Vec::new();
    if let Some(season) = world
        .director
        .handle(dt, world.config.field, &mut spawns)
    {
        out_events.push(Event::SeasonCompleted { season });
    }

    for spawn in spawns {
        let id = world.ids.pest();
        world
            .pests
            .push(Pest::from_profile(id, spawn.kind, spawn.position, spawn.profile));
        out_events.push(Event::PestSpawned {
            pest: id,
            kind: spawn.kind,
        });
    }
}

fn move_pests(world: &mut World, dt: f32, out_events: &mut Vec<Event>) {
    for pest in world.pests.iter_mut().filter(|pest| !pest.is_dead()) {
        let to_player = pest.position.distance(world.player.position);
        let target = if world.companion.actor.is_alive()
            && pest.position.distance(world.companion.actor.position) <= to_player
        {
            world.companion.actor.position
        } else {
            world.player.position
        };

        let offset = target - pest.position;
        let distance = offset.length();
        if distance > 0.0 {
            pest.position += offset / distance * pest.effective_speed() * dt;
        }

        contact(&mut world.player, pest, true, out_events);
        if world.companion.actor.is_alive() {
            contact(&mut world.companion.actor, pest, false, out_events);
        }
    }
}

fn contact(actor: &mut Actor, pest: &Pest, player: bool, out_events: &mut Vec<Event>) {
    if actor.invulnerable || actor.position.distance(pest.position) >= actor.radius + pest.radius {
        return;
    }
    actor.health -= pest.damage;
    actor.grant_invulnerability(CONTACT_INVULNERABILITY);
    out_events.push(Event::ActorDamaged {
        player,
        amount: pest.damage,
    });
}

fn resolve_hits(world: &mut World, out_events: &mut Vec<Event>) {
    let mut casualties = Vec::new();
    world
        .combat
        .resolve(&mut world.projectiles, &mut world.pests, &mut casualties);

    for casualty in &casualties {
        world.score = world.score.saturating_add(KILL_SCORE);
        drop_loot(world, casualty.position);
        out_events.push(Event::PestKilled {
            pest: casualty.pest,
            kind: casualty.kind,
            position: casualty.position,
        });
    }

    let kills = u32::try_from(casualties.len()).unwrap_or(u32::MAX);
    world.director.record_kills(kills);
    if let Some(season) = world.director.roll_over() {
        out_events.push(Event::SeasonCompleted { season });
    }
}

fn drop_loot(world: &mut World, position: Vec2) {
    let value = world.rng.gen_range(5..=14);
    let id = world.ids.coin();
    world.coins.push(Coin {
        id,
        position,
        value,
        lifetime: COIN_LIFETIME,
    });

    if world.rng.gen::<f32>() >= PICKUP_CHANCE {
        return;
    }
    let ammo = AmmoKind::LIMITED[world.rng.gen_range(0..AmmoKind::LIMITED.len())];
    let jitter_x = world.rng.gen::<f32>() - 0.5;
    let jitter_y = world.rng.gen::<f32>() - 0.5;
    let amount = world.rng.gen_range(3..=7);
    let id = world.ids.pickup();
    world.pickups.push(AmmoPickup {
        id,
        position: position + Vec2::new(jitter_x, jitter_y) * PICKUP_JITTER,
        ammo,
        amount,
        lifetime: PICKUP_LIFETIME,
    });
}

fn collect_loot(world: &mut World, dt: f32, out_events: &mut Vec<Event>) {
    let mut collectors = vec![(world.player.position, world.player.radius)];
    if world.companion.actor.is_alive() {
        collectors.push((world.companion.actor.position, world.companion.actor.radius));
    }
    let within = |point: Vec2, reach: f32| {
        collectors
            .iter()
            .any(|(position, radius)| position.distance(point) < radius + reach)
    };

    let mut credits = 0u32;
    world.coins.retain_mut(|coin| {
        coin.lifetime -= dt;
        if within(coin.position, COIN_REACH) {
            credits = credits.saturating_add(coin.value);
            return false;
        }
        coin.lifetime > 0.0
    });
    if credits > 0 {
        world.credits = world.credits.saturating_add(credits);
        out_events.push(Event::CreditsCollected { amount: credits });
    }

    let mut gathered = Vec::new();
    world.pickups.retain_mut(|pickup| {
        pickup.lifetime -= dt;
        if within(pickup.position, PICKUP_REACH) {
            gathered.push((pickup.ammo, pickup.amount));
            return false;
        }
        pickup.lifetime > 0.0
    });
    for (ammo, amount) in gathered {
        world.ammo.add(ammo, amount);
        out_events.push(Event::AmmoCollected { ammo, amount });
    }
}

fn run_powers(world: &mut World, dt: f32, out_events: &mut Vec<Event>) {
    let mut shots = Vec::new();
    for power in &mut world.powers {
        power.lifetime -= dt;
        power.fire_timer -= dt;
        if power.fire_timer > 0.0 || world.pests.is_empty() {
            continue;
        }
        if let Some(target) = nearest_pest(power.position, &world.pests) {
            if target.position.distance(power.position) < SCARECROW_RANGE {
                shots.push((power.position, target.position));
            }
        }
        power.fire_timer = SCARECROW_INTERVAL;
    }
    world.powers.retain(|power| power.lifetime > 0.0);

    for (from, to) in shots {
        abilities::scarecrow_shot(world, from, to);
        out_events.push(Event::ProjectilesFired {
            ammo: AmmoKind::Power,
            count: 1,
        });
    }
}

fn pilot(world: &World, actor: &Actor) -> Pilot {
    Pilot {
        position: actor.position,
        radius: actor.radius,
        speed: actor.speed * world.move_bonus(),
    }
}

fn drive_autopilot(
    world: &mut World,
    dt: f32,
    pointer: PointerState,
    out_events: &mut Vec<Event>,
) {
    let field = world.config.field;

    if world.ai_mode.drives_companion() && world.companion.actor.is_alive() {
        let fallback = Fallback::Guard {
            player: world.player.position,
            pointer: pointer.position,
        };
        let maneuver = world.autopilot.handle(
            &pilot(world, &world.companion.actor),
            &Surroundings {
                pickups: &world.pickups,
                coins: &world.coins,
                pests: &world.pests,
            },
            fallback,
            dt,
            field,
        );
        world.companion.actor.position = maneuver.position;

        if let Some(target) = maneuver.firing_solution() {
            let tool = world.companion.tool;
            if recovered(world.companion.last_fire, world.clock, world.fire_interval(tool)) {
                let shooter = Shooter {
                    position: maneuver.position,
                    radius: world.companion.actor.radius,
                    tool,
                };
                let aim = bearing(maneuver.position, target);
                let count = world.volley(shooter, aim, AmmoKind::Standard);
                world.companion.last_fire = Some(world.clock);
                out_events.push(Event::ProjectilesFired {
                    ammo: AmmoKind::Standard,
                    count,
                });
            }
        }
    }

    if world.ai_mode.drives_player() {
        let maneuver = world.autopilot.handle(
            &pilot(world, &world.player),
            &Surroundings {
                pickups: &world.pickups,
                coins: &world.coins,
                pests: &world.pests,
            },
            Fallback::Hold,
            dt,
            field,
        );
        world.player.position = maneuver.position;

        if let Some(target) = maneuver.firing_solution() {
            let tool = world.selected_tool;
            if recovered(world.last_fire, world.clock, world.fire_interval(tool)) {
                let shooter = world.player_shooter();
                let aim = bearing(maneuver.position, target);
                let count = world.volley(shooter, aim, AmmoKind::Standard);
                world.last_fire = Some(world.clock);
                out_events.push(Event::ProjectilesFired {
                    ammo: AmmoKind::Standard,
                    count,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_guardian_core::{AiMode, PestKind};

    fn place_pest(world: &mut World, position: Vec2) {
        let id = world.ids.pest();
        world.pests.push(Pest::from_profile(
            id,
            PestKind::Weed,
            position,
            PestKind::Weed.profile(1),
        ));
    }

    #[test]
    fn contact_damages_once_then_grants_invulnerability() {
        let mut world = World::new();
        let at = world.player.position;
        place_pest(&mut world, at + Vec2::new(10.0, 0.0));
        place_pest(&mut world, at + Vec2::new(-10.0, 0.0));

        let mut events = Vec::new();
        move_pests(&mut world, 0.0, &mut events);

        assert_eq!(world.player.health, 95.0);
        assert!(world.player.invulnerable);
        assert_eq!(
            events,
            vec![Event::ActorDamaged {
                player: true,
                amount: 5.0,
            }]
        );
    }

    #[test]
    fn coins_expire_when_nobody_collects_them() {
        let mut world = World::new();
        let id = world.ids.coin();
        world.coins.push(Coin {
            id,
            position: Vec2::new(700.0, 500.0),
            value: 9,
            lifetime: 0.05,
        });
        let mut events = Vec::new();
        collect_loot(&mut world, 0.1, &mut events);
        assert!(world.coins.is_empty());
        assert_eq!(world.credits, 50);
        assert!(events.is_empty());
    }

    #[test]
    fn dead_companion_collects_nothing() {
        let mut world = World::new();
        world.companion.actor.health = 0.0;
        let id = world.ids.pickup();
        world.pickups.push(AmmoPickup {
            id,
            position: world.companion.actor.position,
            ammo: AmmoKind::Piercing,
            amount: 4,
            lifetime: 15.0,
        });
        let mut events = Vec::new();
        collect_loot(&mut world, 0.1, &mut events);
        assert_eq!(world.pickups.len(), 1);
        assert_eq!(world.ammo.count(AmmoKind::Piercing), Some(20));
    }

    #[test]
    fn auto_mode_overrides_manual_keys() {
        let mut world = World::new();
        world.ai_mode = AiMode::Auto;
        let id = world.ids.pickup();
        world.pickups.push(AmmoPickup {
            id,
            position: Vec2::new(400.0, 200.0),
            ammo: AmmoKind::Homing,
            amount: 3,
            lifetime: 15.0,
        });
        let keys = KeyState {
            right: true,
            ..KeyState::default()
        };
        let mut events = Vec::new();
        run(&mut world, 0.1, keys, PointerState::default(), &mut events);
        assert!((world.player.position - Vec2::new(400.0, 285.0)).length() < 1e-3);
    }
}
