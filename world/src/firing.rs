//! Shot patterns and fire cadence.

use garden_guardian_core::{AmmoKind, Event, FireError, Projectile, ToolKind, Vec2};

use crate::World;

/// Extra distance between the shooter's half-radius and the muzzle.
const MUZZLE_CLEARANCE: f32 = 5.0;
/// Angular step between the projectiles of a spread shot, in radians.
const SPREAD_STEP: f32 = 0.2;
/// Spread shots fan out this many steps to each side of the aim.
const SPREAD_HALF_WIDTH: i32 = 2;

/// Unit vector pointing along `angle`.
pub(crate) fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle from `from` toward `to`.
pub(crate) fn bearing(from: Vec2, to: Vec2) -> f32 {
    let offset = to - from;
    offset.y.atan2(offset.x)
}

/// Reports whether more than `interval` seconds have passed since `last_fire`.
pub(crate) fn recovered(last_fire: Option<f32>, now: f32, interval: f32) -> bool {
    last_fire.map_or(true, |last| now - last > interval)
}

/// Body and tool of an actor about to fire.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Shooter {
    pub(crate) position: Vec2,
    pub(crate) radius: f32,
    pub(crate) tool: ToolKind,
}

/// Accepted player shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Volley {
    ammo: AmmoKind,
    count: usize,
    fallback: Option<AmmoKind>,
}

impl Volley {
    pub(crate) fn report(self, out_events: &mut Vec<Event>) {
        if let Some(depleted) = self.fallback {
            out_events.push(Event::AmmoFallback { depleted });
        }
        out_events.push(Event::ProjectilesFired {
            ammo: self.ammo,
            count: self.count,
        });
    }
}

impl World {
    /// Seconds the tool needs between shots after the fire-rate upgrade.
    pub(crate) fn fire_interval(&self, tool: ToolKind) -> f32 {
        tool.stats().fire_interval / self.fire_rate_bonus()
    }

    pub(crate) fn player_shooter(&self) -> Shooter {
        Shooter {
            position: self.player.position,
            radius: self.player.radius,
            tool: self.selected_tool,
        }
    }

    /// Emits the tool's pattern for `ammo` along `aim`, returning the projectile count.
    pub(crate) fn volley(&mut self, shooter: Shooter, aim: f32, ammo: AmmoKind) -> usize {
        let stats = shooter.tool.stats();
        let origin = shooter.position + heading(aim) * (shooter.radius / 2.0 + MUZZLE_CLEARANCE);
        let damage = stats.damage * self.damage_bonus();

        if ammo == AmmoKind::Spread {
            for step in -SPREAD_HALF_WIDTH..=SPREAD_HALF_WIDTH {
                let angle = aim + step as f32 * SPREAD_STEP;
                self.launch(
                    origin,
                    heading(angle) * stats.projectile_speed,
                    stats.projectile_radius,
                    damage,
                    ammo,
                );
            }
            (2 * SPREAD_HALF_WIDTH + 1) as usize
        } else {
            self.launch(
                origin,
                heading(aim) * stats.projectile_speed,
                stats.projectile_radius,
                damage,
                ammo,
            );
            1
        }
    }

    pub(crate) fn launch(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        damage: f32,
        ammo: AmmoKind,
    ) {
        let id = self.ids.projectile();
        self.projectiles
            .push(Projectile::new(id, position, velocity, radius, damage, ammo));
    }
}

/// Fires the player's equipped tool, drawing limited ammo when available.
///
/// A depleted limited kind fires standard ammo instead; when the depleted
/// kind was the current selection the selection also reverts to standard.
pub(crate) fn fire_player(
    world: &mut World,
    aim: f32,
    requested: AmmoKind,
) -> Result<Volley, FireError> {
    if world.game_over {
        return Err(FireError::GameOver);
    }
    if requested == AmmoKind::Power {
        return Err(FireError::Unselectable);
    }
    let interval = world.fire_interval(world.selected_tool);
    if !recovered(world.last_fire, world.clock, interval) {
        return Err(FireError::Recovering);
    }

    let (ammo, fallback) = if !requested.is_limited() || world.ammo.take_one(requested) {
        (requested, None)
    } else {
        if world.selected_ammo == requested {
            world.selected_ammo = AmmoKind::Standard;
        }
        (AmmoKind::Standard, Some(requested))
    };

    let shooter = world.player_shooter();
    let count = world.volley(shooter, aim, ammo);
    world.last_fire = Some(world.clock);

    Ok(Volley {
        ammo,
        count,
        fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn spread_fans_five_projectiles_and_spends_one_unit() {
        let mut world = World::new();
        let volley = fire_player(&mut world, 0.0, AmmoKind::Spread).expect("fires");

        assert_eq!(volley.count, 5);
        assert_eq!(world.projectiles.len(), 5);
        assert_eq!(world.ammo.count(AmmoKind::Spread), Some(29));
        let origin = Vec2::new(400.0 + 15.0, 300.0);
        for projectile in &world.projectiles {
            assert!((projectile.position - origin).length() < 1e-4);
            assert!((projectile.velocity.length() - 225.0).abs() < 1e-3);
        }
    }

    #[test]
    fn cadence_blocks_rapid_fire_until_interval_passes() {
        let mut world = World::new();
        assert!(fire_player(&mut world, FRAC_PI_2, AmmoKind::Standard).is_ok());
        assert_eq!(
            fire_player(&mut world, FRAC_PI_2, AmmoKind::Standard),
            Err(FireError::Recovering)
        );
        world.clock = 0.41;
        assert!(fire_player(&mut world, FRAC_PI_2, AmmoKind::Standard).is_ok());
        assert_eq!(world.projectiles.len(), 2);
    }

    #[test]
    fn depleted_selection_falls_back_to_standard() {
        let mut world = World::new();
        while world.ammo.take_one(AmmoKind::Explosive) {}
        world.selected_ammo = AmmoKind::Explosive;

        let volley = fire_player(&mut world, 0.0, AmmoKind::Explosive).expect("fires");

        assert_eq!(volley.ammo, AmmoKind::Standard);
        assert_eq!(volley.fallback, Some(AmmoKind::Explosive));
        assert_eq!(world.selected_ammo, AmmoKind::Standard);
        assert_eq!(world.ammo.count(AmmoKind::Explosive), Some(0));
        assert_eq!(world.projectiles[0].ammo, AmmoKind::Standard);
    }

    #[test]
    fn power_ammo_is_reserved_for_abilities() {
        let mut world = World::new();
        assert_eq!(
            fire_player(&mut world, 0.0, AmmoKind::Power),
            Err(FireError::Unselectable)
        );
        assert!(world.projectiles.is_empty());
        assert_eq!(world.last_fire, None);
    }
}
