#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that moves projectiles and resolves their collisions with pests.
//!
//! Collision testing is a brute-force circle overlap over every projectile and
//! pest pair. Entity counts stay in the low hundreds, so no spatial index is
//! maintained.

use garden_guardian_core::{
    AmmoKind, Pest, PestId, PestKind, PlayField, Projectile, ProjectileId, Vec2,
};

/// Fraction of the remaining heading error corrected by homing projectiles each tick.
pub const HOMING_TURN_RATE: f32 = 0.1;

/// Radius of the splash applied when an explosive projectile first connects.
pub const EXPLOSION_RADIUS: f32 = 80.0;

/// Share of the projectile's damage applied by the explosive splash.
pub const EXPLOSION_DAMAGE_FACTOR: f32 = 0.5;

/// Distance beyond the play-field edges at which projectiles are culled.
pub const BOUNDS_MARGIN: f32 = 50.0;

/// Pest destroyed during collision resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Casualty {
    /// Identifier of the destroyed pest.
    pub pest: PestId,
    /// Kind of the destroyed pest.
    pub kind: PestKind,
    /// Location at which the pest died.
    pub position: Vec2,
}

/// Projectile system that reuses scratch buffers across ticks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Combat {
    spent: Vec<ProjectileId>,
}

impl Combat {
    /// Creates a new combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Steers homing projectiles, integrates every position and culls strays.
    ///
    /// Homing correction is applied before integration so the new heading is
    /// used for this tick's displacement.
    pub fn advance(
        &mut self,
        projectiles: &mut Vec<Projectile>,
        pests: &[Pest],
        dt: f32,
        field: PlayField,
    ) {
        for projectile in projectiles.iter_mut() {
            if projectile.ammo == AmmoKind::Homing {
                steer_homing(projectile, pests);
            }
            projectile.position += projectile.velocity * dt;
        }

        projectiles
            .retain(|projectile| field.contains_with_margin(projectile.position, BOUNDS_MARGIN));
    }

    /// Applies projectile hits to pests, then reaps every pest at or below zero health.
    ///
    /// Casualties are appended to `out` in pest order. Pests already at zero
    /// health before resolution, for example from an ability, are reaped too.
    pub fn resolve(
        &mut self,
        projectiles: &mut Vec<Projectile>,
        pests: &mut Vec<Pest>,
        out: &mut Vec<Casualty>,
    ) {
        self.spent.clear();

        for projectile in projectiles.iter_mut() {
            for index in 0..pests.len() {
                if !strikes(projectile, &pests[index]) {
                    continue;
                }

                pests[index].health -= projectile.damage;

                if projectile.ammo == AmmoKind::Explosive && !projectile.exploded {
                    projectile.exploded = true;
                    detonate(projectile, pests);
                }

                if projectile.ammo == AmmoKind::Piercing {
                    projectile.pierced.push(pests[index].id);
                } else {
                    self.spent.push(projectile.id);
                    break;
                }
            }
        }

        if !self.spent.is_empty() {
            let spent = &self.spent;
            projectiles.retain(|projectile| !spent.contains(&projectile.id));
        }

        for pest in pests.iter().filter(|pest| pest.is_dead()) {
            out.push(Casualty {
                pest: pest.id,
                kind: pest.kind,
                position: pest.position,
            });
        }
        pests.retain(|pest| !pest.is_dead());
    }
}

/// Returns the pest closest to `point`, preferring the smaller id on ties.
///
/// Pests already at zero health are ignored.
#[must_use]
pub fn nearest_pest(point: Vec2, pests: &[Pest]) -> Option<&Pest> {
    let mut best: Option<(f32, &Pest)> = None;
    for pest in pests.iter().filter(|pest| !pest.is_dead()) {
        let distance = point.distance(pest.position);
        let better = match best {
            Some((best_distance, best_pest)) => {
                distance < best_distance || (distance == best_distance && pest.id < best_pest.id)
            }
            None => true,
        };
        if better {
            best = Some((distance, pest));
        }
    }
    best.map(|(_, pest)| pest)
}

fn strikes(projectile: &Projectile, pest: &Pest) -> bool {
    if pest.is_dead() {
        return false;
    }
    if projectile.ammo == AmmoKind::Piercing && projectile.pierced.contains(&pest.id) {
        return false;
    }
    projectile.position.distance(pest.position) < projectile.radius + pest.radius
}

fn detonate(projectile: &Projectile, pests: &mut [Pest]) {
    let splash = projectile.damage * EXPLOSION_DAMAGE_FACTOR;
    for pest in pests.iter_mut() {
        if pest.position.distance(projectile.position) < EXPLOSION_RADIUS {
            pest.health -= splash;
        }
    }
}

fn steer_homing(projectile: &mut Projectile, pests: &[Pest]) {
    let Some(target) = nearest_pest(projectile.position, pests) else {
        return;
    };

    let offset = target.position - projectile.position;
    let angle = offset.y.atan2(offset.x);
    let speed = projectile.velocity.length();
    let desired = Vec2::new(angle.cos(), angle.sin()) * speed;
    projectile.velocity += (desired - projectile.velocity) * HOMING_TURN_RATE;
}
