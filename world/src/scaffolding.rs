//! Direct state seeding for scenario tests.
//!
//! Scenarios often need a pest at an exact spot or a credit balance that
//! would take minutes of simulated play to earn. These helpers write that
//! state directly and are only compiled for tests or with the `scaffolding`
//! feature.

use garden_guardian_core::{
    AbilityKind, AmmoKind, Coin, CoinId, Pest, PestId, PestKind, Projectile, ProjectileId, Vec2,
};

use crate::World;

/// Inserts a season-one pest of `kind` at `position` with the given health.
pub fn insert_pest(world: &mut World, kind: PestKind, position: Vec2, health: f32) -> PestId {
    let id = world.ids.pest();
    let mut pest = Pest::from_profile(id, kind, position, kind.profile(1));
    pest.health = health;
    pest.max_health = health;
    world.pests.push(pest);
    id
}

/// Inserts a projectile with explicit motion and damage.
pub fn insert_projectile(
    world: &mut World,
    position: Vec2,
    velocity: Vec2,
    radius: f32,
    damage: f32,
    ammo: AmmoKind,
) -> ProjectileId {
    let id = world.ids.projectile();
    world
        .projectiles
        .push(Projectile::new(id, position, velocity, radius, damage, ammo));
    id
}

/// Inserts a coin worth `value` credits.
pub fn insert_coin(world: &mut World, position: Vec2, value: u32) -> CoinId {
    let id = world.ids.coin();
    world.coins.push(Coin {
        id,
        position,
        value,
        lifetime: 10.0,
    });
    id
}

/// Overwrites the credit balance.
pub fn set_credits(world: &mut World, credits: u32) {
    world.credits = credits;
}

/// Raises the kills tallied during the current season to `kills`.
pub fn set_season_kills(world: &mut World, kills: u32) {
    let tallied = world.director.killed();
    if kills >= tallied {
        world.director.record_kills(kills - tallied);
    }
}

/// Moves the player character.
pub fn place_player(world: &mut World, position: Vec2) {
    world.player.position = position;
}

/// Moves the companion character.
pub fn place_companion(world: &mut World, position: Vec2) {
    world.companion.actor.position = position;
}

/// Grants an ability without charging for it.
pub fn grant_ability(world: &mut World, ability: AbilityKind) {
    let _ = world.owned_abilities.insert(ability);
}

/// Postpones the next pest spawn by `seconds`.
pub fn delay_spawns(world: &mut World, seconds: f32) {
    world.director.postpone(seconds);
}

/// Overwrites the player's remaining energy.
pub fn set_player_health(world: &mut World, health: f32) {
    world.player.health = health;
}
