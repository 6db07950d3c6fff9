//! Credit economy: purchases, tool and ammo selection, upgrade bonuses.

use std::collections::BTreeMap;

use garden_guardian_core::{
    AmmoError, AmmoKind, PurchaseError, PurchaseItem, ToolError, ToolKind, Upgrade, UpgradeKind,
    UPGRADE_TIERS,
};

use log::debug;

use crate::{World, BASE_ENERGY};

const STARTING_AMMO: [(AmmoKind, u32); 4] = [
    (AmmoKind::Spread, 30),
    (AmmoKind::Piercing, 20),
    (AmmoKind::Explosive, 15),
    (AmmoKind::Homing, 10),
];

/// Cumulative max-energy gain after each tier of the energy upgrade.
const ENERGY_BY_TIER: [f32; UPGRADE_TIERS + 1] = [0.0, 20.0, 40.0, 70.0];

const MOVE_SPEED_STEP: f32 = 0.15;
const FIRE_RATE_STEP: f32 = 0.15;
const WATER_DAMAGE_STEP: f32 = 0.2;

/// Finite counters for the limited ammo kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmmoBelt {
    counts: BTreeMap<AmmoKind, u32>,
}

impl AmmoBelt {
    pub(crate) fn starting() -> Self {
        Self {
            counts: STARTING_AMMO.into_iter().collect(),
        }
    }

    /// Units left for `kind`, or `None` for kinds that never run out.
    #[must_use]
    pub fn count(&self, kind: AmmoKind) -> Option<u32> {
        if !kind.is_limited() {
            return None;
        }
        Some(self.counts.get(&kind).copied().unwrap_or(0))
    }

    /// Iterates over every limited kind and its remaining units.
    pub fn iter(&self) -> impl Iterator<Item = (AmmoKind, u32)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Removes one unit, returning `false` when none remain.
    pub(crate) fn take_one(&mut self, kind: AmmoKind) -> bool {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn add(&mut self, kind: AmmoKind, amount: u32) {
        if !kind.is_limited() {
            return;
        }
        let count = self.counts.entry(kind).or_insert(0);
        *count = count.saturating_add(amount);
    }
}

impl World {
    pub(crate) fn upgrade(&self, kind: UpgradeKind) -> Upgrade {
        self.upgrades
            .get(&kind)
            .copied()
            .unwrap_or_else(|| Upgrade::new(kind))
    }

    pub(crate) fn move_bonus(&self) -> f32 {
        self.upgrade(UpgradeKind::MoveSpeed).bonus(MOVE_SPEED_STEP)
    }

    pub(crate) fn fire_rate_bonus(&self) -> f32 {
        self.upgrade(UpgradeKind::FireRate).bonus(FIRE_RATE_STEP)
    }

    pub(crate) fn damage_bonus(&self) -> f32 {
        self.upgrade(UpgradeKind::WaterDamage)
            .bonus(WATER_DAMAGE_STEP)
    }

    fn refresh_max_energy(&mut self) {
        let tier = self.upgrade(UpgradeKind::MaxEnergy).tier();
        let max = BASE_ENERGY + ENERGY_BY_TIER[tier.min(UPGRADE_TIERS)];
        self.player.max_health = max;
        self.companion.actor.max_health = max;
    }
}

/// Debits the price of `item` and grants it, returning the price paid.
pub(crate) fn purchase(world: &mut World, item: PurchaseItem) -> Result<u32, PurchaseError> {
    let cost = match item {
        PurchaseItem::Tool(tool) => {
            if world.owned_tools.contains(&tool) {
                return Err(PurchaseError::AlreadyOwned);
            }
            tool.stats().cost
        }
        PurchaseItem::Ability(ability) => {
            if world.owned_abilities.contains(&ability) {
                return Err(PurchaseError::AlreadyOwned);
            }
            ability.cost()
        }
        PurchaseItem::Upgrade(kind) => world
            .upgrade(kind)
            .next_cost()
            .ok_or(PurchaseError::Maxed)?,
    };

    if world.credits < cost {
        return Err(PurchaseError::InsufficientCredits {
            cost,
            available: world.credits,
        });
    }

    world.credits -= cost;
    match item {
        PurchaseItem::Tool(tool) => {
            let _ = world.owned_tools.insert(tool);
        }
        PurchaseItem::Ability(ability) => {
            let _ = world.owned_abilities.insert(ability);
        }
        PurchaseItem::Upgrade(kind) => {
            let upgrade = world
                .upgrades
                .entry(kind)
                .or_insert_with(|| Upgrade::new(kind));
            if let Some(description) = upgrade.next_description() {
                debug!("{}: {description}", upgrade.name());
            }
            upgrade.advance();
            if kind == UpgradeKind::MaxEnergy {
                world.refresh_max_energy();
            }
        }
    }
    Ok(cost)
}

pub(crate) fn switch_tool(world: &mut World, tool: ToolKind) -> Result<(), ToolError> {
    if !world.owned_tools.contains(&tool) {
        return Err(ToolError::NotOwned);
    }
    world.selected_tool = tool;
    Ok(())
}

pub(crate) fn select_ammo(world: &mut World, ammo: AmmoKind) -> Result<(), AmmoError> {
    if ammo == AmmoKind::Power {
        return Err(AmmoError::Unselectable);
    }
    if world.ammo.count(ammo) == Some(0) {
        return Err(AmmoError::Depleted);
    }
    world.selected_ammo = ammo;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_guardian_core::AbilityKind;

    #[test]
    fn energy_upgrade_raises_both_ceilings_cumulatively() {
        let mut world = World::new();
        world.credits = 10_000;
        let expected = [120.0, 140.0, 170.0];
        for max in expected {
            let paid = purchase(&mut world, PurchaseItem::Upgrade(UpgradeKind::MaxEnergy));
            assert!(paid.is_ok());
            assert_eq!(world.player.max_health, max);
            assert_eq!(world.companion.actor.max_health, max);
        }
        assert_eq!(
            purchase(&mut world, PurchaseItem::Upgrade(UpgradeKind::MaxEnergy)),
            Err(PurchaseError::Maxed)
        );
        assert_eq!(world.credits, 10_000 - 100 - 200 - 400);
    }

    #[test]
    fn owned_items_cannot_be_bought_twice() {
        let mut world = World::new();
        world.credits = 1_000;
        assert_eq!(
            purchase(&mut world, PurchaseItem::Tool(ToolKind::WateringCan)),
            Err(PurchaseError::AlreadyOwned)
        );
        assert_eq!(
            purchase(&mut world, PurchaseItem::Ability(AbilityKind::RootTrap)),
            Ok(300)
        );
        assert_eq!(
            purchase(&mut world, PurchaseItem::Ability(AbilityKind::RootTrap)),
            Err(PurchaseError::AlreadyOwned)
        );
        assert_eq!(world.credits, 700);
    }

    #[test]
    fn unowned_tool_cannot_be_equipped() {
        let mut world = World::new();
        assert_eq!(
            switch_tool(&mut world, ToolKind::GardenHose),
            Err(ToolError::NotOwned)
        );
        assert_eq!(world.selected_tool, ToolKind::WateringCan);
    }

    #[test]
    fn depleted_and_power_ammo_cannot_be_selected() {
        let mut world = World::new();
        for _ in 0..10 {
            assert!(world.ammo.take_one(AmmoKind::Homing));
        }
        assert!(!world.ammo.take_one(AmmoKind::Homing));
        assert_eq!(
            select_ammo(&mut world, AmmoKind::Homing),
            Err(AmmoError::Depleted)
        );
        assert_eq!(
            select_ammo(&mut world, AmmoKind::Power),
            Err(AmmoError::Unselectable)
        );
        assert_eq!(select_ammo(&mut world, AmmoKind::Spread), Ok(()));
        assert_eq!(world.selected_ammo, AmmoKind::Spread);
    }

    #[test]
    fn percentage_bonuses_follow_tiers() {
        let mut world = World::new();
        world.credits = 10_000;
        assert!(purchase(&mut world, PurchaseItem::Upgrade(UpgradeKind::WaterDamage)).is_ok());
        assert!(purchase(&mut world, PurchaseItem::Upgrade(UpgradeKind::FireRate)).is_ok());
        assert!((world.damage_bonus() - 1.2).abs() < 1e-6);
        assert!((world.fire_rate_bonus() - 1.15).abs() < 1e-6);
        assert!((world.move_bonus() - 1.0).abs() < 1e-6);
    }
}
