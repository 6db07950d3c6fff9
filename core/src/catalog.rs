//! Static shop catalogue: tools, abilities, and tiered upgrades.

use serde::{Deserialize, Serialize};

/// Projectile tools the player can own and equip.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ToolKind {
    /// Starter tool owned from the beginning.
    WateringCan,
    /// Faster, harder-hitting stream.
    GardenHose,
    /// Rapid low-damage spray.
    Sprinkler,
    /// Heavy, slow shots.
    RainMaker,
    /// Slowest and strongest tool.
    CloudSeeder,
}

/// Firing characteristics of a tool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolStats {
    /// Display name.
    pub name: &'static str,
    /// Damage dealt by each projectile before upgrades.
    pub damage: f32,
    /// Minimum seconds between shots before upgrades.
    pub fire_interval: f32,
    /// Projectile speed in world units per second.
    pub projectile_speed: f32,
    /// Projectile collision radius.
    pub projectile_radius: f32,
    /// Price in credits.
    pub cost: u32,
}

impl ToolKind {
    /// Every tool in shop order.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::WateringCan,
        ToolKind::GardenHose,
        ToolKind::Sprinkler,
        ToolKind::RainMaker,
        ToolKind::CloudSeeder,
    ];

    /// Returns the firing characteristics of the tool.
    #[must_use]
    pub const fn stats(self) -> ToolStats {
        match self {
            Self::WateringCan => ToolStats {
                name: "Watering Can",
                damage: 10.0,
                fire_interval: 0.4,
                projectile_speed: 225.0,
                projectile_radius: 4.0,
                cost: 0,
            },
            Self::GardenHose => ToolStats {
                name: "Garden Hose",
                damage: 15.0,
                fire_interval: 0.2,
                projectile_speed: 300.0,
                projectile_radius: 5.0,
                cost: 150,
            },
            Self::Sprinkler => ToolStats {
                name: "Sprinkler",
                damage: 8.0,
                fire_interval: 0.15,
                projectile_speed: 260.0,
                projectile_radius: 6.0,
                cost: 300,
            },
            Self::RainMaker => ToolStats {
                name: "Rain Maker",
                damage: 25.0,
                fire_interval: 0.55,
                projectile_speed: 375.0,
                projectile_radius: 8.0,
                cost: 600,
            },
            Self::CloudSeeder => ToolStats {
                name: "Cloud Seeder",
                damage: 50.0,
                fire_interval: 0.8,
                projectile_speed: 450.0,
                projectile_radius: 10.0,
                cost: 1000,
            },
        }
    }
}

/// Cooldown-gated special abilities.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AbilityKind {
    /// Flat damage to every pest near the player.
    FertilizerBomb,
    /// Ring of sixteen projectiles.
    PesticideSpray,
    /// Stationary defender that fires on nearby pests.
    Scarecrow,
    /// Temporary invulnerability.
    GreenhouseShield,
    /// Restores player energy.
    CompostHeal,
    /// Twenty projectiles at random angles.
    SeedBurst,
    /// Ten projectiles released one after another.
    BeeSwarm,
    /// Slows pests near the player for a while.
    RootTrap,
    /// Line of fast, heavy projectiles toward the pointer.
    SunBeam,
    /// Collects every coin near the player.
    QuickHarvest,
}

impl AbilityKind {
    /// Every ability in shop order.
    pub const ALL: [AbilityKind; 10] = [
        AbilityKind::FertilizerBomb,
        AbilityKind::PesticideSpray,
        AbilityKind::Scarecrow,
        AbilityKind::GreenhouseShield,
        AbilityKind::CompostHeal,
        AbilityKind::SeedBurst,
        AbilityKind::BeeSwarm,
        AbilityKind::RootTrap,
        AbilityKind::SunBeam,
        AbilityKind::QuickHarvest,
    ];

    /// Display name of the ability.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FertilizerBomb => "Fertilizer Bomb",
            Self::PesticideSpray => "Pesticide Spray",
            Self::Scarecrow => "Scarecrow",
            Self::GreenhouseShield => "Greenhouse Shield",
            Self::CompostHeal => "Compost Heal",
            Self::SeedBurst => "Seed Burst",
            Self::BeeSwarm => "Bee Swarm",
            Self::RootTrap => "Root Trap",
            Self::SunBeam => "Sun Beam",
            Self::QuickHarvest => "Quick Harvest",
        }
    }

    /// Seconds the ability needs to recharge after activation.
    #[must_use]
    pub const fn cooldown(self) -> f32 {
        match self {
            Self::FertilizerBomb => 5.0,
            Self::PesticideSpray => 8.0,
            Self::Scarecrow => 15.0,
            Self::GreenhouseShield => 20.0,
            Self::CompostHeal => 12.0,
            Self::SeedBurst => 6.0,
            Self::BeeSwarm => 10.0,
            Self::RootTrap => 7.0,
            Self::SunBeam => 9.0,
            Self::QuickHarvest => 15.0,
        }
    }

    /// One-off price in credits.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::FertilizerBomb => 200,
            Self::PesticideSpray => 300,
            Self::Scarecrow => 400,
            Self::GreenhouseShield => 500,
            Self::CompostHeal => 250,
            Self::SeedBurst => 350,
            Self::BeeSwarm => 450,
            Self::RootTrap => 300,
            Self::SunBeam => 550,
            Self::QuickHarvest => 400,
        }
    }
}

/// Number of tiers available for every upgrade.
pub const UPGRADE_TIERS: usize = 3;

/// Tiered stat improvements sold by the shop.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum UpgradeKind {
    /// Raises the maximum energy of both actors.
    MaxEnergy,
    /// Raises movement speed by 15% per tier.
    MoveSpeed,
    /// Raises projectile damage by 20% per tier.
    WaterDamage,
    /// Raises fire rate by 15% per tier.
    FireRate,
}

impl UpgradeKind {
    /// Every upgrade in shop order.
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::MaxEnergy,
        UpgradeKind::MoveSpeed,
        UpgradeKind::WaterDamage,
        UpgradeKind::FireRate,
    ];

    /// Display name of the upgrade.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MaxEnergy => "Max Energy",
            Self::MoveSpeed => "Movement Speed",
            Self::WaterDamage => "Water Damage",
            Self::FireRate => "Watering Speed",
        }
    }

    /// Descriptions of each tier, in purchase order.
    #[must_use]
    pub const fn tier_descriptions(self) -> [&'static str; UPGRADE_TIERS] {
        match self {
            Self::MaxEnergy => ["+20 Max Energy", "+20 Max Energy", "+30 Max Energy"],
            Self::MoveSpeed => ["+15% Speed", "+15% Speed", "+20% Speed"],
            Self::WaterDamage => ["+20% Damage", "+20% Damage", "+30% Damage"],
            Self::FireRate => ["+15% Fire Rate", "+15% Fire Rate", "+20% Fire Rate"],
        }
    }

    /// Price of each tier, in purchase order.
    #[must_use]
    pub const fn tier_costs(self) -> [u32; UPGRADE_TIERS] {
        match self {
            Self::MaxEnergy => [100, 200, 400],
            Self::MoveSpeed => [150, 300, 500],
            Self::WaterDamage => [200, 400, 600],
            Self::FireRate => [180, 350, 550],
        }
    }
}
