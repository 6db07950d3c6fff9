use std::time::Duration;

use garden_guardian_core::{
    AbilityKind, AiMode, AmmoKind, Command, Event, KeyState, PointerState, PurchaseItem,
    UpgradeKind, Vec2,
};
use garden_guardian_world::{self as world, query, World, WorldConfig};

#[test]
fn deterministic_replay_produces_identical_runs() {
    let first = replay(7, scripted_commands());
    let second = replay(7, scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(first.spawned > 0, "script never spawned a pest");
}

#[test]
fn different_seeds_produce_different_waves() {
    let opening = vec![Command::Tick {
        dt: Duration::from_millis(16),
        keys: KeyState::default(),
        pointer: PointerState::default(),
    }];
    let first = replay(7, opening.clone());
    let second = replay(8, opening);

    assert_eq!(first.spawned, 2);
    assert_ne!(first.pest_positions, second.pest_positions);
}

fn replay(seed: u64, commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::with_config(WorldConfig {
        seed,
        ..WorldConfig::default()
    });
    let mut log = Vec::new();

    for command in commands {
        world::apply(&mut world, command, &mut log);
    }

    let spawned = log
        .iter()
        .filter(|event| matches!(event, Event::PestSpawned { .. }))
        .count();
    let pest_positions = query::pests(&world)
        .iter()
        .map(|pest| (pest.id.get(), pest.position.x.to_bits(), pest.position.y.to_bits()))
        .collect();

    ReplayOutcome {
        world,
        events: log,
        spawned,
        pest_positions,
    }
}

fn scripted_commands() -> Vec<Command> {
    let pointer = PointerState {
        position: Vec2::new(620.0, 180.0),
        pressed: true,
    };
    let mut commands = vec![
        Command::Purchase {
            item: PurchaseItem::Upgrade(UpgradeKind::WaterDamage),
        },
        Command::SetAiMode {
            mode: AiMode::Assist,
        },
        Command::SelectAmmo {
            ammo: AmmoKind::Explosive,
        },
    ];

    for frame in 0..900u32 {
        let keys = KeyState {
            left: frame % 120 < 30,
            up: frame % 90 > 60,
            ..KeyState::default()
        };
        commands.push(Command::Tick {
            dt: Duration::from_millis(16),
            keys,
            pointer,
        });
        if frame == 450 {
            commands.push(Command::CycleAiMode);
            commands.push(Command::ActivateAbility {
                ability: AbilityKind::SeedBurst,
                pointer,
            });
        }
    }

    commands
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    world: World,
    events: Vec<Event>,
    spawned: usize,
    pest_positions: Vec<(u32, u32, u32)>,
}
