//! Drives a world through a fixed number of frames with no human input.

use std::collections::BTreeMap;

use garden_guardian_core::{AmmoKind, Command, Event, KeyState, PestKind, PointerState};
use garden_guardian_world::{self as world, query, World, WorldConfig};
use log::{debug, info};
use serde::Serialize;

use crate::config::RunConfig;

/// Outcome of a headless run, printed as JSON.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct RunSummary {
    pub(crate) seed: u64,
    pub(crate) frames: u32,
    pub(crate) seconds: f32,
    pub(crate) season: u32,
    pub(crate) seasons_completed: u32,
    pub(crate) pests_spawned: u32,
    pub(crate) pests_killed: u32,
    pub(crate) kills_by_kind: BTreeMap<PestKind, u32>,
    pub(crate) ammo_left: BTreeMap<AmmoKind, u32>,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) credits: u32,
    pub(crate) player_energy: f32,
    pub(crate) game_over: bool,
}

#[derive(Default)]
struct Tally {
    seasons_completed: u32,
    pests_spawned: u32,
    pests_killed: u32,
    kills_by_kind: BTreeMap<PestKind, u32>,
}

impl Tally {
    fn absorb(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::SeasonCompleted { season } => {
                    self.seasons_completed += 1;
                    debug!("season {season} completed");
                }
                Event::PestSpawned { .. } => self.pests_spawned += 1,
                Event::PestKilled { kind, .. } => {
                    self.pests_killed += 1;
                    *self.kills_by_kind.entry(*kind).or_default() += 1;
                }
                _ => {}
            }
        }
    }
}

/// Plays up to `config.ticks` frames, stopping early on game over.
pub(crate) fn run(config: &RunConfig, stored_high_score: u32) -> RunSummary {
    let mut world = World::with_config(WorldConfig {
        seed: config.seed,
        high_score: stored_high_score,
        ..WorldConfig::default()
    });
    let mut events = Vec::new();
    let mut tally = Tally::default();
    info!("{}", query::welcome_banner(&world));

    world::apply(
        &mut world,
        Command::SetAiMode {
            mode: config.ai_mode,
        },
        &mut events,
    );

    let mut frames = 0;
    while frames < config.ticks && !query::is_game_over(&world) {
        events.clear();
        world::apply(
            &mut world,
            Command::Tick {
                dt: config.frame,
                keys: KeyState::default(),
                pointer: PointerState::default(),
            },
            &mut events,
        );
        tally.absorb(&events);
        frames += 1;
    }

    let score = query::score(&world);
    let summary = RunSummary {
        seed: config.seed,
        frames,
        seconds: query::clock(&world),
        season: query::season(&world),
        seasons_completed: tally.seasons_completed,
        pests_spawned: tally.pests_spawned,
        pests_killed: tally.pests_killed,
        kills_by_kind: tally.kills_by_kind,
        ammo_left: query::ammo(&world).iter().collect(),
        score,
        high_score: query::high_score(&world).max(score),
        credits: query::credits(&world),
        player_energy: query::player(&world).health,
        game_over: query::is_game_over(&world),
    };
    info!(
        "run finished after {} frames with score {}",
        summary.frames, summary.score
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_guardian_core::AiMode;
    use std::time::Duration;

    fn config(seed: u64, ticks: u32) -> RunConfig {
        RunConfig {
            seed,
            ticks,
            frame: Duration::from_millis(16),
            ai_mode: AiMode::Auto,
            high_score_path: None,
        }
    }

    #[test]
    fn same_seed_gives_same_summary() {
        assert_eq!(run(&config(3, 1_200), 0), run(&config(3, 1_200), 0));
    }

    #[test]
    fn zero_ticks_reports_the_opening_state() {
        let summary = run(&config(1, 0), 75);

        assert_eq!(summary.frames, 0);
        assert_eq!(summary.seconds, 0.0);
        assert_eq!(summary.season, 1);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.high_score, 75);
        assert_eq!(summary.credits, 50);
        assert!(summary.kills_by_kind.is_empty());
        assert_eq!(
            summary.ammo_left.into_iter().collect::<Vec<_>>(),
            vec![
                (AmmoKind::Spread, 30),
                (AmmoKind::Piercing, 20),
                (AmmoKind::Explosive, 15),
                (AmmoKind::Homing, 10),
            ]
        );
        assert!(!summary.game_over);
    }

    #[test]
    fn pests_arrive_during_a_long_run() {
        let summary = run(&config(11, 600), 0);

        assert!(summary.pests_spawned > 0);
        assert!(summary.pests_killed <= summary.pests_spawned);
        assert_eq!(summary.score, summary.pests_killed * 10);
        assert_eq!(
            summary.kills_by_kind.values().sum::<u32>(),
            summary.pests_killed
        );
    }
}
