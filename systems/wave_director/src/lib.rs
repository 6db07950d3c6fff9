#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave director responsible for pest spawning and season progression.

use garden_guardian_core::{PestKind, PestProfile, PlayField, Vec2};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const PESTS_PER_SPAWN: usize = 2;
const EDGE_OFFSET: f32 = 20.0;

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    spawn_interval: f32,
    minimum_interval: f32,
    interval_step: f32,
    initial_quota: u32,
    quota_step: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration using the provided initial spawn cadence and seed.
    ///
    /// The remaining knobs start at their standard values: a quota of 20
    /// pests growing by 10 per season, and an interval shrinking by 0.1 s per
    /// season down to 0.5 s.
    #[must_use]
    pub const fn new(spawn_interval: f32, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            minimum_interval: 0.5,
            interval_step: 0.1,
            initial_quota: 20,
            quota_step: 10,
            rng_seed,
        }
    }

    /// Overrides the kill quota of the first season.
    #[must_use]
    pub const fn with_initial_quota(mut self, quota: u32) -> Self {
        self.initial_quota = quota;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(3.0, 0)
    }
}

/// Pest requested by the director, awaiting an identifier from the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PestSpawn {
    /// Kind of pest to create.
    pub kind: PestKind,
    /// Location just outside the play-field.
    pub position: Vec2,
    /// Stats scaled for the current season.
    pub profile: PestProfile,
}

/// Season state and spawn scheduling.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveDirector {
    season: u32,
    quota: u32,
    killed: u32,
    spawn_timer: f32,
    spawn_interval: f32,
    minimum_interval: f32,
    interval_step: f32,
    quota_step: u32,
    rng: ChaCha8Rng,
}

impl WaveDirector {
    /// Creates a director at the start of season one.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            season: 1,
            quota: config.initial_quota,
            killed: 0,
            spawn_timer: 0.0,
            spawn_interval: config.spawn_interval,
            minimum_interval: config.minimum_interval,
            interval_step: config.interval_step,
            quota_step: config.quota_step,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Current season, starting at one.
    #[must_use]
    pub const fn season(&self) -> u32 {
        self.season
    }

    /// Number of kills required to complete the current season.
    #[must_use]
    pub const fn quota(&self) -> u32 {
        self.quota
    }

    /// Kills tallied during the current season.
    #[must_use]
    pub const fn killed(&self) -> u32 {
        self.killed
    }

    /// Seconds until the next spawn attempt.
    #[must_use]
    pub const fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Seconds between spawns in the current season.
    #[must_use]
    pub const fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }

    /// Adds kills to the current season's tally.
    pub fn record_kills(&mut self, count: u32) {
        self.killed = self.killed.saturating_add(count);
    }

    /// Pushes the next spawn attempt back by `seconds`.
    pub fn postpone(&mut self, seconds: f32) {
        self.spawn_timer += seconds.max(0.0);
    }

    /// Advances to the next season when the quota is met.
    ///
    /// Returns the completed season, if any.
    pub fn roll_over(&mut self) -> Option<u32> {
        if self.killed < self.quota {
            return None;
        }

        let completed = self.season;
        self.season += 1;
        self.killed = 0;
        self.quota += self.quota_step;
        self.spawn_interval = (self.spawn_interval - self.interval_step).max(self.minimum_interval);
        debug!(
            "season {completed} complete; season {} needs {} kills, spawning every {:.2}s",
            self.season, self.quota, self.spawn_interval
        );
        Some(completed)
    }

    /// Rolls the season over if due, then counts down the spawn timer.
    ///
    /// When the timer expires and the quota is still open, a pair of pests is
    /// appended to `out` and the timer restarts at the current interval.
    /// Returns the completed season, if a rollover happened.
    pub fn handle(&mut self, dt: f32, field: PlayField, out: &mut Vec<PestSpawn>) -> Option<u32> {
        let completed = self.roll_over();

        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 && self.killed < self.quota {
            for _ in 0..PESTS_PER_SPAWN {
                let spawn = self.next_spawn(field);
                out.push(spawn);
            }
            self.spawn_timer = self.spawn_interval;
        }

        completed
    }

    fn next_spawn(&mut self, field: PlayField) -> PestSpawn {
        let position = match self.rng.gen_range(0..4) {
            0 => Vec2::new(self.rng.gen::<f32>() * field.width(), -EDGE_OFFSET),
            1 => Vec2::new(
                field.width() + EDGE_OFFSET,
                self.rng.gen::<f32>() * field.height(),
            ),
            2 => Vec2::new(
                self.rng.gen::<f32>() * field.width(),
                field.height() + EDGE_OFFSET,
            ),
            _ => Vec2::new(-EDGE_OFFSET, self.rng.gen::<f32>() * field.height()),
        };
        let kind = PestKind::ALL[self.rng.gen_range(0..PestKind::ALL.len())];

        PestSpawn {
            kind,
            position,
            profile: kind.profile(self.season),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollover_waits_for_quota() {
        let mut director = WaveDirector::new(Config::new(3.0, 7).with_initial_quota(5));
        director.record_kills(4);
        assert_eq!(director.roll_over(), None);
        assert_eq!(director.season(), 1);
    }

    #[test]
    fn spawn_interval_never_drops_below_minimum() {
        let mut director = WaveDirector::new(Config::new(0.55, 7).with_initial_quota(1));
        director.record_kills(1);
        assert_eq!(director.roll_over(), Some(1));
        assert!((director.spawn_interval() - 0.5).abs() < 1e-6);

        director.record_kills(director.quota());
        assert_eq!(director.roll_over(), Some(2));
        assert!((director.spawn_interval() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn spawns_sit_just_outside_the_field() {
        let field = PlayField::default();
        let mut director = WaveDirector::new(Config::new(3.0, 99));
        for _ in 0..64 {
            let spawn = director.next_spawn(field);
            assert!(!field.contains_with_margin(spawn.position, 0.0));
            assert!(field.contains_with_margin(spawn.position, EDGE_OFFSET + 1.0));
        }
    }
}
