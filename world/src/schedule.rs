//! Delayed-action queue consumed inside the tick.

use garden_guardian_core::{PestId, Vec2};

/// Mutation deferred to a later tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum DelayedAction {
    /// Releases one bee-swarm projectile from the recorded origin.
    ReleaseBee { origin: Vec2 },
    /// Lifts a root-trap slow from a pest, if it still exists.
    ReleaseRoots { pest: PestId },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Scheduled {
    due: f32,
    action: DelayedAction,
}

/// Pending actions ordered by due time, then by insertion.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Schedule {
    entries: Vec<Scheduled>,
}

impl Schedule {
    pub(crate) fn push(&mut self, due: f32, action: DelayedAction) {
        let index = self.entries.partition_point(|entry| entry.due <= due);
        self.entries.insert(index, Scheduled { due, action });
    }

    /// Moves every action due at or before `now` into `out`, oldest first.
    pub(crate) fn drain_due(&mut self, now: f32, out: &mut Vec<DelayedAction>) {
        let ready = self.entries.partition_point(|entry| entry.due <= now);
        out.extend(self.entries.drain(..ready).map(|entry| entry.action));
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
