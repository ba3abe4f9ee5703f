//! Pending timer deadlines.
//!
//! Each [`TimerKind`] has at most one deadline. The queue never reads the
//! clock: callers pass `now`, which lets tests drive it with fabricated
//! instants.

use std::time::{Duration, Instant};

use enum_map::EnumMap;

use crate::effects::TimerKind;

#[derive(Debug, Default)]
pub struct TimerQueue {
    deadlines: EnumMap<TimerKind, Option<Instant>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `kind` to fire at `now + after`, replacing a pending deadline.
    pub fn schedule(&mut self, kind: TimerKind, now: Instant, after: Duration) {
        self.deadlines[kind] = Some(now + after);
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.deadlines[kind].is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.values().all(Option::is_none)
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().flatten().min().copied()
    }

    /// Time from `now` until the earliest deadline (zero if overdue).
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Removes and returns timers due at `now`, earliest first.
    pub fn pop_due(&mut self, now: Instant) -> Vec<(TimerKind, Instant)> {
        let mut due: Vec<(TimerKind, Instant)> = self
            .deadlines
            .iter()
            .filter_map(|(kind, deadline)| match deadline {
                Some(at) if *at <= now => Some((kind, *at)),
                _ => None,
            })
            .collect();
        due.sort_by_key(|(_, at)| *at);
        for (kind, _) in &due {
            self.deadlines[*kind] = None;
        }
        due
    }
}
