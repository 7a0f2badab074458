//! Round timing.

use crate::time::{TimeDuration, TimeInstant};

/// Tracks when the current round started.
#[derive(Debug, Clone, Copy)]
pub struct PhaseClock<I: TimeInstant> {
    start: Option<I>,
}

impl<I: TimeInstant> Default for PhaseClock<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: TimeInstant> PhaseClock<I> {
    /// Creates a clock with no round running.
    pub const fn new() -> Self {
        Self { start: None }
    }

    /// Marks `now` as the start of a round.
    pub fn start(&mut self, now: I) {
        self.start = Some(now);
    }

    /// Forgets the round start.
    pub fn reset(&mut self) {
        self.start = None;
    }

    /// Returns true if a round is being timed.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Returns the round start, if any.
    #[inline]
    pub fn started_at(&self) -> Option<I> {
        self.start
    }

    /// Time since the round started.
    ///
    /// `None` if no round is running or the clock wrapped.
    pub fn elapsed(&self, now: I) -> Option<I::Duration> {
        self.start
            .and_then(|start| now.checked_duration_since(start))
    }

    /// Returns true if the round has run longer than `max_span_millis`.
    ///
    /// Never true without a running round. A clock that reads earlier than
    /// the round start counts as expired.
    pub fn is_expired(&self, now: I, max_span_millis: u64) -> bool {
        let Some(start) = self.start else {
            return false;
        };

        match now.checked_duration_since(start) {
            Some(elapsed) => elapsed.as_millis() > max_span_millis,
            None => {
                warn!("Timer overflow");
                true
            }
        }
    }
}
