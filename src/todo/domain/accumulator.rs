//! Wall-clock accumulation of time spent in the `doing` status.

use super::AccumulatorError;
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Tracks elapsed working time for a single todo.
///
/// The settled total and the currently running interval are kept apart, so
/// reading [`TimeAccumulator::current_total`] at any sampling rate never
/// changes what [`TimeAccumulator::stop`] eventually adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeAccumulator {
    accumulated_sec: u64,
    running_since: Option<DateTime<Utc>>,
}

impl TimeAccumulator {
    /// Creates a stopped accumulator with a settled total.
    #[must_use]
    pub const fn new(accumulated_sec: u64) -> Self {
        Self {
            accumulated_sec,
            running_since: None,
        }
    }

    /// Creates an accumulator that has been running since `since`.
    #[must_use]
    pub const fn resume_from(accumulated_sec: u64, since: DateTime<Utc>) -> Self {
        Self {
            accumulated_sec,
            running_since: Some(since),
        }
    }

    /// Returns the settled total, excluding any running interval.
    #[must_use]
    pub const fn accumulated_sec(&self) -> u64 {
        self.accumulated_sec
    }

    /// Returns when the running interval began, if any.
    #[must_use]
    pub const fn running_since(&self) -> Option<DateTime<Utc>> {
        self.running_since
    }

    /// Returns whether an interval is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Begins a new interval at the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::AlreadyRunning`] when an interval is
    /// already running; the accumulator is left unchanged.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), AccumulatorError> {
        if self.running_since.is_some() {
            return Err(AccumulatorError::AlreadyRunning);
        }
        self.running_since = Some(clock.utc());
        Ok(())
    }

    /// Ends the running interval and settles its whole seconds.
    ///
    /// Returns the number of seconds added to the settled total.
    ///
    /// # Errors
    ///
    /// Returns [`AccumulatorError::NotRunning`] when no interval is running.
    pub fn stop(&mut self, clock: &impl Clock) -> Result<u64, AccumulatorError> {
        let since = self.running_since.ok_or(AccumulatorError::NotRunning)?;
        let elapsed = elapsed_secs(since, clock.utc());
        self.accumulated_sec = self.accumulated_sec.saturating_add(elapsed);
        self.running_since = None;
        Ok(elapsed)
    }

    /// Returns the settled total plus the live running interval.
    #[must_use]
    pub fn current_total(&self, clock: &impl Clock) -> u64 {
        match self.running_since {
            Some(since) => self
                .accumulated_sec
                .saturating_add(elapsed_secs(since, clock.utc())),
            None => self.accumulated_sec,
        }
    }

    /// Replaces the settled total with an authoritative persisted value.
    ///
    /// The running interval is kept. A value below the current settled
    /// total is ignored because actual time never decreases.
    pub fn rebase(&mut self, persisted_sec: u64) {
        self.accumulated_sec = self.accumulated_sec.max(persisted_sec);
    }
}

/// Whole seconds between `since` and `now`, rounded down. A clock that has
/// stepped backwards yields zero.
fn elapsed_secs(since: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from(now.signed_duration_since(since).num_seconds()).unwrap_or(0)
}
