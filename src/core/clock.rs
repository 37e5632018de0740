//! Wall-clock deadlines and the per-decision search context.
//!
//! A [`DeadlineClock`] answers "is there still time?" for an absolute
//! deadline in epoch milliseconds, minus a safety margin. A
//! [`SearchContext`] wraps one clock for one move decision and latches the
//! first negative answer so every layer of a search agrees that time is up.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Current time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// An absolute deadline with a safety margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeadlineClock {
    deadline_ms: u64,
    margin_ms: u64,
}

impl DeadlineClock {
    /// Clock for `deadline_epoch_ms`, reserving `margin_ms` for returning
    /// the answer.
    #[must_use]
    pub const fn new(deadline_epoch_ms: u64, margin_ms: u64) -> Self {
        Self {
            deadline_ms: deadline_epoch_ms,
            margin_ms,
        }
    }

    /// Clock whose deadline is `budget` from now.
    #[must_use]
    pub fn after(budget: Duration, margin_ms: u64) -> Self {
        let budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        Self::new(now_epoch_ms().saturating_add(budget_ms), margin_ms)
    }

    /// Clock that never runs out. Searches then stop only when solved or
    /// exhausted.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(u64::MAX, 0)
    }

    #[must_use]
    pub const fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    #[must_use]
    pub const fn margin_ms(&self) -> u64 {
        self.margin_ms
    }

    /// True iff `deadline - now > margin`.
    #[must_use]
    pub fn has_time(&self) -> bool {
        self.has_time_at(now_epoch_ms())
    }

    /// [`has_time`](Self::has_time) evaluated at a given instant.
    #[must_use]
    pub const fn has_time_at(&self, now_ms: u64) -> bool {
        (self.deadline_ms as i128 - now_ms as i128) > self.margin_ms as i128
    }

    /// Usable time left before the margin, zero once it is spent.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        let usable = self
            .deadline_ms
            .saturating_sub(self.margin_ms)
            .saturating_sub(now_epoch_ms());
        Duration::from_millis(usable)
    }
}

/// Time bookkeeping for a single move decision.
///
/// Once `has_time` has answered `false`, it keeps answering `false` for the
/// rest of the decision.
#[derive(Debug)]
pub struct SearchContext {
    clock: DeadlineClock,
    time_up: bool,
}

impl SearchContext {
    #[must_use]
    pub fn new(clock: DeadlineClock) -> Self {
        Self {
            clock,
            time_up: false,
        }
    }

    #[must_use]
    pub fn clock(&self) -> &DeadlineClock {
        &self.clock
    }

    /// Poll the clock, latching the first expiry.
    pub fn has_time(&mut self) -> bool {
        if !self.time_up && !self.clock.has_time() {
            self.time_up = true;
        }
        !self.time_up
    }

    /// Whether expiry has already been observed. Does not poll the clock.
    #[must_use]
    pub fn is_time_up(&self) -> bool {
        self.time_up
    }
}
