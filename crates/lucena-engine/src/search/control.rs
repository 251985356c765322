//! Search control: the cooperative wall-clock budget.

use std::time::{Duration, Instant};

/// How often the wall clock is sampled, in nodes. Must be a power of two.
const NODE_CHECK_INTERVAL: u64 = 1024;

/// Cooperative deadline for one search request.
///
/// The search polls [`time_is_up`](SearchControl::time_is_up) every
/// [`NODE_CHECK_INTERVAL`] nodes; once the budget is exceeded the flag
/// latches and every frame on the stack unwinds at its next poll. There is
/// no preemption — a search with no budget never stops on its own.
pub struct SearchControl {
    start: Instant,
    limit: Option<Duration>,
    stopped: bool,
}

impl SearchControl {
    /// Start the clock with a soft budget.
    pub fn with_limit(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit: (limit != Duration::MAX).then_some(limit),
            stopped: false,
        }
    }

    /// A control that never expires (fixed-depth search).
    pub fn infinite() -> Self {
        Self {
            start: Instant::now(),
            limit: None,
            stopped: false,
        }
    }

    /// Poll the clock. Cheap on most calls: the clock is only sampled every
    /// [`NODE_CHECK_INTERVAL`] nodes, and once the flag latches no further
    /// sampling happens at all.
    pub fn time_is_up(&mut self, nodes: u64) -> bool {
        if self.stopped {
            return true;
        }
        if nodes & (NODE_CHECK_INTERVAL - 1) != 0 {
            return false;
        }
        self.check_deadline()
    }

    /// Sample the clock unconditionally; used between root moves and between
    /// iterative-deepening iterations.
    pub fn check_deadline(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if let Some(limit) = self.limit
            && self.start.elapsed() > limit
        {
            self.stopped = true;
        }
        self.stopped
    }

    /// Whether the flag has latched.
    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// Time since the search began.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
