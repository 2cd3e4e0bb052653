//! Resize debouncing.
//!
//! Coalesces bursts of resize signals into a single pass that runs once the
//! signals have been quiet for the configured delay. Time is supplied by the
//! caller as a `Duration` since an arbitrary origin (page start), so the
//! debouncer never reads a clock or sleeps.

use std::time::Duration;

/// Quiet period before a resize-triggered pass runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Debouncer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebounceState {
    /// No pass scheduled.
    #[default]
    Idle,
    /// A pass is scheduled for `deadline` unless another signal re-arms it.
    Pending {
        /// When the pass becomes due.
        deadline: Duration,
    },
}

/// `Idle → Pending → Idle` timer with cancel-and-rearm on every signal.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    state: DebounceState,
}

impl Debouncer {
    /// Create an idle debouncer.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: DebounceState::Idle,
        }
    }

    /// The configured quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> DebounceState {
        self.state
    }

    /// When the pending pass is due, if one is pending.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        match self.state {
            DebounceState::Idle => None,
            DebounceState::Pending { deadline } => Some(deadline),
        }
    }

    /// Record a signal at `now`, cancelling any pending deadline and arming
    /// a new one `delay` later.
    pub fn signal(&mut self, now: Duration) {
        self.state = DebounceState::Pending {
            deadline: now.saturating_add(self.delay),
        };
    }

    /// Returns `true` exactly once per burst: when a pending deadline has
    /// been reached. The debouncer is idle again afterwards.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.state {
            DebounceState::Pending { deadline } if now >= deadline => {
                self.state = DebounceState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drop a pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.deadline().is_some();
        self.state = DebounceState::Idle;
        was_pending
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
