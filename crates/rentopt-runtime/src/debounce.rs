#![forbid(unsafe_code)]

//! Quiescence tracking for keystroke-level edits.
//!
//! [`Debouncer`] does not own a timer. Callers report edits with
//! [`touch`](Debouncer::touch) and ask whether the window has elapsed with
//! [`poll`](Debouncer::poll), passing the current [`Instant`] each time.
//! Hosts drive `poll` from whatever tick source they have (an animation
//! frame, a UI timer, a test loop), and tests construct instants directly
//! instead of sleeping.
//!
//! # State machine
//!
//! ```text
//!            touch(t)                    touch(t')
//!   Idle ─────────────► Pending{t} ─────────────► Pending{t'}
//!    ▲                     │
//!    │  poll(now >= t+w)   │  cancel()
//!    └─────────────────────┴──────────────► Idle
//! ```
//!
//! A new `touch` replaces the pending deadline; it never queues a second one.

use web_time::{Duration, Instant};

/// Default quiescence window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Idle,
    Pending { last_edit: Instant },
}

/// Deadline tracker for a single debounced action.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    state: DebounceState,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: DebounceState::Idle,
        }
    }

    /// Record an edit at `now`, starting or restarting the window.
    pub fn touch(&mut self, now: Instant) {
        self.state = DebounceState::Pending { last_edit: now };
    }

    /// Returns `true` exactly once when the window has elapsed since the
    /// last edit, returning the debouncer to idle.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            DebounceState::Pending { last_edit }
                if now.saturating_duration_since(last_edit) >= self.window =>
            {
                self.state = DebounceState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = DebounceState::Idle;
        was_pending
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// When the pending edit becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Pending { last_edit } => Some(last_edit + self.window),
            DebounceState::Idle => None,
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }
}
