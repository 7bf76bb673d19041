//! Shared game state seen by the sentry
//!
//! The game runtime owns the real state; the sentry holds a shared handle
//! (never a copy) so corrections it writes are visible to the owner
//! immediately.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// The mutable progress fields the sentry protects, plus the two flags it
/// reads when deciding whether to request a pause.
///
/// Counters are signed on purpose: a runtime inspector can write any value
/// it likes, and a negative value must be observable so it can be
/// classified and clamped rather than wrapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectedState {
    /// Player currency (coins). Non-negative in any legitimate state.
    pub currency: i64,
    /// Cumulative kill counter. Non-negative in any legitimate state.
    pub kill_count: i64,
    /// Whether a run is in progress
    pub running: bool,
    /// Whether the game is paused
    pub paused: bool,
}

impl ProtectedState {
    /// Fresh pre-game state
    pub fn new() -> Self {
        Self {
            currency: 0,
            kill_count: 0,
            running: false,
            paused: false,
        }
    }

    /// Snapshot of the coordination flags
    pub fn flags(&self) -> RunFlags {
        RunFlags {
            running: self.running,
            paused: self.paused,
        }
    }
}

impl Default for ProtectedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only coordination flags, sampled once per response decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunFlags {
    pub running: bool,
    pub paused: bool,
}

impl RunFlags {
    /// True when a pause request would change anything
    pub fn pausable(&self) -> bool {
        self.running && !self.paused
    }
}

/// Shared handle to the runtime's state. Single-threaded cooperative
/// timers only, so `Rc<RefCell<_>>` is sufficient; there is no
/// concurrent-write hazard to guard against.
pub type SharedState = Rc<RefCell<ProtectedState>>;

/// Convenience constructor for a shared handle
pub fn shared(state: ProtectedState) -> SharedState {
    Rc::new(RefCell::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pausable_requires_running_unpaused() {
        let mut state = ProtectedState::new();
        assert!(!state.flags().pausable());

        state.running = true;
        assert!(state.flags().pausable());

        state.paused = true;
        assert!(!state.flags().pausable());
    }

    #[test]
    fn test_corrections_visible_through_shared_handle() {
        let handle = shared(ProtectedState::new());
        let observer = handle.clone();

        handle.borrow_mut().currency = 500;
        assert_eq!(observer.borrow().currency, 500);
    }
}
