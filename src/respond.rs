//! Tamper response coordinator
//!
//! Funnels every detection - tool heuristics or integrity rollbacks -
//! into exactly two side effects: show a transient warning banner and,
//! if a run is active and unpaused, ask the game to pause. Collaborators
//! are optional hooks; a missing one degrades to a no-op rather than a
//! panic, since the sentry may be installed before the UI or the game
//! runtime exist.

use crate::state::RunFlags;

/// Hook that surfaces a warning banner to the player
pub type PresentFn = Box<dyn FnMut(&str)>;
/// Hook that asks the game runtime to pause (fire-and-forget)
pub type PauseFn = Box<dyn FnMut()>;

/// Dispatches notifications and pause requests.
#[derive(Default)]
pub struct ResponseCoordinator {
    present: Option<PresentFn>,
    request_pause: Option<PauseFn>,
}

impl ResponseCoordinator {
    /// Coordinator with no collaborators attached (everything no-ops)
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the banner presenter. Replaces any previous one.
    pub fn set_presenter(&mut self, present: PresentFn) {
        self.present = Some(present);
    }

    /// Attach the pause-request hook. Replaces any previous one.
    pub fn set_pause_hook(&mut self, request_pause: PauseFn) {
        self.request_pause = Some(request_pause);
    }

    /// Surface a warning and request a pause when one would matter.
    ///
    /// Idempotent from the caller's perspective: the presenter replaces
    /// the banner rather than stacking, and pausing an already-paused or
    /// idle game is skipped. `flags` is `None` when the runtime is not
    /// available, in which case only the banner is attempted.
    pub fn notify(&mut self, message: &str, flags: Option<RunFlags>) {
        if let Some(present) = &mut self.present {
            present(message);
        }

        if flags.is_some_and(|f| f.pausable()) {
            if let Some(request_pause) = &mut self.request_pause {
                request_pause();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn active() -> Option<RunFlags> {
        Some(RunFlags {
            running: true,
            paused: false,
        })
    }

    #[test]
    fn test_notify_without_collaborators_is_noop() {
        let mut coordinator = ResponseCoordinator::new();
        // Must not panic with nothing attached
        coordinator.notify("tool detected", active());
        coordinator.notify("tool detected", None);
    }

    #[test]
    fn test_notify_presents_and_pauses_when_active() {
        let shown: Rc<RefCell<Vec<String>>> = Rc::default();
        let paused = Rc::new(RefCell::new(0u32));

        let mut coordinator = ResponseCoordinator::new();
        {
            let shown = shown.clone();
            coordinator.set_presenter(Box::new(move |msg| {
                shown.borrow_mut().push(msg.to_string());
            }));
        }
        {
            let paused = paused.clone();
            coordinator.set_pause_hook(Box::new(move || {
                *paused.borrow_mut() += 1;
            }));
        }

        coordinator.notify("tool detected", active());
        assert_eq!(shown.borrow().as_slice(), ["tool detected"]);
        assert_eq!(*paused.borrow(), 1);
    }

    #[test]
    fn test_no_pause_when_already_paused_or_idle() {
        let paused = Rc::new(RefCell::new(0u32));
        let mut coordinator = ResponseCoordinator::new();
        {
            let paused = paused.clone();
            coordinator.set_pause_hook(Box::new(move || {
                *paused.borrow_mut() += 1;
            }));
        }

        coordinator.notify(
            "x",
            Some(RunFlags {
                running: true,
                paused: true,
            }),
        );
        coordinator.notify(
            "x",
            Some(RunFlags {
                running: false,
                paused: false,
            }),
        );
        coordinator.notify("x", None);
        assert_eq!(*paused.borrow(), 0);
    }

    #[test]
    fn test_banner_shown_even_without_runtime() {
        let shown: Rc<RefCell<Vec<String>>> = Rc::default();
        let mut coordinator = ResponseCoordinator::new();
        {
            let shown = shown.clone();
            coordinator.set_presenter(Box::new(move |msg| {
                shown.borrow_mut().push(msg.to_string());
            }));
        }

        coordinator.notify("early warning", None);
        assert_eq!(shown.borrow().len(), 1);
    }
}
