//! Browser platform wiring
//!
//! Everything that touches the host environment lives here:
//! - Cancellable timer service driving the detection/integrity/seal ticks
//! - Viewport and debugger-pause probes
//! - DOM warning banner with auto-dismiss
//! - Restricted-keystroke and context-menu suppression
//!
//! `install()` is the one-time entry point, invoked after the UI surface
//! is ready; `InstalledSentry::teardown()` cancels every outstanding
//! timer before the page goes away. Native builds compile this module to
//! nothing; the core engine is driven directly in tests.

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, Window};

    use crate::config::SentryConfig;
    use crate::detect::ViewportSample;
    use crate::registry::SharedRegistry;
    use crate::respond::PauseFn;
    use crate::sentry::Sentry;
    use crate::state::SharedState;

    // JS binding for the debugger timing probe. The `debugger` statement
    // has no Rust equivalent, so the probe body must live on the JS side.
    #[wasm_bindgen(inline_js = "
        export function debugger_probe_ms() {
            const t0 = performance.now();
            debugger;
            return performance.now() - t0;
        }
    ")]
    extern "C" {
        fn debugger_probe_ms() -> f64;
    }

    /// DOM id of the warning banner element
    const BANNER_ID: &str = "security-warning";

    /// Explicit timer service: every interval and timeout registered here
    /// can be cancelled in one call, so teardown never leaves a callback
    /// firing into a torn-down environment.
    struct TimerRegistry {
        intervals: Vec<(i32, Closure<dyn FnMut()>)>,
        timeouts: Vec<(i32, Closure<dyn FnMut()>)>,
    }

    impl TimerRegistry {
        fn new() -> Self {
            Self {
                intervals: Vec::new(),
                timeouts: Vec::new(),
            }
        }

        fn set_interval(&mut self, window: &Window, ms: i32, f: impl FnMut() + 'static) {
            let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ms,
            ) {
                Ok(id) => self.intervals.push((id, closure)),
                Err(_) => log::warn!("Failed to register interval timer"),
            }
        }

        fn set_timeout(&mut self, window: &Window, ms: i32, f: impl FnMut() + 'static) {
            let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
            match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ms,
            ) {
                Ok(id) => self.timeouts.push((id, closure)),
                Err(_) => log::warn!("Failed to register timeout"),
            }
        }

        /// Cancel everything. Idempotent; dropping the closures is only
        /// safe once the host no longer holds a callback into them.
        fn cancel_all(&mut self) {
            if let Some(window) = web_sys::window() {
                for (id, _) in &self.intervals {
                    window.clear_interval_with_handle(*id);
                }
                for (id, _) in &self.timeouts {
                    window.clear_timeout_with_handle(*id);
                }
            }
            self.intervals.clear();
            self.timeouts.clear();
        }
    }

    /// Poll outer/inner viewport extents. `None` when the window or any
    /// extent is unavailable; that tick is skipped upstream.
    fn viewport_sample(window: &Window) -> Option<ViewportSample> {
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).map(|v| v as i32);

        Some(ViewportSample {
            outer_width: read(window.outer_width())?,
            inner_width: read(window.inner_width())?,
            outer_height: read(window.outer_height())?,
            inner_height: read(window.inner_height())?,
        })
    }

    /// Show (or replace) the transient warning banner.
    ///
    /// Presentation is deliberately minimal: one element with a class
    /// attribute the host page styles. A fresh banner replaces any
    /// existing one rather than stacking.
    fn present_banner(message: &str, dismiss_ms: i32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        if let Some(existing) = document.get_element_by_id(BANNER_ID) {
            existing.remove();
        }

        let Ok(banner) = document.create_element("div") else {
            return;
        };
        banner.set_id(BANNER_ID);
        let _ = banner.set_attribute("class", "security-warning");
        banner.set_text_content(Some(message));
        if let Some(body) = document.body() {
            let _ = body.append_child(&banner);
        }

        // Auto-dismiss removes this element specifically, so a stale
        // timer cannot take down a replacement banner early.
        let doomed = banner.clone();
        let closure = Closure::once(move || doomed.remove());
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            dismiss_ms,
        );
        closure.forget();
    }

    /// Intercept the inspector-opening shortcuts. Interception only; the
    /// geometry heuristic still catches tools opened through the menu.
    fn install_key_suppression(document: &Document, dismiss_ms: i32) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let ctrl = event.ctrl_key();
            let shift = event.shift_key();
            let suppressed = match event.key().as_str() {
                "F12" => Some("Developer tools are disabled"),
                "I" | "J" if ctrl && shift => Some("Developer tools are disabled"),
                "C" if ctrl && shift => Some(""),
                "u" | "U" if ctrl && !shift => Some("View source is disabled"),
                _ => None,
            };

            if let Some(message) = suppressed {
                event.prevent_default();
                if !message.is_empty() {
                    present_banner(message, dismiss_ms);
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn install_context_menu_suppression(document: &Document, dismiss_ms: i32) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            present_banner("Right-click is disabled", dismiss_ms);
        });
        let _ = document
            .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// A running sentry installation.
    pub struct InstalledSentry {
        sentry: Rc<RefCell<Sentry>>,
        timers: TimerRegistry,
    }

    impl InstalledSentry {
        /// Shared handle to the engine (e.g. for config inspection)
        pub fn sentry(&self) -> Rc<RefCell<Sentry>> {
            self.sentry.clone()
        }

        /// Cancel all periodic work and drop monitoring state. Must be
        /// called before the hosting page is discarded.
        pub fn teardown(mut self) {
            self.timers.cancel_all();
            self.sentry.borrow_mut().shutdown();
        }
    }

    impl Drop for InstalledSentry {
        fn drop(&mut self) {
            // Timers must not outlive their closures
            self.timers.cancel_all();
        }
    }

    /// Install the sentry against a live game runtime. Called once after
    /// the UI surface is ready.
    ///
    /// `state` and `registry` are the runtime's shared handles;
    /// `request_pause` is the game's fire-and-forget pause control.
    pub fn install(
        config: SentryConfig,
        state: SharedState,
        registry: SharedRegistry,
        request_pause: PauseFn,
    ) -> InstalledSentry {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Tamper sentry active");
        log::warn!("Modifying game values or attaching developer tools is detected");

        let dismiss_ms = config.banner_dismiss_ms;
        let detection_ms = config.detection_interval_ms as i32;
        let integrity_ms = config.integrity_interval_ms as i32;
        let seal_ms = config.seal_grace_ms as i32;
        let suppress_keys = config.suppress_restricted_keys;
        let suppress_menu = config.suppress_context_menu;

        let mut sentry = Sentry::new(config);
        sentry.attach_runtime(state);
        sentry.attach_registry(registry);
        sentry.set_presenter(Box::new(move |msg| present_banner(msg, dismiss_ms)));
        sentry.set_pause_hook(request_pause);
        let sentry = Rc::new(RefCell::new(sentry));

        let mut timers = TimerRegistry::new();
        if let Some(window) = web_sys::window() {
            // Tool-detection tick
            {
                let sentry = sentry.clone();
                timers.set_interval(&window, detection_ms, move || {
                    let mut s = sentry.borrow_mut();
                    let viewport = web_sys::window().as_ref().and_then(viewport_sample);
                    let probe = s.wants_probe().then(|| debugger_probe_ms());
                    s.poll_detection(viewport, probe);
                });
            }

            // Integrity sampling tick
            {
                let sentry = sentry.clone();
                timers.set_interval(&window, integrity_ms, move || {
                    sentry.borrow_mut().poll_integrity();
                });
            }

            // One-shot config seal after the startup grace
            {
                let sentry = sentry.clone();
                timers.set_timeout(&window, seal_ms, move || {
                    sentry.borrow_mut().seal_configs();
                });
            }

            if let Some(document) = window.document() {
                if suppress_keys {
                    install_key_suppression(&document, dismiss_ms);
                }
                if suppress_menu {
                    install_context_menu_suppression(&document, dismiss_ms);
                }
            }
        }

        InstalledSentry { sentry, timers }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{InstalledSentry, install};
