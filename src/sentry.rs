//! Sentry composition root
//!
//! Owns the detector, the monitor, and the coordinator, and exposes the
//! tick entry points the host's timers drive. Collaborators (game state,
//! config registry, UI hooks) attach after construction; any tick that
//! fires before its collaborator exists is silently skipped. Nothing in
//! here can fail hard: every path either recovers locally or no-ops.

use crate::config::SentryConfig;
use crate::detect::{InspectorHeuristics, ViewportSample};
use crate::monitor::IntegrityMonitor;
use crate::registry::SharedRegistry;
use crate::respond::{PauseFn, PresentFn, ResponseCoordinator};
use crate::state::{RunFlags, SharedState};

/// Banner text for a tool-detection edge
pub const TOOL_DETECTED_MSG: &str = "Developer tools detected";

/// The tamper-detection-and-recovery engine.
pub struct Sentry {
    config: SentryConfig,
    heuristics: InspectorHeuristics,
    monitor: IntegrityMonitor,
    coordinator: ResponseCoordinator,
    state: Option<SharedState>,
    registry: Option<SharedRegistry>,
}

impl Sentry {
    pub fn new(config: SentryConfig) -> Self {
        let heuristics = InspectorHeuristics::new(&config);
        let monitor = IntegrityMonitor::new(&config);
        Self {
            config,
            heuristics,
            monitor,
            coordinator: ResponseCoordinator::new(),
            state: None,
            registry: None,
        }
    }

    pub fn config(&self) -> &SentryConfig {
        &self.config
    }

    /// Hand the sentry the runtime's shared state handle. Until this is
    /// called, integrity ticks skip and pause decisions are unavailable.
    pub fn attach_runtime(&mut self, state: SharedState) {
        self.state = Some(state);
    }

    /// Hand the sentry the registry to seal after the startup grace.
    pub fn attach_registry(&mut self, registry: SharedRegistry) {
        self.registry = Some(registry);
    }

    /// Attach the banner presenter hook.
    pub fn set_presenter(&mut self, present: PresentFn) {
        self.coordinator.set_presenter(present);
    }

    /// Attach the pause-request hook.
    pub fn set_pause_hook(&mut self, request_pause: PauseFn) {
        self.coordinator.set_pause_hook(request_pause);
    }

    /// Whether the detector currently considers a tool attached
    pub fn tool_attached(&self) -> bool {
        self.heuristics.tool_attached()
    }

    /// Whether the timing probe should be run for the next detection tick
    pub fn wants_probe(&self) -> bool {
        self.heuristics.wants_probe()
    }

    /// One tool-detection tick. The host supplies the environment
    /// signals; `viewport` is `None` when the window was unavailable and
    /// `probe_elapsed_ms` is `None` when the probe did not run.
    pub fn poll_detection(
        &mut self,
        viewport: Option<ViewportSample>,
        probe_elapsed_ms: Option<f64>,
    ) {
        if self.heuristics.evaluate(viewport, probe_elapsed_ms) {
            log::warn!("Inspection tool detected");
            let flags = self.run_flags();
            self.coordinator.notify(TOOL_DETECTED_MSG, flags);
        }
    }

    /// One integrity-sampling tick. Skips silently when no runtime is
    /// attached.
    pub fn poll_integrity(&mut self) {
        let Some(state_rc) = self.state.clone() else {
            return;
        };

        let (anomalies, flags) = {
            let mut state = state_rc.borrow_mut();
            let anomalies = self.monitor.sample(&mut state);
            (anomalies, state.flags())
        };
        // State borrow is released before hooks run: the pause hook is
        // allowed to touch the same handle.

        for anomaly in &anomalies {
            self.coordinator.notify(&anomaly.message(), Some(flags));
        }
    }

    /// Seal the attached config registry. Called once by the host after
    /// the startup grace delay; safe to call again (guarded) and a no-op
    /// while the registry is absent or unpopulated.
    pub fn seal_configs(&mut self) -> bool {
        match &self.registry {
            Some(registry) => registry.borrow_mut().seal(),
            None => false,
        }
    }

    /// Drop monitoring state before the environment goes away. The
    /// baseline and the current detection episode are forgotten; a later
    /// restart re-seeds from scratch.
    pub fn shutdown(&mut self) {
        self.monitor.reset();
        self.heuristics.reset();
        log::info!("Tamper sentry shut down");
    }

    fn run_flags(&self) -> Option<RunFlags> {
        self.state.as_ref().map(|s| s.borrow().flags())
    }
}
