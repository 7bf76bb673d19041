//! Tamper Sentry - client-side anti-tamper layer for browser-hosted games
//!
//! Raises the cost of casual tampering (runtime inspectors, counter edits).
//! Heuristic, not cryptographic: it detects and reverts implausible changes,
//! it cannot stop an attacker who controls the execution environment.
//!
//! Core modules:
//! - `detect`: Inspection-tool heuristics (viewport geometry, debugger timing)
//! - `monitor`: Periodic baseline sampler that reverts implausible deltas
//! - `registry`: Config store sealed once after startup
//! - `respond`: Notification + pause-request coordinator
//! - `sentry`: Composition root driven by the host's timers
//! - `platform`: Browser wiring (timers, DOM banner, input suppression)

pub mod config;
pub mod detect;
pub mod monitor;
pub mod platform;
pub mod registry;
pub mod respond;
pub mod sentry;
pub mod state;

pub use config::SentryConfig;
pub use detect::{InspectorHeuristics, ViewportSample};
pub use monitor::{Anomaly, IntegrityMonitor};
pub use registry::{ConfigRegistry, DifficultyTier, WeaponSpec};
pub use respond::ResponseCoordinator;
pub use sentry::Sentry;
pub use state::{ProtectedState, RunFlags, SharedState};

/// Default thresholds and cadences
pub mod consts {
    /// Viewport outer-minus-inner delta (px) above which an inspector
    /// panel is assumed docked to the window
    pub const DIM_THRESHOLD_PX: i32 = 160;
    /// Elapsed time (ms) across the debugger probe above which execution
    /// is assumed to have been paused by an attached debugger
    pub const PROBE_THRESHOLD_MS: f64 = 100.0;

    /// Largest legitimate per-sample currency increase
    pub const MAX_CURRENCY_DELTA: i64 = 1000;
    /// Largest legitimate per-sample kill-count increase
    pub const MAX_KILL_DELTA: i64 = 100;

    /// Tool-detection polling cadence
    pub const DETECTION_INTERVAL_MS: u32 = 1000;
    /// Integrity sampling cadence
    pub const INTEGRITY_INTERVAL_MS: u32 = 1000;
    /// Startup grace before config entries are sealed
    pub const SEAL_GRACE_MS: u32 = 1000;
    /// How long a warning banner stays up before auto-dismissing
    pub const BANNER_DISMISS_MS: i32 = 3000;
}
