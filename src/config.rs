//! Sentry configuration
//!
//! Every threshold is a configurable default, not a hard invariant. The
//! values are heuristics with no formal derivation; hosts with unusual
//! window chrome or very bursty economies should tune them.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Tunable thresholds and cadences for the whole sentry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentryConfig {
    // === Tool detection ===
    /// Viewport outer-minus-inner delta (px) that flags a docked inspector
    pub dim_threshold_px: i32,
    /// Debugger probe elapsed time (ms) that flags an attached debugger
    pub probe_threshold_ms: f64,
    /// Whether the debugger timing probe runs at all. Off by default:
    /// the probe statement stalls the tick when a debugger is attached
    /// and costs a host call per tick when one is not.
    pub probe_enabled: bool,

    // === Integrity monitoring ===
    /// Largest accepted per-sample currency increase
    pub max_currency_delta: i64,
    /// Largest accepted per-sample kill-count increase
    pub max_kill_delta: i64,

    // === Cadences ===
    /// Tool-detection polling interval (ms)
    pub detection_interval_ms: u32,
    /// Integrity sampling interval (ms)
    pub integrity_interval_ms: u32,
    /// Delay from install to config sealing (ms)
    pub seal_grace_ms: u32,

    // === Presentation / input ===
    /// Warning banner lifetime (ms)
    pub banner_dismiss_ms: i32,
    /// Intercept F12 / Ctrl+Shift+I / Ctrl+U style shortcuts
    pub suppress_restricted_keys: bool,
    /// Intercept the context menu
    pub suppress_context_menu: bool,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dim_threshold_px: consts::DIM_THRESHOLD_PX,
            probe_threshold_ms: consts::PROBE_THRESHOLD_MS,
            probe_enabled: false,

            max_currency_delta: consts::MAX_CURRENCY_DELTA,
            max_kill_delta: consts::MAX_KILL_DELTA,

            detection_interval_ms: consts::DETECTION_INTERVAL_MS,
            integrity_interval_ms: consts::INTEGRITY_INTERVAL_MS,
            seal_grace_ms: consts::SEAL_GRACE_MS,

            banner_dismiss_ms: consts::BANNER_DISMISS_MS,
            suppress_restricted_keys: true,
            suppress_context_menu: true,
        }
    }
}

impl SentryConfig {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tamper_sentry_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(config) = serde_json::from_str(&json) {
                    log::info!("Loaded sentry config from LocalStorage");
                    return config;
                }
            }
        }

        log::info!("Using default sentry config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Sentry config saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
