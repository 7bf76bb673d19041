//! Inspection-tool detection heuristics
//!
//! Two independent, individually spoofable signals:
//! - Geometry: an inspector docked to the window shrinks the inner
//!   viewport relative to the outer window by more than ordinary chrome
//!   does. Ordinary resizing can fake this; false positives are accepted.
//! - Timing: a `debugger` statement stalls only when a debugger is
//!   attached, so a large elapsed time across the probe means execution
//!   was paused there. Optional and off by default.
//!
//! The combined signal is recomputed from scratch every tick
//! (level-triggered), but the response fires only on the false-to-true
//! transition so a persistently open panel produces one notification per
//! episode, not one per tick.

use crate::config::SentryConfig;

/// Outer and inner viewport extents, polled from the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSample {
    pub outer_width: i32,
    pub inner_width: i32,
    pub outer_height: i32,
    pub inner_height: i32,
}

impl ViewportSample {
    /// Widest outer-minus-inner margin of the two axes
    pub fn chrome_margin(&self) -> i32 {
        let dw = self.outer_width - self.inner_width;
        let dh = self.outer_height - self.inner_height;
        dw.max(dh)
    }
}

/// Edge-triggered "inspection tool likely attached" detector.
#[derive(Debug)]
pub struct InspectorHeuristics {
    dim_threshold_px: i32,
    probe_threshold_ms: f64,
    probe_enabled: bool,
    tool_attached: bool,
}

impl InspectorHeuristics {
    pub fn new(config: &SentryConfig) -> Self {
        Self {
            dim_threshold_px: config.dim_threshold_px,
            probe_threshold_ms: config.probe_threshold_ms,
            probe_enabled: config.probe_enabled,
            tool_attached: false,
        }
    }

    /// Current level-triggered state
    pub fn tool_attached(&self) -> bool {
        self.tool_attached
    }

    /// Whether the caller should bother running the timing probe this tick
    pub fn wants_probe(&self) -> bool {
        self.probe_enabled
    }

    /// Evaluate one tick of signals. Returns `true` only on the
    /// not-attached to attached transition.
    ///
    /// A `None` viewport means the host window was unavailable; the tick
    /// is skipped without touching the detection state, so a transient
    /// environment gap neither fires nor re-arms the edge.
    pub fn evaluate(
        &mut self,
        viewport: Option<ViewportSample>,
        probe_elapsed_ms: Option<f64>,
    ) -> bool {
        let geometry = match viewport {
            Some(sample) => {
                let dw = sample.outer_width - sample.inner_width;
                let dh = sample.outer_height - sample.inner_height;
                dw > self.dim_threshold_px || dh > self.dim_threshold_px
            }
            None => {
                if probe_elapsed_ms.is_none() {
                    return false;
                }
                false
            }
        };

        let timing = self.probe_enabled
            && probe_elapsed_ms.is_some_and(|ms| ms > self.probe_threshold_ms);

        let attached = geometry || timing;
        let rising = attached && !self.tool_attached;
        self.tool_attached = attached;
        rising
    }

    /// Forget the current episode (teardown)
    pub fn reset(&mut self) {
        self.tool_attached = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(outer_w: i32, inner_w: i32) -> ViewportSample {
        ViewportSample {
            outer_width: outer_w,
            inner_width: inner_w,
            outer_height: 900,
            inner_height: 870,
        }
    }

    fn heuristics() -> InspectorHeuristics {
        InspectorHeuristics::new(&SentryConfig::default())
    }

    #[test]
    fn test_fires_once_per_episode() {
        let mut h = heuristics();

        // 200px margin held for 3 ticks: exactly one rising edge
        assert!(h.evaluate(Some(sample(1200, 1000)), None));
        assert!(!h.evaluate(Some(sample(1200, 1000)), None));
        assert!(!h.evaluate(Some(sample(1200, 1000)), None));
        assert!(h.tool_attached());

        // Drops to 50px: no edge, state clears
        assert!(!h.evaluate(Some(sample(1050, 1000)), None));
        assert!(!h.tool_attached());
    }

    #[test]
    fn test_rearms_after_signal_clears() {
        let mut h = heuristics();

        assert!(h.evaluate(Some(sample(1200, 1000)), None));
        assert!(!h.evaluate(Some(sample(1050, 1000)), None));
        // Second episode fires again
        assert!(h.evaluate(Some(sample(1200, 1000)), None));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut h = heuristics();
        // Exactly 160 does not trip; 161 does
        assert!(!h.evaluate(Some(sample(1160, 1000)), None));
        assert!(h.evaluate(Some(sample(1161, 1000)), None));
    }

    #[test]
    fn test_height_axis_also_trips() {
        let mut h = heuristics();
        let tall = ViewportSample {
            outer_width: 1000,
            inner_width: 990,
            outer_height: 1100,
            inner_height: 900,
        };
        assert!(h.evaluate(Some(tall), None));
    }

    #[test]
    fn test_probe_ignored_when_disabled() {
        let mut h = heuristics();
        assert!(!h.wants_probe());
        // Huge stall, but the probe is off by default
        assert!(!h.evaluate(Some(sample(1010, 1000)), Some(5000.0)));
    }

    #[test]
    fn test_probe_trips_when_enabled() {
        let config = SentryConfig {
            probe_enabled: true,
            ..Default::default()
        };
        let mut h = InspectorHeuristics::new(&config);
        assert!(h.wants_probe());

        assert!(!h.evaluate(Some(sample(1010, 1000)), Some(20.0)));
        assert!(h.evaluate(Some(sample(1010, 1000)), Some(150.0)));
    }

    #[test]
    fn test_missing_window_skips_tick() {
        let mut h = heuristics();
        assert!(h.evaluate(Some(sample(1200, 1000)), None));

        // Window gone: state is held, no re-arm
        assert!(!h.evaluate(None, None));
        assert!(h.tool_attached());

        // Window back with the panel still open: still no new edge
        assert!(!h.evaluate(Some(sample(1200, 1000)), None));
    }

    #[test]
    fn test_chrome_margin_takes_wider_axis() {
        let s = ViewportSample {
            outer_width: 1000,
            inner_width: 980,
            outer_height: 900,
            inner_height: 700,
        };
        assert_eq!(s.chrome_margin(), 200);
    }
}
