//! State integrity monitor
//!
//! Samples the protected counters on a fixed cadence and compares them
//! against the last accepted baseline. A delta larger than a well-behaved
//! game loop could produce in one sampling window is presumed to be an
//! external write and is rolled back; negative values are clamped.
//!
//! Detection is best-effort and non-fatal: every anomaly is recovered
//! locally and reported, never escalated. The first sample after
//! (re)start only seeds the baseline, so tampering that happens before it
//! is an accepted blind spot.

use crate::config::SentryConfig;
use crate::state::ProtectedState;

/// One classified implausible observation.
///
/// Carries the observed evidence so the notification can say what was
/// seen, not just that something was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// Currency rose by more than the per-sample limit
    CurrencySpike { delta: i64 },
    /// Kill count rose by more than the per-sample limit
    KillSpike { delta: i64 },
    /// Currency went negative
    NegativeCurrency { value: i64 },
    /// Kill count went negative
    NegativeKills { value: i64 },
}

impl Anomaly {
    /// User-facing banner text
    pub fn message(&self) -> String {
        match self {
            Anomaly::CurrencySpike { delta } => {
                format!("Abnormal currency increase detected (+{delta}) - value restored")
            }
            Anomaly::KillSpike { delta } => {
                format!("Abnormal kill count increase detected (+{delta}) - value restored")
            }
            Anomaly::NegativeCurrency { value } => {
                format!("Invalid currency value detected ({value}) - value reset")
            }
            Anomaly::NegativeKills { value } => {
                format!("Invalid kill count value detected ({value}) - value reset")
            }
        }
    }
}

/// Last accepted values of the protected counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Baseline {
    currency: i64,
    kill_count: i64,
}

/// Baseline-delta anomaly detector over the protected counters.
#[derive(Debug)]
pub struct IntegrityMonitor {
    max_currency_delta: i64,
    max_kill_delta: i64,
    baseline: Option<Baseline>,
}

impl IntegrityMonitor {
    pub fn new(config: &SentryConfig) -> Self {
        Self {
            max_currency_delta: config.max_currency_delta,
            max_kill_delta: config.max_kill_delta,
            baseline: None,
        }
    }

    /// Whether a baseline has been established yet
    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    /// Drop the baseline (monitor shutdown/restart). The next sample
    /// seeds a fresh one and reports nothing.
    pub fn reset(&mut self) {
        self.baseline = None;
    }

    /// Sample the counters, roll back anything implausible, and accept
    /// the (possibly corrected) values as the new baseline.
    ///
    /// Checks run in a fixed order and each may fire independently in the
    /// same tick; corrections are applied as they are classified, so later
    /// checks see earlier corrections.
    pub fn sample(&mut self, state: &mut ProtectedState) -> Vec<Anomaly> {
        let mut anomalies = Vec::new();

        if let Some(baseline) = self.baseline {
            let currency_delta = state.currency - baseline.currency;
            if currency_delta > self.max_currency_delta {
                state.currency = baseline.currency;
                anomalies.push(Anomaly::CurrencySpike {
                    delta: currency_delta,
                });
            }

            let kill_delta = state.kill_count - baseline.kill_count;
            if kill_delta > self.max_kill_delta {
                state.kill_count = baseline.kill_count;
                anomalies.push(Anomaly::KillSpike { delta: kill_delta });
            }

            if state.currency < 0 {
                anomalies.push(Anomaly::NegativeCurrency {
                    value: state.currency,
                });
                state.currency = 0;
            }

            if state.kill_count < 0 {
                anomalies.push(Anomaly::NegativeKills {
                    value: state.kill_count,
                });
                state.kill_count = 0;
            }
        }

        for anomaly in &anomalies {
            log::warn!("Integrity anomaly: {}", anomaly.message());
        }

        // Post-correction values become the new baseline
        self.baseline = Some(Baseline {
            currency: state.currency,
            kill_count: state.kill_count,
        });

        anomalies
    }
}
