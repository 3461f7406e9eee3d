//! W' balance (anaerobic reserve) for one cardio modality.
//!
//! Critical-power model: output above critical output drains a finite
//! reserve of work; below it the reserve regenerates exponentially toward
//! its maximum with a modality-specific time constant.
//! - Reserve units are joules (bike/row/ski) or meters (run/swim)
//! - Depletion is linear in (demand - critical) × duration
//! - Recovery is applied only through `recover`

use serde::{Deserialize, Serialize};

use super::patterns::Modality;

/// Exponent applied to the depletion ratio for the fatigue factor.
const FATIGUE_EXPONENT: f64 = 0.7;

/// Anaerobic reserve state for one modality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardioReserve {
    /// Modality this reserve belongs to.
    pub modality: Modality,
    /// Maximum reserve (J or m).
    max_reserve: f64,
    /// Current balance, always within [0, max_reserve].
    balance: f64,
    /// Recovery time constant in seconds.
    tau_recovery: f64,
}

impl CardioReserve {
    /// Create a full reserve.
    ///
    /// Non-finite or negative capacities are treated as zero; a non-positive
    /// time constant means the reserve never regenerates.
    pub fn new(modality: Modality, max_reserve: f64, tau_recovery: f64) -> Self {
        let max_reserve = if max_reserve.is_finite() {
            max_reserve.max(0.0)
        } else {
            0.0
        };
        Self {
            modality,
            max_reserve,
            balance: max_reserve,
            tau_recovery,
        }
    }

    /// Maximum reserve.
    pub fn max_reserve(&self) -> f64 {
        self.max_reserve
    }

    /// Current balance.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Recovery time constant.
    pub fn tau_recovery(&self) -> f64 {
        self.tau_recovery
    }

    /// Drain the reserve for work above critical output.
    ///
    /// Demand at or below critical output leaves the balance unchanged.
    pub fn deplete(&mut self, demand: f64, critical: f64, duration_secs: f64) {
        if !(demand.is_finite() && critical.is_finite() && duration_secs.is_finite()) {
            return;
        }
        if demand <= critical || duration_secs <= 0.0 {
            return;
        }
        let work_above_critical = (demand - critical) * duration_secs;
        self.balance = (self.balance - work_above_critical).max(0.0);
    }

    /// Exponential regeneration toward the maximum, scaled by recovery quality.
    pub fn recover(&mut self, duration_secs: f64, quality: f64) {
        if duration_secs <= 0.0 || quality <= 0.0 || self.tau_recovery <= 0.0 {
            return;
        }
        let deficit = self.max_reserve - self.balance;
        if deficit <= 0.0 {
            return;
        }
        let regained = deficit * (1.0 - (-duration_secs / self.tau_recovery).exp()) * quality;
        self.balance = (self.balance + regained).min(self.max_reserve);
    }

    /// Whether `target` can be held for `duration_secs` from the current balance.
    pub fn can_sustain(&self, target: f64, critical: f64, duration_secs: f64) -> bool {
        if target <= critical {
            return true;
        }
        self.balance >= (target - critical) * duration_secs.max(0.0)
    }

    /// Seconds until the current balance is exhausted at `demand`.
    /// Returns None if demand <= critical (sustainable).
    pub fn time_to_exhaustion(&self, demand: f64, critical: f64) -> Option<f64> {
        if demand <= critical {
            return None;
        }
        Some(self.balance / (demand - critical))
    }

    /// Fatigue factor: 0.0 when full, approaching 1.0 when empty.
    pub fn fatigue_factor(&self) -> f64 {
        if self.max_reserve <= 0.0 {
            return 0.0;
        }
        let depletion = 1.0 - self.balance / self.max_reserve;
        depletion.clamp(0.0, 1.0).powf(FATIGUE_EXPONENT)
    }

    /// Refill to maximum.
    pub fn reset(&mut self) {
        self.balance = self.max_reserve;
    }
}
