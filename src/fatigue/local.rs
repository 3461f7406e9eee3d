//! Local muscular fatigue accumulator for one movement-pattern bucket.

use serde::{Deserialize, Serialize};

use super::patterns::MovementPattern;

/// Fatigue level of one pattern bucket. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalFatigue {
    pub pattern: MovementPattern,
    level: f64,
}

impl LocalFatigue {
    /// Fresh bucket.
    pub fn new(pattern: MovementPattern) -> Self {
        Self { pattern, level: 0.0 }
    }

    /// Current level.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Inject fatigue. Non-finite or negative amounts are ignored.
    pub fn add(&mut self, amount: f64) {
        if amount.is_finite() && amount > 0.0 {
            self.level += amount;
        }
    }

    /// Exponential decay toward zero at `rate` (1/s), scaled by `quality`.
    pub fn recover(&mut self, duration_secs: f64, rate: f64, quality: f64) {
        self.level = decay(self.level, duration_secs, rate, quality);
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}

/// Decay `level` toward zero; clamps at zero when `quality` exceeds 1.
pub(crate) fn decay(level: f64, duration_secs: f64, rate: f64, quality: f64) -> f64 {
    if duration_secs <= 0.0 || rate <= 0.0 || quality <= 0.0 {
        return level;
    }
    let fraction = 1.0 - (-rate * duration_secs).exp();
    (level - level * fraction * quality).max(0.0)
}
