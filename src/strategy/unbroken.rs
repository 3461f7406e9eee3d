//! Unbroken: go until fatigue forces a break.

use super::types::{check_threshold, PacingStrategy, RepBoundary, StrategyError};

/// Rests only when fatigue crosses a high threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct UnbrokenStrategy {
    fatigue_threshold: f64,
}

impl UnbrokenStrategy {
    pub const DEFAULT_THRESHOLD: f64 = 0.9;

    pub fn new(fatigue_threshold: f64) -> Result<Self, StrategyError> {
        Ok(Self {
            fatigue_threshold: check_threshold(fatigue_threshold)?,
        })
    }

    pub fn fatigue_threshold(&self) -> f64 {
        self.fatigue_threshold
    }
}

impl Default for UnbrokenStrategy {
    fn default() -> Self {
        Self {
            fatigue_threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl PacingStrategy for UnbrokenStrategy {
    fn name(&self) -> &str {
        "Unbroken"
    }

    fn should_rest(&mut self, at: &RepBoundary<'_>) -> bool {
        at.fatigue >= self.fatigue_threshold
    }

    fn rest_duration(&mut self, at: &RepBoundary<'_>) -> f64 {
        if at.fatigue < 0.5 {
            5.0
        } else if at.fatigue < 0.8 {
            10.0
        } else {
            20.0
        }
    }

    fn clone_box(&self) -> Box<dyn PacingStrategy> {
        Box::new(self.clone())
    }
}
