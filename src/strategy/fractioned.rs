//! Fractioned: planned sets with strategic rest.

use super::types::{
    check_threshold, PacingStrategy, RepBoundary, RestPatterns, StrategyError,
};

/// Breaks exercises into fixed sets per its rest patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct FractionedStrategy {
    name: String,
    patterns: RestPatterns,
    fatigue_threshold: f64,
}

impl FractionedStrategy {
    pub const DEFAULT_THRESHOLD: f64 = 0.7;

    pub fn new(patterns: RestPatterns, fatigue_threshold: f64) -> Result<Self, StrategyError> {
        Ok(Self {
            name: "Fractioned".to_string(),
            patterns,
            fatigue_threshold: check_threshold(fatigue_threshold)?,
        })
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn patterns(&self) -> &RestPatterns {
        &self.patterns
    }
}

impl Default for FractionedStrategy {
    fn default() -> Self {
        Self {
            name: "Fractioned".to_string(),
            patterns: RestPatterns::new(),
            fatigue_threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl PacingStrategy for FractionedStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn should_rest(&mut self, at: &RepBoundary<'_>) -> bool {
        if at.fatigue >= self.fatigue_threshold {
            return true;
        }
        let Some(pattern) = self.patterns.get(at.exercise) else {
            return false;
        };
        if at.reps_done == 0 {
            return false;
        }
        if at.reps_done % pattern.reps_before_rest == 0 {
            return true;
        }
        match pattern.max_consecutive_reps {
            Some(max) => at.reps_done % pattern.reps_before_rest >= max,
            None => false,
        }
    }

    fn rest_duration(&mut self, at: &RepBoundary<'_>) -> f64 {
        match self.patterns.get(at.exercise) {
            Some(pattern) => pattern.rest_seconds * (1.0 + at.fatigue * 0.5),
            None => 5.0 + at.fatigue * 10.0,
        }
    }

    fn set_breakdown(&mut self, exercise: &str, total_reps: u32) -> Vec<u32> {
        match self.patterns.get(exercise) {
            Some(pattern) => pattern.split(total_reps),
            None => vec![total_reps],
        }
    }

    fn clone_box(&self) -> Box<dyn PacingStrategy> {
        Box::new(self.clone())
    }
}
