//! Conservative: frequent short rests to keep fatigue low.

use super::types::{check_threshold, PacingStrategy, RepBoundary, RestPatterns, StrategyError};

/// Short, regular breaks; rests more often as fatigue rises.
#[derive(Debug, Clone, PartialEq)]
pub struct ConservativeStrategy {
    patterns: RestPatterns,
    fatigue_threshold: f64,
}

impl ConservativeStrategy {
    pub const DEFAULT_THRESHOLD: f64 = 0.6;

    pub fn new(patterns: RestPatterns, fatigue_threshold: f64) -> Result<Self, StrategyError> {
        Ok(Self {
            patterns,
            fatigue_threshold: check_threshold(fatigue_threshold)?,
        })
    }

    /// Reps between breaks for unpatterned exercises: 8 fresh, down to 5.
    pub fn rest_frequency(fatigue: f64) -> u32 {
        let reps = (8.0 - fatigue.max(0.0) * 3.0).floor();
        if reps < 5.0 {
            5
        } else {
            reps as u32
        }
    }
}

impl Default for ConservativeStrategy {
    fn default() -> Self {
        Self {
            patterns: RestPatterns::new(),
            fatigue_threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

impl PacingStrategy for ConservativeStrategy {
    fn name(&self) -> &str {
        "Conservative"
    }

    fn should_rest(&mut self, at: &RepBoundary<'_>) -> bool {
        if at.fatigue >= self.fatigue_threshold {
            return true;
        }
        if at.reps_done == 0 {
            return false;
        }
        let every = match self.patterns.get(at.exercise) {
            Some(pattern) => pattern.reps_before_rest,
            None => Self::rest_frequency(at.fatigue),
        };
        at.reps_done % every == 0
    }

    fn rest_duration(&mut self, at: &RepBoundary<'_>) -> f64 {
        match self.patterns.get(at.exercise) {
            Some(pattern) => pattern.rest_seconds,
            None => 3.0 + at.fatigue * 5.0,
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
