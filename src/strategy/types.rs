//! Pacing strategy contract and shared types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fatigue::normalize_movement;

/// Decision input at a rep boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepBoundary<'a> {
    /// Exercise name as written in the workout
    pub exercise: &'a str,
    /// Reps already completed in this exercise
    pub reps_done: u32,
    /// Reps the exercise calls for
    pub target_reps: u32,
    /// Effective fatigue of the exercise's movement
    pub fatigue: f64,
    /// Workout clock in seconds
    pub elapsed: f64,
}

/// Rest/continue policy queried once per rep boundary.
///
/// Strategies may cache derived plans, but never touch fatigue state; every
/// mutation flows through the simulator.
pub trait PacingStrategy: Send {
    /// Name used in results.
    fn name(&self) -> &str;

    /// Whether to rest before the next rep.
    fn should_rest(&mut self, at: &RepBoundary<'_>) -> bool;

    /// Rest length in seconds, asked only after `should_rest` returned true.
    fn rest_duration(&mut self, at: &RepBoundary<'_>) -> f64;

    /// Planned rep split for an exercise.
    fn set_breakdown(&mut self, _exercise: &str, total_reps: u32) -> Vec<u32> {
        vec![total_reps]
    }

    /// Drop cached plans.
    fn reset(&mut self) {}

    /// Clone behind a box, for search layers that fan one strategy out.
    fn clone_box(&self) -> Box<dyn PacingStrategy>;
}

impl Clone for Box<dyn PacingStrategy> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for dyn PacingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacingStrategy")
            .field("name", &self.name())
            .finish()
    }
}

/// Errors from strategy construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StrategyError {
    /// Fatigue thresholds live in 0..=1
    #[error("Fatigue threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),

    /// A rest pattern needs at least one rep per set
    #[error("reps_before_rest must be positive")]
    ZeroRepsBeforeRest,

    /// Max consecutive reps, when set, must be positive
    #[error("max_consecutive_reps must be positive")]
    ZeroMaxConsecutive,

    /// Rest durations cannot be negative
    #[error("Rest duration cannot be negative, got {0}")]
    NegativeRest(f64),
}

pub(crate) fn check_threshold(threshold: f64) -> Result<f64, StrategyError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(StrategyError::InvalidThreshold(threshold))
    }
}

/// Planned set size and rest for one exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestPattern {
    pub reps_before_rest: u32,
    pub rest_seconds: f64,
    #[serde(default)]
    pub max_consecutive_reps: Option<u32>,
}

impl RestPattern {
    pub fn new(reps_before_rest: u32, rest_seconds: f64) -> Result<Self, StrategyError> {
        if reps_before_rest == 0 {
            return Err(StrategyError::ZeroRepsBeforeRest);
        }
        if rest_seconds.is_nan() || rest_seconds < 0.0 {
            return Err(StrategyError::NegativeRest(rest_seconds));
        }
        Ok(Self {
            reps_before_rest,
            rest_seconds,
            max_consecutive_reps: None,
        })
    }

    pub fn with_max_consecutive(mut self, max: u32) -> Result<Self, StrategyError> {
        if max == 0 {
            return Err(StrategyError::ZeroMaxConsecutive);
        }
        self.max_consecutive_reps = Some(max);
        Ok(self)
    }

    /// Split `total_reps` into sets of `reps_before_rest`.
    pub fn split(&self, total_reps: u32) -> Vec<u32> {
        let mut sets = Vec::new();
        let mut remaining = total_reps;
        while remaining > 0 {
            let set = remaining.min(self.reps_before_rest);
            sets.push(set);
            remaining -= set;
        }
        sets
    }
}

/// Rest patterns keyed by normalized movement name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestPatterns(BTreeMap<String, RestPattern>);

impl RestPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, exercise: &str, pattern: RestPattern) -> Self {
        self.0.insert(normalize_movement(exercise), pattern);
        self
    }

    /// Build from `(exercise, reps_before_rest, rest_seconds)` triples.
    pub fn from_triples(triples: &[(&str, u32, f64)]) -> Result<Self, StrategyError> {
        triples
            .iter()
            .try_fold(Self::new(), |patterns, (exercise, reps, rest)| {
                Ok(patterns.with(exercise, RestPattern::new(*reps, *rest)?))
            })
    }

    pub fn get(&self, exercise: &str) -> Option<&RestPattern> {
        self.0.get(&normalize_movement(exercise))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether `reps_done` sits on an inner set boundary of `sets`.
pub(crate) fn at_set_boundary(sets: &[u32], reps_done: u32, target_reps: u32) -> bool {
    if reps_done == 0 || reps_done >= target_reps {
        return false;
    }
    sets.iter()
        .scan(0u32, |done, set| {
            *done += set;
            Some(*done)
        })
        .any(|boundary| boundary == reps_done)
}
