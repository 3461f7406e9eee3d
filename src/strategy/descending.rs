//! Descending ladder: shrinking set sizes (e.g. 7-6-5-3) to hold pace.
//!
//! The ladder for an (exercise, total reps) pair is computed once and memoized
//! until `reset`.

use std::collections::BTreeMap;

use super::types::{at_set_boundary, check_threshold, PacingStrategy, RepBoundary, StrategyError};
use crate::fatigue::normalize_movement;

/// Descending set sizes with fatigue-scaled rest between sets.
#[derive(Debug, Clone, PartialEq)]
pub struct DescendingStrategy {
    fatigue_threshold: f64,
    ladders: BTreeMap<(String, u32), Vec<u32>>,
}

impl DescendingStrategy {
    pub const DEFAULT_THRESHOLD: f64 = 0.75;

    pub fn new(fatigue_threshold: f64) -> Result<Self, StrategyError> {
        Ok(Self {
            fatigue_threshold: check_threshold(fatigue_threshold)?,
            ladders: BTreeMap::new(),
        })
    }

    /// Number of memoized ladders.
    pub fn cached_plans(&self) -> usize {
        self.ladders.len()
    }

    fn ladder(&mut self, exercise: &str, total_reps: u32) -> &[u32] {
        self.ladders
            .entry((normalize_movement(exercise), total_reps))
            .or_insert_with(|| descending_sets(total_reps))
            .as_slice()
    }
}

impl Default for DescendingStrategy {
    fn default() -> Self {
        Self {
            fatigue_threshold: Self::DEFAULT_THRESHOLD,
            ladders: BTreeMap::new(),
        }
    }
}

/// Descending ladder for `total_reps`.
///
/// Starts at a third of the work (max 10) and drops one rep per set; the tail
/// is taken whole when it fits, or split in two when it is under 1.5 sets.
pub fn descending_sets(total_reps: u32) -> Vec<u32> {
    if total_reps <= 5 {
        return vec![total_reps];
    }
    let mut sets = Vec::new();
    let mut remaining = total_reps;
    let mut set_size = (total_reps / 3).min(10);

    while remaining > 0 {
        if remaining <= set_size {
            sets.push(remaining);
            break;
        }
        if remaining as f64 <= set_size as f64 * 1.5 {
            let first = remaining / 2;
            sets.push(first);
            sets.push(remaining - first);
            break;
        }
        sets.push(set_size);
        remaining -= set_size;
        set_size = set_size.saturating_sub(1).max(1);
    }
    sets
}

impl PacingStrategy for DescendingStrategy {
    fn name(&self) -> &str {
        "Descending"
    }

    fn should_rest(&mut self, at: &RepBoundary<'_>) -> bool {
        if at.fatigue >= self.fatigue_threshold {
            return true;
        }
        let ladder = self.ladder(at.exercise, at.target_reps);
        at_set_boundary(ladder, at.reps_done, at.target_reps)
    }

    fn rest_duration(&mut self, at: &RepBoundary<'_>) -> f64 {
        8.0 + at.fatigue * 12.0
    }

    fn set_breakdown(&mut self, exercise: &str, total_reps: u32) -> Vec<u32> {
        self.ladder(exercise, total_reps).to_vec()
    }

    fn reset(&mut self) {
        self.ladders.clear();
    }

    fn clone_box(&self) -> Box<dyn PacingStrategy> {
        Box::new(self.clone())
    }
}
