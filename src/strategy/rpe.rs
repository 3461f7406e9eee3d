//! RPE-driven pacing.
//!
//! An intended RPE (0-10) is mapped to concrete constraints by linear
//! interpolation. Set schemes are planned from the athlete's unbroken
//! capacity the first time an exercise is seen and memoized until `reset`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{at_set_boundary, PacingStrategy, RepBoundary};
use crate::fatigue::normalize_movement;

/// Unbroken capacity assumed when none is registered.
pub const DEFAULT_UNBROKEN_CAPACITY: u32 = 20;

/// Named RPE bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpeLevel {
    Recovery,
    Easy,
    Moderate,
    Vigorous,
    VeryHard,
    Maximal,
}

impl RpeLevel {
    pub fn from_rpe(rpe: u8) -> Self {
        match rpe.min(10) {
            0..=1 => RpeLevel::Recovery,
            2..=3 => RpeLevel::Easy,
            4..=5 => RpeLevel::Moderate,
            6..=7 => RpeLevel::Vigorous,
            8..=9 => RpeLevel::VeryHard,
            _ => RpeLevel::Maximal,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RpeLevel::Recovery => "Recovery - Very light activity",
            RpeLevel::Easy => "Easy - Light effort, can maintain conversation",
            RpeLevel::Moderate => "Moderate - Some effort, can speak in phrases",
            RpeLevel::Vigorous => "Vigorous - Hard effort, limited speech",
            RpeLevel::VeryHard => "Very Hard - Very hard effort, one word responses",
            RpeLevel::Maximal => "Maximal - All-out effort, cannot speak",
        }
    }
}

/// Execution limits derived from an intended RPE.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RpeConstraints {
    pub target_rpe: u8,
    /// Fractions of one-rep max
    pub max_load_pct: f64,
    pub preferred_load_pct: f64,
    /// Fractions of unbroken capacity
    pub max_set_fraction: f64,
    pub preferred_set_fraction: f64,
    /// Fraction of W' spent above critical output
    pub max_cardio_intensity: f64,
    /// Fraction of W' held back; larger at low RPE
    pub cardio_reserve: f64,
    pub min_rest_between_sets: f64,
    pub min_rest_between_movements: f64,
    pub local_fatigue_threshold: f64,
    pub global_fatigue_threshold: f64,
}

fn lerp(low: f64, high: f64, t: f64) -> f64 {
    low + (high - low) * t
}

/// Constraints for an RPE. Values above 10 are clamped.
pub fn rpe_to_constraints(rpe: u8) -> RpeConstraints {
    let rpe = rpe.min(10);
    let t = rpe as f64 / 10.0;
    RpeConstraints {
        target_rpe: rpe,
        max_load_pct: lerp(0.50, 0.95, t),
        preferred_load_pct: lerp(0.40, 0.80, t),
        max_set_fraction: lerp(0.30, 0.90, t),
        preferred_set_fraction: lerp(0.25, 0.70, t),
        max_cardio_intensity: lerp(0.20, 0.80, t),
        cardio_reserve: lerp(0.50, 0.10, t),
        min_rest_between_sets: lerp(15.0, 3.0, t),
        min_rest_between_movements: lerp(30.0, 5.0, t),
        local_fatigue_threshold: lerp(0.3, 1.2, t),
        global_fatigue_threshold: lerp(0.2, 0.8, t),
    }
}

/// Planned sets for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetScheme {
    pub reps_per_set: Vec<u32>,
    /// Rest after each set; the last entry is always zero
    pub rest_after_set: Vec<f64>,
}

impl SetScheme {
    pub fn total_reps(&self) -> u32 {
        self.reps_per_set.iter().sum()
    }

    pub fn total_sets(&self) -> usize {
        self.reps_per_set.len()
    }

    pub fn total_rest(&self) -> f64 {
        self.rest_after_set.iter().sum()
    }

    /// Planned rest after the set ending at `reps_done`, if that is a boundary.
    pub fn rest_at(&self, reps_done: u32) -> Option<f64> {
        let mut done = 0u32;
        for (reps, rest) in self.reps_per_set.iter().zip(&self.rest_after_set) {
            done += *reps;
            if done == reps_done {
                return Some(*rest);
            }
        }
        None
    }
}

impl RpeConstraints {
    /// Split `total_reps` given fresh unbroken capacity and current fatigue.
    ///
    /// Sets start at the preferred fraction of fatigue-adjusted capacity and
    /// shrink by 10% per set already planned.
    pub fn set_scheme(&self, total_reps: u32, unbroken_capacity: u32, fatigue: f64) -> SetScheme {
        let fatigue = fatigue.max(0.0);
        let effective = ((unbroken_capacity as f64 / (1.0 + fatigue * 0.3)).floor() as u32).max(1);
        let preferred = ((effective as f64 * self.preferred_set_fraction).floor() as u32).max(1);

        if total_reps <= preferred {
            return SetScheme {
                reps_per_set: vec![total_reps],
                rest_after_set: vec![0.0],
            };
        }

        let mut reps_per_set: Vec<u32> = Vec::new();
        let mut remaining = total_reps;
        while remaining > 0 {
            let base = preferred.min(remaining) as f64;
            let shrink = 1.0 - reps_per_set.len() as f64 * 0.1;
            let set = ((base * shrink).floor().max(0.0) as u32).max(1);
            reps_per_set.push(set);
            remaining -= set;
        }

        let last = reps_per_set.len() - 1;
        let rest_after_set = reps_per_set
            .iter()
            .enumerate()
            .map(|(i, reps)| {
                if i == last {
                    0.0
                } else {
                    self.min_rest_between_sets * (*reps as f64 / preferred as f64)
                        * (1.0 + fatigue * 0.5)
                }
            })
            .collect();

        SetScheme {
            reps_per_set,
            rest_after_set,
        }
    }

    /// Rest between two movements, longer when they share pattern buckets.
    pub fn transition_rest(&self, shared_patterns: usize, peak_fatigue: f64) -> f64 {
        let base = self.min_rest_between_movements * (1.0 + shared_patterns as f64 * 0.5);
        base * (1.0 + peak_fatigue.max(0.0) * 0.3)
    }
}

impl std::fmt::Display for RpeConstraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "RPE {} Strategy - {}",
            self.target_rpe,
            RpeLevel::from_rpe(self.target_rpe).description()
        )?;
        writeln!(
            f,
            "Load: {:.0}% of 1RM (max {:.0}%)",
            self.preferred_load_pct * 100.0,
            self.max_load_pct * 100.0
        )?;
        writeln!(
            f,
            "Set Size: {:.0}% of capacity (max {:.0}%)",
            self.preferred_set_fraction * 100.0,
            self.max_set_fraction * 100.0
        )?;
        write!(
            f,
            "Rest: {:.0}s between sets, {:.0}s between movements",
            self.min_rest_between_sets, self.min_rest_between_movements
        )
    }
}

/// Pacing from RPE constraints and per-movement unbroken capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct RpeStrategy {
    name: String,
    constraints: RpeConstraints,
    capacities: BTreeMap<String, u32>,
    plans: BTreeMap<(String, u32), SetScheme>,
}

impl RpeStrategy {
    pub fn new(rpe: u8) -> Self {
        Self::from_constraints(rpe_to_constraints(rpe))
    }

    pub fn from_constraints(constraints: RpeConstraints) -> Self {
        Self {
            name: format!("RPE {}", constraints.target_rpe),
            constraints,
            capacities: BTreeMap::new(),
            plans: BTreeMap::new(),
        }
    }

    /// Register a fresh unbroken capacity for a movement.
    pub fn with_capacity(mut self, movement: &str, unbroken: u32) -> Self {
        self.capacities
            .insert(normalize_movement(movement), unbroken.max(1));
        self
    }

    pub fn constraints(&self) -> &RpeConstraints {
        &self.constraints
    }

    fn plan(&mut self, exercise: &str, total_reps: u32, fatigue: f64) -> &SetScheme {
        let key = normalize_movement(exercise);
        let capacity = self
            .capacities
            .get(&key)
            .copied()
            .unwrap_or(DEFAULT_UNBROKEN_CAPACITY);
        let constraints = self.constraints;
        self.plans
            .entry((key, total_reps))
            .or_insert_with(|| constraints.set_scheme(total_reps, capacity, fatigue))
    }
}

impl PacingStrategy for RpeStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn should_rest(&mut self, at: &RepBoundary<'_>) -> bool {
        if at.reps_done > 0 && at.fatigue > self.constraints.local_fatigue_threshold {
            return true;
        }
        let plan = self.plan(at.exercise, at.target_reps, at.fatigue);
        at_set_boundary(&plan.reps_per_set, at.reps_done, at.target_reps)
    }

    fn rest_duration(&mut self, at: &RepBoundary<'_>) -> f64 {
        let floor = self.constraints.min_rest_between_sets * (1.0 + at.fatigue.max(0.0) * 0.5);
        let planned = self
            .plan(at.exercise, at.target_reps, at.fatigue)
            .rest_at(at.reps_done)
            .unwrap_or(0.0);
        planned.max(floor)
    }

    fn set_breakdown(&mut self, exercise: &str, total_reps: u32) -> Vec<u32> {
        self.plan(exercise, total_reps, 0.0).reps_per_set.clone()
    }

    fn reset(&mut self) {
        self.plans.clear();
    }

    fn clone_box(&self) -> Box<dyn PacingStrategy> {
        Box::new(self.clone())
    }
}
