//! Read-only capability query surface consumed by the simulator.

use crate::fatigue::{normalize_movement, Modality};

use super::capabilities::CpProfile;

/// Rep-time slowdown per unit of fatigue for loaded barbell work.
pub const BARBELL_FATIGUE_SLOWDOWN: f64 = 0.4;
/// Rep-time slowdown per unit of fatigue for movements without a profile.
pub const DEFAULT_FATIGUE_SLOWDOWN: f64 = 0.3;
/// Fallback pace (s/rep) for movements with no known pace.
pub const FALLBACK_PACE_SECS: f64 = 2.0;

/// Fresh pace for common bodyweight movements (s/rep).
pub fn default_pace(movement: &str) -> f64 {
    match normalize_movement(movement).as_str() {
        "burpee" => 4.0,
        "box-jump" => 2.5,
        "air-squat" => 1.0,
        "push-up" => 1.5,
        "sit-up" => 1.2,
        _ => FALLBACK_PACE_SECS,
    }
}

/// Athlete capabilities as seen by the simulator.
///
/// Implementors answer per-movement queries; rep duration and load intensity
/// come as provided methods built on top of them. Every query must be a pure
/// function of its arguments so that repeated runs stay deterministic.
pub trait CapabilityProvider: Send + Sync {
    /// Display name used in results.
    fn name(&self) -> &str {
        "athlete"
    }

    /// One-rep max in kg, if known.
    fn one_rep_max(&self, movement: &str) -> Option<f64>;

    /// Fresh rep time in seconds for a loaded barbell movement.
    fn barbell_rep_time(&self, movement: &str, load_kg: f64) -> Option<f64>;

    /// Gymnastics cycle time at the given local fatigue.
    fn gym_cycle_time(&self, movement: &str, fatigue: f64) -> Option<f64>;

    /// Maximum unbroken reps at the given local fatigue.
    fn gym_unbroken_capacity(&self, movement: &str, fatigue: f64) -> Option<u32>;

    /// Critical-power profile for a cardio modality.
    fn cardio_profile(&self, modality: Modality) -> Option<CpProfile>;

    /// W' recovery time constant for a modality, given the model default.
    fn recovery_time_constant(&self, _modality: Modality, base_tau: f64) -> f64 {
        base_tau
    }

    /// Load as a fraction of one-rep max. Zero for bodyweight work or when
    /// the max is unknown.
    fn load_intensity(&self, movement: &str, load_kg: Option<f64>) -> f64 {
        let Some(load) = load_kg else {
            return 0.0;
        };
        match self.one_rep_max(movement) {
            Some(max) if max > 0.0 => (load / max).max(0.0),
            _ => {
                tracing::debug!(movement, "No one-rep max, treating load as bodyweight");
                0.0
            }
        }
    }

    /// Seconds for one rep at the given fatigue.
    ///
    /// Loaded movements with a known max use the barbell model, movements with
    /// a gymnastics profile use their cycle time, anything else uses a default
    /// pace.
    fn rep_duration(&self, movement: &str, load_kg: Option<f64>, fatigue: f64) -> f64 {
        let fatigue = fatigue.max(0.0);
        if let Some(load) = load_kg {
            if let Some(rep_time) = self.barbell_rep_time(movement, load) {
                return rep_time * (1.0 + fatigue * BARBELL_FATIGUE_SLOWDOWN);
            }
        }
        if let Some(cycle) = self.gym_cycle_time(movement, fatigue) {
            return cycle;
        }
        default_pace(movement) * (1.0 + fatigue * DEFAULT_FATIGUE_SLOWDOWN)
    }
}
