//! Fixed-parameter capability provider for end-to-end runs.

use wodtwin::athlete::{CapabilityProvider, CpProfile};
use wodtwin::fatigue::Modality;

/// Athlete with constant fresh rep times and a thruster max of 100 kg.
pub struct MockAthlete {
    pub thruster_rep_secs: f64,
    pub pull_up_cycle_secs: f64,
}

impl Default for MockAthlete {
    fn default() -> Self {
        Self {
            thruster_rep_secs: 3.0,
            pull_up_cycle_secs: 2.0,
        }
    }
}

impl CapabilityProvider for MockAthlete {
    fn name(&self) -> &str {
        "Mock Athlete"
    }

    fn one_rep_max(&self, movement: &str) -> Option<f64> {
        (movement == "thruster").then_some(100.0)
    }

    fn barbell_rep_time(&self, movement: &str, _load_kg: f64) -> Option<f64> {
        (movement == "thruster").then_some(self.thruster_rep_secs)
    }

    fn gym_cycle_time(&self, movement: &str, fatigue: f64) -> Option<f64> {
        (movement == "pull-up").then(|| self.pull_up_cycle_secs * (1.0 + 0.35 * fatigue))
    }

    fn gym_unbroken_capacity(&self, movement: &str, _fatigue: f64) -> Option<u32> {
        (movement == "pull-up").then_some(20)
    }

    fn cardio_profile(&self, modality: Modality) -> Option<CpProfile> {
        match modality {
            Modality::Run => Some(CpProfile::new(4.0, 250.0)),
            Modality::Row => Some(CpProfile::new(250.0, 18000.0)),
            _ => None,
        }
    }
}
