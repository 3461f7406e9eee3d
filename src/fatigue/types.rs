//! Fatigue model parameters and snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::patterns::{Modality, MovementPattern};

/// Cardio recovery time constants per modality (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardioTimeConstants {
    pub bike: f64,
    pub row: f64,
    pub run: f64,
    pub swim: f64,
    pub ski: f64,
}

impl Default for CardioTimeConstants {
    fn default() -> Self {
        Self {
            bike: 300.0,
            row: 320.0,
            run: 280.0,
            swim: 350.0,
            ski: 300.0,
        }
    }
}

impl CardioTimeConstants {
    /// Time constant for a modality.
    pub fn for_modality(&self, modality: Modality) -> f64 {
        match modality {
            Modality::Bike => self.bike,
            Modality::Row => self.row,
            Modality::Run => self.run,
            Modality::Swim => self.swim,
            Modality::Ski => self.ski,
        }
    }
}

/// Coefficients of the local/global fatigue model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FatigueModelConfig {
    /// Local fatigue injected per rep at zero load.
    pub local_accumulation_rate: f64,
    /// Local recovery rate (1/s).
    pub local_recovery_rate: f64,
    /// Extra cost per 20 reps in one injection.
    pub rep_count_penalty: f64,
    /// Global fatigue per rep at zero load.
    pub global_increment: f64,
    /// Global recovery rate (1/s).
    pub global_recovery_rate: f64,
    /// Weight of global fatigue in movement fatigue.
    pub global_weight: f64,
    /// Cardio recovery time constants.
    pub cardio_tau: CardioTimeConstants,
}

impl Default for FatigueModelConfig {
    fn default() -> Self {
        Self {
            local_accumulation_rate: 0.1,
            local_recovery_rate: 0.05,
            rep_count_penalty: 0.3,
            global_increment: 0.01,
            global_recovery_rate: 0.02,
            global_weight: 0.3,
            cardio_tau: CardioTimeConstants::default(),
        }
    }
}

/// Point-in-time view of every fatigue system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FatigueSnapshot {
    /// Global fatigue scalar.
    pub global: f64,
    /// Local fatigue per pattern bucket.
    pub local: BTreeMap<MovementPattern, f64>,
    /// W' balance per registered modality.
    pub cardio_balance: BTreeMap<Modality, f64>,
    /// Cardio fatigue factor per registered modality.
    pub cardio_fatigue: BTreeMap<Modality, f64>,
}
