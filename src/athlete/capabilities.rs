//! Reference capability provider built from measurable athlete parameters.
//!
//! - Barbell rep time from load as a fraction of one-rep max
//! - Gymnastics cycle time and unbroken capacity degraded by local fatigue
//! - Critical power (or speed) and W' per cardio modality

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::provider::CapabilityProvider;
use crate::fatigue::{normalize_movement, Modality};

/// Load ratio ceiling for the barbell model.
const MAX_LOAD_RATIO: f64 = 1.2;

/// Rep time as a function of load: `base * (1 + ratio^exp) + transition`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarbellProfile {
    /// Cycle time at minimal load (s)
    pub base_cycle_secs: f64,
    /// Load scaling exponent
    pub load_exponent: f64,
    /// Setup, lockout and drop time (s)
    pub transition_secs: f64,
}

impl Default for BarbellProfile {
    fn default() -> Self {
        Self {
            base_cycle_secs: 1.7,
            load_exponent: 2.0,
            transition_secs: 0.4,
        }
    }
}

impl BarbellProfile {
    /// Seconds for one rep at `load_kg` given a one-rep max.
    pub fn rep_time(&self, load_kg: f64, one_rm_kg: f64) -> f64 {
        if one_rm_kg <= 0.0 {
            return self.base_cycle_secs + self.transition_secs;
        }
        let ratio = (load_kg / one_rm_kg).clamp(0.0, MAX_LOAD_RATIO);
        self.base_cycle_secs * (1.0 + ratio.powf(self.load_exponent)) + self.transition_secs
    }
}

/// Gymnastics skill profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GymSkill {
    /// Fresh cycle time (s/rep)
    pub cycle_secs: f64,
    /// Fresh maximum unbroken reps
    pub unbroken_cap: u32,
    /// Cycle time growth per unit of fatigue
    pub fatigue_slope: f64,
    /// Unbroken capacity loss per unit of fatigue
    pub set_decay: f64,
}

impl GymSkill {
    pub fn new(cycle_secs: f64, unbroken_cap: u32) -> Self {
        Self {
            cycle_secs,
            unbroken_cap,
            fatigue_slope: 0.35,
            set_decay: 0.25,
        }
    }

    pub fn effective_cycle_time(&self, fatigue: f64) -> f64 {
        self.cycle_secs * (1.0 + fatigue * self.fatigue_slope)
    }

    pub fn effective_unbroken_cap(&self, fatigue: f64) -> u32 {
        let reduced = self.unbroken_cap as f64 * (1.0 - fatigue * self.set_decay);
        (reduced.floor() as u32).max(1)
    }
}

/// Critical power (W) or speed (m/s) with its anaerobic reserve W' (J or m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpProfile {
    pub critical: f64,
    pub w_prime: f64,
}

impl CpProfile {
    pub fn new(critical: f64, w_prime: f64) -> Self {
        Self { critical, w_prime }
    }

    /// Output sustainable for exactly `duration_secs`: `CP + W'/t`.
    pub fn power_duration_curve(&self, duration_secs: f64) -> f64 {
        if duration_secs <= 0.0 {
            return self.critical;
        }
        self.critical + self.w_prime / duration_secs
    }

    /// Seconds to exhaustion at `output`. None at or below critical output.
    pub fn time_to_exhaustion(&self, output: f64) -> Option<f64> {
        if output <= self.critical {
            return None;
        }
        Some(self.w_prime / (output - self.critical))
    }
}

fn default_lift_aliases() -> BTreeMap<String, String> {
    [
        ("thruster", "front-squat"),
        ("push-press", "overhead-press"),
        ("hang-clean", "clean"),
        ("hang-snatch", "snatch"),
        ("sumo-deadlift", "deadlift"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Concrete athlete capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteCapabilities {
    pub name: String,
    pub body_mass_kg: f64,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    one_rm: BTreeMap<String, f64>,
    #[serde(default)]
    pub barbell: BarbellProfile,
    #[serde(default)]
    gym_skills: BTreeMap<String, GymSkill>,
    #[serde(default)]
    cardio: BTreeMap<Modality, CpProfile>,
    #[serde(default = "default_lift_aliases")]
    lift_aliases: BTreeMap<String, String>,
}

impl AthleteCapabilities {
    pub fn new(name: &str, body_mass_kg: f64) -> Self {
        Self {
            name: name.to_string(),
            body_mass_kg,
            height_cm: None,
            one_rm: BTreeMap::new(),
            barbell: BarbellProfile::default(),
            gym_skills: BTreeMap::new(),
            cardio: BTreeMap::new(),
            lift_aliases: default_lift_aliases(),
        }
    }

    pub fn with_height(mut self, height_cm: f64) -> Self {
        self.height_cm = Some(height_cm);
        self
    }

    pub fn with_one_rm(mut self, movement: &str, kg: f64) -> Self {
        self.one_rm.insert(normalize_movement(movement), kg);
        self
    }

    pub fn with_gym_skill(mut self, movement: &str, skill: GymSkill) -> Self {
        self.gym_skills.insert(normalize_movement(movement), skill);
        self
    }

    pub fn with_cardio_profile(mut self, modality: Modality, profile: CpProfile) -> Self {
        self.cardio.insert(modality, profile);
        self
    }

    pub fn with_lift_alias(mut self, movement: &str, base: &str) -> Self {
        self.lift_aliases
            .insert(normalize_movement(movement), normalize_movement(base));
        self
    }

    pub fn with_barbell_profile(mut self, profile: BarbellProfile) -> Self {
        self.barbell = profile;
        self
    }

    /// Registered gymnastics skill for a movement.
    pub fn gym_skill(&self, movement: &str) -> Option<&GymSkill> {
        self.gym_skills.get(&normalize_movement(movement))
    }

    /// Modalities with a critical-power profile.
    pub fn cardio_modalities(&self) -> impl Iterator<Item = Modality> + '_ {
        self.cardio.keys().copied()
    }

    /// Weighted bodyweight multiple across the main compound lifts.
    pub fn estimate_relative_strength(&self) -> Option<f64> {
        if self.one_rm.is_empty() || self.body_mass_kg <= 0.0 {
            return None;
        }
        let weights = [
            ("back-squat", 0.4),
            ("deadlift", 0.3),
            ("clean", 0.2),
            ("overhead-press", 0.1),
        ];
        let (ratio, weight) = weights
            .iter()
            .filter_map(|(movement, w)| self.one_rep_max(movement).map(|max| (max, *w)))
            .fold((0.0, 0.0), |(r, tw), (max, w)| {
                (r + max / self.body_mass_kg * w, tw + w)
            });
        (weight > 0.0).then(|| ratio / weight)
    }

    /// Rough VO2 max (ml/kg/min) from rowing power or running speed.
    pub fn estimate_aerobic_capacity(&self) -> Option<f64> {
        if let Some(row) = self.cardio.get(&Modality::Row) {
            if self.body_mass_kg > 0.0 {
                return Some((row.critical / self.body_mass_kg * 12.0).clamp(20.0, 80.0));
            }
        }
        self.cardio
            .get(&Modality::Run)
            .map(|run| (run.critical * 12.7).clamp(20.0, 80.0))
    }

    /// Realism report: parameter name to message. Never fatal.
    pub fn validate(&self) -> BTreeMap<String, String> {
        let mut issues = BTreeMap::new();

        if self.body_mass_kg <= 30.0 || self.body_mass_kg > 200.0 {
            issues.insert(
                "body_mass_kg".to_string(),
                "Body mass should be between 30-200 kg".to_string(),
            );
        }
        if let Some(height) = self.height_cm {
            if !(120.0..=250.0).contains(&height) {
                issues.insert(
                    "height_cm".to_string(),
                    "Height should be between 120-250 cm".to_string(),
                );
            }
        }

        for (movement, kg) in &self.one_rm {
            let key = format!("one_rm_{}", movement);
            if *kg <= 0.0 {
                issues.insert(key, format!("{} 1RM must be positive", movement));
                continue;
            }
            let ratio = kg / self.body_mass_kg;
            let max_ratio = match movement.as_str() {
                "back-squat" => 3.5,
                "front-squat" => 2.8,
                "deadlift" => 4.0,
                "clean" => 2.5,
                "snatch" => 2.0,
                "overhead-press" => 1.8,
                "bench-press" => 2.5,
                _ => 3.0,
            };
            if ratio > max_ratio {
                issues.insert(
                    key,
                    format!("{} 1RM seems unrealistic ({:.1}x bodyweight)", movement, ratio),
                );
            }
        }

        for (movement, skill) in &self.gym_skills {
            if skill.cycle_secs <= 0.0 {
                issues.insert(
                    format!("gym_{}_cycle", movement),
                    format!("{} cycle time must be positive", movement),
                );
            }
            if skill.unbroken_cap == 0 {
                issues.insert(
                    format!("gym_{}_unbroken", movement),
                    format!("{} unbroken capacity must be positive", movement),
                );
            }
        }

        for (modality, profile) in &self.cardio {
            if profile.critical <= 0.0 {
                issues.insert(
                    format!("cardio_{}_cp", modality),
                    format!("{} critical output must be positive", modality),
                );
            }
            if profile.w_prime < 0.0 {
                issues.insert(
                    format!("cardio_{}_wprime", modality),
                    format!("{} W' cannot be negative", modality),
                );
            }
        }

        issues
    }
}

impl CapabilityProvider for AthleteCapabilities {
    fn name(&self) -> &str {
        &self.name
    }

    /// Direct lookup first, then through the lift alias table.
    fn one_rep_max(&self, movement: &str) -> Option<f64> {
        let key = normalize_movement(movement);
        if let Some(kg) = self.one_rm.get(&key) {
            return Some(*kg);
        }
        self.lift_aliases
            .get(&key)
            .and_then(|base| self.one_rm.get(base))
            .copied()
    }

    fn barbell_rep_time(&self, movement: &str, load_kg: f64) -> Option<f64> {
        self.one_rep_max(movement)
            .map(|max| self.barbell.rep_time(load_kg, max))
    }

    fn gym_cycle_time(&self, movement: &str, fatigue: f64) -> Option<f64> {
        self.gym_skill(movement)
            .map(|skill| skill.effective_cycle_time(fatigue))
    }

    fn gym_unbroken_capacity(&self, movement: &str, fatigue: f64) -> Option<u32> {
        self.gym_skill(movement)
            .map(|skill| skill.effective_unbroken_cap(fatigue))
    }

    fn cardio_profile(&self, modality: Modality) -> Option<CpProfile> {
        self.cardio.get(&modality).copied()
    }

    /// Fitter athletes recover faster: scaled by (50 / VO2max)^0.3.
    fn recovery_time_constant(&self, _modality: Modality, base_tau: f64) -> f64 {
        match self.estimate_aerobic_capacity() {
            Some(vo2) => base_tau * (50.0 / vo2).powf(0.3),
            None => base_tau,
        }
    }
}

impl std::fmt::Display for AthleteCapabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({}kg)", self.name, self.body_mass_kg)?;
        for (movement, kg) in &self.one_rm {
            writeln!(
                f,
                "  1RM {}: {}kg ({:.1}x BW)",
                movement,
                kg,
                kg / self.body_mass_kg
            )?;
        }
        for (movement, skill) in &self.gym_skills {
            writeln!(
                f,
                "  {}: {:.1}s/rep, max {}",
                movement, skill.cycle_secs, skill.unbroken_cap
            )?;
        }
        for (modality, profile) in &self.cardio {
            if modality.is_speed_based() {
                writeln!(
                    f,
                    "  {}: CS={:.1}m/s, D'={:.0}m",
                    modality, profile.critical, profile.w_prime
                )?;
            } else {
                writeln!(
                    f,
                    "  {}: CP={:.0}W, W'={:.0}J",
                    modality, profile.critical, profile.w_prime
                )?;
            }
        }
        Ok(())
    }
}
