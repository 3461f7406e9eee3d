//! Fatigue manager: all time-varying physiological state for one attempt.
//!
//! Two loosely coupled systems live here:
//! - Cardio reserves (W' balance), one per registered modality
//! - Local fatigue buckets per movement pattern, plus a coarse global scalar
//!
//! They only interact through the simulator's per-rep queries.

use std::collections::BTreeMap;

use super::cardio::CardioReserve;
use super::local::{decay, LocalFatigue};
use super::patterns::{Modality, MovementPattern, PatternTable};
use super::types::{FatigueModelConfig, FatigueSnapshot};

/// Owns the fatigue state of one simulated attempt.
#[derive(Debug, Clone)]
pub struct FatigueManager {
    config: FatigueModelConfig,
    patterns: PatternTable,
    cardio: BTreeMap<Modality, CardioReserve>,
    local: BTreeMap<MovementPattern, LocalFatigue>,
    global: f64,
}

impl FatigueManager {
    /// Create a fresh manager with the given model and pattern table.
    pub fn new(config: FatigueModelConfig, patterns: PatternTable) -> Self {
        Self {
            config,
            patterns,
            cardio: BTreeMap::new(),
            local: MovementPattern::all()
                .into_iter()
                .map(|p| (p, LocalFatigue::new(p)))
                .collect(),
            global: 0.0,
        }
    }

    /// Model coefficients in use.
    pub fn config(&self) -> &FatigueModelConfig {
        &self.config
    }

    /// Pattern table in use.
    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Register a modality with a full reserve. Re-registering replaces it.
    pub fn initialize_cardio(&mut self, modality: Modality, max_reserve: f64, tau_recovery: f64) {
        tracing::trace!(%modality, max_reserve, tau_recovery, "Cardio reserve registered");
        self.cardio
            .insert(modality, CardioReserve::new(modality, max_reserve, tau_recovery));
    }

    /// Whether a modality has a registered reserve.
    pub fn is_registered(&self, modality: Modality) -> bool {
        self.cardio.contains_key(&modality)
    }

    /// Drain the modality's reserve for work above critical output.
    ///
    /// Unregistered modalities are ignored.
    pub fn add_cardio_work(
        &mut self,
        modality: Modality,
        demanded_output: f64,
        critical_output: f64,
        duration_secs: f64,
    ) {
        match self.cardio.get_mut(&modality) {
            Some(reserve) => reserve.deplete(demanded_output, critical_output, duration_secs),
            None => tracing::debug!(%modality, "Cardio work on unregistered modality ignored"),
        }
    }

    /// Inject local fatigue for `reps` of a movement at `load_intensity`
    /// (fraction of one-rep max, 0 for bodyweight), done as one unbroken set.
    ///
    /// The cost is split evenly across the movement's buckets, so the total
    /// injected does not depend on how many buckets it maps to.
    pub fn add_local_work(&mut self, movement: &str, load_intensity: f64, reps: u32) {
        if reps == 0 {
            return;
        }
        let intensity = clean_intensity(load_intensity);
        let cost = self.set_cost(intensity, reps);
        self.inject_local(movement, cost);
        self.global += self.config.global_increment * reps as f64 * (1.0 + intensity);
    }

    /// Inject the `set_rep`-th rep of an unbroken set.
    ///
    /// Charges the marginal set cost, so reps 1..=n injected one by one add up
    /// to `add_local_work(movement, load_intensity, n)`.
    pub fn add_local_rep(&mut self, movement: &str, load_intensity: f64, set_rep: u32) {
        let set_rep = set_rep.max(1);
        let intensity = clean_intensity(load_intensity);
        let cost = self.set_cost(intensity, set_rep) - self.set_cost(intensity, set_rep - 1);
        self.inject_local(movement, cost);
        self.global += self.config.global_increment * (1.0 + intensity);
    }

    /// Local cost of an unbroken set, super-linear in its length.
    fn set_cost(&self, intensity: f64, reps: u32) -> f64 {
        let reps = reps as f64;
        let rep_penalty = 1.0 + (reps / 20.0) * self.config.rep_count_penalty;
        self.config.local_accumulation_rate * reps * (1.0 + intensity) * rep_penalty
    }

    fn inject_local(&mut self, movement: &str, cost: f64) {
        let patterns = self.patterns.patterns_for(movement);
        if patterns.is_empty() {
            return;
        }
        let share = cost / patterns.len() as f64;
        for pattern in patterns {
            self.local
                .entry(*pattern)
                .or_insert_with(|| LocalFatigue::new(*pattern))
                .add(share);
        }
    }

    /// Apply rest to every system.
    ///
    /// Local and global fatigue decay toward zero, cardio reserves regenerate
    /// toward their maximum. `recovery_quality` scales every system; zero or
    /// negative quality means no recovery.
    pub fn recover_all(&mut self, duration_secs: f64, recovery_quality: f64) {
        if !(duration_secs.is_finite() && recovery_quality.is_finite()) {
            return;
        }
        if duration_secs <= 0.0 || recovery_quality <= 0.0 {
            return;
        }

        let local_rate = self.config.local_recovery_rate;
        for bucket in self.local.values_mut() {
            bucket.recover(duration_secs, local_rate, recovery_quality);
        }

        self.global = decay(
            self.global,
            duration_secs,
            self.config.global_recovery_rate,
            recovery_quality,
        );

        for reserve in self.cardio.values_mut() {
            reserve.recover(duration_secs, recovery_quality);
        }
    }

    /// Effective fatigue for a movement: mean of its buckets plus damped global.
    pub fn movement_fatigue(&self, movement: &str) -> f64 {
        let patterns = self.patterns.patterns_for(movement);
        let local = if patterns.is_empty() {
            0.0
        } else {
            let total: f64 = patterns.iter().map(|p| self.bucket_fatigue(*p)).sum();
            total / patterns.len() as f64
        };
        local + self.global * self.config.global_weight
    }

    /// Whether `target_output` can be held for `duration_secs`.
    ///
    /// Unregistered modalities are treated as sustainable.
    pub fn cardio_sustainable(
        &self,
        modality: Modality,
        target_output: f64,
        critical_output: f64,
        duration_secs: f64,
    ) -> bool {
        self.cardio
            .get(&modality)
            .map(|r| r.can_sustain(target_output, critical_output, duration_secs))
            .unwrap_or(true)
    }

    /// Cardio fatigue factor (0 fresh, 1 empty). Zero when unregistered.
    pub fn cardio_fatigue(&self, modality: Modality) -> f64 {
        self.cardio
            .get(&modality)
            .map(CardioReserve::fatigue_factor)
            .unwrap_or(0.0)
    }

    /// Current W' balance of a registered modality.
    pub fn cardio_balance(&self, modality: Modality) -> Option<f64> {
        self.cardio.get(&modality).map(CardioReserve::balance)
    }

    /// Reserve state of a registered modality.
    pub fn cardio_reserve(&self, modality: Modality) -> Option<&CardioReserve> {
        self.cardio.get(&modality)
    }

    /// Fatigue of one pattern bucket.
    pub fn bucket_fatigue(&self, pattern: MovementPattern) -> f64 {
        self.local.get(&pattern).map(LocalFatigue::level).unwrap_or(0.0)
    }

    /// Global fatigue scalar.
    pub fn global_fatigue(&self) -> f64 {
        self.global
    }

    /// Whole-body summary: most fatigued bucket plus damped global.
    pub fn overall_fatigue(&self) -> f64 {
        let peak_local = self
            .local
            .values()
            .map(LocalFatigue::level)
            .fold(0.0, f64::max);
        peak_local + self.global * self.config.global_weight
    }

    /// Complete view of all systems.
    pub fn snapshot(&self) -> FatigueSnapshot {
        FatigueSnapshot {
            global: self.global,
            local: self.local.iter().map(|(p, b)| (*p, b.level())).collect(),
            cardio_balance: self
                .cardio
                .iter()
                .map(|(m, r)| (*m, r.balance()))
                .collect(),
            cardio_fatigue: self
                .cardio
                .iter()
                .map(|(m, r)| (*m, r.fatigue_factor()))
                .collect(),
        }
    }

    /// Restore fresh state in place, keeping modality registrations.
    pub fn reset(&mut self) {
        self.global = 0.0;
        for bucket in self.local.values_mut() {
            bucket.reset();
        }
        for reserve in self.cardio.values_mut() {
            reserve.reset();
        }
    }
}

fn clean_intensity(load_intensity: f64) -> f64 {
    if load_intensity.is_finite() {
        load_intensity.max(0.0)
    } else {
        0.0
    }
}

impl Default for FatigueManager {
    fn default() -> Self {
        Self::new(FatigueModelConfig::default(), PatternTable::default())
    }
}
