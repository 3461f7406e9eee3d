//! Environmental and daily-state effects.
//!
//! These are resolved outside the simulation loop into two scalars the
//! simulator consumes: a recovery-quality multiplier for rests and a pace
//! multiplier for reps.

use serde::{Deserialize, Serialize};

/// Training environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextParams {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub altitude_m: f64,
}

impl Default for ContextParams {
    fn default() -> Self {
        Self {
            temperature_c: 20.0,
            humidity_pct: 50.0,
            altitude_m: 0.0,
        }
    }
}

/// Athlete state on the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayState {
    pub sleep_hours: f64,
    /// 1-5 scale
    pub sleep_quality: u8,
    pub water_liters: f64,
    pub body_mass_kg: f64,
}

impl Default for DayState {
    fn default() -> Self {
        Self {
            sleep_hours: 7.5,
            sleep_quality: 3,
            water_liters: 2.0,
            body_mass_kg: 75.0,
        }
    }
}

/// Resolved multiplicative effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextFactors {
    /// U-shaped around 20 °C
    pub temperature: f64,
    /// Linear above 700 m
    pub altitude: f64,
    pub humidity: f64,
    /// Sleep-driven, 0.6..=1.05
    pub freshness: f64,
    /// Water intake vs target, 0.7..=1.1
    pub hydration: f64,
}

impl ContextFactors {
    pub fn compute(context: &ContextParams, day: &DayState) -> Self {
        let temp_delta = (context.temperature_c - 20.0).abs();
        let temperature = 1.0 + temp_delta.powi(2) * 0.0008;

        let altitude = if context.altitude_m > 700.0 {
            1.0 + (context.altitude_m - 700.0) / 300.0 * 0.06
        } else {
            1.0
        };

        let humidity = 1.0 + (context.humidity_pct / 100.0) * 0.2;

        let sleep_effect = 0.03 * (day.sleep_hours - 7.5);
        let quality_effect = 0.02 * (day.sleep_quality as f64 - 3.0);
        let freshness = (0.8 + sleep_effect + quality_effect).clamp(0.6, 1.05);

        let mut target_water = 0.033 * day.body_mass_kg;
        if context.temperature_c > 24.0 {
            target_water += 0.25;
        }
        let hydration = (day.water_liters / target_water.max(0.5)).clamp(0.7, 1.1);

        Self {
            temperature,
            altitude,
            humidity,
            freshness,
            hydration,
        }
    }

    /// Combined environmental load on the cardio system.
    pub fn cardio_stress(&self) -> f64 {
        self.temperature * self.altitude * self.humidity
    }

    /// Multiplier applied to every rest. Heat, altitude and a poor day lower it.
    pub fn recovery_quality(&self) -> f64 {
        (1.0 / self.cardio_stress().powf(0.3)) * self.freshness * self.hydration
    }

    /// Multiplier on rep durations (> 1 is slower).
    pub fn pace_multiplier(&self) -> f64 {
        self.temperature * self.altitude / (self.freshness * self.hydration)
    }
}

impl Default for ContextFactors {
    fn default() -> Self {
        Self::compute(&ContextParams::default(), &DayState::default())
    }
}
