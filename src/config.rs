//! Simulator and application configuration.
//!
//! TOML on disk, `Default` for everything, validation before use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::athlete::ContextFactors;
use crate::fatigue::{FatigueModelConfig, PatternTable};

/// Knobs of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Multiplier applied to every rest (context effects, 1.0 neutral)
    pub recovery_quality: f64,
    /// Multiplier on rep durations (> 1 is slower)
    pub pace_multiplier: f64,
    /// Fraction of the current W' balance committed to one cardio piece
    pub cardio_reserve_spend: f64,
    /// Ceiling on cardio output as a multiple of critical output
    pub max_cardio_overdrive: f64,
    /// Shortest possible rep (s)
    pub min_rep_seconds: f64,
    /// Fatigue model coefficients
    pub fatigue: FatigueModelConfig,
    /// Movement to pattern-bucket table
    pub patterns: PatternTable,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            recovery_quality: 1.0,
            pace_multiplier: 1.0,
            cardio_reserve_spend: 0.5,
            max_cardio_overdrive: 1.5,
            min_rep_seconds: 0.2,
            fatigue: FatigueModelConfig::default(),
            patterns: PatternTable::default(),
        }
    }
}

impl SimulatorConfig {
    /// Apply resolved context effects.
    pub fn with_context(mut self, factors: &ContextFactors) -> Self {
        self.recovery_quality = factors.recovery_quality();
        self.pace_multiplier = factors.pace_multiplier();
        self
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("pace_multiplier", self.pace_multiplier),
            ("max_cardio_overdrive", self.max_cardio_overdrive),
            ("min_rep_seconds", self.min_rep_seconds),
            ("fatigue.cardio_tau.bike", self.fatigue.cardio_tau.bike),
            ("fatigue.cardio_tau.row", self.fatigue.cardio_tau.row),
            ("fatigue.cardio_tau.run", self.fatigue.cardio_tau.run),
            ("fatigue.cardio_tau.swim", self.fatigue.cardio_tau.swim),
            ("fatigue.cardio_tau.ski", self.fatigue.cardio_tau.ski),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("recovery_quality", self.recovery_quality),
            ("fatigue.local_accumulation_rate", self.fatigue.local_accumulation_rate),
            ("fatigue.local_recovery_rate", self.fatigue.local_recovery_rate),
            ("fatigue.rep_count_penalty", self.fatigue.rep_count_penalty),
            ("fatigue.global_increment", self.fatigue.global_increment),
            ("fatigue.global_recovery_rate", self.fatigue.global_recovery_rate),
            ("fatigue.global_weight", self.fatigue.global_weight),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} cannot be negative, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.cardio_reserve_spend) {
            return Err(ConfigError::Invalid(format!(
                "cardio_reserve_spend must be between 0 and 1, got {}",
                self.cardio_reserve_spend
            )));
        }
        Ok(())
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default tracing filter when RUST_LOG is unset
    pub log_filter: String,
    pub simulator: SimulatorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            simulator: SimulatorConfig::default(),
        }
    }
}

/// Get the configuration directory.
pub fn get_config_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "wodtwin", "WodTwin")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Load configuration from the default location. Missing file means defaults.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load configuration from `path`. Missing file means defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
    load_config_from_str(&content)
}

/// Parse and validate configuration text.
pub fn load_config_from_str(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.simulator.validate()?;
    Ok(config)
}

/// Save configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to `path`.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
