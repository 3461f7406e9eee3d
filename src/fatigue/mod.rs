//! Physiological fatigue model.
//!
//! - W' balance reserves per cardio modality (critical-power model)
//! - Local fatigue per movement-pattern bucket
//! - Global fatigue layered on top of pattern fatigue

pub mod cardio;
pub mod local;
pub mod manager;
pub mod patterns;
pub mod types;

pub use cardio::CardioReserve;
pub use local::LocalFatigue;
pub use manager::FatigueManager;
pub use patterns::{normalize_movement, Modality, MovementPattern, PatternTable};
pub use types::{CardioTimeConstants, FatigueModelConfig, FatigueSnapshot};
