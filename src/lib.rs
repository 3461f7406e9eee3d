//! WodTwin - Workout Digital Twin
//!
//! Predicts how an athlete, following a pacing strategy, performs a
//! structured workout: completion time, rounds achieved and the fatigue
//! trajectory behind them. A discrete-event simulator drives a two-system
//! fatigue model (W' balance per cardio modality, local fatigue per
//! movement pattern) and asks a pluggable strategy at every rep boundary
//! whether to rest.

pub mod athlete;
pub mod config;
pub mod fatigue;
pub mod simulator;
pub mod strategy;
pub mod workouts;

// Re-export commonly used types
pub use athlete::{AthleteCapabilities, CapabilityProvider};
pub use config::{AppConfig, SimulatorConfig};
pub use fatigue::FatigueManager;
pub use simulator::{simulate, SimulationResult, WorkoutSimulator};
pub use strategy::{PacingStrategy, PacingStyle};
pub use workouts::{Benchmark, Workout};
