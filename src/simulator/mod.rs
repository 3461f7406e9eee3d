//! Discrete-event workout simulator.

pub mod engine;
pub mod types;

pub use engine::{simulate, WorkoutSimulator};
pub use types::{
    EventKind, RoundResult, SimulationError, SimulationEvent, SimulationRecord, SimulationResult,
    SimulatorState,
};
