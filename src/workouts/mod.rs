//! Workout module: structured workout definitions and the benchmark library.

pub mod library;
pub mod types;

pub use library::Benchmark;
pub use types::{
    Exercise, ExerciseDefinition, ExerciseTarget, Round, RoundDefinition, Workout,
    WorkoutDefinition, WorkoutError, WorkoutMode,
};
