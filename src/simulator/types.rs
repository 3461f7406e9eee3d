//! Simulator state, trace events and results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::fatigue::FatigueSnapshot;
use crate::workouts::{ExerciseTarget, WorkoutError, WorkoutMode};

/// Simulator state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatorState {
    #[default]
    NotStarted,
    RunningRound,
    RunningExercise,
    Resting,
    /// All work finished within any cap
    Completed,
    /// Cap reached first
    TimeCapped,
}

impl SimulatorState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SimulatorState::Completed | SimulatorState::TimeCapped)
    }
}

impl std::fmt::Display for SimulatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorState::NotStarted => write!(f, "Not Started"),
            SimulatorState::RunningRound => write!(f, "Running Round"),
            SimulatorState::RunningExercise => write!(f, "Running Exercise"),
            SimulatorState::Resting => write!(f, "Resting"),
            SimulatorState::Completed => write!(f, "Completed"),
            SimulatorState::TimeCapped => write!(f, "Time Capped"),
        }
    }
}

/// What happened at a point in the trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    ExerciseStart {
        exercise: String,
        target: ExerciseTarget,
    },
    RepCompleted {
        exercise: String,
        rep: u32,
    },
    /// A distance, calorie or duration piece finished in one step
    WorkCompleted {
        exercise: String,
        duration: f64,
        /// Held output (W or m/s) for cardio pieces
        output: Option<f64>,
    },
    RestStart {
        /// None for rest between rounds
        exercise: Option<String>,
        duration: f64,
    },
    RestEnd {
        exercise: Option<String>,
    },
    RoundCompleted {
        duration: f64,
        reps: u32,
    },
    WorkoutCompleted,
    TimeCapReached {
        cap: f64,
    },
}

impl EventKind {
    /// Short snake_case label.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::ExerciseStart { .. } => "exercise_start",
            EventKind::RepCompleted { .. } => "rep_completed",
            EventKind::WorkCompleted { .. } => "work_completed",
            EventKind::RestStart { .. } => "rest_start",
            EventKind::RestEnd { .. } => "rest_end",
            EventKind::RoundCompleted { .. } => "round_completed",
            EventKind::WorkoutCompleted => "workout_completed",
            EventKind::TimeCapReached { .. } => "time_cap_reached",
        }
    }
}

/// One entry of the append-only trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Workout clock (s)
    pub timestamp: f64,
    /// 1-based round number
    pub round: u32,
    /// Effective fatigue at the time of the event
    pub fatigue: f64,
    pub kind: EventKind,
}

impl SimulationEvent {
    /// Exercise the event refers to, if any.
    pub fn exercise(&self) -> Option<&str> {
        match &self.kind {
            EventKind::ExerciseStart { exercise, .. }
            | EventKind::RepCompleted { exercise, .. }
            | EventKind::WorkCompleted { exercise, .. } => Some(exercise),
            EventKind::RestStart { exercise, .. } | EventKind::RestEnd { exercise } => {
                exercise.as_deref()
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for SimulationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:7.1}s] R{} {}", self.timestamp, self.round, self.kind.label())?;
        match &self.kind {
            EventKind::RepCompleted { exercise, rep } => write!(f, " {} #{}", exercise, rep)?,
            EventKind::ExerciseStart { exercise, target } => {
                write!(f, " {} {}", exercise, target)?
            }
            EventKind::RestStart { duration, .. } => write!(f, " {:.1}s", duration)?,
            _ => {}
        }
        write!(f, " (fatigue: {:.2})", self.fatigue)
    }
}

/// Summary of one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_number: u32,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub exercises_completed: usize,
    pub reps_completed: u32,
    pub avg_fatigue: f64,
    pub max_fatigue: f64,
    /// False for a round cut short by the cap
    pub completed: bool,
}

impl RoundResult {
    /// Seconds per rep; zero for rounds without reps.
    pub fn pace_per_rep(&self) -> f64 {
        if self.reps_completed == 0 {
            return 0.0;
        }
        self.duration / self.reps_completed as f64
    }
}

impl std::fmt::Display for RoundResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Round {}: {:.1}s, {} reps, avg fatigue {:.2}",
            self.round_number, self.duration, self.reps_completed, self.avg_fatigue
        )?;
        if !self.completed {
            write!(f, " (partial)")?;
        }
        Ok(())
    }
}

/// Immutable outcome of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub athlete: String,
    pub workout: String,
    pub strategy: String,
    pub mode: WorkoutMode,
    pub total_time: f64,
    pub completed: bool,
    pub final_state: SimulatorState,
    /// Fully completed rounds only
    pub rounds_completed: u32,
    pub total_reps: u32,
    /// Peak bucket plus damped global fatigue at the end
    pub final_fatigue: f64,
    pub fatigue: FatigueSnapshot,
    pub rounds: Vec<RoundResult>,
    pub events: Vec<SimulationEvent>,
}

impl SimulationResult {
    /// Seconds per rep across the whole run.
    pub fn avg_pace(&self) -> f64 {
        if self.total_reps == 0 {
            return 0.0;
        }
        self.total_time / self.total_reps as f64
    }

    /// Duration of each recorded round.
    pub fn time_splits(&self) -> Vec<f64> {
        self.rounds.iter().map(|r| r.duration).collect()
    }

    /// (timestamp, fatigue) per event.
    pub fn fatigue_curve(&self) -> Vec<(f64, f64)> {
        self.events.iter().map(|e| (e.timestamp, e.fatigue)).collect()
    }

    /// Plain-data mapping for calling layers.
    pub fn to_record(&self) -> SimulationRecord {
        SimulationRecord {
            athlete: self.athlete.clone(),
            workout: self.workout.clone(),
            strategy: self.strategy.clone(),
            mode: self.mode,
            total_time: self.total_time,
            completed: self.completed,
            final_state: self.final_state,
            rounds_completed: self.rounds_completed,
            total_reps: self.total_reps,
            final_fatigue: self.final_fatigue,
            avg_pace: self.avg_pace(),
            time_splits: self.time_splits(),
            fatigue_curve: self.fatigue_curve(),
            event_count: self.events.len(),
        }
    }

    /// Record rendered as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_record())
    }
}

impl std::fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let minutes = (self.total_time / 60.0).floor();
        let seconds = self.total_time - minutes * 60.0;
        writeln!(f, "{} - {} ({})", self.workout, self.athlete, self.strategy)?;
        writeln!(f, "Result: {}", self.final_state)?;
        writeln!(f, "Time: {}:{:04.1}", minutes, seconds)?;
        writeln!(f, "Rounds: {}", self.rounds_completed)?;
        writeln!(f, "Reps: {}", self.total_reps)?;
        writeln!(f, "Final fatigue: {:.2}", self.final_fatigue)?;
        for round in &self.rounds {
            writeln!(f, "  {}", round)?;
        }
        Ok(())
    }
}

/// Serialization-friendly summary of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub athlete: String,
    pub workout: String,
    pub strategy: String,
    pub mode: WorkoutMode,
    pub total_time: f64,
    pub completed: bool,
    pub final_state: SimulatorState,
    pub rounds_completed: u32,
    pub total_reps: u32,
    pub final_fatigue: f64,
    pub avg_pace: f64,
    pub time_splits: Vec<f64>,
    pub fatigue_curve: Vec<(f64, f64)>,
    pub event_count: usize,
}

/// Errors that prevent a run from starting.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Mode is declared but has no execution semantics
    #[error("Unsupported workout mode: {0}")]
    UnsupportedMode(WorkoutMode),

    /// Workout failed validation
    #[error("Invalid workout: {0}")]
    InvalidWorkout(#[from] WorkoutError),

    /// Simulator configuration failed validation
    #[error("Invalid simulator configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
