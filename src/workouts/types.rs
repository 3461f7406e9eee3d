//! Workout types and enums.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Execution semantics of a workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutMode {
    /// Fixed work, finish as fast as possible
    ForTime,
    /// As many rounds as possible before the cap
    Amrap,
    /// Every minute on the minute (declared, not executable)
    Emom,
    /// 20s on / 10s off intervals (declared, not executable)
    Tabata,
}

impl WorkoutMode {
    /// Whether the mode ends only by time cap.
    pub fn is_capped(&self) -> bool {
        matches!(self, WorkoutMode::Amrap)
    }
}

impl std::fmt::Display for WorkoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutMode::ForTime => write!(f, "For Time"),
            WorkoutMode::Amrap => write!(f, "AMRAP"),
            WorkoutMode::Emom => write!(f, "EMOM"),
            WorkoutMode::Tabata => write!(f, "Tabata"),
        }
    }
}

/// The single primary target of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseTarget {
    /// Repetition count
    Reps(u32),
    /// Distance in meters
    Distance(f64),
    /// Machine calories
    Calories(u32),
    /// Work duration in seconds
    Duration(f64),
}

impl ExerciseTarget {
    /// Name of the target kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ExerciseTarget::Reps(_) => "reps",
            ExerciseTarget::Distance(_) => "distance_m",
            ExerciseTarget::Calories(_) => "calories",
            ExerciseTarget::Duration(_) => "duration_seconds",
        }
    }

    /// Numeric volume of the target in its own unit.
    pub fn volume(&self) -> f64 {
        match self {
            ExerciseTarget::Reps(reps) => *reps as f64,
            ExerciseTarget::Distance(meters) => *meters,
            ExerciseTarget::Calories(calories) => *calories as f64,
            ExerciseTarget::Duration(seconds) => *seconds,
        }
    }

    fn is_positive(&self) -> bool {
        let volume = self.volume();
        volume.is_finite() && volume > 0.0
    }
}

impl std::fmt::Display for ExerciseTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseTarget::Reps(reps) => write!(f, "{} reps", reps),
            ExerciseTarget::Distance(meters) => write!(f, "{}m", meters),
            ExerciseTarget::Calories(calories) => write!(f, "{} cal", calories),
            ExerciseTarget::Duration(seconds) => write!(f, "{}s", seconds),
        }
    }
}

/// A single exercise within a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exercise {
    /// Movement name (e.g. "thruster", "pull-up")
    pub name: String,
    /// Primary target
    pub target: ExerciseTarget,
    /// External load in kilograms
    pub load_kg: Option<f64>,
}

impl Exercise {
    /// Create a validated exercise.
    pub fn new(name: impl Into<String>, target: ExerciseTarget) -> Result<Self, WorkoutError> {
        let exercise = Self {
            name: name.into(),
            target,
            load_kg: None,
        };
        exercise.validate()?;
        Ok(exercise)
    }

    /// Rep-targeted exercise.
    pub fn reps(name: impl Into<String>, reps: u32) -> Result<Self, WorkoutError> {
        Self::new(name, ExerciseTarget::Reps(reps))
    }

    /// Distance-targeted exercise (meters).
    pub fn distance(name: impl Into<String>, meters: f64) -> Result<Self, WorkoutError> {
        Self::new(name, ExerciseTarget::Distance(meters))
    }

    /// Calorie-targeted exercise.
    pub fn calories(name: impl Into<String>, calories: u32) -> Result<Self, WorkoutError> {
        Self::new(name, ExerciseTarget::Calories(calories))
    }

    /// Duration-targeted exercise (seconds).
    pub fn duration(name: impl Into<String>, seconds: f64) -> Result<Self, WorkoutError> {
        Self::new(name, ExerciseTarget::Duration(seconds))
    }

    /// Attach an external load.
    pub fn with_load(mut self, load_kg: f64) -> Result<Self, WorkoutError> {
        self.load_kg = Some(load_kg);
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), WorkoutError> {
        if self.name.trim().is_empty() {
            return Err(WorkoutError::EmptyName);
        }
        if !self.target.is_positive() {
            return Err(WorkoutError::NonPositiveTarget {
                exercise: self.name.clone(),
                field: self.target.kind(),
            });
        }
        if let Some(load) = self.load_kg {
            if !(load.is_finite() && load > 0.0) {
                return Err(WorkoutError::NonPositiveLoad {
                    exercise: self.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Target reps, if rep-targeted.
    pub fn target_reps(&self) -> Option<u32> {
        match self.target {
            ExerciseTarget::Reps(reps) => Some(reps),
            _ => None,
        }
    }

    /// Whether this exercise uses external weight.
    pub fn is_weighted(&self) -> bool {
        self.load_kg.is_some()
    }

    /// Whether this is a distance or calorie piece.
    pub fn is_cardio(&self) -> bool {
        matches!(
            self.target,
            ExerciseTarget::Distance(_) | ExerciseTarget::Calories(_)
        )
    }
}

impl std::fmt::Display for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.target)?;
        if let Some(load) = self.load_kg {
            write!(f, " @ {}kg", load)?;
        }
        Ok(())
    }
}

/// A round: ordered exercises plus a repeat count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Round {
    /// Exercises in execution order
    pub exercises: Vec<Exercise>,
    /// Times to repeat this round (>= 1)
    pub repetitions: u32,
}

impl Round {
    /// Create a round performed once.
    pub fn new(exercises: Vec<Exercise>) -> Result<Self, WorkoutError> {
        Self::repeated(exercises, 1)
    }

    /// Create a round repeated `repetitions` times.
    pub fn repeated(exercises: Vec<Exercise>, repetitions: u32) -> Result<Self, WorkoutError> {
        let round = Self {
            exercises,
            repetitions,
        };
        round.validate()?;
        Ok(round)
    }

    fn validate(&self) -> Result<(), WorkoutError> {
        if self.exercises.is_empty() {
            return Err(WorkoutError::EmptyRound);
        }
        if self.repetitions == 0 {
            return Err(WorkoutError::ZeroRepeat);
        }
        self.exercises.iter().try_for_each(Exercise::validate)
    }

    /// Reps across all repetitions of this round, saturating at `u32::MAX`.
    pub fn total_reps(&self) -> u32 {
        self.exercises
            .iter()
            .filter_map(Exercise::target_reps)
            .fold(0u32, u32::saturating_add)
            .saturating_mul(self.repetitions)
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = self
            .exercises
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(" + ");
        if self.repetitions > 1 {
            write!(f, "{} rounds of ({})", self.repetitions, body)
        } else {
            write!(f, "{}", body)
        }
    }
}

/// A complete structured workout.
///
/// Fields are private so a `Workout` value is always valid: every
/// constructor (including deserialization) runs the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WorkoutDefinition")]
pub struct Workout {
    id: Uuid,
    name: String,
    description: Option<String>,
    mode: WorkoutMode,
    rounds: Vec<Round>,
    time_cap_seconds: Option<f64>,
    rest_between_rounds: f64,
}

/// Unvalidated workout shape, as read from TOML/JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutDefinition {
    /// Kept on round trips; a fresh id is assigned when absent
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub mode: WorkoutMode,
    pub rounds: Vec<RoundDefinition>,
    #[serde(default)]
    pub time_cap_seconds: Option<f64>,
    #[serde(default)]
    pub rest_between_rounds: f64,
}

/// Unvalidated round shape.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundDefinition {
    pub exercises: Vec<ExerciseDefinition>,
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,
}

/// Unvalidated exercise shape.
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseDefinition {
    pub name: String,
    pub target: ExerciseTarget,
    #[serde(default)]
    pub load_kg: Option<f64>,
}

fn default_repetitions() -> u32 {
    1
}

impl TryFrom<WorkoutDefinition> for Workout {
    type Error = WorkoutError;

    fn try_from(def: WorkoutDefinition) -> Result<Self, Self::Error> {
        let rounds = def
            .rounds
            .into_iter()
            .map(|round| {
                let exercises = round
                    .exercises
                    .into_iter()
                    .map(|e| {
                        let exercise = Exercise::new(e.name, e.target)?;
                        match e.load_kg {
                            Some(load) => exercise.with_load(load),
                            None => Ok(exercise),
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Round::repeated(exercises, round.repetitions)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut workout = Workout::new(def.name, def.mode, rounds, def.time_cap_seconds)?;
        if let Some(id) = def.id {
            workout.id = id;
        }
        workout.description = def.description;
        workout.set_rest_between_rounds(def.rest_between_rounds)?;
        Ok(workout)
    }
}

impl Workout {
    /// Create a validated workout.
    pub fn new(
        name: impl Into<String>,
        mode: WorkoutMode,
        rounds: Vec<Round>,
        time_cap_seconds: Option<f64>,
    ) -> Result<Self, WorkoutError> {
        let workout = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            mode,
            rounds,
            time_cap_seconds,
            rest_between_rounds: 0.0,
        };
        workout.validate()?;
        Ok(workout)
    }

    /// Create a For Time workout.
    pub fn for_time(
        name: impl Into<String>,
        rounds: Vec<Round>,
        time_cap_seconds: Option<f64>,
    ) -> Result<Self, WorkoutError> {
        Self::new(name, WorkoutMode::ForTime, rounds, time_cap_seconds)
    }

    /// Create an AMRAP workout.
    pub fn amrap(
        name: impl Into<String>,
        time_cap_seconds: f64,
        rounds: Vec<Round>,
    ) -> Result<Self, WorkoutError> {
        Self::new(name, WorkoutMode::Amrap, rounds, Some(time_cap_seconds))
    }

    /// Set a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the fixed rest taken between rounds.
    pub fn with_rest_between_rounds(mut self, seconds: f64) -> Result<Self, WorkoutError> {
        self.set_rest_between_rounds(seconds)?;
        Ok(self)
    }

    fn set_rest_between_rounds(&mut self, seconds: f64) -> Result<(), WorkoutError> {
        if !(seconds.is_finite() && seconds >= 0.0) {
            return Err(WorkoutError::NegativeRest);
        }
        self.rest_between_rounds = seconds;
        Ok(())
    }

    fn validate(&self) -> Result<(), WorkoutError> {
        if self.name.trim().is_empty() {
            return Err(WorkoutError::EmptyName);
        }
        if self.rounds.is_empty() {
            return Err(WorkoutError::EmptyWorkout);
        }
        self.rounds.iter().try_for_each(Round::validate)?;

        if let Some(cap) = self.time_cap_seconds {
            if !(cap.is_finite() && cap > 0.0) {
                return Err(WorkoutError::NonPositiveTimeCap);
            }
        }
        if self.mode.is_capped() && self.time_cap_seconds.is_none() {
            return Err(WorkoutError::MissingTimeCap(self.mode));
        }
        Ok(())
    }

    /// Unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Workout name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Execution mode.
    pub fn mode(&self) -> WorkoutMode {
        self.mode
    }

    /// Rounds in order.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Overall time cap in seconds.
    pub fn time_cap_seconds(&self) -> Option<f64> {
        self.time_cap_seconds
    }

    /// Rest between rounds in seconds.
    pub fn rest_between_rounds(&self) -> f64 {
        self.rest_between_rounds
    }

    /// Total number of round executions (sum of repeat counts).
    pub fn total_round_count(&self) -> u32 {
        self.rounds.iter().map(|r| r.repetitions).sum()
    }

    /// Number of exercise executions across the workout.
    pub fn total_exercises(&self) -> usize {
        self.rounds
            .iter()
            .map(|r| r.exercises.len() * r.repetitions as usize)
            .sum()
    }

    /// Total reps of a fixed-work workout.
    ///
    /// Capped workouts have no fixed volume.
    pub fn total_reps(&self) -> Result<u32, WorkoutError> {
        if self.mode.is_capped() {
            return Err(WorkoutError::UnboundedVolume(self.mode));
        }
        Ok(self
            .rounds
            .iter()
            .map(Round::total_reps)
            .fold(0, u32::saturating_add))
    }

    /// Flat list of exercises in execution order, repeats expanded.
    pub fn all_exercises(&self) -> Vec<&Exercise> {
        self.rounds
            .iter()
            .flat_map(|r| (0..r.repetitions).flat_map(move |_| r.exercises.iter()))
            .collect()
    }
}

impl std::fmt::Display for Workout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({})", self.name, self.mode)?;
        if let Some(cap) = self.time_cap_seconds {
            writeln!(f, "Time Cap: {:.0} minutes", cap / 60.0)?;
        }
        if let Some(description) = &self.description {
            writeln!(f, "Description: {}", description)?;
        }
        write!(f, "Workout:")?;
        for (i, round) in self.rounds.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, round)?;
        }
        Ok(())
    }
}

/// Errors raised while constructing a workout.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WorkoutError {
    /// Workout has no rounds
    #[error("Workout must contain at least one round")]
    EmptyWorkout,

    /// Round has no exercises
    #[error("Round must contain at least one exercise")]
    EmptyRound,

    /// Round repeat count of zero
    #[error("Round repetitions must be at least 1")]
    ZeroRepeat,

    /// Exercise or workout name is blank
    #[error("Name must not be empty")]
    EmptyName,

    /// Target value is zero, negative or not finite
    #[error("{exercise}: {field} must be positive")]
    NonPositiveTarget {
        exercise: String,
        field: &'static str,
    },

    /// External load is zero, negative or not finite
    #[error("{exercise}: load_kg must be positive")]
    NonPositiveLoad { exercise: String },

    /// Capped mode without a cap
    #[error("{0} workouts must have a time cap")]
    MissingTimeCap(WorkoutMode),

    /// Cap is zero, negative or not finite
    #[error("time_cap_seconds must be positive")]
    NonPositiveTimeCap,

    /// Negative rest between rounds
    #[error("rest_between_rounds cannot be negative")]
    NegativeRest,

    /// Fixed volume requested for a capped workout
    #[error("Cannot calculate total reps for {0} workout")]
    UnboundedVolume(WorkoutMode),
}
