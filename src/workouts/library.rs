//! Built-in benchmark workout library.

use serde::{Deserialize, Serialize};

use super::types::{Exercise, Round, Workout, WorkoutError};

/// Well-known benchmark workouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Benchmark {
    /// 21-15-9 thrusters (42.5kg) and pull-ups
    Fran,
    /// 3 rounds: 400m run, 21 KB swings (24kg), 12 pull-ups
    Helen,
    /// AMRAP 20: 5 pull-ups, 10 push-ups, 15 air squats
    Cindy,
    /// 30 clean and jerks (61kg)
    Grace,
    /// 150 wall-balls (9kg)
    Karen,
}

impl Benchmark {
    /// All benchmarks in catalogue order.
    pub fn all() -> Vec<Benchmark> {
        vec![
            Benchmark::Fran,
            Benchmark::Helen,
            Benchmark::Cindy,
            Benchmark::Grace,
            Benchmark::Karen,
        ]
    }

    /// Display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Benchmark::Fran => "Fran",
            Benchmark::Helen => "Helen",
            Benchmark::Cindy => "Cindy",
            Benchmark::Grace => "Grace",
            Benchmark::Karen => "Karen",
        }
    }

    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<Benchmark> {
        Self::all()
            .into_iter()
            .find(|b| b.display_name().eq_ignore_ascii_case(name.trim()))
    }

    /// Build the workout definition.
    pub fn workout(&self) -> Result<Workout, WorkoutError> {
        match self {
            Benchmark::Fran => fran(),
            Benchmark::Helen => helen(),
            Benchmark::Cindy => cindy(),
            Benchmark::Grace => grace(),
            Benchmark::Karen => karen(),
        }
    }
}

impl std::fmt::Display for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn fran() -> Result<Workout, WorkoutError> {
    let rounds = [21, 15, 9]
        .into_iter()
        .map(|reps| {
            Round::new(vec![
                Exercise::reps("thruster", reps)?.with_load(42.5)?,
                Exercise::reps("pull-up", reps)?,
            ])
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Workout::for_time("Fran", rounds, None)?
        .with_description("21-15-9 Thrusters (42.5kg) and Pull-ups"))
}

fn helen() -> Result<Workout, WorkoutError> {
    let round = Round::repeated(
        vec![
            Exercise::distance("run", 400.0)?,
            Exercise::reps("kettlebell-swing", 21)?.with_load(24.0)?,
            Exercise::reps("pull-up", 12)?,
        ],
        3,
    )?;

    Ok(Workout::for_time("Helen", vec![round], None)?
        .with_description("3 rounds of 400m Run, 21 KB Swings (24kg), 12 Pull-ups"))
}

fn cindy() -> Result<Workout, WorkoutError> {
    let round = Round::new(vec![
        Exercise::reps("pull-up", 5)?,
        Exercise::reps("push-up", 10)?,
        Exercise::reps("air-squat", 15)?,
    ])?;

    Ok(Workout::amrap("Cindy", 1200.0, vec![round])?
        .with_description("AMRAP 20 min: 5 Pull-ups, 10 Push-ups, 15 Air Squats"))
}

fn grace() -> Result<Workout, WorkoutError> {
    let round = Round::new(vec![Exercise::reps("clean-and-jerk", 30)?.with_load(61.0)?])?;

    Ok(Workout::for_time("Grace", vec![round], None)?
        .with_description("30 Clean and Jerks (61kg)"))
}

fn karen() -> Result<Workout, WorkoutError> {
    let round = Round::new(vec![Exercise::reps("wall-ball", 150)?.with_load(9.0)?])?;

    Ok(Workout::for_time("Karen", vec![round], None)?.with_description("150 Wall-ball shots (9kg)"))
}
