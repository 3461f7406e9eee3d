//! Unit tests for workout construction and the benchmark library.

use wodtwin::workouts::{
    Benchmark, Exercise, ExerciseTarget, Round, Workout, WorkoutError, WorkoutMode,
};

#[test]
fn test_benchmarks_build() {
    for benchmark in Benchmark::all() {
        let workout = benchmark.workout().unwrap();
        assert_eq!(workout.name(), benchmark.display_name());
        assert!(workout.description().is_some());
    }
}

#[test]
fn test_benchmark_volumes() {
    let fran = Benchmark::Fran.workout().unwrap();
    assert_eq!(fran.total_reps().unwrap(), 90);
    assert_eq!(fran.total_round_count(), 3);

    let helen = Benchmark::Helen.workout().unwrap();
    assert_eq!(helen.total_reps().unwrap(), 99);
    assert_eq!(helen.total_round_count(), 3);
    assert_eq!(helen.all_exercises().len(), 9);

    let cindy = Benchmark::Cindy.workout().unwrap();
    assert_eq!(cindy.mode(), WorkoutMode::Amrap);
    assert_eq!(cindy.time_cap_seconds(), Some(1200.0));
    assert_eq!(
        cindy.total_reps().unwrap_err(),
        WorkoutError::UnboundedVolume(WorkoutMode::Amrap)
    );

    assert_eq!(Benchmark::Grace.workout().unwrap().total_reps().unwrap(), 30);
    assert_eq!(Benchmark::Karen.workout().unwrap().total_reps().unwrap(), 150);
}

#[test]
fn test_benchmark_lookup() {
    assert_eq!(Benchmark::from_name("fran"), Some(Benchmark::Fran));
    assert_eq!(Benchmark::from_name(" KAREN "), Some(Benchmark::Karen));
    assert_eq!(Benchmark::from_name("Murph"), None);
}

#[test]
fn test_workout_from_toml() {
    let text = r#"
name = "Chipper"
mode = "for_time"
time_cap_seconds = 900.0
rest_between_rounds = 60.0

[[rounds]]
repetitions = 2

[[rounds.exercises]]
name = "row"
target = { calories = 15 }

[[rounds.exercises]]
name = "thruster"
target = { reps = 12 }
load_kg = 43.0
"#;
    let workout: Workout = toml::from_str(text).unwrap();
    assert_eq!(workout.total_round_count(), 2);
    assert_eq!(workout.total_reps().unwrap(), 24);
    assert_eq!(workout.rest_between_rounds(), 60.0);
    let row = &workout.rounds()[0].exercises[0];
    assert_eq!(row.target, ExerciseTarget::Calories(15));
    assert!(row.is_cardio());
    assert!(workout.rounds()[0].exercises[1].is_weighted());
}

#[test]
fn test_invalid_toml_workouts_rejected() {
    let no_cap = r#"
name = "Open"
mode = "amrap"

[[rounds]]
exercises = [{ name = "burpee", target = { reps = 5 } }]
"#;
    assert!(toml::from_str::<Workout>(no_cap).is_err());

    let bad_load = r#"
name = "Heavy"
mode = "for_time"

[[rounds]]
exercises = [{ name = "deadlift", target = { reps = 5 }, load_kg = -100.0 }]
"#;
    assert!(toml::from_str::<Workout>(bad_load).is_err());
}

#[test]
fn test_construction_errors() {
    assert_eq!(Exercise::reps("  ", 5).unwrap_err(), WorkoutError::EmptyName);
    assert_eq!(Round::new(vec![]).unwrap_err(), WorkoutError::EmptyRound);
    assert_eq!(
        Exercise::reps("thruster", 5)
            .unwrap()
            .with_load(0.0)
            .unwrap_err(),
        WorkoutError::NonPositiveLoad {
            exercise: "thruster".to_string()
        }
    );

    let round = Round::new(vec![Exercise::reps("burpee", 5).unwrap()]).unwrap();
    assert_eq!(
        Workout::for_time("Capped", vec![round.clone()], Some(0.0)).unwrap_err(),
        WorkoutError::NonPositiveTimeCap
    );
    assert_eq!(
        Workout::for_time("Rest", vec![round], None)
            .unwrap()
            .with_rest_between_rounds(-1.0)
            .unwrap_err(),
        WorkoutError::NegativeRest
    );
}
