//! Whole-run properties: determinism, clock, bounds, termination.

use wodtwin::athlete::CapabilityProvider;
use wodtwin::fatigue::{Modality, MovementPattern};
use wodtwin::simulator::{
    simulate, SimulationError, SimulationResult, SimulatorState, WorkoutSimulator,
};
use wodtwin::strategy::{PacingStyle, UnbrokenStrategy};
use wodtwin::workouts::{
    Benchmark, Exercise, ExerciseDefinition, ExerciseTarget, Round, RoundDefinition, Workout,
    WorkoutDefinition, WorkoutMode,
};

use crate::athlete_mock::MockAthlete;

fn mixed_workout() -> Workout {
    let round = Round::repeated(
        vec![
            Exercise::calories("row", 12).unwrap(),
            Exercise::reps("thruster", 15)
                .unwrap()
                .with_load(43.0)
                .unwrap(),
            Exercise::reps("pull-up", 15).unwrap(),
            Exercise::distance("run", 200.0).unwrap(),
            Exercise::duration("plank", 30.0).unwrap(),
        ],
        3,
    )
    .unwrap();
    Workout::for_time("Mixed", vec![round], None)
        .unwrap()
        .with_rest_between_rounds(45.0)
        .unwrap()
}

fn run(workout: &Workout, style: PacingStyle) -> SimulationResult {
    let mut strategy = style.build();
    simulate(workout, &MockAthlete::default(), strategy.as_mut()).unwrap()
}

fn assert_monotonic(result: &SimulationResult) {
    assert!(result
        .events
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp));
    assert_eq!(result.events.last().unwrap().timestamp, result.total_time);
}

#[test]
fn test_identical_inputs_give_identical_traces() {
    let workout = mixed_workout();
    for style in [PacingStyle::Descending, PacingStyle::Rpe(6)] {
        let first = run(&workout, style);
        let second = run(&workout, style);
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }
}

#[test]
fn test_reused_strategy_is_deterministic() {
    let workout = mixed_workout();
    let mut strategy = PacingStyle::Descending.build();
    let athlete = MockAthlete::default();
    let first = simulate(&workout, &athlete, strategy.as_mut()).unwrap();
    let second = simulate(&workout, &athlete, strategy.as_mut()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_clock_is_monotonic() {
    let workout = mixed_workout();
    for style in [
        PacingStyle::Unbroken,
        PacingStyle::Fractioned,
        PacingStyle::Descending,
        PacingStyle::Conservative,
        PacingStyle::Rpe(4),
    ] {
        assert_monotonic(&run(&workout, style));
    }
    assert_monotonic(&run(&Benchmark::Cindy.workout().unwrap(), PacingStyle::Unbroken));
}

#[test]
fn test_fatigue_stays_bounded() {
    let result = run(&mixed_workout(), PacingStyle::Unbroken);
    assert!(result.events.iter().all(|e| e.fatigue >= 0.0));
    assert!(result.final_fatigue > 0.0);
    assert!(result.fatigue.global >= 0.0);
    for pattern in MovementPattern::all() {
        assert!(result.fatigue.local[&pattern] >= 0.0);
    }
    let athlete = MockAthlete::default();
    for (modality, balance) in &result.fatigue.cardio_balance {
        let max = athlete.cardio_profile(*modality).unwrap().w_prime;
        assert!(*balance >= 0.0 && *balance <= max);
    }
    assert!(result.fatigue.cardio_balance.contains_key(&Modality::Row));
    assert!(result.fatigue.cardio_balance.contains_key(&Modality::Run));
}

#[test]
fn test_capped_mode_never_completes() {
    // Very fast athlete, tiny round, generous cap
    let athlete = MockAthlete {
        thruster_rep_secs: 0.5,
        pull_up_cycle_secs: 0.5,
    };
    let round = Round::new(vec![Exercise::reps("pull-up", 1).unwrap()]).unwrap();
    let workout = Workout::amrap("Quick", 30.0, vec![round]).unwrap();
    let result = simulate(&workout, &athlete, &mut UnbrokenStrategy::default()).unwrap();

    assert_eq!(result.final_state, SimulatorState::TimeCapped);
    assert!(!result.completed);
    assert!(result.rounds_completed > 10);
    assert!(result.total_time <= 30.0);
}

#[test]
fn test_for_time_total_reps_match_targets() {
    for benchmark in [Benchmark::Fran, Benchmark::Helen, Benchmark::Grace, Benchmark::Karen] {
        let workout = benchmark.workout().unwrap();
        let result = run(&workout, PacingStyle::Conservative);
        assert_eq!(result.final_state, SimulatorState::Completed);
        assert_eq!(result.total_reps, workout.total_reps().unwrap());
        assert_eq!(result.rounds_completed, workout.total_round_count());
    }

    let workout = mixed_workout();
    let result = run(&workout, PacingStyle::Fractioned);
    assert_eq!(result.total_reps, 90);
    let between_rounds = result
        .events
        .iter()
        .filter(|e| e.kind.label() == "rest_start" && e.exercise().is_none())
        .count();
    assert_eq!(between_rounds, 2);
}

#[test]
fn test_unsupported_modes_fail_without_trace() {
    let round = Round::new(vec![Exercise::reps("burpee", 10).unwrap()]).unwrap();
    for mode in [WorkoutMode::Emom, WorkoutMode::Tabata] {
        let workout = Workout::new("Intervals", mode, vec![round.clone()], Some(480.0)).unwrap();
        let err = simulate(&workout, &MockAthlete::default(), &mut UnbrokenStrategy::default())
            .unwrap_err();
        assert!(matches!(err, SimulationError::UnsupportedMode(m) if m == mode));
    }
}

#[test]
fn test_invalid_definition_is_rejected() {
    let definition = WorkoutDefinition {
        id: None,
        name: "Broken".to_string(),
        description: None,
        mode: WorkoutMode::ForTime,
        rounds: vec![RoundDefinition {
            exercises: vec![ExerciseDefinition {
                name: "pull-up".to_string(),
                target: ExerciseTarget::Reps(0),
                load_kg: None,
            }],
            repetitions: 1,
        }],
        time_cap_seconds: None,
        rest_between_rounds: 0.0,
    };
    let err = WorkoutSimulator::default()
        .simulate_definition(
            definition,
            &MockAthlete::default(),
            &mut UnbrokenStrategy::default(),
        )
        .unwrap_err();
    assert!(matches!(err, SimulationError::InvalidWorkout(_)));
}

#[test]
fn test_record_summarizes_result() {
    let result = run(&mixed_workout(), PacingStyle::Descending);
    let record = result.to_record();
    assert_eq!(record.total_reps, result.total_reps);
    assert_eq!(record.time_splits.len(), 3);
    assert_eq!(record.event_count, result.events.len());
    assert_eq!(record.fatigue_curve.len(), result.events.len());
    assert!((record.avg_pace - result.total_time / result.total_reps as f64).abs() < 1e-12);

    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["final_state"], "completed");
    assert_eq!(json["mode"], "for_time");
    assert!(result.to_string().contains("Mixed - Mock Athlete (Descending)"));
}
