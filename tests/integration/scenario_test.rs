//! End-to-end scenarios on known workouts.

use wodtwin::athlete::{AthleteCapabilities, CpProfile, GymSkill};
use wodtwin::fatigue::Modality;
use wodtwin::simulator::{simulate, EventKind, SimulatorState};
use wodtwin::strategy::{PacingStyle, UnbrokenStrategy};
use wodtwin::workouts::{Benchmark, Exercise, Round, Workout};

use crate::athlete_mock::MockAthlete;

fn thruster_pull_up_round() -> Round {
    Round::new(vec![
        Exercise::reps("thruster", 21)
            .unwrap()
            .with_load(43.0)
            .unwrap(),
        Exercise::reps("pull-up", 21).unwrap(),
    ])
    .unwrap()
}

fn reference_athlete() -> AthleteCapabilities {
    AthleteCapabilities::new("Reference", 80.0)
        .with_one_rm("front-squat", 110.0)
        .with_one_rm("kettlebell-swing", 48.0)
        .with_gym_skill("pull-up", GymSkill::new(1.6, 25))
        .with_gym_skill("push-up", GymSkill::new(1.4, 35))
        .with_gym_skill("air-squat", GymSkill::new(1.1, 60))
        .with_cardio_profile(Modality::Run, CpProfile::new(3.9, 220.0))
}

#[test]
fn test_single_round_unbroken_completes() {
    let workout = Workout::for_time("21s", vec![thruster_pull_up_round()], None).unwrap();
    let mut strategy = UnbrokenStrategy::default();
    let result = simulate(&workout, &MockAthlete::default(), &mut strategy).unwrap();

    assert!(result.completed);
    assert_eq!(result.final_state, SimulatorState::Completed);
    assert_eq!(result.total_reps, 42);
    assert_eq!(result.rounds_completed, 1);
    assert!(result.final_fatigue > 0.0);
    assert_eq!(result.strategy, "Unbroken");
    assert_eq!(result.athlete, "Mock Athlete");
}

#[test]
fn test_sixty_second_cap_stops_thrusters() {
    let workout = Workout::amrap("21s capped", 60.0, vec![thruster_pull_up_round()]).unwrap();
    let mut strategy = UnbrokenStrategy::default();
    let result = simulate(&workout, &MockAthlete::default(), &mut strategy).unwrap();

    assert_eq!(result.final_state, SimulatorState::TimeCapped);
    assert!(!result.completed);
    assert_eq!(result.rounds_completed, 0);
    assert!(result.total_reps > 0);
    assert!(result.total_reps <= 20);
    assert!(result.total_time <= 60.0);

    // Every rep was a thruster
    let pull_ups = result
        .events
        .iter()
        .filter(|e| matches!(&e.kind, EventKind::RepCompleted { exercise, .. } if exercise == "pull-up"))
        .count();
    assert_eq!(pull_ups, 0);
    assert_eq!(result.rounds.len(), 1);
    assert!(!result.rounds[0].completed);
}

#[test]
fn test_fran_completes_for_every_style() {
    let fran = Benchmark::Fran.workout().unwrap();
    let athlete = reference_athlete();
    for style in [
        PacingStyle::Unbroken,
        PacingStyle::Fractioned,
        PacingStyle::Descending,
        PacingStyle::Conservative,
        PacingStyle::Rpe(5),
        PacingStyle::Rpe(9),
    ] {
        let mut strategy = style.build();
        let result = simulate(&fran, &athlete, strategy.as_mut()).unwrap();
        assert!(result.completed, "{} did not finish", style);
        assert_eq!(result.total_reps, 90);
        assert_eq!(result.rounds_completed, 3);
        assert_eq!(result.time_splits().len(), 3);
    }
}

#[test]
fn test_descending_rests_more_than_unbroken_on_fran() {
    let fran = Benchmark::Fran.workout().unwrap();
    let athlete = reference_athlete();
    let rests = |style: PacingStyle| {
        let mut strategy = style.build();
        simulate(&fran, &athlete, strategy.as_mut())
            .unwrap()
            .events
            .iter()
            .filter(|e| matches!(e.kind, EventKind::RestStart { .. }))
            .count()
    };
    assert!(rests(PacingStyle::Descending) > rests(PacingStyle::Unbroken));
}

#[test]
fn test_helen_uses_run_reserve() {
    let helen = Benchmark::Helen.workout().unwrap();
    let athlete = reference_athlete();
    let mut strategy = PacingStyle::Fractioned.build();
    let result = simulate(&helen, &athlete, strategy.as_mut()).unwrap();

    assert!(result.completed);
    assert_eq!(result.total_reps, 99);
    assert_eq!(result.rounds_completed, 3);
    let runs: Vec<f64> = result
        .events
        .iter()
        .filter_map(|e| match &e.kind {
            EventKind::WorkCompleted {
                exercise, duration, ..
            } if exercise == "run" => Some(*duration),
            _ => None,
        })
        .collect();
    assert_eq!(runs.len(), 3);
    // Faster than holding critical speed for 400m
    assert!(runs.iter().all(|t| *t < 400.0 / 3.9 + 1e-9));
    assert!(result.fatigue.cardio_balance.contains_key(&Modality::Run));
}

#[test]
fn test_cindy_runs_to_the_cap() {
    let cindy = Benchmark::Cindy.workout().unwrap();
    let athlete = reference_athlete();
    let mut strategy = PacingStyle::Conservative.build();
    let result = simulate(&cindy, &athlete, strategy.as_mut()).unwrap();

    assert_eq!(result.final_state, SimulatorState::TimeCapped);
    assert!(result.rounds_completed >= 5);
    assert!(result.total_time <= 1200.0);
    assert_eq!(
        result.events.last().unwrap().kind,
        EventKind::TimeCapReached { cap: 1200.0 }
    );
}
