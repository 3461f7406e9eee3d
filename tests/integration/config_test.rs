//! Configuration persistence and its effect on runs.

use tempfile::tempdir;

use wodtwin::athlete::{ContextFactors, ContextParams, DayState};
use wodtwin::config::{
    load_config_from, load_config_from_str, save_config_to, AppConfig, ConfigError, SimulatorConfig,
};
use wodtwin::fatigue::MovementPattern;
use wodtwin::simulator::WorkoutSimulator;
use wodtwin::strategy::UnbrokenStrategy;
use wodtwin::workouts::{Benchmark, Exercise, Round, Workout};

use crate::athlete_mock::MockAthlete;

#[test]
fn test_config_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.log_filter = "wodtwin=trace".to_string();
    config.simulator.recovery_quality = 0.85;
    config.simulator.fatigue.local_recovery_rate = 0.04;
    config.simulator.patterns = config
        .simulator
        .patterns
        .clone()
        .with_movement("sled-push", &[MovementPattern::Squat, MovementPattern::Push]);

    save_config_to(&config, &path).unwrap();
    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded, AppConfig::default());
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[simulator]\npace_multiplier = -2.0\n").unwrap();
    assert!(matches!(
        load_config_from(&path),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_empty_bucket_list_falls_back_to_mixed() {
    let config = load_config_from_str("[simulator.patterns]\nthruster = []\n").unwrap();
    assert_eq!(
        config.simulator.patterns.patterns_for("thruster"),
        &[MovementPattern::Mixed]
    );

    let fran = Benchmark::Fran.workout().unwrap();
    let result = WorkoutSimulator::new(config.simulator)
        .simulate(&fran, &MockAthlete::default(), &mut UnbrokenStrategy::default())
        .unwrap();
    assert!(result.completed);
    assert!(result
        .events
        .iter()
        .all(|e| e.fatigue.is_finite() && e.fatigue >= 0.0));
    assert!(result.fatigue.local[&MovementPattern::Mixed] > 0.0);
    assert!(result.total_time.is_finite());
}

#[test]
fn test_poor_recovery_slows_the_finish() {
    let round = Round::new(vec![Exercise::reps("pull-up", 60).unwrap()]).unwrap();
    let workout = Workout::for_time("Sixty", vec![round], None).unwrap();
    let athlete = MockAthlete::default();

    let run = |config: SimulatorConfig| {
        WorkoutSimulator::new(config)
            .simulate(&workout, &athlete, &mut UnbrokenStrategy::default())
            .unwrap()
    };
    let neutral = run(SimulatorConfig::default());
    let poor = run(SimulatorConfig {
        recovery_quality: 0.3,
        ..SimulatorConfig::default()
    });
    assert_eq!(neutral.total_reps, poor.total_reps);
    assert!(poor.total_time > neutral.total_time);
}

#[test]
fn test_context_factors_feed_the_simulator() {
    let factors = ContextFactors::compute(
        &ContextParams {
            temperature_c: 34.0,
            humidity_pct: 75.0,
            altitude_m: 2000.0,
        },
        &DayState::default(),
    );
    let config = SimulatorConfig::default().with_context(&factors);
    let simulator = WorkoutSimulator::new(config);
    assert_eq!(simulator.config().pace_multiplier, factors.pace_multiplier());
    assert!(simulator.config().validate().is_ok());
}
