//! Unit tests for the fatigue model.

use wodtwin::fatigue::{
    CardioReserve, FatigueManager, FatigueModelConfig, Modality, MovementPattern, PatternTable,
};

fn loaded_manager() -> FatigueManager {
    let mut manager = FatigueManager::default();
    manager.initialize_cardio(Modality::Row, 20000.0, 320.0);
    manager.initialize_cardio(Modality::Run, 250.0, 280.0);
    manager.add_local_work("thruster", 0.43, 21);
    manager.add_local_work("pull-up", 0.0, 21);
    manager.add_cardio_work(Modality::Row, 330.0, 250.0, 120.0);
    manager.add_cardio_work(Modality::Run, 5.0, 4.0, 100.0);
    manager
}

#[test]
fn test_rest_is_non_punitive_across_durations_and_qualities() {
    for duration in [0.5, 5.0, 30.0, 120.0, 900.0] {
        for quality in [0.1, 0.5, 1.0, 1.5, 3.0] {
            let mut manager = loaded_manager();
            let before = manager.snapshot();
            manager.recover_all(duration, quality);
            let after = manager.snapshot();

            assert!(after.global <= before.global);
            assert!(after.global >= 0.0);
            for pattern in MovementPattern::all() {
                assert!(after.local[&pattern] <= before.local[&pattern]);
                assert!(after.local[&pattern] >= 0.0);
            }
            for modality in [Modality::Row, Modality::Run] {
                let max = manager.cardio_reserve(modality).unwrap().max_reserve();
                assert!(after.cardio_balance[&modality] >= before.cardio_balance[&modality]);
                assert!(after.cardio_balance[&modality] <= max);
            }
        }
    }
}

#[test]
fn test_reserve_floors_at_zero() {
    let mut reserve = CardioReserve::new(Modality::Bike, 1000.0, 300.0);
    reserve.deplete(500.0, 250.0, 60.0);
    assert_eq!(reserve.balance(), 0.0);
    assert_eq!(reserve.fatigue_factor(), 1.0);
    assert!(!reserve.can_sustain(300.0, 250.0, 1.0));
    assert!(reserve.can_sustain(250.0, 250.0, 600.0));
}

#[test]
fn test_below_critical_does_not_deplete() {
    let mut reserve = CardioReserve::new(Modality::Row, 20000.0, 300.0);
    reserve.deplete(200.0, 250.0, 600.0);
    assert_eq!(reserve.balance(), 20000.0);
    assert_eq!(reserve.time_to_exhaustion(200.0, 250.0), None);
    assert_eq!(reserve.time_to_exhaustion(350.0, 250.0), Some(200.0));
}

#[test]
fn test_cardio_fatigue_curve() {
    let mut manager = FatigueManager::default();
    manager.initialize_cardio(Modality::Row, 20000.0, 300.0);
    manager.add_cardio_work(Modality::Row, 350.0, 250.0, 100.0);
    // Half the reserve gone: 0.5^0.7
    let expected = 0.5f64.powf(0.7);
    assert!((manager.cardio_fatigue(Modality::Row) - expected).abs() < 1e-12);
}

#[test]
fn test_injected_pattern_table() {
    let table = PatternTable::empty().with_movement("sled-push", &[MovementPattern::Squat]);
    let mut manager = FatigueManager::new(FatigueModelConfig::default(), table);
    manager.add_local_work("Sled Push", 0.0, 10);
    assert!(manager.bucket_fatigue(MovementPattern::Squat) > 0.0);
    assert_eq!(manager.bucket_fatigue(MovementPattern::Mixed), 0.0);

    // Default mappings are gone from an empty table
    manager.add_local_work("pull-up", 0.0, 5);
    assert!(manager.bucket_fatigue(MovementPattern::Mixed) > 0.0);
    assert_eq!(manager.bucket_fatigue(MovementPattern::Pull), 0.0);
}

#[test]
fn test_heavier_load_costs_more() {
    let mut light = FatigueManager::default();
    light.add_local_work("deadlift", 0.3, 10);
    let mut heavy = FatigueManager::default();
    heavy.add_local_work("deadlift", 0.8, 10);
    assert!(heavy.movement_fatigue("deadlift") > light.movement_fatigue("deadlift"));
}

#[test]
fn test_reset_is_idempotent() {
    let mut manager = loaded_manager();
    manager.reset();
    let once = manager.snapshot();
    manager.reset();
    assert_eq!(manager.snapshot(), once);
    assert_eq!(manager.overall_fatigue(), 0.0);
    assert_eq!(manager.cardio_balance(Modality::Row), Some(20000.0));
    assert_eq!(manager.cardio_balance(Modality::Run), Some(250.0));
}
