//! Unit tests for the reference capability provider and context effects.

use wodtwin::athlete::{
    AthleteCapabilities, CapabilityProvider, ContextFactors, ContextParams, CpProfile, DayState,
    GymSkill,
};
use wodtwin::fatigue::Modality;

fn athlete() -> AthleteCapabilities {
    AthleteCapabilities::new("Ada", 70.0)
        .with_one_rm("front-squat", 100.0)
        .with_gym_skill("pull-up", GymSkill::new(1.5, 20))
        .with_cardio_profile(Modality::Row, CpProfile::new(240.0, 16000.0))
}

#[test]
fn test_provider_through_trait_object() {
    let athlete = athlete();
    let provider: &dyn CapabilityProvider = &athlete;

    assert_eq!(provider.name(), "Ada");
    assert_eq!(provider.one_rep_max("thruster"), Some(100.0));
    assert!((provider.load_intensity("thruster", Some(43.0)) - 0.43).abs() < 1e-12);

    let fresh = provider.rep_duration("thruster", Some(43.0), 0.0);
    let tired = provider.rep_duration("thruster", Some(43.0), 1.0);
    assert!(tired > fresh);

    assert_eq!(provider.rep_duration("pull-up", None, 0.0), 1.5);
    assert_eq!(provider.gym_unbroken_capacity("pull-up", 0.0), Some(20));
    assert_eq!(provider.gym_unbroken_capacity("pull-up", 10.0), Some(1));
    assert_eq!(provider.cardio_profile(Modality::Bike), None);
}

#[test]
fn test_fitter_athletes_recover_faster() {
    let fit = AthleteCapabilities::new("Fit", 70.0)
        .with_cardio_profile(Modality::Row, CpProfile::new(300.0, 20000.0));
    let unfit = AthleteCapabilities::new("Unfit", 70.0)
        .with_cardio_profile(Modality::Row, CpProfile::new(150.0, 12000.0));
    let fit_tau = fit.recovery_time_constant(Modality::Row, 320.0);
    let unfit_tau = unfit.recovery_time_constant(Modality::Row, 320.0);
    assert!(fit_tau < unfit_tau);

    let unknown = AthleteCapabilities::new("Unknown", 70.0);
    assert_eq!(unknown.recovery_time_constant(Modality::Row, 320.0), 320.0);
}

#[test]
fn test_deserialize_with_default_aliases() {
    let json = r#"{
        "name": "Json",
        "body_mass_kg": 80.0,
        "one_rm": { "front-squat": 110.0 },
        "cardio": { "run": { "critical": 4.0, "w_prime": 200.0 } }
    }"#;
    let athlete: AthleteCapabilities = serde_json::from_str(json).unwrap();
    assert_eq!(athlete.one_rep_max("thruster"), Some(110.0));
    assert_eq!(
        athlete.cardio_profile(Modality::Run),
        Some(CpProfile::new(4.0, 200.0))
    );
    assert!(athlete.validate().is_empty());
}

#[test]
fn test_hot_day_lowers_recovery_and_slows_pace() {
    let mild = ContextFactors::default();
    let hot = ContextFactors::compute(
        &ContextParams {
            temperature_c: 35.0,
            humidity_pct: 80.0,
            altitude_m: 1600.0,
        },
        &DayState::default(),
    );
    assert!(hot.recovery_quality() < mild.recovery_quality());
    assert!(hot.pace_multiplier() > mild.pace_multiplier());
    assert!(hot.cardio_stress() > mild.cardio_stress());
}
