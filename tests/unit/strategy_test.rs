//! Unit tests for pacing strategies behind the trait object.

use wodtwin::strategy::{
    DescendingStrategy, PacingStrategy, PacingStyle, RepBoundary, RestPattern, RestPatterns,
    RpeStrategy, StrategyError, UnbrokenStrategy,
};

fn all_styles() -> Vec<PacingStyle> {
    vec![
        PacingStyle::Unbroken,
        PacingStyle::Fractioned,
        PacingStyle::Descending,
        PacingStyle::Conservative,
        PacingStyle::Rpe(3),
        PacingStyle::Rpe(8),
    ]
}

fn boundary(exercise: &str, reps_done: u32, fatigue: f64) -> RepBoundary<'_> {
    RepBoundary {
        exercise,
        reps_done,
        target_reps: 21,
        fatigue,
        elapsed: 0.0,
    }
}

#[test]
fn test_fresh_athlete_starts_working() {
    for style in all_styles() {
        let mut strategy = style.build();
        assert!(
            !strategy.should_rest(&boundary("thruster", 0, 0.0)),
            "{} rested before the first rep",
            style
        );
    }
}

#[test]
fn test_rest_durations_are_finite_and_non_negative() {
    for style in all_styles() {
        let mut strategy = style.build();
        for reps_done in [1, 7, 14, 20] {
            for fatigue in [0.0, 0.4, 0.9, 2.0] {
                let at = boundary("pull-up", reps_done, fatigue);
                let rest = strategy.rest_duration(&at);
                assert!(rest.is_finite() && rest >= 0.0, "{}: {}", style, rest);
            }
        }
    }
}

#[test]
fn test_breakdowns_cover_target() {
    for style in all_styles() {
        let mut strategy = style.build();
        for total in [1, 9, 15, 21, 50] {
            let sets = strategy.set_breakdown("wall-ball", total);
            assert_eq!(sets.iter().sum::<u32>(), total, "{} split {}", style, total);
        }
    }
}

#[test]
fn test_everyone_rests_when_exhausted() {
    for style in all_styles() {
        let mut strategy = style.build();
        assert!(strategy.should_rest(&boundary("burpee", 3, 1.5)), "{}", style);
    }
}

#[test]
fn test_construction_errors() {
    assert_eq!(
        UnbrokenStrategy::new(1.5).unwrap_err(),
        StrategyError::InvalidThreshold(1.5)
    );
    assert!(DescendingStrategy::new(-0.1).is_err());
    assert_eq!(
        RestPattern::new(0, 5.0).unwrap_err(),
        StrategyError::ZeroRepsBeforeRest
    );
    assert_eq!(
        RestPattern::new(3, -1.0).unwrap_err(),
        StrategyError::NegativeRest(-1.0)
    );
    assert_eq!(
        RestPattern::new(3, 5.0)
            .unwrap()
            .with_max_consecutive(0)
            .unwrap_err(),
        StrategyError::ZeroMaxConsecutive
    );
}

#[test]
fn test_rest_pattern_lookup_is_normalized() {
    let patterns = RestPatterns::from_triples(&[("Pull Up", 5, 8.0)]).unwrap();
    let pattern = patterns.get("pull_up").unwrap();
    assert_eq!(pattern.reps_before_rest, 5);
    assert_eq!(pattern.split(12), vec![5, 5, 2]);
    assert!(patterns.get("push-up").is_none());
}

#[test]
fn test_descending_memo_and_reset() {
    let mut strategy = DescendingStrategy::default();
    strategy.set_breakdown("thruster", 21);
    strategy.set_breakdown("Thruster", 21);
    strategy.set_breakdown("thruster", 15);
    assert_eq!(strategy.cached_plans(), 2);

    let mut boxed: Box<dyn PacingStrategy> = Box::new(strategy.clone());
    boxed.reset();
    assert_eq!(strategy.cached_plans(), 2);
    assert_eq!(boxed.set_breakdown("thruster", 21), vec![7, 6, 5, 3]);
}

#[test]
fn test_rpe_capacity_shapes_sets() {
    let mut default = RpeStrategy::new(10);
    let mut limited = RpeStrategy::new(10).with_capacity("pull-up", 10);

    let wide = default.set_breakdown("pull-up", 21);
    let narrow = limited.set_breakdown("pull-up", 21);
    assert_eq!(narrow.iter().sum::<u32>(), 21);
    assert!(narrow[0] <= 10);
    assert!(narrow[0] < wide[0]);
    assert!(narrow.len() > wide.len());
}

#[test]
fn test_lower_rpe_rests_longer() {
    let mut easy = RpeStrategy::new(3);
    let mut hard = RpeStrategy::new(9);
    let at = boundary("thruster", 5, 0.2);
    assert!(easy.rest_duration(&at) > hard.rest_duration(&at));
    assert!(easy.constraints().cardio_reserve > hard.constraints().cardio_reserve);
}
