//! Pacing strategies.
//!
//! Every variant implements [`PacingStrategy`]; the simulator only ever sees
//! the trait object.

pub mod conservative;
pub mod descending;
pub mod fractioned;
pub mod rpe;
pub mod types;
pub mod unbroken;

pub use conservative::ConservativeStrategy;
pub use descending::{descending_sets, DescendingStrategy};
pub use fractioned::FractionedStrategy;
pub use rpe::{rpe_to_constraints, RpeConstraints, RpeLevel, RpeStrategy, SetScheme};
pub use types::{PacingStrategy, RepBoundary, RestPattern, RestPatterns, StrategyError};
pub use unbroken::UnbrokenStrategy;

use serde::{Deserialize, Serialize};

/// Named pacing styles with stock parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingStyle {
    Unbroken,
    Fractioned,
    Descending,
    Conservative,
    Rpe(u8),
}

impl PacingStyle {
    /// Build the strategy with its default thresholds.
    pub fn build(&self) -> Box<dyn PacingStrategy> {
        match self {
            PacingStyle::Unbroken => Box::new(UnbrokenStrategy::default()),
            PacingStyle::Fractioned => Box::new(FractionedStrategy::default()),
            PacingStyle::Descending => Box::new(DescendingStrategy::default()),
            PacingStyle::Conservative => Box::new(ConservativeStrategy::default()),
            PacingStyle::Rpe(rpe) => Box::new(RpeStrategy::new(*rpe)),
        }
    }

    /// Stock strategy for a workout kind: sprint, medium, long/amrap, else fractioned.
    pub fn for_workout_kind(kind: &str) -> Box<dyn PacingStrategy> {
        match kind.trim().to_lowercase().as_str() {
            "sprint" | "short" | "for_time_short" => Box::new(unbroken(0.95)),
            "medium" | "for_time_medium" => Box::new(descending(0.8)),
            "long" | "amrap" | "endurance" => Box::new(ConservativeStrategy::default()),
            _ => Box::new(fractioned(0.75)),
        }
    }
}

impl std::fmt::Display for PacingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PacingStyle::Unbroken => write!(f, "unbroken"),
            PacingStyle::Fractioned => write!(f, "fractioned"),
            PacingStyle::Descending => write!(f, "descending"),
            PacingStyle::Conservative => write!(f, "conservative"),
            PacingStyle::Rpe(rpe) => write!(f, "rpe-{}", rpe),
        }
    }
}

fn unbroken(threshold: f64) -> UnbrokenStrategy {
    UnbrokenStrategy::new(threshold).unwrap_or_default()
}

fn descending(threshold: f64) -> DescendingStrategy {
    DescendingStrategy::new(threshold).unwrap_or_default()
}

fn fractioned(threshold: f64) -> FractionedStrategy {
    FractionedStrategy::new(RestPatterns::new(), threshold).unwrap_or_default()
}
