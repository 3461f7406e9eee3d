//! Athlete capabilities and context effects.

pub mod capabilities;
pub mod context;
pub mod provider;

pub use capabilities::{AthleteCapabilities, BarbellProfile, CpProfile, GymSkill};
pub use context::{ContextFactors, ContextParams, DayState};
pub use provider::{default_pace, CapabilityProvider};
