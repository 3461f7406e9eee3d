//! Unit test modules.

mod athlete_test;
mod fatigue_test;
mod strategy_test;
mod workout_test;
