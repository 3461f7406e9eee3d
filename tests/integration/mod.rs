//! Integration test modules.

mod athlete_mock;
mod config_test;
mod properties_test;
mod scenario_test;
