//! Integration test harness.

mod helpers;

mod cli_test;
mod preset_test;
mod simulation_test;
