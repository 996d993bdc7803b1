//! Balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of automated runs with random teams to see how far the
//! current catalog lets a team get:
//! - Average and spread of waves survived
//! - Which characters pull their weight
//! - Whether any team composition never loses
//!
//! Runs go through the same `WaveController` as the interactive game, so the
//! numbers match real play.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
