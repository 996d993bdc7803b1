//! Simulation configuration.

use crate::core::{SIM_DEFAULT_MAX_WAVES, SIM_DEFAULT_RUNS};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated runs
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Waves won after which a run is stopped and counted as timed out
    pub max_waves: u32,

    /// Revive a fallen member every N waves won (None = never)
    pub reanimate_every: Option<u32>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = every run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: SIM_DEFAULT_RUNS,
            seed: None,
            max_waves: SIM_DEFAULT_MAX_WAVES,
            reanimate_every: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded config for quick balance checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 100,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Default log filter for this verbosity; `RUST_LOG` takes precedence.
    /// Quiet runs only surface warnings, `-vv` shows every wave.
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
