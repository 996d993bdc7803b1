//! Simulation report generation.

use crate::core::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one simulated run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Waves fully cleared (the run's score)
    pub waves: u32,
    /// Rounds fought across all waves
    pub rounds: u64,
    /// Stopped at `max_waves` rather than by a wipe
    pub timed_out: bool,
    /// Team members in pick order
    pub team: Vec<String>,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,

    pub avg_waves: f64,
    pub median_waves: u32,
    pub best_waves: u32,
    pub worst_waves: u32,
    pub avg_rounds: f64,

    /// waves -> number of runs ending there
    pub wave_distribution: BTreeMap<u32, u32>,

    /// Average score of the runs each character took part in
    pub character_avg_waves: BTreeMap<String, f64>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = num_runs.max(1) as f64;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;

        let avg_waves = runs.iter().map(|r| r.waves as f64).sum::<f64>() / divisor;
        let avg_rounds = runs.iter().map(|r| r.rounds as f64).sum::<f64>() / divisor;
        let best_waves = runs.iter().map(|r| r.waves).max().unwrap_or(0);
        let worst_waves = runs.iter().map(|r| r.waves).min().unwrap_or(0);
        let median_waves = {
            let mut sorted: Vec<u32> = runs.iter().map(|r| r.waves).collect();
            sorted.sort_unstable();
            sorted.get(sorted.len() / 2).copied().unwrap_or(0)
        };

        let mut wave_distribution = BTreeMap::new();
        for run in &runs {
            *wave_distribution.entry(run.waves).or_insert(0) += 1;
        }

        let mut totals: BTreeMap<String, (u64, u32)> = BTreeMap::new();
        for run in &runs {
            for name in &run.team {
                let entry = totals.entry(name.clone()).or_insert((0, 0));
                entry.0 += run.waves as u64;
                entry.1 += 1;
            }
        }
        let character_avg_waves = totals
            .into_iter()
            .map(|(name, (waves, count))| (name, waves as f64 / count as f64))
            .collect();

        Self {
            num_runs,
            runs_timed_out,
            avg_waves,
            median_waves,
            best_waves,
            worst_waves,
            avg_rounds,
            wave_distribution,
            character_avg_waves,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} capped at max waves\n\n",
            self.num_runs, self.runs_timed_out
        ));

        report.push_str("── WAVES ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Waves:     {:.2}\n", self.avg_waves));
        report.push_str(&format!("  Median Waves:  {}\n", self.median_waves));
        report.push_str(&format!("  Best:          {}\n", self.best_waves));
        report.push_str(&format!("  Worst:         {}\n", self.worst_waves));
        report.push_str(&format!("  Avg Rounds:    {:.1}\n\n", self.avg_rounds));

        report.push_str("── DISTRIBUTION ─────────────────────────────────────────────────\n");
        for (waves, count) in &self.wave_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 2.0) as usize);
            report.push_str(&format!("  {:4} waves: {:>5.1}% {}\n", waves, pct, bar));
        }
        report.push('\n');

        report.push_str("── CHARACTERS ───────────────────────────────────────────────────\n");
        let mut by_score: Vec<(&String, &f64)> = self.character_avg_waves.iter().collect();
        by_score.sort_by(|a, b| b.1.total_cmp(a.1));
        for (name, avg) in by_score {
            report.push_str(&format!("  {:<12} {:>6.2} avg waves\n", name, avg));
        }

        if self.runs_timed_out > 0 {
            report.push_str("\n  ⚠️  Some runs never lost - healing outpaces monster damage?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
