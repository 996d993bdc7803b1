//! Simulation runner driving the real `WaveController` with random teams.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::catalog::EntityTemplate;
use crate::core::{Result, SIM_PLAYER_NAME};
use crate::team::create_team;
use crate::wave::{WaveController, WaveEvent, WavePhase};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Run the full simulation and return a report.
///
/// Each run gets its own RNG: `seed + run index` when seeded, so any single
/// run can be replayed in isolation.
pub fn run_simulation(
    config: &SimConfig,
    characters: &[EntityTemplate],
    monsters: &[EntityTemplate],
) -> Result<SimReport> {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, characters, monsters, &mut rng)?;

        if config.verbosity >= 2 {
            info!(
                "Run {}/{} - {} waves, {} rounds, team: {}{}",
                run_idx + 1,
                config.num_runs,
                run.waves,
                run.rounds,
                run.team.join(", "),
                if run.timed_out { " (capped)" } else { "" }
            );
        }
        all_runs.push(run);
    }

    let report = SimReport::from_runs(all_runs);
    if config.verbosity >= 1 {
        info!(
            runs = report.num_runs,
            avg_waves = report.avg_waves,
            timed_out = report.runs_timed_out,
            "simulation finished"
        );
    }
    Ok(report)
}

/// Plays one run to the end (or to `max_waves`) with a random team.
///
/// The cap is checked before every new wave starts, so a run never reports
/// more than `max_waves` waves won.
pub fn simulate_single_run(
    config: &SimConfig,
    characters: &[EntityTemplate],
    monsters: &[EntityTemplate],
    rng: &mut impl Rng,
) -> Result<RunStats> {
    let team = create_team(characters.to_vec(), |available, _slot| {
        rng.gen_range(1..=available.len())
    })?;
    let team_names = team.members().iter().map(|m| m.name.clone()).collect();

    let mut controller = WaveController::new(SIM_PLAYER_NAME, monsters.to_vec())?
        .with_reanimation(config.reanimate_every);
    controller.assign_team(team)?;

    let mut rounds = 0u64;
    let mut timed_out = false;
    loop {
        match controller.phase() {
            WavePhase::RunEnded => break,
            WavePhase::TeamReady | WavePhase::WaveWon
                if controller.waves_won() >= config.max_waves =>
            {
                timed_out = true;
                break;
            }
            _ => {}
        }
        if let WaveEvent::Round(_) = controller.step(rng)? {
            rounds += 1;
        }
    }

    Ok(RunStats {
        waves: controller.waves_won(),
        rounds,
        timed_out,
        team: team_names,
    })
}
