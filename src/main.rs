//! Gauntlet CLI: play the game, print the leaderboard, or run the balance simulator.

mod app;
mod ui;

use app::{App, PlayOptions};
use clap::{Parser, Subcommand};
use gauntlet::catalog::{EntityCatalog, JsonCatalog};
use gauntlet::core::{
    Result, DEFAULT_ROUND_DELAY_MS, LEADERBOARD_SIZE, LOG_FILE, SIM_DEFAULT_MAX_WAVES,
    SIM_DEFAULT_RUNS,
};
use gauntlet::scores::{JsonScoreStore, ScoreStore};
use gauntlet::simulator::{run_simulation, SimConfig};
use gauntlet::utils::persistence::{default_data_dir, default_log_dir};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Gauntlet - pick a team of three and outlast the monsters
#[derive(Parser, Debug)]
#[command(name = "gauntlet")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the catalog and score files
    #[arg(long, global = true, env = "GAUNTLET_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Random seed (default: random)
    #[arg(short, long, global = true, env = "GAUNTLET_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal (default)
    Play {
        /// Delay between combat rounds in milliseconds
        #[arg(long, default_value_t = DEFAULT_ROUND_DELAY_MS)]
        round_delay_ms: u64,

        /// Revive a fallen member every N waves won
        #[arg(long)]
        reanimate_every: Option<u32>,
    },

    /// Print the high score table
    Scores {
        /// Number of entries to show
        #[arg(short, long, default_value_t = LEADERBOARD_SIZE)]
        limit: usize,
    },

    /// Run automated games with random teams and report balance statistics
    Simulate {
        /// Number of runs
        #[arg(short = 'n', long, default_value_t = SIM_DEFAULT_RUNS)]
        runs: u32,

        /// Stop a run after this many waves won (at least 1)
        #[arg(
            long,
            default_value_t = SIM_DEFAULT_MAX_WAVES,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        max_waves: u32,

        /// Revive a fallen member every N waves won
        #[arg(long)]
        reanimate_every: Option<u32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Log every run (-v) or nothing but the report (-q)
        #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
        verbose: u8,

        /// Print only the report
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        None => play(args.data_dir, args.seed, DEFAULT_ROUND_DELAY_MS, None),
        Some(Commands::Play {
            round_delay_ms,
            reanimate_every,
        }) => play(args.data_dir, args.seed, round_delay_ms, reanimate_every),
        Some(Commands::Scores { limit }) => scores(args.data_dir, limit),
        Some(Commands::Simulate {
            runs,
            max_waves,
            reanimate_every,
            json,
            verbose,
            quiet,
        }) => {
            let config = SimConfig {
                num_runs: runs,
                seed: args.seed,
                max_waves,
                reanimate_every,
                verbosity: if quiet { 0 } else { 1 + verbose },
            };
            simulate(args.data_dir, config, json)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir),
        None => default_data_dir(),
    }
}

fn play(
    data_dir: Option<PathBuf>,
    seed: Option<u64>,
    round_delay_ms: u64,
    reanimate_every: Option<u32>,
) -> Result<()> {
    let _guard = init_file_logging()?;

    let data_dir = resolve_data_dir(data_dir)?;
    let catalog = JsonCatalog::open(&data_dir)?;
    let mut store = JsonScoreStore::open(&data_dir)?;
    tracing::info!(data_dir = %data_dir.display(), ?seed, "starting interactive session");

    let options = PlayOptions {
        round_delay: Duration::from_millis(round_delay_ms),
        reanimate_every,
        seed,
    };
    App::new(&catalog, &mut store, options).run()?;

    println!("Thanks for playing! See you soon!");
    Ok(())
}

fn scores(data_dir: Option<PathBuf>, limit: usize) -> Result<()> {
    init_stderr_logging("info");

    let store = JsonScoreStore::open(&resolve_data_dir(data_dir)?)?;
    let top = store.top_scores(limit)?;

    if top.is_empty() {
        println!("No scores yet.");
        return Ok(());
    }
    println!("=== High Scores ===");
    for (i, score) in top.iter().enumerate() {
        println!("{:>2}. {:<20} {:>4} waves", i + 1, score.player_name, score.waves);
    }
    Ok(())
}

fn simulate(data_dir: Option<PathBuf>, config: SimConfig, json: bool) -> Result<()> {
    init_stderr_logging(config.log_filter());

    let catalog = JsonCatalog::open(&resolve_data_dir(data_dir)?)?;
    let characters = catalog.character_templates()?;
    let monsters = catalog.monster_templates()?;

    let report = run_simulation(&config, &characters, &monsters)?;
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

/// File-only logging for the TUI: anything written to the terminal would
/// corrupt the screen. The guard must outlive the session to flush the log.
fn init_file_logging() -> Result<WorkerGuard> {
    let log_dir = default_log_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}", log_dir.join(LOG_FILE).display());
    Ok(guard)
}

fn init_stderr_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// `RUST_LOG` when set, otherwise `default_filter`.
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}
