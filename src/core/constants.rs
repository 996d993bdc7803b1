// Team composition
pub const TEAM_SIZE: usize = 3;

// Combat constants
pub const MIN_DAMAGE: u32 = 1;
pub const BETWEEN_WAVE_HEAL_FRACTION: f64 = 0.10;
pub const FIRST_WAVE: u32 = 1;

// Player name bounds, in characters
pub const PLAYER_NAME_MIN_LEN: usize = 3;
pub const PLAYER_NAME_MAX_LEN: usize = 20;

// Leaderboard
pub const LEADERBOARD_SIZE: usize = 3;

// Frontend timing
pub const TICK_INTERVAL_MS: u64 = 50;
pub const DEFAULT_ROUND_DELAY_MS: u64 = 1000;
pub const COMBAT_LOG_CAPACITY: usize = 12;

// Storage layout
pub const APP_NAME: &str = "gauntlet";
pub const CHARACTERS_FILE: &str = "characters.json";
pub const MONSTERS_FILE: &str = "monsters.json";
pub const SCORES_FILE: &str = "scores.jsonl";
pub const LOG_FILE: &str = "gauntlet.log";

// Simulator defaults
pub const SIM_DEFAULT_RUNS: u32 = 1000;
pub const SIM_DEFAULT_MAX_WAVES: u32 = 500;
pub const SIM_PLAYER_NAME: &str = "simulator";
