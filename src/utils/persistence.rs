//! JSON file helpers and platform directories for game data.

use crate::core::{GameError, Result, APP_NAME};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME).ok_or(GameError::NoDataDir)
}

/// Platform data directory, e.g. `~/.local/share/gauntlet` on Linux.
pub fn default_data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// Where the interactive game writes its log file.
pub fn default_log_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.cache_dir().join("logs"))
}

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Write a value as pretty-printed JSON.
///
/// The data goes to a sibling temp file first and is renamed into place, so
/// a crash mid-write never leaves a truncated file behind.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
