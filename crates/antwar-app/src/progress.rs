//! Persistent missions-completed counter.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PROGRESS_FILE: &str = "progress.json";

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("failed to access progress file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("progress file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub missions_completed: u32,
}

fn progress_path(dir: &Path) -> PathBuf {
    dir.join(PROGRESS_FILE)
}

/// Read the counter. A missing file is a fresh start.
pub fn load(dir: &Path) -> Result<Progress, ProgressError> {
    let path = progress_path(dir);
    let json = match fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Progress::default()),
        Err(source) => return Err(ProgressError::Io { path, source }),
    };
    serde_json::from_str(&json).map_err(|source| ProgressError::Corrupt { path, source })
}

pub fn save(dir: &Path, progress: &Progress) -> Result<(), ProgressError> {
    let path = progress_path(dir);
    fs::create_dir_all(dir).map_err(|source| ProgressError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let json = serde_json::to_string_pretty(progress).map_err(|source| ProgressError::Corrupt {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, json).map_err(|source| ProgressError::Io { path, source })
}

/// Count one more won mission and return the new total.
pub fn record_win(dir: &Path) -> Result<u32, ProgressError> {
    let mut progress = load(dir)?;
    progress.missions_completed += 1;
    save(dir, &progress)?;
    Ok(progress.missions_completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("antwar_progress_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_file_starts_at_zero() {
        let dir = scratch("missing");
        assert_eq!(load(&dir).unwrap(), Progress::default());
    }

    #[test]
    fn wins_accumulate_across_loads() {
        let dir = scratch("wins");
        assert_eq!(record_win(&dir).unwrap(), 1);
        assert_eq!(record_win(&dir).unwrap(), 2);
        assert_eq!(load(&dir).unwrap().missions_completed, 2);

        let json = fs::read_to_string(progress_path(&dir)).unwrap();
        assert!(json.contains("\"missions_completed\": 2"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = scratch("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(progress_path(&dir), "{ not json").unwrap();
        assert!(matches!(load(&dir), Err(ProgressError::Corrupt { .. })));
        let _ = fs::remove_dir_all(&dir);
    }
}
