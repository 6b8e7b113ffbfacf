//! Errors surfaced by the headless host.

use std::path::PathBuf;

use antwar_scenario::ScenarioError;
use antwar_sim::SimError;

use crate::progress::ProgressError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
