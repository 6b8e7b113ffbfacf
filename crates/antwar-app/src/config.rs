//! Engine configuration file for the headless host.
//!
//! A JSON object with any subset of `SimConfig` fields; missing fields keep
//! their defaults. Command-line flags are applied on top.

use std::fs;
use std::path::Path;

use antwar_sim::SimConfig;

use crate::error::AppError;

pub fn load_config(path: &Path) -> Result<SimConfig, AppError> {
    let text = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use antwar_core::enums::House;

    #[test]
    fn partial_config_keeps_defaults() {
        let path = std::env::temp_dir().join(format!("antwar_config_{}.json", std::process::id()));
        fs::write(&path, r#"{ "seed": 7, "player_house": "USSR" }"#).unwrap();
        let config = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.seed, 7);
        assert_eq!(config.player_house, Some(House::USSR));
        assert_eq!(config.turbo, SimConfig::default().turbo);
    }

    #[test]
    fn missing_config_reports_path() {
        let err = load_config(Path::new("/nonexistent/antwar.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/antwar.json"));
    }
}
