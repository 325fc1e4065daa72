//! Dashboard Configuration
//! Dataset location and the default widget selections, loaded from JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for one dashboard build. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    /// Team shown in the wins line graph; first team alphabetically if unset.
    pub selected_team: Option<String>,
    /// Season shown in the heatmap; latest season if unset.
    pub heatmap_year: Option<i32>,
    /// Highest seed included in the shooting comparison.
    pub shooting_max_seed: u8,
    /// Count only tournament teams in the conference chart.
    pub conference_tournament_only: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("basketball.csv"),
            selected_team: None,
            heatmap_year: None,
            shooting_max_seed: 1,
            conference_tournament_only: true,
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "selected_team": "Gonzaga" }"#;
        let config = DashboardConfig::from_json_str(json).unwrap();
        assert_eq!(config.selected_team.as_deref(), Some("Gonzaga"));
        assert_eq!(config.dataset_path, PathBuf::from("basketball.csv"));
        assert_eq!(config.shooting_max_seed, 1);
        assert!(config.conference_tournament_only);
        assert_eq!(config.heatmap_year, None);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "dataset_path": "data/cbb.csv",
            "selected_team": null,
            "heatmap_year": 2016,
            "shooting_max_seed": 4,
            "conference_tournament_only": false
        }"#;
        let config = DashboardConfig::from_json_str(json).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("data/cbb.csv"));
        assert_eq!(config.heatmap_year, Some(2016));
        assert_eq!(config.shooting_max_seed, 4);
        assert!(!config.conference_tournament_only);
    }

    #[test]
    fn test_invalid_json() {
        let result = DashboardConfig::from_json_str(r#"{ "shooting_max_seed": "one" }"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "heatmap_year": 2019 }}"#).unwrap();
        file.flush().unwrap();
        let config = DashboardConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.heatmap_year, Some(2019));

        let missing = DashboardConfig::from_json_file("/nonexistent/dashboard.json");
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
