//! Dashboard Module
//! Loads the dataset once and prepares every widget from it.

use super::prepare::{
    ChartPreparer, ConferenceChart, HeatmapChart, ScatterChart, ShootingChart, WinsLineChart,
};
use crate::config::{ConfigError, DashboardConfig};
use crate::data::{DataLoader, FieldMapper, LoaderError, Row};
use crate::stats::AdvancementMatrix;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Dataset {0} has no rows")]
    EmptyDataset(PathBuf),
    #[error("Failed to serialize dashboard: {0}")]
    Json(#[from] serde_json::Error),
}

/// Data for all six widgets, ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub conferences: ConferenceChart,
    pub wins: WinsLineChart,
    pub turnover: ScatterChart,
    pub seeds: ScatterChart,
    pub heatmap: HeatmapChart,
    /// One matrix per season, so the slider can move without recomputing.
    pub season_heatmaps: Vec<AdvancementMatrix>,
    pub shooting: ShootingChart,
}

impl Dashboard {
    /// Prepare every widget from already-mapped rows.
    pub fn prepare(rows: &[Row], config: &DashboardConfig) -> Self {
        let ((turnover, seeds), season_heatmaps) = rayon::join(
            || {
                rayon::join(
                    || ChartPreparer::turnover_scatter(rows),
                    || ChartPreparer::seed_scatter(rows),
                )
            },
            || ChartPreparer::all_season_heatmaps(rows),
        );

        Self {
            conferences: ChartPreparer::conference_counts(rows, config.conference_tournament_only),
            wins: ChartPreparer::wins_line(rows, config.selected_team.as_deref()),
            turnover,
            seeds,
            heatmap: ChartPreparer::postseason_heatmap(rows, config.heatmap_year),
            season_heatmaps,
            shooting: ChartPreparer::shooting_comparison(rows, config.shooting_max_seed),
        }
    }

    /// Load `config.dataset_path` and prepare the dashboard.
    /// An empty dataset is an error; nothing is computed on it.
    pub fn load(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let mut loader = DataLoader::new();
        loader.load_csv(&config.dataset_path)?;

        let rows = FieldMapper::map_rows(loader.rows());
        if rows.is_empty() {
            return Err(DashboardError::EmptyDataset(config.dataset_path.clone()));
        }

        let dashboard = Self::prepare(&rows, config);
        log::info!(
            "Dashboard ready: {} rows, {} seasons",
            rows.len(),
            dashboard.season_heatmaps.len()
        );
        Ok(dashboard)
    }

    /// Read a JSON config file, then load.
    pub fn load_with_config_file(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let config = DashboardConfig::from_json_file(path)?;
        Self::load(&config)
    }

    /// JSON for the presentation layer. Undefined values (NaN) become `null`.
    pub fn to_json(&self) -> Result<String, DashboardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
TEAM,CONF,G,W,BARTHAG,TOR,2P_O,3P_O,2P_D,3P_D,EFG_O,EFG_D,WAB,POSTSEASON,SEED,YEAR
Virginia,ACC,38,35,0.9728,14.1,52.5,39.5,43.9,30.6,55.2,44.4,11.1,Champions,1,2019
Texas Tech,B12,38,31,0.9633,17.9,52.6,36.6,40.9,29.4,53.0,41.3,7.3,2ND,3,2019
Michigan St.,B10,39,32,0.9608,17.4,55.4,37.9,40.8,32.4,55.4,40.3,9.3,F4,2,2019
Fairleigh Dickinson,NEC,35,21,0.3034,17.2,53.0,37.0,52.6,33.8,54.1,50.6,-8.0,R64,16,2019
Prairie View A&M,SWAC,35,22,0.1839,21.5,47.9,31.1,50.2,34.3,49.0,50.3,-9.2,R68,16,2019
Wichita St.,Amer,36,22,0.7372,16.3,48.1,34.1,44.6,32.5,50.4,46.5,-1.8,NA,NA,2019
Villanova,BE,40,36,0.9677,14.9,54.5,40.1,44.9,32.8,59.5,45.1,10.3,Champions,1,2018
Virginia,ACC,34,31,0.9544,14.8,50.8,37.7,44.4,30.6,53.4,43.6,9.2,R64,1,2018
";

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    fn config_for(file: &tempfile::NamedTempFile) -> DashboardConfig {
        DashboardConfig {
            dataset_path: file.path().to_path_buf(),
            selected_team: Some("Virginia".to_string()),
            ..DashboardConfig::default()
        }
    }

    #[test]
    fn test_load_dashboard() {
        let file = write_csv(CSV);
        let dashboard = Dashboard::load(&config_for(&file)).unwrap();

        assert_eq!(dashboard.conferences.rows_counted, 7);
        assert_eq!(dashboard.conferences.bars[0].key, "ACC");
        assert_eq!(dashboard.conferences.bars[0].count, 2);

        assert_eq!(dashboard.wins.team.as_deref(), Some("Virginia"));
        assert_eq!(dashboard.wins.points.len(), 2);
        assert_eq!(dashboard.wins.points[0].season, 2018);

        assert_eq!(dashboard.turnover.points.len(), 8);
        assert!(dashboard.turnover.regression.is_some());
        assert_eq!(dashboard.seeds.points.len(), 7);

        assert_eq!(dashboard.heatmap.season, Some(2019));
        let matrix = dashboard.heatmap.matrix.as_ref().unwrap();
        assert_eq!(matrix.seed_totals[15], 2);
        assert_eq!(matrix.cells[15][0], 0.5);
        assert_eq!(matrix.cells[0][6], 1.0);
        assert_eq!(dashboard.season_heatmaps.len(), 2);

        let seasons: Vec<i32> = dashboard
            .shooting
            .groups
            .iter()
            .map(|g| g.season)
            .collect();
        assert_eq!(seasons, vec![2018, 2019]);
        assert_eq!(dashboard.shooting.groups[0].teams, 2);
    }

    #[test]
    fn test_load_is_idempotent() {
        let file = write_csv(CSV);
        let config = config_for(&file);
        let first = Dashboard::load(&config).unwrap();
        let second = Dashboard::load(&config).unwrap();
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn test_empty_dataset_is_refused() {
        let header = CSV.lines().next().unwrap();
        let file = write_csv(&format!("{}\n", header));
        let result = Dashboard::load(&config_for(&file));
        assert!(matches!(result, Err(DashboardError::EmptyDataset(_))));
    }

    #[test]
    fn test_missing_dataset() {
        let config = DashboardConfig {
            dataset_path: PathBuf::from("/nonexistent/basketball.csv"),
            ..DashboardConfig::default()
        };
        let result = Dashboard::load(&config);
        assert!(matches!(result, Err(DashboardError::Loader(_))));
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let rows = vec![Row {
            team: "Lonely".to_string(),
            season: Some(2019),
            ..Row::default()
        }];
        let dashboard = Dashboard::prepare(&rows, &DashboardConfig::default());
        let text = dashboard.to_json().unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(json["wins"]["mean_win_pct"].is_null());
        assert!(json["turnover"]["regression"].is_null());
        assert_eq!(json["heatmap"]["season"], 2019);
        assert_eq!(json["wins"]["team"], "Lonely");
    }

    #[test]
    fn test_load_with_config_file() {
        let data = write_csv(CSV);
        let mut config = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "dataset_path": data.path(),
            "heatmap_year": 2018,
            "conference_tournament_only": false,
        });
        write!(config, "{}", json).unwrap();
        config.flush().unwrap();

        let dashboard = Dashboard::load_with_config_file(config.path()).unwrap();
        assert_eq!(dashboard.heatmap.season, Some(2018));
        assert_eq!(dashboard.conferences.rows_counted, 8);
        let team = dashboard.wins.team.as_deref();
        assert_eq!(team, Some("Fairleigh Dickinson"));
    }
}
