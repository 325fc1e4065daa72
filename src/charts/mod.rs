//! Charts module - per-widget data preparation

mod dashboard;
mod prepare;

pub use dashboard::{Dashboard, DashboardError};
pub use prepare::{
    ChartPreparer, ConferenceChart, HeatmapChart, ScatterChart, ScatterPoint, SeasonPoint,
    ShootingChart, ShootingGroup, WinsLineChart,
};
