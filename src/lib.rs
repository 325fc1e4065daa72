//! Hoops Dashboard - College Basketball Season Statistics
//!
//! Loads the season statistics CSV and prepares the data behind each
//! dashboard chart: conference counts, win percentage lines, regression
//! scatterplots, the seed advancement heatmap and shooting comparisons.

pub mod charts;
pub mod config;
pub mod data;
pub mod stats;

pub use charts::{Dashboard, DashboardError};
pub use config::{ConfigError, DashboardConfig};
pub use data::{DataLoader, FieldMapper, LoaderError, PostseasonRound, RawRow, Row};
