//! Statistics module - aggregation, regression and summary statistics

mod aggregate;
mod regression;
mod summary;

pub use aggregate::{AdvancementMatrix, Aggregator, GroupCount, GroupEntry, ROUND_COUNT, SEED_COUNT};
pub use regression::{RegressionEstimator, RegressionResult, StatsError};
pub use summary::SummaryStatistics;
