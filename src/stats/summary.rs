//! Summary Statistics Module

use crate::data::Row;
use statrs::statistics::Statistics;
use std::collections::BTreeSet;

/// Means and simple descriptors over row subsets.
pub struct SummaryStatistics;

impl SummaryStatistics {
    /// Arithmetic mean. An empty input yields NaN, never zero.
    pub fn mean(values: &[f64]) -> f64 {
        values.iter().mean()
    }

    /// Mean of `projection` over rows matching `predicate`.
    /// Non-finite projected values are skipped.
    pub fn mean_where<P, F>(rows: &[Row], predicate: P, projection: F) -> f64
    where
        P: Fn(&Row) -> bool,
        F: Fn(&Row) -> f64,
    {
        let values: Vec<f64> = rows
            .iter()
            .filter(|&row| predicate(row))
            .map(projection)
            .filter(|value| value.is_finite())
            .collect();
        Self::mean(&values)
    }

    /// Earliest and latest season present.
    pub fn season_range(rows: &[Row]) -> Option<(i32, i32)> {
        rows.iter()
            .filter_map(|row| row.season)
            .fold(None, |range, season| match range {
                None => Some((season, season)),
                Some((lo, hi)) => Some((lo.min(season), hi.max(season))),
            })
    }

    /// Distinct seasons, ascending.
    pub fn seasons(rows: &[Row]) -> Vec<i32> {
        rows.iter()
            .filter_map(|row| row.season)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct non-empty team names, sorted.
    pub fn teams(rows: &[Row]) -> Vec<String> {
        rows.iter()
            .filter(|row| !row.team.is_empty())
            .map(|row| row.team.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
