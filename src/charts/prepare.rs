//! Chart Data Preparation Module
//! Turns typed rows into the plain data each dashboard widget renders.

use crate::data::Row;
use crate::stats::{
    AdvancementMatrix, Aggregator, GroupEntry, RegressionEstimator, RegressionResult,
    SummaryStatistics,
};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Bar chart of teams per conference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConferenceChart {
    pub tournament_only: bool,
    /// Rows that were counted; equals the sum of the bar heights.
    pub rows_counted: usize,
    /// Bars by descending count.
    pub bars: Vec<GroupEntry>,
}

/// A value for one season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonPoint {
    pub season: i32,
    pub value: f64,
}

/// Win percentage by season for the selected team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinsLineChart {
    pub team: Option<String>,
    /// Teams available for selection, sorted.
    pub teams: Vec<String>,
    pub points: Vec<SeasonPoint>,
    /// NaN when the team has no usable seasons.
    pub mean_win_pct: f64,
    pub mean_power_rating: f64,
}

/// One scatterplot dot, with what the tooltip shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub team: String,
    pub season: Option<i32>,
    pub x: f64,
    pub y: f64,
}

/// Scatterplot with its least-squares line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ScatterPoint>,
    /// `None` when the line is undefined (no points, or constant x).
    pub regression: Option<RegressionResult>,
    /// Endpoints of the fitted line across the observed x range.
    pub trend_line: Option<[(f64, f64); 2]>,
    pub correlation: f64,
}

/// Advancement heatmap for the season picked on the slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    /// Slider bounds.
    pub season_range: Option<(i32, i32)>,
    pub season: Option<i32>,
    pub matrix: Option<AdvancementMatrix>,
}

/// Shooting averages of one season's top seeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShootingGroup {
    pub season: i32,
    pub teams: usize,
    pub mean_two_pt_pct: f64,
    pub mean_three_pt_pct: f64,
}

/// Grouped bars: two-point vs three-point percentage per season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShootingChart {
    pub max_seed: u8,
    pub groups: Vec<ShootingGroup>,
}

/// Builds widget data. Every function is pure over the input rows.
pub struct ChartPreparer;

impl ChartPreparer {
    /// Teams per conference, optionally restricted to tournament teams.
    pub fn conference_counts(rows: &[Row], tournament_only: bool) -> ConferenceChart {
        let selected: Vec<&Row> = rows
            .iter()
            .filter(|row| !tournament_only || row.made_tournament())
            .collect();
        let counts = Aggregator::group_count(&selected, |row| row.conference.as_str());

        log::debug!(
            "Conference chart: {} rows in {} conferences",
            selected.len(),
            counts.len()
        );

        ConferenceChart {
            tournament_only,
            rows_counted: counts.total(),
            bars: counts.sorted_by_count(),
        }
    }

    /// Season-by-season win percentage for one team.
    ///
    /// Without a team the first one alphabetically is used. An unknown team
    /// gives an empty line and NaN means.
    pub fn wins_line(rows: &[Row], team: Option<&str>) -> WinsLineChart {
        let teams = SummaryStatistics::teams(rows);
        let team = team.map(str::to_string).or_else(|| teams.first().cloned());

        let Some(selected) = team.as_deref() else {
            return WinsLineChart {
                team: None,
                teams,
                points: Vec::new(),
                mean_win_pct: f64::NAN,
                mean_power_rating: f64::NAN,
            };
        };

        if teams.binary_search_by(|t| t.as_str().cmp(selected)).is_err() {
            log::warn!("Team '{}' not found in dataset", selected);
        }

        let mut points: Vec<SeasonPoint> = rows
            .iter()
            .filter(|row| row.team == selected)
            .filter_map(|row| {
                let value = row.win_pct();
                match row.season {
                    Some(season) if value.is_finite() => Some(SeasonPoint { season, value }),
                    _ => None,
                }
            })
            .collect();
        points.sort_by_key(|point| point.season);

        let mean_win_pct =
            SummaryStatistics::mean_where(rows, |row| row.team == selected, Row::win_pct);
        let mean_power_rating = SummaryStatistics::mean_where(
            rows,
            |row| row.team == selected,
            |row| row.power_rating,
        );

        WinsLineChart {
            team,
            teams,
            points,
            mean_win_pct,
            mean_power_rating,
        }
    }

    /// Turnover rate against win percentage.
    pub fn turnover_scatter(rows: &[Row]) -> ScatterChart {
        Self::scatter(rows, "Turnover Rate", "Win Percentage", |row| {
            Some((row.turnover_rate, row.win_pct()))
        })
    }

    /// Tournament seed against wins above bubble.
    pub fn seed_scatter(rows: &[Row]) -> ScatterChart {
        Self::scatter(rows, "Seed", "Wins Above Bubble", |row| {
            row.seed.map(|seed| (f64::from(seed), row.wins_above_bubble))
        })
    }

    fn scatter<F>(
        rows: &[Row],
        x_label: &'static str,
        y_label: &'static str,
        extract: F,
    ) -> ScatterChart
    where
        F: Fn(&Row) -> Option<(f64, f64)>,
    {
        let points: Vec<ScatterPoint> = rows
            .iter()
            .filter_map(|row| {
                let (x, y) = extract(row)?;
                (x.is_finite() && y.is_finite()).then(|| ScatterPoint {
                    team: row.team.clone(),
                    season: row.season,
                    x,
                    y,
                })
            })
            .collect();

        let pairs: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
        let regression = match RegressionEstimator::fit(&pairs) {
            Ok(fit) => Some(fit),
            Err(e) => {
                log::warn!("{} vs {}: no regression line ({})", y_label, x_label, e);
                None
            }
        };

        let trend_line = regression.map(|fit| {
            let (lo, hi) = pairs
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| {
                    (lo.min(x), hi.max(x))
                });
            [(lo, fit.predict(lo)), (hi, fit.predict(hi))]
        });

        ScatterChart {
            x_label,
            y_label,
            correlation: RegressionEstimator::correlation(&pairs),
            points,
            regression,
            trend_line,
        }
    }

    /// Heatmap for `year`, or the latest season when no year is given.
    pub fn postseason_heatmap(rows: &[Row], year: Option<i32>) -> HeatmapChart {
        let season_range = SummaryStatistics::season_range(rows);
        let season = year.or(season_range.map(|(_, latest)| latest));

        if let (Some(season), Some((first, last))) = (season, season_range) {
            if season < first || season > last {
                log::warn!("Season {} outside dataset range {}-{}", season, first, last);
            }
        }

        HeatmapChart {
            season_range,
            season,
            matrix: season.map(|season| Aggregator::advancement_matrix(rows, season)),
        }
    }

    /// Advancement matrices for every season in the dataset, ascending.
    pub fn all_season_heatmaps(rows: &[Row]) -> Vec<AdvancementMatrix> {
        SummaryStatistics::seasons(rows)
            .par_iter()
            .map(|&season| Aggregator::advancement_matrix(rows, season))
            .collect()
    }

    /// Mean shooting percentages per season for teams seeded `max_seed` or better.
    pub fn shooting_comparison(rows: &[Row], max_seed: u8) -> ShootingChart {
        let mut by_season: BTreeMap<i32, Vec<&Row>> = BTreeMap::new();
        for row in rows {
            if let (Some(seed), Some(season)) = (row.seed, row.season) {
                if seed <= max_seed {
                    by_season.entry(season).or_default().push(row);
                }
            }
        }

        let groups = by_season
            .into_iter()
            .map(|(season, members)| ShootingGroup {
                season,
                teams: members.len(),
                mean_two_pt_pct: Self::finite_mean(&members, |row: &Row| row.two_pt_pct),
                mean_three_pt_pct: Self::finite_mean(&members, |row: &Row| row.three_pt_pct),
            })
            .collect();

        ShootingChart { max_seed, groups }
    }

    fn finite_mean(rows: &[&Row], field: fn(&Row) -> f64) -> f64 {
        let values: Vec<f64> = rows
            .iter()
            .map(|&row| field(row))
            .filter(|v| v.is_finite())
            .collect();
        SummaryStatistics::mean(&values)
    }
}
