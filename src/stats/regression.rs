//! Regression Module
//! Closed-form ordinary least squares and Pearson correlation.

use serde::Serialize;
use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    #[error("Sample is empty")]
    EmptySample,
    #[error("Independent variable has zero variance")]
    ZeroVariance,
}

/// Fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    /// Number of points the line was fitted on.
    pub n: usize,
}

impl RegressionResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least-squares estimation over (x, y) pairs. Callers filter out NaNs.
pub struct RegressionEstimator;

impl RegressionEstimator {
    /// Fit a line by least squares:
    /// slope = Σ(x − x̄)(y − ȳ) / Σ(x − x̄)², intercept = ȳ − slope·x̄.
    ///
    /// Algebraically the same as (nΣxy − ΣxΣy) / (nΣx² − (Σx)²), but sums
    /// deviations from the means so a large common offset in x keeps its
    /// precision.
    pub fn fit(points: &[(f64, f64)]) -> Result<RegressionResult, StatsError> {
        let Some(&(first_x, _)) = points.first() else {
            return Err(StatsError::EmptySample);
        };
        if points.iter().all(|&(x, _)| x == first_x) {
            return Err(StatsError::ZeroVariance);
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|&(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|&(_, y)| y).sum::<f64>() / n;

        let mut sum_dxy = 0.0;
        let mut sum_dxx = 0.0;
        for &(x, y) in points {
            let dx = x - mean_x;
            sum_dxy += dx * (y - mean_y);
            sum_dxx += dx * dx;
        }
        if sum_dxx == 0.0 {
            return Err(StatsError::ZeroVariance);
        }

        let slope = sum_dxy / sum_dxx;
        if !slope.is_finite() {
            return Err(StatsError::ZeroVariance);
        }
        let intercept = mean_y - slope * mean_x;

        Ok(RegressionResult {
            slope,
            intercept,
            n: points.len(),
        })
    }

    /// Pearson correlation coefficient, NaN when undefined
    /// (fewer than two points or a constant series).
    pub fn correlation(points: &[(f64, f64)]) -> f64 {
        if points.len() < 2 {
            return f64::NAN;
        }

        let xs: Vec<f64> = points.iter().map(|&(x, _)| x).collect();
        let ys: Vec<f64> = points.iter().map(|&(_, y)| y).collect();

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 || sx.is_nan() || sy.is_nan() {
            return f64::NAN;
        }

        let r = xs.iter().covariance(ys.iter()) / (sx * sy);
        // Rounding can push |r| a hair past 1
        r.clamp(-1.0, 1.0)
    }
}
