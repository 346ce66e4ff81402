use std::fmt;

use ndarray::Array1;

use crate::OptimizationReport;
use crate::bounds::Bounds;
use crate::error::Result;
use crate::presets::Variant;

/// Spread of final best values over independent runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Number of runs.
    pub runs: usize,
    /// Smallest final value.
    pub best: f64,
    /// Largest final value.
    pub worst: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median; mean of the two middle values for an even count.
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator), 0 for a single run.
    pub std: f64,
}

impl RunSummary {
    /// Summarizes `values`, or `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let runs = values.len();
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / runs as f64;
        let median = if runs % 2 == 1 {
            sorted[runs / 2]
        } else {
            0.5 * (sorted[runs / 2 - 1] + sorted[runs / 2])
        };
        let std = if runs > 1 {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (runs - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            runs,
            best: sorted[0],
            worst: sorted[runs - 1],
            mean,
            median,
            std,
        })
    }

    /// Summarizes the final values of `reports`.
    pub fn from_reports(reports: &[OptimizationReport]) -> Option<Self> {
        let values: Vec<f64> = reports.iter().map(|r| r.fun).collect();
        Self::from_values(&values)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "runs={} best={:.6e} worst={:.6e} mean={:.6e} median={:.6e} std={:.6e}",
            self.runs, self.best, self.worst, self.mean, self.median, self.std
        )
    }
}

/// Runs `variant` once per seed and returns the reports in seed order.
///
/// # Errors
///
/// Returns the configuration error of the first failing run.
pub fn run_repeated<F>(
    variant: Variant,
    func: &F,
    bounds: &Bounds,
    max_evaluations: usize,
    seeds: &[u64],
) -> Result<Vec<OptimizationReport>>
where
    F: Fn(&Array1<f64>) -> f64,
{
    seeds
        .iter()
        .map(|&seed| variant.run(func, bounds, max_evaluations, Some(seed)))
        .collect()
}

/// `runs` consecutive seeds starting at `first`, wrapping past `u64::MAX`.
pub fn consecutive_seeds(first: u64, runs: usize) -> Vec<u64> {
    (0..runs as u64).map(|k| first.wrapping_add(k)).collect()
}
