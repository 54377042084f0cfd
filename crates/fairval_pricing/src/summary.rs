//! Inspectable simulation diagnostics.
//!
//! The Monte Carlo pricer returns a [`PathSummary`] alongside the fair
//! value so a presentation layer can chart the simulation without the
//! engine ever touching a rendering library: per-step mean, 5th/95th
//! percentile bands, and a capped handful of raw sample paths.

use crate::paths::SimulationBatch;

/// Number of raw paths retained in a summary.
pub const SAMPLE_PATH_CAP: usize = 32;

/// Lower percentile of the band, in (0, 1).
const LOWER_PERCENTILE: f64 = 0.05;

/// Upper percentile of the band, in (0, 1).
const UPPER_PERCENTILE: f64 = 0.95;

/// Per-step summary of a simulation batch.
///
/// All vectors have length N+1, aligned with the simulation time grid.
///
/// # Examples
/// ```
/// use fairval_pricing::paths::{GbmParams, SimulationBatch};
/// use fairval_pricing::summary::PathSummary;
///
/// let params = GbmParams {
///     spot: 100.0,
///     rate: 0.01,
///     volatility: 0.2,
///     maturity: 1.0,
/// };
/// let batch = SimulationBatch::generate(&params, 500, 20, 42);
/// let summary = PathSummary::from_batch(&batch, params.maturity);
///
/// assert_eq!(summary.times.len(), 21);
/// assert_eq!(summary.mean[0], 100.0);
/// assert!(summary.lower[20] <= summary.upper[20]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathSummary {
    /// Time grid in years, 0 to T inclusive.
    pub times: Vec<f64>,
    /// Mean simulated price per step.
    pub mean: Vec<f64>,
    /// 5th percentile per step.
    pub lower: Vec<f64>,
    /// 95th percentile per step.
    pub upper: Vec<f64>,
    /// Up to [`SAMPLE_PATH_CAP`] raw paths for spaghetti plots.
    pub sample_paths: Vec<Vec<f64>>,
}

impl PathSummary {
    /// Summarises a batch over the horizon `maturity`.
    pub fn from_batch(batch: &SimulationBatch, maturity: f64) -> Self {
        let num_steps = batch.num_steps();
        let num_paths = batch.num_paths();
        let dt = maturity / num_steps as f64;

        let times: Vec<f64> = (0..=num_steps).map(|step| step as f64 * dt).collect();

        let mut mean = vec![0.0; num_steps + 1];
        for path in batch.paths() {
            for (acc, &price) in mean.iter_mut().zip(path.iter()) {
                *acc += price;
            }
        }
        for acc in mean.iter_mut() {
            *acc /= num_paths as f64;
        }

        let mut lower = vec![0.0; num_steps + 1];
        let mut upper = vec![0.0; num_steps + 1];
        let mut column = vec![0.0; num_paths];
        for step in 0..=num_steps {
            for (slot, path_idx) in column.iter_mut().zip(0..num_paths) {
                *slot = batch.price(path_idx, step);
            }
            lower[step] = percentile(&mut column, LOWER_PERCENTILE);
            upper[step] = percentile(&mut column, UPPER_PERCENTILE);
        }

        let sample_paths: Vec<Vec<f64>> = batch
            .paths()
            .take(SAMPLE_PATH_CAP)
            .map(|path| path.to_vec())
            .collect();

        Self {
            times,
            mean,
            lower,
            upper,
            sample_paths,
        }
    }
}

/// Percentile by partial selection; reorders `values`.
fn percentile(values: &mut [f64], q: f64) -> f64 {
    let last = values.len() - 1;
    let rank = ((last as f64) * q).round() as usize;
    let (_, selected, _) = values.select_nth_unstable_by(rank, |a, b| a.total_cmp(b));
    *selected
}
