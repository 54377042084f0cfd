//! Geometric Brownian motion path simulation.
//!
//! Paths follow the risk-neutral log-space exact solution
//!
//! ```text
//! S(t+Δt) = S(t) · exp((r − σ²/2)Δt + σ√Δt · Z)
//! ```
//!
//! so every price stays strictly positive regardless of step size.
//!
//! # Memory layout
//!
//! A [`SimulationBatch`] stores all M paths row-major in one contiguous
//! allocation, M × (N+1) with step 0 holding the spot. For workloads
//! that never need the full matrix, [`for_each_path`] streams one path
//! buffer at a time with bit-identical values, bounding peak memory to
//! O(N).

use rayon::prelude::*;

use fairval_core::types::ValidatedRequest;

use crate::rng::{path_seed, SimRng};

/// Parameters of the simulated geometric Brownian motion.
///
/// The drift is the risk-free rate: simulation happens under the
/// risk-neutral measure, which is what discounted-payoff pricing needs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GbmParams {
    /// Initial spot price S₀.
    pub spot: f64,
    /// Risk-free rate r, annualised.
    pub rate: f64,
    /// Volatility σ, annualised.
    pub volatility: f64,
    /// Time horizon T in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Per-step drift and diffusion constants for an N-step grid.
    #[inline]
    fn step_terms(&self, num_steps: usize) -> (f64, f64) {
        let dt = self.maturity / num_steps as f64;
        let drift_dt = (self.rate - 0.5 * self.volatility * self.volatility) * dt;
        let vol_sqrt_dt = self.volatility * dt.sqrt();
        (drift_dt, vol_sqrt_dt)
    }
}

impl From<&ValidatedRequest> for GbmParams {
    fn from(request: &ValidatedRequest) -> Self {
        Self {
            spot: request.spot(),
            rate: request.rate(),
            volatility: request.volatility(),
            maturity: request.expiry(),
        }
    }
}

/// A batch of independent simulated price paths.
///
/// Owned exclusively by one pricing invocation and dropped with it;
/// nothing is shared across calls.
///
/// # Examples
/// ```
/// use fairval_pricing::paths::{GbmParams, SimulationBatch};
///
/// let params = GbmParams {
///     spot: 100.0,
///     rate: 0.01,
///     volatility: 0.2,
///     maturity: 1.0,
/// };
/// let batch = SimulationBatch::generate(&params, 100, 50, 42);
///
/// assert_eq!(batch.num_paths(), 100);
/// assert_eq!(batch.path(0).len(), 51);
/// assert_eq!(batch.price(0, 0), 100.0);
/// ```
pub struct SimulationBatch {
    prices: Vec<f64>,
    num_paths: usize,
    num_steps: usize,
}

impl SimulationBatch {
    /// Simulates `num_paths` paths of `num_steps` steps.
    ///
    /// Generation is parallelised over paths; each path owns an RNG
    /// seeded by [`path_seed`], so the output is a pure function of
    /// `(params, num_paths, num_steps, seed)` whatever the thread count.
    ///
    /// # Panics
    /// Debug-asserts non-zero dimensions; config validation upstream
    /// rejects them before this point.
    pub fn generate(params: &GbmParams, num_paths: usize, num_steps: usize, seed: u64) -> Self {
        debug_assert!(num_paths > 0 && num_steps > 0);

        let width = num_steps + 1;
        let (drift_dt, vol_sqrt_dt) = params.step_terms(num_steps);

        let mut prices = vec![0.0; num_paths * width];
        prices
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(path_idx, row)| {
                fill_path(row, params.spot, drift_dt, vol_sqrt_dt, path_seed(seed, path_idx));
            });

        Self {
            prices,
            num_paths,
            num_steps,
        }
    }

    /// Returns the number of paths M.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Returns the number of time steps N (each path holds N+1 prices).
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns one full path as a slice of N+1 prices.
    #[inline]
    pub fn path(&self, path_idx: usize) -> &[f64] {
        let width = self.num_steps + 1;
        &self.prices[path_idx * width..(path_idx + 1) * width]
    }

    /// Returns the price of path `path_idx` at step `step`.
    #[inline]
    pub fn price(&self, path_idx: usize, step: usize) -> f64 {
        self.prices[path_idx * (self.num_steps + 1) + step]
    }

    /// Iterates over all paths in index order.
    #[inline]
    pub fn paths(&self) -> impl Iterator<Item = &[f64]> {
        self.prices.chunks(self.num_steps + 1)
    }
}

/// Streams paths one at a time without materialising the batch.
///
/// Yields `(path_idx, path)` for each of the `num_paths` paths, reusing
/// a single O(N) buffer. The values are bit-identical to what
/// [`SimulationBatch::generate`] produces for the same inputs, so a
/// caller can switch between the two freely as memory dictates.
///
/// # Examples
/// ```
/// use fairval_pricing::paths::{for_each_path, GbmParams};
///
/// let params = GbmParams {
///     spot: 100.0,
///     rate: 0.01,
///     volatility: 0.2,
///     maturity: 1.0,
/// };
///
/// let mut terminal_sum = 0.0;
/// for_each_path(&params, 1000, 50, 42, |_, path| {
///     terminal_sum += path[path.len() - 1];
/// });
/// assert!(terminal_sum > 0.0);
/// ```
pub fn for_each_path(
    params: &GbmParams,
    num_paths: usize,
    num_steps: usize,
    seed: u64,
    mut visit: impl FnMut(usize, &[f64]),
) {
    debug_assert!(num_steps > 0);

    let (drift_dt, vol_sqrt_dt) = params.step_terms(num_steps);
    let mut row = vec![0.0; num_steps + 1];

    for path_idx in 0..num_paths {
        fill_path(
            &mut row,
            params.spot,
            drift_dt,
            vol_sqrt_dt,
            path_seed(seed, path_idx),
        );
        visit(path_idx, &row);
    }
}

/// Evolves one path into `row` (`row[0]` gets the spot).
fn fill_path(row: &mut [f64], spot: f64, drift_dt: f64, vol_sqrt_dt: f64, seed: u64) {
    let mut rng = SimRng::from_seed(seed);
    row[0] = spot;
    for step in 1..row.len() {
        let z = rng.gen_normal();
        row[step] = row[step - 1] * (drift_dt + vol_sqrt_dt * z).exp();
    }
}
