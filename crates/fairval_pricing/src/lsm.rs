//! Monte Carlo valuation with Longstaff-Schwartz early exercise.
//!
//! European requests take the plain estimator: the discounted mean of
//! terminal payoffs. American requests run the Longstaff-Schwartz
//! backward induction over a simulated batch: at each step the
//! continuation value is estimated by regressing the discounted
//! downstream value on the current price over in-the-money paths, and a
//! path exercises when its intrinsic payoff beats that estimate.
//!
//! ## Estimator properties
//!
//! The regression-based exercise boundary is an approximation, so the
//! American estimate is biased low in finite samples. The standard error
//! shrinks as O(1/√M); `num_simulations` and `num_steps` are the
//! precision/cost knobs. A degenerate regression (fewer than two
//! in-the-money paths, or a singular design) never fails the run: that
//! step simply keeps the unadjusted discounted continuation values.

use fairval_core::math::LinearFit;
use fairval_core::types::{CancelToken, OptionStyle, PricingError, ValidatedRequest};

use crate::paths::{GbmParams, SimulationBatch};
use crate::summary::PathSummary;

/// Default number of simulated paths.
pub const DEFAULT_SIMULATIONS: usize = 50_000;

/// Default number of time steps per path.
pub const DEFAULT_STEPS: usize = 100;

/// Maximum number of simulated paths allowed.
pub const MAX_SIMULATIONS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Monte Carlo simulation configuration.
///
/// Immutable once built; use [`MonteCarloConfig::builder`].
///
/// # Examples
/// ```
/// use fairval_pricing::lsm::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .num_simulations(10_000)
///     .num_steps(50)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.num_simulations(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloConfig {
    num_simulations: usize,
    num_steps: usize,
    seed: Option<u64>,
}

impl MonteCarloConfig {
    /// Creates a builder initialised with the defaults.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulated paths M.
    #[inline]
    pub fn num_simulations(&self) -> usize {
        self.num_simulations
    }

    /// Returns the number of time steps N.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns the seed, if one was set.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` naming the offending knob when a
    /// count is zero or above its cap.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.num_simulations == 0 || self.num_simulations > MAX_SIMULATIONS {
            return Err(PricingError::InvalidInput {
                field: "num_simulations",
                value: self.num_simulations as f64,
            });
        }
        if self.num_steps == 0 || self.num_steps > MAX_STEPS {
            return Err(PricingError::InvalidInput {
                field: "num_steps",
                value: self.num_steps as f64,
            });
        }
        Ok(())
    }
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            num_simulations: DEFAULT_SIMULATIONS,
            num_steps: DEFAULT_STEPS,
            seed: None,
        }
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// Starts from the defaults; `build` validates.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    config: MonteCarloConfig,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulated paths.
    #[inline]
    pub fn num_simulations(mut self, num_simulations: usize) -> Self {
        self.config.num_simulations = num_simulations;
        self
    }

    /// Sets the number of time steps per path.
    #[inline]
    pub fn num_steps(mut self, num_steps: usize) -> Self {
        self.config.num_steps = num_steps;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// See [`MonteCarloConfig::validate`].
    pub fn build(self) -> Result<MonteCarloConfig, PricingError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Fair value plus simulation diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloValuation {
    /// Estimated fair value.
    pub value: f64,
    /// Summary of the simulated batch for external charting.
    pub summary: PathSummary,
}

/// Monte Carlo pricer.
///
/// Pure and stateless between calls: each invocation simulates its own
/// batch from the configured seed and discards it on return, so a single
/// pricer may serve concurrent callers.
///
/// # Examples
/// ```
/// use fairval_core::types::{
///     CancelToken, OptionStyle, OptionType, PricingMethod, ValidatedRequest,
/// };
/// use fairval_pricing::lsm::{MonteCarloConfig, MonteCarloPricer};
///
/// let request = ValidatedRequest::new(
///     100.0, 100.0, 1.0, 0.01, 0.2,
///     OptionType::Put,
///     OptionStyle::American,
///     PricingMethod::MonteCarlo,
/// ).unwrap();
///
/// let config = MonteCarloConfig::builder()
///     .num_simulations(5_000)
///     .num_steps(50)
///     .seed(42)
///     .build()
///     .unwrap();
/// let pricer = MonteCarloPricer::new(config).unwrap();
///
/// let valuation = pricer.price(&request, &CancelToken::new()).unwrap();
/// assert!(valuation.value > 0.0);
/// ```
pub struct MonteCarloPricer {
    config: MonteCarloConfig,
}

impl MonteCarloPricer {
    /// Creates a pricer, validating the configuration.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` for an out-of-range knob.
    pub fn new(config: MonteCarloConfig) -> Result<Self, PricingError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Values the request by simulation.
    ///
    /// A missing seed defaults to 0, so repeated runs are reproducible
    /// unless the caller opts into varying seeds. The token is polled
    /// between backward-induction steps.
    ///
    /// # Errors
    /// `PricingError::Cancelled` if the token fires mid-computation.
    pub fn price(
        &self,
        request: &ValidatedRequest,
        token: &CancelToken,
    ) -> Result<MonteCarloValuation, PricingError> {
        token.checkpoint()?;

        let params = GbmParams::from(request);
        let seed = self.config.seed.unwrap_or(0);
        let batch = SimulationBatch::generate(
            &params,
            self.config.num_simulations,
            self.config.num_steps,
            seed,
        );
        token.checkpoint()?;

        let summary = PathSummary::from_batch(&batch, params.maturity);

        let value = match request.style() {
            OptionStyle::European => european_value(request, &batch),
            OptionStyle::American => longstaff_schwartz(request, &batch, token)?,
        };

        Ok(MonteCarloValuation { value, summary })
    }
}

/// Discounted mean of terminal payoffs.
fn european_value(request: &ValidatedRequest, batch: &SimulationBatch) -> f64 {
    let terminal_step = batch.num_steps();
    let sum: f64 = (0..batch.num_paths())
        .map(|path_idx| request.intrinsic(batch.price(path_idx, terminal_step)))
        .sum();
    let mean = sum / batch.num_paths() as f64;
    mean * (-request.rate() * request.expiry()).exp()
}

/// Longstaff-Schwartz backward induction over the batch.
///
/// Induction runs from step N−1 down to 1. At each step every held value
/// is discounted once; in-the-money paths compare intrinsic payoff with
/// the regression estimate of continuation and exercise when it wins;
/// out-of-the-money paths keep the discounted value. The result is the
/// mean over paths, discounted once more to time 0.
fn longstaff_schwartz(
    request: &ValidatedRequest,
    batch: &SimulationBatch,
    token: &CancelToken,
) -> Result<f64, PricingError> {
    let num_steps = batch.num_steps();
    let num_paths = batch.num_paths();
    let dt = request.expiry() / num_steps as f64;
    let step_discount = (-request.rate() * dt).exp();

    // Held value per path, seeded with the terminal payoff.
    let mut held: Vec<f64> = (0..num_paths)
        .map(|path_idx| request.intrinsic(batch.price(path_idx, num_steps)))
        .collect();

    // Scratch for the in-the-money subset, reused across steps.
    let mut itm: Vec<(usize, f64)> = Vec::new();
    let mut prices: Vec<f64> = Vec::new();
    let mut continuations: Vec<f64> = Vec::new();

    for step in (1..num_steps).rev() {
        token.checkpoint()?;

        for value in held.iter_mut() {
            *value *= step_discount;
        }

        itm.clear();
        prices.clear();
        continuations.clear();
        for path_idx in 0..num_paths {
            let price = batch.price(path_idx, step);
            let intrinsic = request.intrinsic(price);
            if intrinsic > 0.0 {
                itm.push((path_idx, intrinsic));
                prices.push(price);
                continuations.push(held[path_idx]);
            }
        }

        // Degenerate fit: leave the discounted continuation values as
        // they are, making no exercise-boundary adjustment this step.
        if let Some(fit) = LinearFit::fit(&prices, &continuations) {
            for (&(path_idx, intrinsic), &price) in itm.iter().zip(prices.iter()) {
                if intrinsic > fit.predict(price) {
                    held[path_idx] = intrinsic;
                }
            }
        }
    }

    let mean = held.iter().sum::<f64>() / num_paths as f64;
    Ok(mean * step_discount)
}
