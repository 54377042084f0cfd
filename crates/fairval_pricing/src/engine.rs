//! Method dispatch: one validated request in, one pricing result out.
//!
//! A [`ValidatedRequest`] is routed to exactly one pricer according to
//! its method: the closed form, the binomial lattice, or the Monte Carlo
//! simulation. The result carries the fair value plus method-specific
//! diagnostics a presentation layer can inspect or chart.

use fairval_core::types::{CancelToken, PricingError, PricingMethod, ValidatedRequest};
use fairval_models::{black_scholes, BinomialTree, LatticeParams};

use crate::lsm::{MonteCarloConfig, MonteCarloPricer};
use crate::summary::PathSummary;

/// Per-call configuration knobs.
///
/// `num_steps` applies to both the lattice and the Monte Carlo time
/// grid; `num_simulations` and `seed` apply to Monte Carlo only.
///
/// # Examples
/// ```
/// use fairval_pricing::engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_num_steps(200)
///     .with_num_simulations(10_000)
///     .with_seed(42);
///
/// assert_eq!(config.num_steps(), 200);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    num_steps: usize,
    num_simulations: usize,
    seed: Option<u64>,
}

impl EngineConfig {
    /// Sets the time discretisation for lattice and Monte Carlo.
    #[inline]
    pub fn with_num_steps(mut self, num_steps: usize) -> Self {
        self.num_steps = num_steps;
        self
    }

    /// Sets the Monte Carlo path count.
    #[inline]
    pub fn with_num_simulations(mut self, num_simulations: usize) -> Self {
        self.num_simulations = num_simulations;
        self
    }

    /// Sets the Monte Carlo seed.
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the time discretisation.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns the Monte Carlo path count.
    #[inline]
    pub fn num_simulations(&self) -> usize {
        self.num_simulations
    }

    /// Returns the Monte Carlo seed, if set.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_steps: crate::lsm::DEFAULT_STEPS,
            num_simulations: crate::lsm::DEFAULT_SIMULATIONS,
            seed: None,
        }
    }
}

/// Method-specific diagnostics attached to a result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Diagnostics {
    /// Lattice step constants.
    Lattice(LatticeParams),
    /// Simulation summary for external charting.
    Simulation(PathSummary),
}

/// Outcome of a pricing call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricingResult {
    /// Estimated fair value of the contract.
    pub fair_value: f64,
    /// Diagnostics for the lattice and Monte Carlo methods; `None` for
    /// the closed form.
    pub diagnostics: Option<Diagnostics>,
}

/// Prices a request with a fresh, never-cancelled token.
///
/// # Errors
/// Propagates the routed pricer's errors; see [`price_cancellable`].
///
/// # Examples
/// ```
/// use fairval_core::types::{
///     OptionStyle, OptionType, PricingMethod, ValidatedRequest,
/// };
/// use fairval_pricing::engine::{self, EngineConfig};
///
/// let request = ValidatedRequest::new(
///     100.0, 100.0, 1.0, 0.01, 0.2,
///     OptionType::Call,
///     OptionStyle::European,
///     PricingMethod::Analytic,
/// ).unwrap();
///
/// let result = engine::price(&request, &EngineConfig::default()).unwrap();
/// assert!((result.fair_value - 8.433).abs() < 0.01);
/// ```
pub fn price(
    request: &ValidatedRequest,
    config: &EngineConfig,
) -> Result<PricingResult, PricingError> {
    price_cancellable(request, config, &CancelToken::new())
}

/// Prices a request, polling `token` between induction steps.
///
/// Routing:
/// - `Analytic` → closed-form Black-Scholes, no diagnostics
/// - `Lattice` → binomial tree, diagnostics carry the step constants
/// - `MonteCarlo` → simulation pricer, diagnostics carry the path summary
///
/// # Errors
/// - `PricingError::InvalidInput` for an out-of-range knob
/// - `PricingError::UnsupportedCombination` for analytic × American
/// - `PricingError::NumericalInstability` from the lattice guard
/// - `PricingError::Cancelled` if the token fires mid-computation
pub fn price_cancellable(
    request: &ValidatedRequest,
    config: &EngineConfig,
    token: &CancelToken,
) -> Result<PricingResult, PricingError> {
    match request.method() {
        PricingMethod::Analytic => {
            let fair_value = black_scholes::price(request)?;
            Ok(PricingResult {
                fair_value,
                diagnostics: None,
            })
        }
        PricingMethod::Lattice => {
            let tree = BinomialTree::new(config.num_steps)?;
            let params = tree.step_params(request)?;
            let fair_value = tree.price(request, token)?;
            Ok(PricingResult {
                fair_value,
                diagnostics: Some(Diagnostics::Lattice(params)),
            })
        }
        PricingMethod::MonteCarlo => {
            let mut builder = MonteCarloConfig::builder()
                .num_simulations(config.num_simulations)
                .num_steps(config.num_steps);
            if let Some(seed) = config.seed {
                builder = builder.seed(seed);
            }
            let pricer = MonteCarloPricer::new(builder.build()?)?;
            let valuation = pricer.price(request, token)?;
            Ok(PricingResult {
                fair_value: valuation.value,
                diagnostics: Some(Diagnostics::Simulation(valuation.summary)),
            })
        }
    }
}
