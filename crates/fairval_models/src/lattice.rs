//! Recombining binomial lattice valuation (Cox-Ross-Rubinstein).
//!
//! ## Tree construction
//!
//! With N steps over expiry T: Δt = T/N, u = e^(σ√Δt), d = 1/u, and the
//! risk-neutral up-probability p = (e^(rΔt) − d)/(u − d). The asset price
//! at node (i, j) is S·u^(i−j)·d^j; j counts down-moves, so the tree
//! recombines and step i holds i+1 nodes.
//!
//! ## Valuation
//!
//! Terminal payoffs at step N, then backward induction: each node takes
//! the discounted expectation of its two successors; American valuation
//! additionally floors the node at its intrinsic value. The root V(0,0)
//! is the price. O(N²) time and space; the grid is dropped as soon as
//! the root value has been read.
//!
//! ## No-arbitrage guard
//!
//! The construction is only meaningful while d < e^(rΔt) < u. Outside
//! that range p leaves [0, 1] and the recursion would silently produce a
//! wrong value, so the violation is reported as
//! [`PricingError::NumericalInstability`] before induction begins.

use fairval_core::types::{CancelToken, PricingError, ValidatedRequest};

/// Default number of lattice steps.
pub const DEFAULT_STEPS: usize = 100;

/// Derived per-step constants of a lattice valuation.
///
/// Cheap to compute and returned as diagnostics so a caller can inspect
/// the discretisation that produced a price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LatticeParams {
    /// Number of time steps N.
    pub num_steps: usize,
    /// Step length Δt = T/N in years.
    pub dt: f64,
    /// Up factor u = e^(σ√Δt).
    pub up: f64,
    /// Down factor d = 1/u.
    pub down: f64,
    /// Risk-neutral probability of an up move.
    pub prob_up: f64,
    /// Per-step discount factor e^(−rΔt).
    pub step_discount: f64,
}

/// Binomial-lattice pricer.
///
/// Stateless apart from its step count; every call owns its grid
/// exclusively, so concurrent use from multiple threads needs no
/// locking.
///
/// # Examples
/// ```
/// use fairval_core::types::{
///     CancelToken, OptionStyle, OptionType, PricingMethod, ValidatedRequest,
/// };
/// use fairval_models::BinomialTree;
///
/// let request = ValidatedRequest::new(
///     100.0, 100.0, 1.0, 0.01, 0.2,
///     OptionType::Put,
///     OptionStyle::American,
///     PricingMethod::Lattice,
/// ).unwrap();
///
/// let tree = BinomialTree::new(200).unwrap();
/// let value = tree.price(&request, &CancelToken::new()).unwrap();
/// assert!(value > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct BinomialTree {
    num_steps: usize,
}

impl BinomialTree {
    /// Creates a pricer with the given number of steps.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` if `num_steps` is zero.
    pub fn new(num_steps: usize) -> Result<Self, PricingError> {
        if num_steps == 0 {
            return Err(PricingError::InvalidInput {
                field: "num_steps",
                value: 0.0,
            });
        }
        Ok(Self { num_steps })
    }

    /// Creates a pricer with [`DEFAULT_STEPS`].
    pub fn with_default_steps() -> Self {
        Self {
            num_steps: DEFAULT_STEPS,
        }
    }

    /// Returns the number of steps.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Computes the per-step constants for a request, enforcing the
    /// no-arbitrage condition d < e^(rΔt) < u.
    ///
    /// # Errors
    /// `PricingError::NumericalInstability` naming the violated bound.
    pub fn step_params(&self, request: &ValidatedRequest) -> Result<LatticeParams, PricingError> {
        let dt = request.expiry() / self.num_steps as f64;
        let up = (request.volatility() * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = (request.rate() * dt).exp();

        if growth <= down || growth >= up {
            return Err(PricingError::NumericalInstability {
                reason: format!(
                    "risk-neutral growth {growth:.6} outside ({down:.6}, {up:.6}); \
                     the step is too coarse for rate {} and volatility {}",
                    request.rate(),
                    request.volatility()
                ),
            });
        }

        Ok(LatticeParams {
            num_steps: self.num_steps,
            dt,
            up,
            down,
            prob_up: (growth - down) / (up - down),
            step_discount: (-request.rate() * dt).exp(),
        })
    }

    /// Values the request by backward induction.
    ///
    /// European valuation takes the discounted expectation only and so
    /// converges to the closed form as N grows; American valuation floors
    /// every node at intrinsic value. The token is polled once per
    /// backward step.
    ///
    /// # Errors
    /// - `PricingError::NumericalInstability` from the no-arbitrage guard
    /// - `PricingError::Cancelled` if the token fires mid-induction
    pub fn price(
        &self,
        request: &ValidatedRequest,
        token: &CancelToken,
    ) -> Result<f64, PricingError> {
        token.checkpoint()?;
        let params = self.step_params(request)?;
        let mut grid = LatticeGrid::build(request, &params);

        let early_exercise = request.style().allows_early_exercise();
        for step in (0..self.num_steps).rev() {
            token.checkpoint()?;
            grid.induct_step(step, &params, request, early_exercise);
        }
        Ok(grid.root_value())
    }
}

impl Default for BinomialTree {
    fn default() -> Self {
        Self::with_default_steps()
    }
}

/// Triangular grid of asset prices and option values.
///
/// Row i holds nodes 0..=i packed at offset i(i+1)/2, so the whole tree
/// lives in two contiguous allocations of (N+1)(N+2)/2 values.
struct LatticeGrid {
    asset: Vec<f64>,
    value: Vec<f64>,
}

impl LatticeGrid {
    #[inline]
    fn node(step: usize, down_moves: usize) -> usize {
        step * (step + 1) / 2 + down_moves
    }

    /// Forward pass: asset prices everywhere, option values at expiry.
    fn build(request: &ValidatedRequest, params: &LatticeParams) -> Self {
        let n = params.num_steps;
        let len = (n + 1) * (n + 2) / 2;
        let mut asset = vec![0.0; len];
        let mut value = vec![0.0; len];

        for step in 0..=n {
            for down_moves in 0..=step {
                let ups = (step - down_moves) as i32;
                asset[Self::node(step, down_moves)] = request.spot()
                    * params.up.powi(ups)
                    * params.down.powi(down_moves as i32);
            }
        }

        for down_moves in 0..=n {
            let idx = Self::node(n, down_moves);
            value[idx] = request.intrinsic(asset[idx]);
        }

        Self { asset, value }
    }

    /// One backward-induction step: fills row `step` from row `step + 1`.
    fn induct_step(
        &mut self,
        step: usize,
        params: &LatticeParams,
        request: &ValidatedRequest,
        early_exercise: bool,
    ) {
        for down_moves in 0..=step {
            let continuation = params.step_discount
                * (params.prob_up * self.value[Self::node(step + 1, down_moves)]
                    + (1.0 - params.prob_up) * self.value[Self::node(step + 1, down_moves + 1)]);

            let idx = Self::node(step, down_moves);
            self.value[idx] = if early_exercise {
                continuation.max(request.intrinsic(self.asset[idx]))
            } else {
                continuation
            };
        }
    }

    #[inline]
    fn root_value(&self) -> f64 {
        self.value[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::black_scholes;
    use approx::assert_relative_eq;
    use fairval_core::types::{OptionStyle, OptionType, PricingMethod};

    fn request(
        option_type: OptionType,
        style: OptionStyle,
    ) -> ValidatedRequest {
        ValidatedRequest::new(
            100.0,
            100.0,
            1.0,
            0.01,
            0.2,
            option_type,
            style,
            PricingMethod::Lattice,
        )
        .unwrap()
    }

    fn european_analytic(option_type: OptionType) -> f64 {
        let req = ValidatedRequest::new(
            100.0,
            100.0,
            1.0,
            0.01,
            0.2,
            option_type,
            OptionStyle::European,
            PricingMethod::Analytic,
        )
        .unwrap();
        black_scholes::price(&req).unwrap()
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(matches!(
            BinomialTree::new(0),
            Err(PricingError::InvalidInput {
                field: "num_steps",
                ..
            })
        ));
    }

    #[test]
    fn test_default_steps() {
        assert_eq!(BinomialTree::default().num_steps(), DEFAULT_STEPS);
    }

    #[test]
    fn test_step_params_values() {
        let tree = BinomialTree::new(100).unwrap();
        let req = request(OptionType::Call, OptionStyle::European);
        let params = tree.step_params(&req).unwrap();

        assert_relative_eq!(params.dt, 0.01, epsilon = 1e-15);
        assert_relative_eq!(params.up, (0.2_f64 * 0.1).exp(), epsilon = 1e-15);
        assert_relative_eq!(params.down, 1.0 / params.up, epsilon = 1e-15);
        assert!(params.prob_up > 0.0 && params.prob_up < 1.0);
        assert_relative_eq!(
            params.step_discount,
            (-0.01_f64 * 0.01).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_no_arbitrage_violation_detected() {
        // Extreme rate against tiny volatility: e^(rΔt) overtakes u.
        let req = ValidatedRequest::new(
            100.0,
            100.0,
            1.0,
            5.0,
            0.01,
            OptionType::Call,
            OptionStyle::European,
            PricingMethod::Lattice,
        )
        .unwrap();

        let tree = BinomialTree::new(100).unwrap();
        assert!(matches!(
            tree.step_params(&req),
            Err(PricingError::NumericalInstability { .. })
        ));
        assert!(matches!(
            tree.price(&req, &CancelToken::new()),
            Err(PricingError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_european_call_converges_to_analytic() {
        let req = request(OptionType::Call, OptionStyle::European);
        let analytic = european_analytic(OptionType::Call);

        let tree = BinomialTree::new(500).unwrap();
        let value = tree.price(&req, &CancelToken::new()).unwrap();
        assert!(
            (value - analytic).abs() < 0.01,
            "lattice {} vs analytic {}",
            value,
            analytic
        );
    }

    #[test]
    fn test_european_put_converges_to_analytic() {
        let req = request(OptionType::Put, OptionStyle::European);
        let analytic = european_analytic(OptionType::Put);

        let tree = BinomialTree::new(500).unwrap();
        let value = tree.price(&req, &CancelToken::new()).unwrap();
        assert!((value - analytic).abs() < 0.01);
    }

    #[test]
    fn test_convergence_improves_with_steps() {
        let req = request(OptionType::Call, OptionStyle::European);
        let analytic = european_analytic(OptionType::Call);

        let coarse = BinomialTree::new(10)
            .unwrap()
            .price(&req, &CancelToken::new())
            .unwrap();
        let fine = BinomialTree::new(1000)
            .unwrap()
            .price(&req, &CancelToken::new())
            .unwrap();

        assert!((fine - analytic).abs() <= (coarse - analytic).abs());
    }

    #[test]
    fn test_american_put_premium_non_negative() {
        let tree = BinomialTree::new(200).unwrap();
        let token = CancelToken::new();

        let european = tree
            .price(&request(OptionType::Put, OptionStyle::European), &token)
            .unwrap();
        let american = tree
            .price(&request(OptionType::Put, OptionStyle::American), &token)
            .unwrap();

        // The early-exercise floor can only raise node values.
        assert!(american >= european - 1e-12);
        // For an ATM put with positive rates the premium is strictly positive.
        assert!(american > european);
    }

    #[test]
    fn test_american_call_equals_european_without_dividends() {
        let tree = BinomialTree::new(200).unwrap();
        let token = CancelToken::new();

        let european = tree
            .price(&request(OptionType::Call, OptionStyle::European), &token)
            .unwrap();
        let american = tree
            .price(&request(OptionType::Call, OptionStyle::American), &token)
            .unwrap();

        assert_relative_eq!(american, european, epsilon = 1e-10);
    }

    #[test]
    fn test_american_put_at_least_intrinsic() {
        let req = ValidatedRequest::new(
            80.0,
            100.0,
            1.0,
            0.01,
            0.2,
            OptionType::Put,
            OptionStyle::American,
            PricingMethod::Lattice,
        )
        .unwrap();

        let value = BinomialTree::new(200)
            .unwrap()
            .price(&req, &CancelToken::new())
            .unwrap();
        assert!(value >= 20.0 - 1e-12);
    }

    #[test]
    fn test_short_expiry_converges_to_intrinsic() {
        let req = ValidatedRequest::new(
            110.0,
            100.0,
            1e-6,
            0.01,
            0.2,
            OptionType::Call,
            OptionStyle::European,
            PricingMethod::Lattice,
        )
        .unwrap();

        let value = BinomialTree::new(100)
            .unwrap()
            .price(&req, &CancelToken::new())
            .unwrap();
        assert_relative_eq!(value, 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_cancellation_observed() {
        let req = request(OptionType::Put, OptionStyle::American);
        let token = CancelToken::new();
        token.cancel();

        let result = BinomialTree::new(100).unwrap().price(&req, &token);
        assert_eq!(result, Err(PricingError::Cancelled));
    }
}
