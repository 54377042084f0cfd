//! Closed-form Black-Scholes valuation for European options.
//!
//! ## Formulas
//!
//! **Call**: C = S·Φ(d₁) − K·e^(−rT)·Φ(d₂)
//! **Put**:  P = K·e^(−rT)·Φ(−d₂) − S·Φ(−d₁)
//!
//! where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ − σ√T
//!
//! Early exercise is never approximated here; an American request is
//! rejected before any numeric work.

use fairval_core::math::norm_cdf;
use fairval_core::types::{OptionType, PricingError, PricingMethod, ValidatedRequest};

/// Values a European option under Black-Scholes.
///
/// Pure function of the request, no side effects. The field invariants
/// (positive S, K, T, σ) are guaranteed by [`ValidatedRequest`]
/// construction; only the exercise style is checked here so the function
/// stays safe when called directly rather than through the dispatcher.
///
/// # Errors
/// `PricingError::UnsupportedCombination` for American style.
///
/// # Examples
/// ```
/// use fairval_core::types::{
///     OptionStyle, OptionType, PricingMethod, ValidatedRequest,
/// };
/// use fairval_models::black_scholes;
///
/// let request = ValidatedRequest::new(
///     100.0, 100.0, 1.0, 0.01, 0.2,
///     OptionType::Call,
///     OptionStyle::European,
///     PricingMethod::Analytic,
/// ).unwrap();
///
/// let value = black_scholes::price(&request).unwrap();
/// assert!((value - 8.433).abs() < 0.01);
/// ```
pub fn price(request: &ValidatedRequest) -> Result<f64, PricingError> {
    if request.style().allows_early_exercise() {
        return Err(PricingError::UnsupportedCombination {
            method: PricingMethod::Analytic,
            style: request.style(),
        });
    }

    let (d1, d2) = d1_d2(request);
    let strike_pv = request.strike() * (-request.rate() * request.expiry()).exp();

    let value = match request.option_type() {
        OptionType::Call => request.spot() * norm_cdf(d1) - strike_pv * norm_cdf(d2),
        OptionType::Put => strike_pv * norm_cdf(-d2) - request.spot() * norm_cdf(-d1),
    };
    Ok(value)
}

/// The d₁ and d₂ terms of the closed form.
fn d1_d2(request: &ValidatedRequest) -> (f64, f64) {
    let vol_sqrt_t = request.volatility() * request.expiry().sqrt();
    let d1 = ((request.spot() / request.strike()).ln()
        + (request.rate() + 0.5 * request.volatility() * request.volatility()) * request.expiry())
        / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}
