//! Error taxonomy for pricing operations.
//!
//! Every failure mode of the engine maps onto exactly one variant of
//! [`PricingError`]. All errors are reported synchronously and carry the
//! structure needed to tell the kinds apart (and, for input errors, the
//! offending field). No retries are attempted anywhere in the engine.

use thiserror::Error;

use super::request::{OptionStyle, PricingMethod};

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidInput`: non-positive or non-finite market parameter, or a
///   zero step/simulation count; detected before any computation
/// - `UnsupportedCombination`: method cannot honour the exercise style
///   (the closed form never approximates early exercise)
/// - `NumericalInstability`: the method is ill-posed for the given
///   parameters (lattice no-arbitrage violation)
/// - `Cancelled`: the caller's cancellation token was observed between
///   induction steps
///
/// # Examples
/// ```
/// use fairval_core::types::PricingError;
///
/// let err = PricingError::InvalidInput { field: "spot", value: -1.0 };
/// assert_eq!(err.to_string(), "invalid input: spot = -1");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// Non-positive or non-finite input, detected before any computation.
    #[error("invalid input: {field} = {value}")]
    InvalidInput {
        /// Name of the offending request field or knob.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The requested method cannot price the requested exercise style.
    #[error("unsupported combination: {method} method cannot price {style} options")]
    UnsupportedCombination {
        /// The requested pricing method.
        method: PricingMethod,
        /// The requested exercise style.
        style: OptionStyle,
    },

    /// The method is numerically ill-posed for the given parameters.
    #[error("numerical instability: {reason}")]
    NumericalInstability {
        /// Description of the violated condition.
        reason: String,
    },

    /// The computation observed a cancellation request and stopped.
    #[error("computation cancelled")]
    Cancelled,
}
