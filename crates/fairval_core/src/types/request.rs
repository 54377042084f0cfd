//! Pricing request types with constructor-only validation.
//!
//! A [`ValidatedRequest`] can only be obtained through [`ValidatedRequest::new`],
//! which rejects non-positive or non-finite market parameters before any
//! numeric work is performed. Downstream pricers therefore never re-check
//! the basic field invariants.

use std::fmt;

use super::error::PricingError;

/// Type of option payoff.
///
/// # Variants
/// - `Call`: max(S − K, 0)
/// - `Put`: max(K − S, 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Call option: max(S − K, 0).
    Call,
    /// Put option: max(K − S, 0).
    Put,
}

impl OptionType {
    /// Intrinsic payoff for the given spot and strike.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Option exercise style.
///
/// Defines when the option can be exercised during its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionStyle {
    /// European style: exercise only at expiry.
    European,
    /// American style: exercise at any time before expiry.
    American,
}

impl OptionStyle {
    /// Returns whether this is a European exercise style.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, OptionStyle::European)
    }

    /// Returns whether this is an American exercise style.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, OptionStyle::American)
    }

    /// Returns whether early exercise is permitted.
    #[inline]
    pub fn allows_early_exercise(&self) -> bool {
        matches!(self, OptionStyle::American)
    }
}

impl fmt::Display for OptionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionStyle::European => write!(f, "european"),
            OptionStyle::American => write!(f, "american"),
        }
    }
}

/// Numerical method used to value the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingMethod {
    /// Closed-form Black-Scholes valuation (European only).
    Analytic,
    /// Recombining binomial lattice with backward induction.
    Lattice,
    /// Longstaff-Schwartz least-squares Monte Carlo.
    MonteCarlo,
}

impl fmt::Display for PricingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMethod::Analytic => write!(f, "analytic"),
            PricingMethod::Lattice => write!(f, "lattice"),
            PricingMethod::MonteCarlo => write!(f, "monte-carlo"),
        }
    }
}

/// Validated pricing request.
///
/// Holds the market parameters and contract terms for a single valuation.
/// Construction is the only way to obtain the type; all field invariants
/// (strictly positive spot, strike, expiry, and volatility; finite rate;
/// a method/style combination the engine can honour) are enforced there.
///
/// # Examples
/// ```
/// use fairval_core::types::{
///     OptionStyle, OptionType, PricingMethod, ValidatedRequest,
/// };
///
/// let request = ValidatedRequest::new(
///     100.0, 105.0, 0.5, 0.01, 0.25,
///     OptionType::Put,
///     OptionStyle::American,
///     PricingMethod::Lattice,
/// ).unwrap();
///
/// assert_eq!(request.strike(), 105.0);
/// assert!(request.style().allows_early_exercise());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidatedRequest {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    option_type: OptionType,
    style: OptionStyle,
    method: PricingMethod,
}

impl ValidatedRequest {
    /// Creates a validated request.
    ///
    /// # Arguments
    /// * `spot` - Current underlying price S (must be positive and finite)
    /// * `strike` - Strike price K (must be positive and finite)
    /// * `expiry` - Time to expiry T in years (must be positive and finite)
    /// * `rate` - Annualised risk-free rate r (must be finite)
    /// * `volatility` - Annualised volatility σ (must be positive and finite)
    /// * `option_type` - Call or put
    /// * `style` - European or American exercise
    /// * `method` - Numerical method to route the request to
    ///
    /// # Errors
    /// - `PricingError::InvalidInput` naming the offending field for a
    ///   non-positive or non-finite parameter
    /// - `PricingError::UnsupportedCombination` for `Analytic` × `American`
    ///   (the closed form never approximates early exercise)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
        option_type: OptionType,
        style: OptionStyle,
        method: PricingMethod,
    ) -> Result<Self, PricingError> {
        require_positive("spot", spot)?;
        require_positive("strike", strike)?;
        require_positive("expiry", expiry)?;
        require_finite("rate", rate)?;
        require_positive("volatility", volatility)?;

        if method == PricingMethod::Analytic && style.allows_early_exercise() {
            return Err(PricingError::UnsupportedCombination { method, style });
        }

        Ok(Self {
            spot,
            strike,
            expiry,
            rate,
            volatility,
            option_type,
            style,
            method,
        })
    }

    /// Returns the spot price S.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to expiry T in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the annualised risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the annualised volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns the exercise style.
    #[inline]
    pub fn style(&self) -> OptionStyle {
        self.style
    }

    /// Returns the requested pricing method.
    #[inline]
    pub fn method(&self) -> PricingMethod {
        self.method
    }

    /// Intrinsic payoff of this contract at the given underlying price.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.option_type.intrinsic(spot, self.strike)
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), PricingError> {
    // NaN fails the comparison, so it is rejected here as well.
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidInput { field, value })
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::InvalidInput { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        option_type: OptionType,
        style: OptionStyle,
        method: PricingMethod,
    ) -> Result<ValidatedRequest, PricingError> {
        ValidatedRequest::new(100.0, 100.0, 1.0, 0.01, 0.2, option_type, style, method)
    }

    #[test]
    fn test_valid_request() {
        let req = request(
            OptionType::Call,
            OptionStyle::European,
            PricingMethod::Analytic,
        )
        .unwrap();
        assert_eq!(req.spot(), 100.0);
        assert_eq!(req.strike(), 100.0);
        assert_eq!(req.expiry(), 1.0);
        assert_eq!(req.rate(), 0.01);
        assert_eq!(req.volatility(), 0.2);
        assert_eq!(req.option_type(), OptionType::Call);
    }

    #[test]
    fn test_zero_expiry_rejected() {
        let result = ValidatedRequest::new(
            100.0,
            100.0,
            0.0,
            0.01,
            0.2,
            OptionType::Call,
            OptionStyle::European,
            PricingMethod::Analytic,
        );
        assert_eq!(
            result,
            Err(PricingError::InvalidInput {
                field: "expiry",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_negative_spot_rejected() {
        let result = ValidatedRequest::new(
            -1.0,
            100.0,
            1.0,
            0.01,
            0.2,
            OptionType::Call,
            OptionStyle::European,
            PricingMethod::Lattice,
        );
        assert!(matches!(
            result,
            Err(PricingError::InvalidInput { field: "spot", .. })
        ));
    }

    #[test]
    fn test_nan_volatility_rejected() {
        let result = ValidatedRequest::new(
            100.0,
            100.0,
            1.0,
            0.01,
            f64::NAN,
            OptionType::Put,
            OptionStyle::European,
            PricingMethod::MonteCarlo,
        );
        assert!(matches!(
            result,
            Err(PricingError::InvalidInput {
                field: "volatility",
                ..
            })
        ));
    }

    #[test]
    fn test_infinite_rate_rejected() {
        let result = ValidatedRequest::new(
            100.0,
            100.0,
            1.0,
            f64::INFINITY,
            0.2,
            OptionType::Put,
            OptionStyle::European,
            PricingMethod::Analytic,
        );
        assert!(matches!(
            result,
            Err(PricingError::InvalidInput { field: "rate", .. })
        ));
    }

    #[test]
    fn test_negative_rate_accepted() {
        // Negative rates are a valid market regime.
        let req = ValidatedRequest::new(
            100.0,
            100.0,
            1.0,
            -0.005,
            0.2,
            OptionType::Call,
            OptionStyle::European,
            PricingMethod::Analytic,
        );
        assert!(req.is_ok());
    }

    #[test]
    fn test_analytic_american_rejected() {
        let result = request(
            OptionType::Put,
            OptionStyle::American,
            PricingMethod::Analytic,
        );
        assert_eq!(
            result,
            Err(PricingError::UnsupportedCombination {
                method: PricingMethod::Analytic,
                style: OptionStyle::American,
            })
        );
    }

    #[test]
    fn test_lattice_american_accepted() {
        assert!(request(
            OptionType::Put,
            OptionStyle::American,
            PricingMethod::Lattice
        )
        .is_ok());
    }

    #[test]
    fn test_intrinsic() {
        let call = request(
            OptionType::Call,
            OptionStyle::European,
            PricingMethod::Analytic,
        )
        .unwrap();
        assert_eq!(call.intrinsic(110.0), 10.0);
        assert_eq!(call.intrinsic(90.0), 0.0);

        let put = request(
            OptionType::Put,
            OptionStyle::European,
            PricingMethod::Analytic,
        )
        .unwrap();
        assert_eq!(put.intrinsic(90.0), 10.0);
        assert_eq!(put.intrinsic(110.0), 0.0);
    }

    #[test]
    fn test_style_helpers() {
        assert!(OptionStyle::European.is_european());
        assert!(!OptionStyle::European.allows_early_exercise());
        assert!(OptionStyle::American.is_american());
        assert!(OptionStyle::American.allows_early_exercise());
    }

    #[test]
    fn test_display() {
        assert_eq!(OptionType::Call.to_string(), "call");
        assert_eq!(OptionStyle::American.to_string(), "american");
        assert_eq!(PricingMethod::MonteCarlo.to_string(), "monte-carlo");
    }
}
