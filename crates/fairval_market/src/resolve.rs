//! Resolution from contract terms to a validated pricing request.
//!
//! A caller knows (ticker, expiry date, strike); the engine wants
//! (S, K, T, r, σ). Resolution fetches S from a [`MarketDataProvider`],
//! σ (and bid/ask for the recommendation step) from an
//! [`OptionQuoteProvider`], and converts the expiry date to a year
//! fraction on Actual/365.

use chrono::NaiveDate;
use thiserror::Error;

use fairval_core::types::{
    OptionStyle, OptionType, PricingError, PricingMethod, ValidatedRequest,
};

use crate::providers::{MarketDataError, MarketDataProvider, OptionQuote, OptionQuoteProvider};

/// Failures while assembling a request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// A provider lookup missed.
    #[error(transparent)]
    Market(#[from] MarketDataError),

    /// The resolved parameters did not validate (expired contract, zero
    /// implied volatility in the quote, and so on).
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// A validated request together with the market quote it came from.
///
/// The quote rides along so the caller can compare the computed fair
/// value against bid/ask afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    /// The request ready for the engine.
    pub request: ValidatedRequest,
    /// The market quote used to build it.
    pub quote: OptionQuote,
}

/// Year fraction between two dates on Actual/365.
///
/// Negative when `expiry` precedes `valuation`; request validation then
/// rejects the expired contract.
pub fn year_fraction(valuation: NaiveDate, expiry: NaiveDate) -> f64 {
    (expiry - valuation).num_days() as f64 / 365.0
}

/// Builds a [`ValidatedRequest`] from contract terms and providers.
///
/// # Arguments
/// * `market` - Spot-price source
/// * `quotes` - Option-chain source
/// * `ticker` - Underlying ticker
/// * `valuation_date` - "Today" for the year-fraction computation
/// * `expiry` - Contract expiry date
/// * `strike` - Contract strike
/// * `option_type` - Call or put
/// * `style` - Exercise style
/// * `method` - Pricing method to route to
/// * `rate` - Risk-free rate to price with (not provider-sourced)
///
/// # Errors
/// Provider misses surface as [`ResolveError::Market`]; an expired
/// contract or degenerate quote surfaces as [`ResolveError::Pricing`]
/// from request validation.
#[allow(clippy::too_many_arguments)]
pub fn resolve_request(
    market: &impl MarketDataProvider,
    quotes: &impl OptionQuoteProvider,
    ticker: &str,
    valuation_date: NaiveDate,
    expiry: NaiveDate,
    strike: f64,
    option_type: OptionType,
    style: OptionStyle,
    method: PricingMethod,
    rate: f64,
) -> Result<ResolvedRequest, ResolveError> {
    let spot = market.spot_price(ticker)?;
    let quote = quotes.option_quote(ticker, expiry, strike, option_type)?;
    let time_to_expiry = year_fraction(valuation_date, expiry);

    let request = ValidatedRequest::new(
        spot,
        strike,
        time_to_expiry,
        rate,
        quote.implied_volatility,
        option_type,
        style,
        method,
    )?;

    Ok(ResolvedRequest { request, quote })
}
