//! Provider traits for spot prices and option quotes.
//!
//! A live implementation wraps whatever feed the deployment uses; tests
//! and demos use [`crate::snapshot::MarketSnapshot`]. The core never
//! calls these traits itself — resolution happens in the caller before
//! a request enters the engine.

use chrono::NaiveDate;
use thiserror::Error;

use fairval_core::types::OptionType;

/// Market-data lookup failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MarketDataError {
    /// No spot price known for the ticker.
    #[error("no market data for ticker {ticker}")]
    UnknownTicker {
        /// The ticker that missed.
        ticker: String,
    },

    /// No quote for the requested contract.
    #[error("no {option_type} quote for {ticker} {expiry} at strike {strike}")]
    QuoteNotFound {
        /// Underlying ticker.
        ticker: String,
        /// Contract expiry date.
        expiry: NaiveDate,
        /// Contract strike.
        strike: f64,
        /// Call or put.
        option_type: OptionType,
    },
}

/// A quoted option contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionQuote {
    /// Implied volatility backed out of the market price, annualised.
    pub implied_volatility: f64,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
    /// Last traded price.
    pub last_price: f64,
}

/// Source of underlying spot prices.
pub trait MarketDataProvider {
    /// Returns the current spot price for `ticker`.
    ///
    /// # Errors
    /// `MarketDataError::UnknownTicker` when the ticker is not covered.
    fn spot_price(&self, ticker: &str) -> Result<f64, MarketDataError>;
}

/// Source of option-chain quotes.
pub trait OptionQuoteProvider {
    /// Returns the quote for one contract of the chain.
    ///
    /// # Errors
    /// `MarketDataError::QuoteNotFound` when the chain has no matching
    /// contract.
    fn option_quote(
        &self,
        ticker: &str,
        expiry: NaiveDate,
        strike: f64,
        option_type: OptionType,
    ) -> Result<OptionQuote, MarketDataError>;
}
