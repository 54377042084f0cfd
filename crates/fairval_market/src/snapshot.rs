//! In-memory market snapshot.
//!
//! Implements both provider traits over data loaded up front, so the
//! whole pricing stack can be exercised offline: correctness tests,
//! demos, and replaying a captured market state all price against a
//! snapshot instead of a live feed.

use std::collections::HashMap;

use chrono::NaiveDate;

use fairval_core::types::OptionType;

use crate::providers::{
    MarketDataError, MarketDataProvider, OptionQuote, OptionQuoteProvider,
};

/// Strikes are keyed at tenth-of-a-cent granularity, comfortably finer
/// than any listed strike grid.
fn strike_key(strike: f64) -> i64 {
    (strike * 1000.0).round() as i64
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct QuoteKey {
    ticker: String,
    expiry: NaiveDate,
    strike_key: i64,
    option_type: OptionType,
}

/// Static market data implementing both provider traits.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use fairval_core::types::OptionType;
/// use fairval_market::{MarketDataProvider, MarketSnapshot, OptionQuote};
///
/// let expiry = NaiveDate::from_ymd_opt(2026, 12, 18).unwrap();
/// let snapshot = MarketSnapshot::new()
///     .with_spot("ACME", 100.0)
///     .with_quote(
///         "ACME",
///         expiry,
///         100.0,
///         OptionType::Call,
///         OptionQuote {
///             implied_volatility: 0.2,
///             bid: 8.2,
///             ask: 8.6,
///             last_price: 8.4,
///         },
///     );
///
/// assert_eq!(snapshot.spot_price("ACME").unwrap(), 100.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MarketSnapshot {
    spots: HashMap<String, f64>,
    quotes: HashMap<QuoteKey, OptionQuote>,
}

impl MarketSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a spot price.
    pub fn with_spot(mut self, ticker: &str, price: f64) -> Self {
        self.spots.insert(ticker.to_string(), price);
        self
    }

    /// Adds (or replaces) one contract quote.
    pub fn with_quote(
        mut self,
        ticker: &str,
        expiry: NaiveDate,
        strike: f64,
        option_type: OptionType,
        quote: OptionQuote,
    ) -> Self {
        self.quotes.insert(
            QuoteKey {
                ticker: ticker.to_string(),
                expiry,
                strike_key: strike_key(strike),
                option_type,
            },
            quote,
        );
        self
    }
}

impl MarketDataProvider for MarketSnapshot {
    fn spot_price(&self, ticker: &str) -> Result<f64, MarketDataError> {
        self.spots
            .get(ticker)
            .copied()
            .ok_or_else(|| MarketDataError::UnknownTicker {
                ticker: ticker.to_string(),
            })
    }
}

impl OptionQuoteProvider for MarketSnapshot {
    fn option_quote(
        &self,
        ticker: &str,
        expiry: NaiveDate,
        strike: f64,
        option_type: OptionType,
    ) -> Result<OptionQuote, MarketDataError> {
        let key = QuoteKey {
            ticker: ticker.to_string(),
            expiry,
            strike_key: strike_key(strike),
            option_type,
        };
        self.quotes
            .get(&key)
            .copied()
            .ok_or(MarketDataError::QuoteNotFound {
                ticker: ticker.to_string(),
                expiry,
                strike,
                option_type,
            })
    }
}
