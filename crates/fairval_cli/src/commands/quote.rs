//! Quote command: resolve a contract against the demo snapshot, value
//! it, and print a recommendation.
//!
//! The snapshot stands in for a live feed so the full resolve → price →
//! recommend flow runs offline. Swapping in a real provider is a matter
//! of handing `resolve_request` a different implementation.

use chrono::NaiveDate;
use clap::Args;
use tracing::{debug, info};

use fairval_core::types::OptionType;
use fairval_market::{recommend, resolve_request, MarketSnapshot, OptionQuote};
use fairval_pricing::engine::{self, EngineConfig};

use super::{MethodArg, StyleArg, TypeArg};
use crate::Result;

/// Arguments for `fairval quote`.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Underlying ticker (the demo snapshot covers ACME and GLOBEX)
    #[arg(long, default_value = "ACME")]
    pub ticker: String,

    /// Contract expiry date (YYYY-MM-DD)
    #[arg(long, default_value = "2026-12-18")]
    pub expiry: NaiveDate,

    /// Valuation date (YYYY-MM-DD)
    #[arg(long, default_value = "2026-06-19")]
    pub valuation_date: NaiveDate,

    /// Strike price
    #[arg(long, default_value = "100")]
    pub strike: f64,

    /// Option type
    #[arg(long = "type", value_enum, default_value = "call")]
    pub option_type: TypeArg,

    /// Exercise style
    #[arg(long, value_enum, default_value = "european")]
    pub style: StyleArg,

    /// Pricing method
    #[arg(long, value_enum, default_value = "analytic")]
    pub method: MethodArg,

    /// Annualised risk-free rate
    #[arg(long, default_value = "0.01")]
    pub rate: f64,

    /// Monte Carlo seed
    #[arg(long)]
    pub seed: Option<u64>,
}

/// The bundled synthetic market state.
fn demo_snapshot() -> MarketSnapshot {
    let december = NaiveDate::from_ymd_opt(2026, 12, 18).expect("valid date");

    MarketSnapshot::new()
        .with_spot("ACME", 102.5)
        .with_spot("GLOBEX", 48.0)
        .with_quote(
            "ACME",
            december,
            100.0,
            OptionType::Call,
            OptionQuote {
                implied_volatility: 0.22,
                bid: 8.1,
                ask: 8.5,
                last_price: 8.3,
            },
        )
        .with_quote(
            "ACME",
            december,
            100.0,
            OptionType::Put,
            OptionQuote {
                implied_volatility: 0.24,
                bid: 5.4,
                ask: 5.8,
                last_price: 5.6,
            },
        )
        .with_quote(
            "GLOBEX",
            december,
            50.0,
            OptionType::Put,
            OptionQuote {
                implied_volatility: 0.35,
                bid: 4.1,
                ask: 4.6,
                last_price: 4.3,
            },
        )
}

/// Runs the quote command.
pub fn run(args: &QuoteArgs) -> Result<()> {
    let snapshot = demo_snapshot();

    let resolved = resolve_request(
        &snapshot,
        &snapshot,
        &args.ticker,
        args.valuation_date,
        args.expiry,
        args.strike,
        args.option_type.into(),
        args.style.into(),
        args.method.into(),
        args.rate,
    )?;
    debug!(quote = ?resolved.quote, "resolved against snapshot");

    let mut config = EngineConfig::default();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    info!(
        "pricing {} {} {} via {}",
        args.ticker,
        resolved.request.style(),
        resolved.request.option_type(),
        resolved.request.method()
    );
    let result = engine::price(&resolved.request, &config)?;
    let advice = recommend(result.fair_value, resolved.quote.bid, resolved.quote.ask);

    println!(
        "{} {} {} @ {} expiring {}",
        args.ticker,
        resolved.request.style(),
        resolved.request.option_type(),
        args.strike,
        args.expiry
    );
    println!(
        "Fair value: {:.2}   Bid: {:.2}   Ask: {:.2}   Last: {:.2}",
        result.fair_value, resolved.quote.bid, resolved.quote.ask, resolved.quote.last_price
    );
    println!("Recommendation: {}", advice);
    Ok(())
}
