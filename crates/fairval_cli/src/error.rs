//! CLI error type.

use thiserror::Error;

use fairval_core::types::PricingError;
use fairval_market::ResolveError;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// The engine rejected or abandoned the valuation.
    #[error("pricing failed: {0}")]
    Pricing(#[from] PricingError),

    /// Request resolution against the market data failed.
    #[error("could not resolve request: {0}")]
    Resolve(#[from] ResolveError),

    /// Result serialisation failed.
    #[error("could not serialise output: {0}")]
    Serialise(#[from] serde_json::Error),
}

/// Convenience alias for command results.
pub type Result<T> = std::result::Result<T, CliError>;
