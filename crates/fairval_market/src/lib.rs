//! # fairval_market: Market-Data Abstraction
//!
//! The pricing core is a pure function of a validated request; this
//! crate is the seam between it and the outside world:
//! - `providers`: traits a live data source implements
//!   ([`MarketDataProvider`], [`OptionQuoteProvider`])
//! - `snapshot`: an in-memory implementation for offline tests and demos
//! - `resolve`: (ticker, expiry date, strike) → [`ValidatedRequest`]
//! - `advice`: the fair-value vs bid/ask recommendation heuristic
//!
//! Keeping the traits here, not in the core, means pricing correctness
//! tests never touch the network: they price against a
//! [`MarketSnapshot`] built in the test itself.
//!
//! [`ValidatedRequest`]: fairval_core::types::ValidatedRequest

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod advice;
pub mod providers;
pub mod resolve;
pub mod snapshot;

pub use advice::{recommend, Recommendation};
pub use providers::{MarketDataError, MarketDataProvider, OptionQuote, OptionQuoteProvider};
pub use resolve::{resolve_request, ResolveError, ResolvedRequest};
pub use snapshot::MarketSnapshot;
