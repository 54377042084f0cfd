//! # fairval_models: Deterministic Valuation Models
//!
//! The two deterministic pricers of the engine:
//! - `black_scholes`: closed-form European valuation
//! - `lattice`: recombining binomial tree with early-exercise support
//!
//! Both are pure functions of a [`fairval_core::types::ValidatedRequest`];
//! neither holds state between calls nor performs I/O. The stochastic
//! Monte Carlo pricer lives one layer up in `fairval_pricing`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod black_scholes;
pub mod lattice;

pub use lattice::{BinomialTree, LatticeParams};
