//! # fairval_pricing: Stochastic Engine and Method Dispatch
//!
//! The top layer of the pricing core:
//! - `rng`: seeded random number generation with per-path seed derivation
//! - `paths`: geometric Brownian motion simulation, batch and streaming
//! - `summary`: inspectable simulation diagnostics for external charting
//! - `lsm`: Longstaff-Schwartz least-squares Monte Carlo pricer
//! - `engine`: routes a validated request to exactly one pricer
//!
//! ## Purity and concurrency
//!
//! Every pricing call is a pure function of its request, configuration,
//! and seed: the simulation batch, regression fits, and lattice grid are
//! owned by the call and dropped at return, so concurrent requests need
//! no synchronisation. The engine performs no I/O and never blocks;
//! callers run long computations on their own workers and may cancel via
//! [`fairval_core::types::CancelToken`].
//!
//! ## Usage Example
//!
//! ```rust
//! use fairval_core::types::{
//!     OptionStyle, OptionType, PricingMethod, ValidatedRequest,
//! };
//! use fairval_pricing::engine::{self, EngineConfig};
//!
//! let request = ValidatedRequest::new(
//!     100.0, 100.0, 1.0, 0.01, 0.2,
//!     OptionType::Put,
//!     OptionStyle::American,
//!     PricingMethod::MonteCarlo,
//! )
//! .unwrap();
//!
//! let config = EngineConfig::default()
//!     .with_num_simulations(5_000)
//!     .with_seed(42);
//! let result = engine::price(&request, &config).unwrap();
//! assert!(result.fair_value > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engine;
pub mod lsm;
pub mod paths;
pub mod rng;
pub mod summary;

pub use engine::{Diagnostics, EngineConfig, PricingResult};
pub use lsm::{MonteCarloConfig, MonteCarloPricer, MonteCarloValuation};
pub use paths::{GbmParams, SimulationBatch};
pub use summary::PathSummary;
