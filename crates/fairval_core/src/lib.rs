//! # fairval_core: Foundation for the Fairval Option Pricing Engine
//!
//! Bottom layer of the workspace, providing:
//! - Request types and constructor-only validation (`types::request`)
//! - The pricing error taxonomy (`types::error`)
//! - Cooperative cancellation (`types::cancel`)
//! - Standard-normal distribution functions (`math::distributions`)
//! - Single-predictor ordinary least squares (`math::ols`)
//!
//! ## Zero Dependency Principle
//!
//! This crate has no dependencies on other fairval crates, with minimal
//! external dependencies:
//! - num-traits: traits for generic numerical computation
//! - thiserror: structured error derivation
//! - serde: serialisation support (optional)
//!
//! ## Usage Example
//!
//! ```rust
//! use fairval_core::types::{
//!     OptionStyle, OptionType, PricingMethod, ValidatedRequest,
//! };
//!
//! let request = ValidatedRequest::new(
//!     100.0,
//!     100.0,
//!     1.0,
//!     0.01,
//!     0.2,
//!     OptionType::Call,
//!     OptionStyle::European,
//!     PricingMethod::Analytic,
//! )
//! .unwrap();
//!
//! assert_eq!(request.spot(), 100.0);
//! assert!((request.intrinsic(110.0) - 10.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: enable serialisation for the public data types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
