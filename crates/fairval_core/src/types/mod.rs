//! Request, error, and cancellation types.
//!
//! This module provides:
//! - `ValidatedRequest` and its field enums (`request`)
//! - `PricingError`: the engine-wide error taxonomy (`error`)
//! - `CancelToken`: cooperative cancellation (`cancel`)

pub mod cancel;
pub mod error;
pub mod request;

pub use cancel::CancelToken;
pub use error::PricingError;
pub use request::{OptionStyle, OptionType, PricingMethod, ValidatedRequest};
