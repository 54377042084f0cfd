//! Shared numerics.
//!
//! This module provides:
//! - `distributions`: standard-normal CDF and PDF
//! - `ols`: single-predictor ordinary least squares

pub mod distributions;
pub mod ols;

pub use distributions::{norm_cdf, norm_pdf};
pub use ols::LinearFit;
