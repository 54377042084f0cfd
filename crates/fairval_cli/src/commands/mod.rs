//! Command implementations.

pub mod price;
pub mod quote;

use clap::ValueEnum;

use fairval_core::types::{OptionStyle, OptionType, PricingMethod};

/// Option type flag.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TypeArg {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl From<TypeArg> for OptionType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Call => OptionType::Call,
            TypeArg::Put => OptionType::Put,
        }
    }
}

/// Exercise style flag.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StyleArg {
    /// Exercise only at expiry.
    European,
    /// Exercise at any time before expiry.
    American,
}

impl From<StyleArg> for OptionStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::European => OptionStyle::European,
            StyleArg::American => OptionStyle::American,
        }
    }
}

/// Pricing method flag.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MethodArg {
    /// Closed-form Black-Scholes.
    Analytic,
    /// Binomial lattice.
    Lattice,
    /// Longstaff-Schwartz Monte Carlo.
    MonteCarlo,
}

impl From<MethodArg> for PricingMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Analytic => PricingMethod::Analytic,
            MethodArg::Lattice => PricingMethod::Lattice,
            MethodArg::MonteCarlo => PricingMethod::MonteCarlo,
        }
    }
}

/// Output format flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Human-readable table.
    Table,
    /// Machine-readable JSON.
    Json,
}
