//! Price command: value an option from explicit parameters.

use clap::Args;
use tracing::info;

use fairval_core::types::ValidatedRequest;
use fairval_pricing::engine::{self, Diagnostics, EngineConfig};

use super::{FormatArg, MethodArg, StyleArg, TypeArg};
use crate::Result;

/// Arguments for `fairval price`.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long)]
    pub expiry: f64,

    /// Annualised risk-free rate
    #[arg(long, default_value = "0.01")]
    pub rate: f64,

    /// Annualised volatility
    #[arg(long)]
    pub volatility: f64,

    /// Option type
    #[arg(long = "type", value_enum)]
    pub option_type: TypeArg,

    /// Exercise style
    #[arg(long, value_enum, default_value = "european")]
    pub style: StyleArg,

    /// Pricing method
    #[arg(long, value_enum, default_value = "analytic")]
    pub method: MethodArg,

    /// Time steps for lattice and Monte Carlo
    #[arg(long, default_value = "100")]
    pub num_steps: usize,

    /// Monte Carlo path count
    #[arg(long, default_value = "50000")]
    pub num_simulations: usize,

    /// Monte Carlo seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: FormatArg,
}

/// Runs the price command.
pub fn run(args: &PriceArgs) -> Result<()> {
    let request = ValidatedRequest::new(
        args.spot,
        args.strike,
        args.expiry,
        args.rate,
        args.volatility,
        args.option_type.into(),
        args.style.into(),
        args.method.into(),
    )?;

    let mut config = EngineConfig::default()
        .with_num_steps(args.num_steps)
        .with_num_simulations(args.num_simulations);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    info!(
        "pricing {} {} via {}",
        request.style(),
        request.option_type(),
        request.method()
    );
    let result = engine::price(&request, &config)?;

    match args.format {
        FormatArg::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        FormatArg::Table => {
            println!("Fair value: {:.4}", result.fair_value);
            match &result.diagnostics {
                Some(Diagnostics::Lattice(params)) => {
                    println!(
                        "Lattice: {} steps, dt {:.6}, u {:.6}, d {:.6}, p {:.6}",
                        params.num_steps, params.dt, params.up, params.down, params.prob_up
                    );
                }
                Some(Diagnostics::Simulation(summary)) => {
                    let last = summary.mean.len() - 1;
                    println!(
                        "Simulation: {} sample paths retained, mean terminal {:.4}, 5%-95% band [{:.4}, {:.4}]",
                        summary.sample_paths.len(),
                        summary.mean[last],
                        summary.lower[last],
                        summary.upper[last]
                    );
                }
                None => {}
            }
        }
    }
    Ok(())
}
