//! Cross-method properties of the pricing engine.
//!
//! These tests exercise the public dispatch surface the way a caller
//! would, checking the relationships that must hold between the three
//! methods rather than any single method in isolation.

use fairval_core::types::{
    CancelToken, OptionStyle, OptionType, PricingError, PricingMethod, ValidatedRequest,
};
use fairval_pricing::engine::{self, EngineConfig};

const SPOT: f64 = 100.0;
const STRIKE: f64 = 100.0;
const EXPIRY: f64 = 1.0;
const RATE: f64 = 0.01;
const VOLATILITY: f64 = 0.2;

fn scenario(
    option_type: OptionType,
    style: OptionStyle,
    method: PricingMethod,
) -> ValidatedRequest {
    ValidatedRequest::new(
        SPOT, STRIKE, EXPIRY, RATE, VOLATILITY, option_type, style, method,
    )
    .unwrap()
}

fn fair_value(request: &ValidatedRequest, config: &EngineConfig) -> f64 {
    engine::price(request, config).unwrap().fair_value
}

#[test]
fn analytic_call_matches_reference() {
    let value = fair_value(
        &scenario(
            OptionType::Call,
            OptionStyle::European,
            PricingMethod::Analytic,
        ),
        &EngineConfig::default(),
    );
    assert!((value - 8.4336).abs() < 0.01, "call value {}", value);
}

#[test]
fn analytic_put_matches_reference() {
    let value = fair_value(
        &scenario(
            OptionType::Put,
            OptionStyle::European,
            PricingMethod::Analytic,
        ),
        &EngineConfig::default(),
    );
    assert!((value - 7.4386).abs() < 0.01, "put value {}", value);
}

#[test]
fn put_call_parity_analytic() {
    let config = EngineConfig::default();
    let call = fair_value(
        &scenario(
            OptionType::Call,
            OptionStyle::European,
            PricingMethod::Analytic,
        ),
        &config,
    );
    let put = fair_value(
        &scenario(
            OptionType::Put,
            OptionStyle::European,
            PricingMethod::Analytic,
        ),
        &config,
    );

    let rhs = SPOT - STRIKE * (-RATE * EXPIRY).exp();
    assert!((call - put - rhs).abs() < 1e-6);
}

#[test]
fn lattice_converges_to_analytic_in_european_mode() {
    let analytic = fair_value(
        &scenario(
            OptionType::Call,
            OptionStyle::European,
            PricingMethod::Analytic,
        ),
        &EngineConfig::default(),
    );
    let lattice = fair_value(
        &scenario(
            OptionType::Call,
            OptionStyle::European,
            PricingMethod::Lattice,
        ),
        &EngineConfig::default().with_num_steps(500),
    );

    assert!(
        (lattice - analytic).abs() < 0.01,
        "lattice {} vs analytic {}",
        lattice,
        analytic
    );
}

#[test]
fn early_exercise_premium_non_negative_lattice() {
    let config = EngineConfig::default().with_num_steps(400);
    let european = fair_value(
        &scenario(
            OptionType::Put,
            OptionStyle::European,
            PricingMethod::Lattice,
        ),
        &config,
    );
    let american = fair_value(
        &scenario(
            OptionType::Put,
            OptionStyle::American,
            PricingMethod::Lattice,
        ),
        &config,
    );

    assert!(american >= european - 1e-12);
}

#[test]
fn early_exercise_premium_non_negative_monte_carlo() {
    // Shared seed and paths keep the comparison far tighter than the
    // statistical error of either estimate alone.
    let config = EngineConfig::default()
        .with_num_simulations(20_000)
        .with_num_steps(50)
        .with_seed(42);

    let european = fair_value(
        &scenario(
            OptionType::Put,
            OptionStyle::European,
            PricingMethod::MonteCarlo,
        ),
        &config,
    );
    let american = fair_value(
        &scenario(
            OptionType::Put,
            OptionStyle::American,
            PricingMethod::MonteCarlo,
        ),
        &config,
    );

    assert!(
        american >= european,
        "american {} vs european {}",
        american,
        european
    );
}

#[test]
fn monte_carlo_american_put_tracks_lattice() {
    // The LSM estimate is biased low but must land near the lattice
    // value (≈ 7.98 for this scenario).
    let lattice = fair_value(
        &scenario(
            OptionType::Put,
            OptionStyle::American,
            PricingMethod::Lattice,
        ),
        &EngineConfig::default().with_num_steps(500),
    );
    let monte_carlo = fair_value(
        &scenario(
            OptionType::Put,
            OptionStyle::American,
            PricingMethod::MonteCarlo,
        ),
        &EngineConfig::default()
            .with_num_simulations(50_000)
            .with_num_steps(50)
            .with_seed(42),
    );

    assert!(
        (monte_carlo - lattice).abs() < 0.25,
        "monte carlo {} vs lattice {}",
        monte_carlo,
        lattice
    );
}

#[test]
fn all_methods_converge_to_intrinsic_at_short_expiry() {
    let expiry = 1e-5;
    let spot = 110.0;
    let intrinsic = 10.0;

    for method in [
        PricingMethod::Analytic,
        PricingMethod::Lattice,
        PricingMethod::MonteCarlo,
    ] {
        let request = ValidatedRequest::new(
            spot,
            STRIKE,
            expiry,
            RATE,
            VOLATILITY,
            OptionType::Call,
            OptionStyle::European,
            method,
        )
        .unwrap();

        let config = EngineConfig::default()
            .with_num_simulations(10_000)
            .with_seed(42);
        let value = fair_value(&request, &config);
        assert!(
            (value - intrinsic).abs() < 0.02,
            "{} value {} vs intrinsic {}",
            method,
            value,
            intrinsic
        );
    }
}

#[test]
fn monte_carlo_deterministic_under_fixed_seed() {
    let request = scenario(
        OptionType::Put,
        OptionStyle::American,
        PricingMethod::MonteCarlo,
    );
    let config = EngineConfig::default()
        .with_num_simulations(5_000)
        .with_num_steps(25)
        .with_seed(2024);

    let a = engine::price(&request, &config).unwrap();
    let b = engine::price(&request, &config).unwrap();

    assert_eq!(a.fair_value.to_bits(), b.fair_value.to_bits());
    assert_eq!(a.diagnostics, b.diagnostics);
}

#[test]
fn zero_expiry_rejected_for_every_method() {
    for method in [
        PricingMethod::Analytic,
        PricingMethod::Lattice,
        PricingMethod::MonteCarlo,
    ] {
        let result = ValidatedRequest::new(
            SPOT,
            STRIKE,
            0.0,
            RATE,
            VOLATILITY,
            OptionType::Call,
            OptionStyle::European,
            method,
        );
        assert_eq!(
            result,
            Err(PricingError::InvalidInput {
                field: "expiry",
                value: 0.0
            }),
            "method {}",
            method
        );
    }
}

#[test]
fn analytic_american_rejected_before_any_numeric_work() {
    let result = ValidatedRequest::new(
        SPOT,
        STRIKE,
        EXPIRY,
        RATE,
        VOLATILITY,
        OptionType::Put,
        OptionStyle::American,
        PricingMethod::Analytic,
    );
    assert_eq!(
        result,
        Err(PricingError::UnsupportedCombination {
            method: PricingMethod::Analytic,
            style: OptionStyle::American,
        })
    );
}

#[test]
fn cancelled_long_run_returns_promptly() {
    let request = scenario(
        OptionType::Put,
        OptionStyle::American,
        PricingMethod::Lattice,
    );
    let token = CancelToken::new();
    token.cancel();

    let result = engine::price_cancellable(
        &request,
        &EngineConfig::default().with_num_steps(2_000),
        &token,
    );
    assert_eq!(result, Err(PricingError::Cancelled));
}
