//! Single-predictor ordinary least squares.
//!
//! The Monte Carlo pricer regresses discounted continuation values on the
//! current underlying price, one predictor only, so a full linear-algebra
//! dependency is not warranted. The fit uses centred normal equations,
//! which are well conditioned for a single regressor.

/// Fitted least-squares line `y ≈ intercept + slope · x`.
///
/// # Examples
/// ```
/// use fairval_core::math::LinearFit;
///
/// let xs = [1.0, 2.0, 3.0, 4.0];
/// let ys = [2.1, 3.9, 6.2, 7.8];
/// let fit = LinearFit::fit(&xs, &ys).unwrap();
///
/// assert!((fit.predict(2.5) - 5.0).abs() < 0.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Intercept of the fitted line.
    pub intercept: f64,
    /// Slope of the fitted line.
    pub slope: f64,
}

impl LinearFit {
    /// Fits a line through `(xs[i], ys[i])` minimising squared error.
    ///
    /// Returns `None` when the problem is degenerate: fewer than two
    /// observations, mismatched slice lengths, or an (almost) singular
    /// design where the predictor carries no variance. Callers treat
    /// `None` as "no usable fit" and fall back rather than fail.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }

        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let dx = x - mean_x;
            sxx += dx * dx;
            sxy += dx * (y - mean_y);
        }

        // Variance threshold relative to the predictor's scale; all-equal
        // x values (every path at the same price) land here.
        if !sxx.is_finite() || sxx <= n * f64::EPSILON * (1.0 + mean_x * mean_x) {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        if !slope.is_finite() || !intercept.is_finite() {
            return None;
        }

        Some(Self { intercept, slope })
    }

    /// Evaluates the fitted line at `x`.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_line_recovered() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 + 2.0 * x).collect();

        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert_relative_eq!(fit.intercept, 3.0, epsilon = 1e-12);
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_noisy_fit_reasonable() {
        let xs = [90.0, 95.0, 100.0, 105.0, 110.0];
        let ys = [1.2, 2.9, 5.1, 7.0, 8.8];

        let fit = LinearFit::fit(&xs, &ys).unwrap();
        // Roughly 0.39 per unit of underlying.
        assert!(fit.slope > 0.3 && fit.slope < 0.5);
        assert_relative_eq!(fit.predict(100.0), 5.0, epsilon = 0.5);
    }

    #[test]
    fn test_too_few_points() {
        assert!(LinearFit::fit(&[1.0], &[2.0]).is_none());
        assert!(LinearFit::fit(&[], &[]).is_none());
    }

    #[test]
    fn test_mismatched_lengths() {
        assert!(LinearFit::fit(&[1.0, 2.0], &[1.0]).is_none());
    }

    #[test]
    fn test_singular_design() {
        // Zero variance in the predictor.
        let xs = [100.0, 100.0, 100.0];
        let ys = [1.0, 2.0, 3.0];
        assert!(LinearFit::fit(&xs, &ys).is_none());
    }

    #[test]
    fn test_constant_response() {
        // Flat response is fine: slope 0, intercept at the mean.
        let xs = [1.0, 2.0, 3.0];
        let ys = [5.0, 5.0, 5.0];
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert_relative_eq!(fit.slope, 0.0, epsilon = 1e-12);
        assert_relative_eq!(fit.predict(10.0), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_prediction_order_preserved() {
        // An increasing relationship predicts increasing values.
        let xs = [80.0, 90.0, 100.0, 110.0];
        let ys = [0.5, 2.0, 6.0, 11.0];
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        assert!(fit.predict(85.0) < fit.predict(105.0));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn observation_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
            prop::collection::vec(((1.0..1000.0), (-100.0..100.0)), 2..64)
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(512))]

            #[test]
            fn test_fit_passes_through_centroid(obs in observation_strategy()) {
                let xs: Vec<f64> = obs.iter().map(|&(x, _)| x).collect();
                let ys: Vec<f64> = obs.iter().map(|&(_, y)| y).collect();

                if let Some(fit) = LinearFit::fit(&xs, &ys) {
                    let n = xs.len() as f64;
                    let mean_x = xs.iter().sum::<f64>() / n;
                    let mean_y = ys.iter().sum::<f64>() / n;

                    // The least-squares line always passes through
                    // (x̄, ȳ).
                    prop_assert!((fit.predict(mean_x) - mean_y).abs() < 1e-6);
                }
            }

            #[test]
            fn test_exact_line_recovered_everywhere(
                intercept in -50.0..50.0,
                slope in -10.0..10.0,
            ) {
                let xs: Vec<f64> = (0..16).map(|i| 1.0 + i as f64).collect();
                let ys: Vec<f64> = xs.iter().map(|x| intercept + slope * x).collect();

                let fit = LinearFit::fit(&xs, &ys).unwrap();
                prop_assert!((fit.intercept - intercept).abs() < 1e-6);
                prop_assert!((fit.slope - slope).abs() < 1e-8);
            }
        }
    }
}
