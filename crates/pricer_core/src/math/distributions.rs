//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//! - `cdf_k_factor`: The rational-approximation helper `K(x)`
//!
//! All functions are generic over `T: Float` and propagate `NaN`: a `NaN`
//! argument produces a `NaN` result, never a plausible probability.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Abramowitz and Stegun 26.2.17 constants.
const P: f64 = 0.231_641_9;
const A1: f64 = 0.319_381_530;
const A2: f64 = -0.356_563_782;
const A3: f64 = 1.781_477_937;
const A4: f64 = -1.821_255_978;
const A5: f64 = 1.330_274_429;

/// Rational-approximation helper `K(x) = 1 / (1 + 0.2316419·|x|)`.
///
/// Black-Scholes models cache `K(d1)` next to `d1` and `d2`.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::cdf_k_factor;
///
/// assert_eq!(cdf_k_factor(0.0_f64), 1.0);
/// assert_eq!(cdf_k_factor(-1.0_f64), cdf_k_factor(1.0_f64));
/// assert!(cdf_k_factor(f64::NAN).is_nan());
/// ```
#[inline]
pub fn cdf_k_factor<T: Float>(x: T) -> T {
    let one = T::one();
    let p = T::from(P).unwrap();
    one / (one + p * x.abs())
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) with the five-term rational
/// approximation of Abramowitz and Stegun (26.2.17):
///
/// ```text
/// N(x) = 1 - φ(x)·(a1·K + a2·K² + a3·K³ + a4·K⁴ + a5·K⁵),  x >= 0
/// N(x) = 1 - N(-x),                                         x <  0
/// ```
///
/// # Accuracy
/// Absolute error below 7.5e-8 for all finite x. The sign branch makes
/// `N(-x) = 1 - N(x)` hold by construction.
///
/// # NaN handling
/// Returns `NaN` for a `NaN` argument.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0_f64);
/// assert!((cdf_0 - 0.5).abs() < 1e-7);
///
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// assert!(norm_cdf(f64::NAN).is_nan());
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    if x.is_nan() {
        return x;
    }

    let one = T::one();
    let abs_x = x.abs();
    let k = cdf_k_factor(abs_x);

    // Horner's method for polynomial evaluation
    let poly = k
        * (T::from(A1).unwrap()
            + k * (T::from(A2).unwrap()
                + k * (T::from(A3).unwrap()
                    + k * (T::from(A4).unwrap() + k * T::from(A5).unwrap()))));

    let upper_tail = norm_pdf(abs_x) * poly;

    if x >= T::zero() {
        one - upper_tail
    } else {
        upper_tail
    }
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_pdf;
///
/// let pdf_0 = norm_pdf(0.0_f64);
/// assert!((pdf_0 - 0.3989422804).abs() < 1e-7);
///
/// let pdf_1 = norm_pdf(1.0_f64);
/// assert!((pdf_1 - 0.2419707245).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();

    frac_1_sqrt_2pi * (-half * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    // ==========================================================
    // norm_cdf tests
    // ==========================================================

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.841344746, epsilon = 1e-6);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.158655254, epsilon = 1e-6);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022750131948179195, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(3.0_f64), 0.9986501019683699, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_extreme_values() {
        assert_relative_eq!(norm_cdf(10.0_f64), 1.0, epsilon = 1e-6);
        assert_relative_eq!(norm_cdf(-10.0_f64), 0.0, epsilon = 1e-6);

        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_norm_cdf_nan_propagates() {
        assert!(norm_cdf(f64::NAN).is_nan());
        assert!(norm_cdf(f32::NAN).is_nan());
    }

    #[test]
    fn test_norm_cdf_monotonic() {
        let values: Vec<f64> = (-50..=50).map(|i| i as f64 * 0.1).collect();
        for pair in values.windows(2) {
            assert!(
                norm_cdf(pair[1]) > norm_cdf(pair[0]),
                "CDF not monotonic at x = {}",
                pair[0]
            );
        }
    }

    #[test]
    fn test_norm_cdf_bounds() {
        for i in -100..=100 {
            let x = i as f64 * 0.1;
            let result = norm_cdf(x);
            assert!((0.0..=1.0).contains(&result), "CDF out of [0, 1] at x = {}", x);
        }
    }

    #[test]
    fn test_norm_cdf_f32_compatibility() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-5);
    }

    // ==========================================================
    // cdf_k_factor tests
    // ==========================================================

    #[test]
    fn test_k_factor_values() {
        assert_eq!(cdf_k_factor(0.0_f64), 1.0);
        assert_relative_eq!(cdf_k_factor(1.0_f64), 1.0 / 1.2316419, epsilon = 1e-12);
        assert_eq!(cdf_k_factor(f64::INFINITY), 0.0);
    }

    // ==========================================================
    // norm_pdf tests
    // ==========================================================

    #[test]
    fn test_norm_pdf_at_zero() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(1.0_f64), 0.24197072451914337, epsilon = 1e-10);
        assert_relative_eq!(norm_pdf(2.0_f64), 0.05399096651318806, epsilon = 1e-10);
        assert_relative_eq!(norm_pdf(3.0_f64), 0.004431848411938008, epsilon = 1e-10);
    }

    #[test]
    fn test_norm_pdf_nan_propagates() {
        assert!(norm_pdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_cdf_pdf_relationship() {
        // Numerical derivative of the CDF approximates the PDF
        let h = 1e-4;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let numerical_derivative = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical_derivative, norm_pdf(x), epsilon = 1e-3);
        }
    }

    // ==========================================================
    // Property-based tests
    // ==========================================================

    proptest! {
        #[test]
        fn prop_norm_cdf_symmetry(x in -40.0_f64..40.0) {
            prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-8);
        }

        #[test]
        fn prop_norm_pdf_even(x in -40.0_f64..40.0) {
            prop_assert_eq!(norm_pdf(x), norm_pdf(-x));
        }
    }
}
