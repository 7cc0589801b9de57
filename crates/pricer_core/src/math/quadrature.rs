//! Fixed-step numerical integration.

/// Composite trapezoidal rule over `[lower, upper]` with `steps` subintervals.
///
/// Each interior node is evaluated once. The integrand may return `NaN`, in
/// which case the result is `NaN`.
///
/// Returns `NaN` when `steps` is zero or either bound is not finite.
///
/// # Examples
/// ```
/// use pricer_core::math::quadrature::trapezoid;
///
/// // ∫₀¹ x² dx = 1/3
/// let area = trapezoid(|x| x * x, 0.0, 1.0, 1000);
/// assert!((area - 1.0 / 3.0).abs() < 1e-6);
/// ```
pub fn trapezoid<F>(integrand: F, lower: f64, upper: f64, steps: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    if steps == 0 || !lower.is_finite() || !upper.is_finite() {
        return f64::NAN;
    }

    let h = (upper - lower) / steps as f64;
    let mut sum = 0.5 * (integrand(lower) + integrand(upper));
    for j in 1..steps {
        sum += integrand(lower + j as f64 * h);
    }
    sum * h
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_is_exact() {
        let area = trapezoid(|x| 3.0 * x + 1.0, 0.0, 2.0, 7);
        assert_relative_eq!(area, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_converges_for_smooth_integrand() {
        let area = trapezoid(f64::sin, 0.0, std::f64::consts::PI, 1000);
        assert_relative_eq!(area, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_reversed_bounds_flip_sign() {
        let forward = trapezoid(|x| x * x, 0.0, 1.0, 100);
        let backward = trapezoid(|x| x * x, 1.0, 0.0, 100);
        assert_relative_eq!(forward, -backward, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_steps_is_nan() {
        assert!(trapezoid(|x| x, 0.0, 1.0, 0).is_nan());
    }

    #[test]
    fn test_non_finite_bounds_are_nan() {
        assert!(trapezoid(|x| x, 0.0, f64::INFINITY, 10).is_nan());
        assert!(trapezoid(|x| x, f64::NAN, 1.0, 10).is_nan());
    }

    #[test]
    fn test_nan_integrand_propagates() {
        assert!(trapezoid(|x| if x > 0.5 { f64::NAN } else { x }, 0.0, 1.0, 10).is_nan());
    }

    #[test]
    fn test_evaluation_count() {
        use std::cell::Cell;
        let calls = Cell::new(0usize);
        trapezoid(
            |x| {
                calls.set(calls.get() + 1);
                x
            },
            0.0,
            1.0,
            1000,
        );
        assert_eq!(calls.get(), 1001);
    }
}
