//! Model-validation statistics.

use crate::types::PricingError;

/// Root-mean-square error between model estimates and observed prices.
///
/// RMSE = sqrt( Σ (estimate_i - observed_i)² / n )
///
/// # Errors
/// - `PricingError::InvalidInput` if the slices differ in length, are empty,
///   or contain `NaN`
///
/// # Examples
/// ```
/// use pricer_core::math::statistics::root_mean_square_error;
///
/// let rmse = root_mean_square_error(&[1.0, 2.0], &[1.0, 4.0]).unwrap();
/// assert!((rmse - 2.0_f64.sqrt()).abs() < 1e-12);
///
/// assert!(root_mean_square_error(&[1.0], &[1.0, 2.0]).is_err());
/// ```
pub fn root_mean_square_error(estimates: &[f64], observed: &[f64]) -> Result<f64, PricingError> {
    if estimates.len() != observed.len() {
        return Err(PricingError::InvalidInput(format!(
            "estimate and observed series differ in length ({} vs {})",
            estimates.len(),
            observed.len()
        )));
    }
    if estimates.is_empty() {
        return Err(PricingError::InvalidInput(
            "RMSE requires at least one observation".to_string(),
        ));
    }

    let mut sum_sq = 0.0;
    for (i, (&estimate, &actual)) in estimates.iter().zip(observed).enumerate() {
        if estimate.is_nan() {
            return Err(PricingError::InvalidInput(format!(
                "estimate at index {} is NaN",
                i
            )));
        }
        if actual.is_nan() {
            return Err(PricingError::InvalidInput(format!(
                "observed price at index {} is NaN",
                i
            )));
        }
        let diff = estimate - actual;
        sum_sq += diff * diff;
    }

    Ok((sum_sq / estimates.len() as f64).sqrt())
}
