//! Traits for priceable, Greeks-bearing and stochastic-volatility models.

use crate::types::PricingError;

/// Trait for models that produce an option price.
///
/// This is the terminal, caller-facing entry point: an unavailable price is
/// reported as an error rather than a `NaN`, so a caller can tell "no price"
/// apart from "pricing failed".
///
/// ```
/// use pricer_core::traits::priceable::Priceable;
/// use pricer_core::types::PricingError;
///
/// struct Fixed(f64);
///
/// impl Priceable for Fixed {
///     fn price(&self) -> Result<f64, PricingError> {
///         if self.0.is_nan() {
///             return Err(PricingError::NumericalInstability("price is NaN".into()));
///         }
///         Ok(self.0)
///     }
/// }
///
/// assert_eq!(Fixed(4.2).price().unwrap(), 4.2);
/// assert!(Fixed(f64::NAN).price().is_err());
/// ```
pub trait Priceable {
    /// Calculate the price of the option.
    ///
    /// # Invariants
    /// - A returned `Ok` value is finite
    /// - The method must be pure (no side effects)
    fn price(&self) -> Result<f64, PricingError>;
}

/// Trait for models exposing the five first/second-order sensitivities.
///
/// Each accessor returns `NaN` when the underlying inputs are missing or
/// invalid, so Greeks can fail independently of each other.
pub trait GreeksBearing {
    /// ∂V/∂S
    fn delta(&self) -> f64;
    /// ∂²V/∂S²
    fn gamma(&self) -> f64;
    /// ∂V/∂σ
    fn vega(&self) -> f64;
    /// ∂V/∂t
    fn theta(&self) -> f64;
    /// ∂V/∂r
    fn rho(&self) -> f64;

    /// Returns true when every Greek is a finite number.
    fn greeks_are_finite(&self) -> bool {
        [self.delta(), self.gamma(), self.vega(), self.theta(), self.rho()]
            .iter()
            .all(|g| g.is_finite())
    }
}

/// Trait for models driven by a mean-reverting square-root variance process.
///
/// ```text
/// dV = κ(θ - V)dt + σᵥ√V dZ
/// ```
pub trait StochasticVolatility {
    /// Initial variance V₀.
    fn initial_variance(&self) -> f64;
    /// Mean-reversion speed κ.
    fn mean_reversion(&self) -> f64;
    /// Long-run variance θ.
    fn long_run_variance(&self) -> f64;
    /// Volatility of variance σᵥ.
    fn vol_of_vol(&self) -> f64;
    /// Correlation ρ between the asset and variance Brownian motions.
    fn correlation(&self) -> f64;

    /// Feller condition 2κθ > σᵥ², under which the variance stays strictly positive.
    fn satisfies_feller(&self) -> bool {
        2.0 * self.mean_reversion() * self.long_run_variance() > self.vol_of_vol().powi(2)
    }
}
