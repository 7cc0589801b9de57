//! Capability traits implemented by the pricing models.
//!
//! This module defines the capability set a model can expose:
//! - Price calculation (`Priceable`)
//! - Closed-form sensitivities (`GreeksBearing`)
//! - Stochastic-variance parameters (`StochasticVolatility`)
//!
//! Models compose these capabilities by delegation instead of inheriting
//! from one another; a Heston model, for example, owns a Black-Scholes
//! contract and forwards `GreeksBearing` to it.

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod priceable;

pub use priceable::{GreeksBearing, Priceable, StochasticVolatility};
