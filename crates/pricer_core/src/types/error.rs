//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from terminal, caller-facing pricing and
//!   validation operations
//!
//! Chained intermediate quantities (d1, d2, Greeks) do not use this type;
//! they propagate `NaN` instead so partially configured models can still be
//! inspected. See the crate-level documentation of `pricer_models`.

use std::fmt;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `InvalidOptionType`: Option type string not recognised
/// - `NumericalInstability`: Computation produced a non-finite value
/// - `ModelFailure`: Model assumptions violated
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Unrecognised option type
    InvalidOptionType(String),

    /// Numerical instability during computation
    NumericalInstability(String),

    /// Model failed to produce valid result
    ModelFailure(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::InvalidOptionType(kind) => {
                write!(f, "Invalid option type: {} (expected call or put)", kind)
            }
            PricingError::NumericalInstability(msg) => {
                write!(f, "Numerical instability: {}", msg)
            }
            PricingError::ModelFailure(msg) => write!(f, "Model failure: {}", msg),
        }
    }
}

impl std::error::Error for PricingError {}

impl PricingError {
    /// Returns true for errors caused by the caller's inputs rather than the model.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::PricingError;
    ///
    /// assert!(PricingError::InvalidInput("x".into()).is_input_error());
    /// assert!(!PricingError::ModelFailure("x".into()).is_input_error());
    /// ```
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PricingError::InvalidInput(_) | PricingError::InvalidOptionType(_)
        )
    }
}
