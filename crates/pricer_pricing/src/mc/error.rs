//! Error types for the Monte Carlo engine.
//!
//! - [`ConfigError`]: rejected simulation settings, raised at build time
//! - [`SimulationError`]: everything that can stop a pricing run before it
//!   starts

use pricer_core::types::PricingError;
use pricer_models::models::heston::HestonError;
use thiserror::Error;

/// Configuration error for the Monte Carlo engine.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),
    /// Step count outside valid range [1, 10_000].
    #[error("Invalid step count {0}: must be in range [1, 10_000]")]
    InvalidStepCount(usize),
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Failure of a Monte Carlo pricing run.
///
/// Both variants are raised before the first path is simulated.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimulationError {
    /// Simulation settings rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Model parameters rejected.
    #[error(transparent)]
    Model(#[from] HestonError),
}

impl From<ConfigError> for HestonError {
    fn from(err: ConfigError) -> Self {
        HestonError::InvalidSimulation(err.to_string())
    }
}

impl From<SimulationError> for PricingError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::Config(config) => HestonError::from(config).into(),
            SimulationError::Model(model) => model.into(),
        }
    }
}
