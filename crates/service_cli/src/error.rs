//! CLI error types

use pricer_core::types::PricingError;
use pricer_pricing::mc::SimulationError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `heston-pricer` commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument rejected before any pricing work
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Market data file unusable as a whole
    #[error("Market data error: {0}")]
    MarketData(String),

    /// Configuration could not be built
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Pricing or validation failure
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Monte Carlo run rejected
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// CSV reader failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
