//! Heston Pricer CLI - Command Line Operations for European Option Pricing
//!
//! Library half of the `heston-pricer` binary: configuration, market data
//! ingestion, the persistent error log and the command implementations.
//!
//! # Commands
//!
//! - `heston-pricer price` - Price one contract with Black-Scholes, Heston
//!   analytic and Heston Monte Carlo
//! - `heston-pricer greeks` - Print the five Black-Scholes Greeks
//! - `heston-pricer validate --market-data <file>` - Reprice observed quotes
//!   and report the RMSE
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate orchestrates the pricer
//! crates to provide a unified command-line interface.

pub mod commands;
pub mod config;
pub mod error;
pub mod error_log;
pub mod inputs;

pub use error::{CliError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
