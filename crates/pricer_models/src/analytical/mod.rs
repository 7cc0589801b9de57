//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes model for lognormal dynamics
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//!
//! ## Design Principles
//!
//! - **NaN propagation**: every derived quantity turns into `NaN` when one
//!   of its inputs is missing or outside the model's domain
//! - **Explicit recomputation**: cached values are refreshed by setters or
//!   by `recompute()`, never written from outside

pub mod black_scholes;
pub mod error;
pub mod greeks;

// Re-export main types at module level
pub use black_scholes::{black_scholes_price, BlackScholesCore, ContractParameters};
pub use error::AnalyticalError;
pub use greeks::{GreeksBundle, OptionGreeks};
