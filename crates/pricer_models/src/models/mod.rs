//! Stochastic models for option pricing.
//!
//! - [`heston`]: Heston stochastic volatility model with a semi-analytic
//!   Fourier pricer and the Euler step of its variance process

pub mod heston;

pub use heston::{HestonError, HestonModel, HestonParameters, IntegrationConfig};
