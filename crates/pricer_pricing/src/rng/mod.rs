//! # Random Number Generation Infrastructure
//!
//! This module provides random number generation facilities for Monte Carlo
//! simulations.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators support seeding for deterministic sequences
//! - **Independence**: Each simulated path owns a generator derived from the run
//!   seed and its path index; no generator is shared between workers
//! - **Efficiency**: Zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! // Create a seeded RNG for reproducible simulations
//! let mut rng = PricerRng::from_seed(12345);
//!
//! // Generate uniform random values in [0, 1)
//! let uniform_value = rng.gen_uniform();
//!
//! // Generate standard normal variates (mean=0, std=1)
//! let normal_value = rng.gen_normal();
//!
//! // Independent stream for path 17 of a run seeded with 12345
//! let mut path_rng = PricerRng::for_path(12345, 17);
//! let _ = path_rng.gen_normal();
//! ```

pub mod prng;

pub use prng::PricerRng;
