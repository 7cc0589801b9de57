//! # Pricer Pricing (Layer 3: Pricing Engines)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns the Layer 2 models into executable pricing runs:
//! - Seeded pseudo-random number generation with independent per-path
//!   streams (`rng`)
//! - Monte Carlo configuration and the parallel Heston variance simulator
//!   (`mc`)
//! - The dual-mode `HestonEngine`, selecting between the semi-analytic
//!   Fourier pricer and Monte Carlo simulation (`engine`)
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_models::analytical::ContractParameters;
//! use pricer_models::models::heston::{HestonModel, HestonParameters};
//! use pricer_pricing::engine::HestonEngine;
//!
//! let model = HestonModel::new(
//!     ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2),
//!     HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7),
//! );
//! let engine = HestonEngine::new(model).with_seed(7);
//!
//! let analytic = engine.calculate_option_price().unwrap();
//! let simulated = engine.calculate_option_price_with(true, 2_000, 100).unwrap();
//! assert!((analytic - simulated).abs() < 2.0);
//! ```
//!
//! ## Concurrency
//!
//! Monte Carlo paths are distributed over the rayon thread pool with a
//! fold/reduce of per-worker partial sums. Every path draws from its own
//! generator derived from the run seed and the path index, so results are
//! reproducible for a fixed seed regardless of the thread count.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engine;
pub mod mc;
pub mod rng;
