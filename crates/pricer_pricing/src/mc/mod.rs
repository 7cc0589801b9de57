//! Monte Carlo pricing of European options under Heston variance dynamics.
//!
//! # Architecture
//!
//! ```text
//! HestonMonteCarlo
//! ├── MonteCarloConfig   (paths, steps, optional seed)
//! ├── PricerRng          (one stream per path)
//! └── price()
//!     ├── simulate_variance()   Euler full truncation
//!     └── Black-Scholes at √V_T, averaged over paths
//! ```
//!
//! # Example
//!
//! ```rust
//! use pricer_models::analytical::ContractParameters;
//! use pricer_models::models::heston::{HestonModel, HestonParameters};
//! use pricer_pricing::mc::{HestonMonteCarlo, MonteCarloConfig};
//!
//! let config = MonteCarloConfig::builder()
//!     .n_paths(1_000)
//!     .n_steps(50)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let model = HestonModel::new(
//!     ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2),
//!     HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7),
//! );
//!
//! let result = HestonMonteCarlo::new(config).unwrap().price(&model).unwrap();
//! let (lo, hi) = result.confidence_interval(1.96);
//! assert!(lo <= result.price && result.price <= hi);
//! ```

pub mod config;
pub mod error;
pub mod heston;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_PATHS, DEFAULT_STEPS, MAX_PATHS, MAX_STEPS};
pub use error::{ConfigError, SimulationError};
pub use heston::{HestonMonteCarlo, MonteCarloResult};
