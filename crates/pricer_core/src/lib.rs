//! # pricer_core: Numerical Foundation for the Option Pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Standard-normal approximation used by every pricing formula (`math::distributions`)
//! - Fixed-step trapezoidal quadrature (`math::quadrature`)
//! - Model-validation statistics such as RMSE (`math::statistics`)
//! - Capability traits for priceable, Greeks-bearing and stochastic-volatility models (`traits`)
//! - Contract and error types: `OptionType`, `PricingError` (`types`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::types::OptionType;
//!
//! let p = norm_cdf(0.0_f64);
//! assert!((p - 0.5).abs() < 1e-7);
//!
//! let kind: OptionType = "put".parse().unwrap();
//! assert_eq!(kind, OptionType::Put);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `OptionType`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
