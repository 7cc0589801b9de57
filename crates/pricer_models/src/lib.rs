//! # Pricer Models (L2: Business Logic)
//!
//! European option models built on the `pricer_core` numerical layer.
//!
//! This crate provides:
//! - The Black-Scholes core: contract parameters, cached d1/d2/K and the
//!   closed-form price (`analytical::black_scholes`)
//! - Closed-form Greeks composed over the core (`analytical::greeks`)
//! - The Heston stochastic-volatility model: parameters, characteristic
//!   function, semi-analytic pricer and the variance-process Euler step
//!   (`models::heston`)
//!
//! ## Error Policy
//!
//! Quantities meant to be chained (d1, d2, K, the Greeks and
//! `option_price()`) propagate `NaN` and never fail. Terminal operations
//! (`Priceable::price`, Heston pricing) validate their inputs and return a
//! typed error.
//!
//! ## Design Principles
//!
//! - **Composition over inheritance**: `OptionGreeks` owns a
//!   `BlackScholesCore`; `HestonModel` owns an `OptionGreeks` and the
//!   variance-process parameters
//! - **Derived state is private**: d1, d2 and K are recomputed by every
//!   setter and can only be read

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod models;
