//! Contract and error types shared by every pricing layer.
//!
//! This module provides:
//! - `option_type`: The CALL/PUT contract variant
//! - `error`: Structured error types for pricing and statistics operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`OptionType`] from `option_type`
//! - [`PricingError`] from `error`

pub mod error;
pub mod option_type;

pub use error::PricingError;
pub use option_type::OptionType;
