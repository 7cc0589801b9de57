//! Numerical building blocks shared by the pricing models.
//!
//! - [`distributions`]: standard-normal CDF/PDF approximation
//! - [`quadrature`]: fixed-step trapezoidal integration
//! - [`statistics`]: model-validation error metrics

pub mod distributions;
pub mod quadrature;
pub mod statistics;

pub use distributions::{cdf_k_factor, norm_cdf, norm_pdf};
pub use quadrature::trapezoid;
pub use statistics::root_mean_square_error;
