//! Heston stochastic volatility model.
//!
//! The Heston model is described by the SDE system:
//! ```text
//! dS = r * S * dt + sqrt(V) * S * dW_S
//! dV = kappa * (theta - V) * dt + sigma * sqrt(V) * dW_V
//! E[dW_S * dW_V] = rho * dt
//! ```
//! where:
//! - S = asset price
//! - V = instantaneous variance
//! - r = risk-free rate
//! - kappa = mean-reversion speed
//! - theta = long-run variance
//! - sigma = volatility of variance (vol-of-vol)
//! - rho = correlation between asset and variance
//!
//! ## Feller Condition
//!
//! Sufficient condition for the variance to stay strictly positive:
//! ```text
//! 2 * kappa * theta > sigma^2
//! ```
//!
//! ## Semi-analytic Pricing
//!
//! Calls are priced with the Lewis (2001) single-integral form
//! ```text
//! C = S - sqrt(S*K) * e^(-rT/2) / pi * ∫₀^∞ Re[e^(iux) φ(u - i/2)] / (u² + 1/4) du
//! x = ln(S/K) + rT
//! ```
//! where φ is the characteristic function of ln(S_T / F_T), evaluated in the
//! Albrecher et al. ("little Heston trap") branch. The integral is truncated
//! to a finite interval, widened for short-dated or low-variance contracts,
//! and evaluated with the composite trapezoidal rule. Puts follow from
//! put-call parity. Prices outside the no-arbitrage bounds are rejected.
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::ContractParameters;
//! use pricer_models::models::heston::{HestonModel, HestonParameters, IntegrationConfig};
//!
//! let model = HestonModel::new(
//!     ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2),
//!     HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7),
//! );
//! assert!(model.heston_parameters().satisfies_feller());
//!
//! let price = model.price_analytic(&IntegrationConfig::default()).unwrap();
//! assert!((price - 10.394).abs() < 1e-2);
//! ```

use std::f64::consts::PI;

use num_complex::Complex64;
use pricer_core::math::quadrature::trapezoid;
use pricer_core::traits::priceable::{GreeksBearing, Priceable, StochasticVolatility};
use pricer_core::types::{OptionType, PricingError};
use thiserror::Error;

use crate::analytical::{
    black_scholes_price, AnalyticalError, BlackScholesCore, ContractParameters, OptionGreeks,
};

/// Heston model error type.
///
/// Represents failures during parameter validation and pricing.
///
/// # Examples
///
/// ```
/// use pricer_models::models::heston::HestonError;
///
/// let err = HestonError::InvalidSpot(-100.0);
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HestonError {
    /// A parameter is NaN or infinite
    #[error("Non-finite parameter: {0}")]
    NonFinite(String),

    /// Spot price must be positive
    #[error("Invalid spot price: S = {0} (must be positive)")]
    InvalidSpot(f64),

    /// Strike price must be positive
    #[error("Invalid strike price: K = {0} (must be positive)")]
    InvalidStrike(f64),

    /// Time to expiration must not be negative
    #[error("Invalid time to expiration: T = {0} (must be non-negative)")]
    InvalidMaturity(f64),

    /// Volatility must be positive
    #[error("Invalid volatility: sigma = {0} (must be positive)")]
    InvalidVolatility(f64),

    /// Variance-process parameter must not be negative
    #[error("Invalid {name}: {value} (must be non-negative)")]
    NegativeParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Correlation must lie in [-1, 1]
    #[error("Invalid correlation: rho = {0} (must lie in [-1, 1])")]
    InvalidCorrelation(f64),

    /// Simulation settings rejected
    #[error("Invalid simulation settings: {0}")]
    InvalidSimulation(String),

    /// Quadrature settings rejected
    #[error("Invalid integration settings: {0}")]
    InvalidIntegration(String),

    /// Computation produced a non-finite result
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<AnalyticalError> for HestonError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::NonFinite { name, value } => {
                HestonError::NonFinite(format!("{} = {}", name, value))
            }
            AnalyticalError::InvalidSpot { spot } => HestonError::InvalidSpot(spot),
            AnalyticalError::InvalidStrike { strike } => HestonError::InvalidStrike(strike),
            AnalyticalError::InvalidMaturity { maturity } => HestonError::InvalidMaturity(maturity),
            AnalyticalError::InvalidVolatility { volatility } => {
                HestonError::InvalidVolatility(volatility)
            }
            AnalyticalError::NumericalInstability { message } => {
                HestonError::NumericalInstability(message)
            }
        }
    }
}

impl From<HestonError> for PricingError {
    fn from(err: HestonError) -> Self {
        match err {
            HestonError::NumericalInstability(_) => {
                PricingError::NumericalInstability(err.to_string())
            }
            _ => PricingError::InvalidInput(err.to_string()),
        }
    }
}

/// Variance-process parameters of the Heston model.
///
/// # Fields
///
/// * `v0` - initial variance (v0 >= 0)
/// * `kappa` - mean-reversion speed (kappa >= 0)
/// * `theta` - long-run variance (theta >= 0)
/// * `sigma` - vol-of-vol (sigma >= 0)
/// * `rho` - correlation (-1 <= rho <= 1)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonParameters {
    /// Initial variance
    pub v0: f64,
    /// Mean-reversion speed
    pub kappa: f64,
    /// Long-run variance
    pub theta: f64,
    /// Volatility of variance
    pub sigma: f64,
    /// Correlation between asset and variance Brownian motions
    pub rho: f64,
}

impl HestonParameters {
    /// Creates a parameter set without validating it.
    pub fn new(v0: f64, kappa: f64, theta: f64, sigma: f64, rho: f64) -> Self {
        Self {
            v0,
            kappa,
            theta,
            sigma,
            rho,
        }
    }

    /// Validates the parameter set.
    ///
    /// # Errors
    /// - `HestonError::NonFinite` for NaN or infinite values
    /// - `HestonError::NegativeParameter` if v0, kappa, theta or sigma < 0
    /// - `HestonError::InvalidCorrelation` if rho lies outside [-1, 1]
    pub fn validate(&self) -> Result<(), HestonError> {
        let named = [
            ("v0", self.v0),
            ("kappa", self.kappa),
            ("theta", self.theta),
            ("sigma", self.sigma),
            ("rho", self.rho),
        ];
        if let Some((name, value)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(HestonError::NonFinite(format!("{} = {}", name, value)));
        }
        if let Some(&(name, value)) = named[..4].iter().find(|(_, v)| *v < 0.0) {
            return Err(HestonError::NegativeParameter { name, value });
        }
        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(HestonError::InvalidCorrelation(self.rho));
        }
        Ok(())
    }

    /// Check the Feller condition (2 * kappa * theta > sigma^2).
    ///
    /// ```
    /// use pricer_models::models::heston::HestonParameters;
    ///
    /// // 2 * 1.5 * 0.04 = 0.12 > 0.3^2 = 0.09
    /// assert!(HestonParameters::new(0.04, 1.5, 0.04, 0.3, -0.7).satisfies_feller());
    /// // 2 * 0.5 * 0.04 = 0.04 < 0.5^2 = 0.25
    /// assert!(!HestonParameters::new(0.04, 0.5, 0.04, 0.5, -0.7).satisfies_feller());
    /// ```
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta > self.sigma * self.sigma
    }

    /// Feller ratio 2 * kappa * theta / sigma^2 (infinite when sigma = 0).
    pub fn feller_ratio(&self) -> f64 {
        let denominator = self.sigma * self.sigma;
        if denominator > 0.0 {
            2.0 * self.kappa * self.theta / denominator
        } else {
            f64::INFINITY
        }
    }

    /// Expected variance E[V_t] = theta + (v0 - theta) * e^(-kappa t).
    pub fn expected_variance(&self, t: f64) -> f64 {
        self.theta + (self.v0 - self.theta) * (-self.kappa * t).exp()
    }

    /// Time-average of the expected variance over [0, t].
    ///
    /// Equals the integrated variance when sigma = 0.
    pub fn mean_integrated_variance(&self, t: f64) -> f64 {
        let kt = self.kappa * t;
        if kt == 0.0 {
            return self.v0;
        }
        self.theta + (self.v0 - self.theta) * (1.0 - (-kt).exp()) / kt
    }
}

impl Default for HestonParameters {
    /// All-NaN parameters: an unconfigured model fails validation.
    fn default() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }
}

/// Decay widths of the Fourier integrand kept inside the integration window.
const DECAY_WIDTH: f64 = 6.5;

/// Step ceiling when the integration window is widened.
pub const MAX_WIDENED_STEPS: usize = 1_000_000;

/// Round-off allowed outside the no-arbitrage bounds, relative to max(S, K).
const BOUNDS_TOLERANCE: f64 = 1e-8;

/// Truncation and resolution of the Fourier integral.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegrationConfig {
    /// Upper limit of the integration variable u
    pub upper_limit: f64,
    /// Number of trapezoid subintervals
    pub steps: usize,
}

impl IntegrationConfig {
    /// Checks that the interval and step count are usable.
    pub fn validate(&self) -> Result<(), HestonError> {
        if !self.upper_limit.is_finite() || self.upper_limit <= 0.0 {
            return Err(HestonError::InvalidIntegration(format!(
                "upper limit {} must be positive and finite",
                self.upper_limit
            )));
        }
        if self.steps == 0 {
            return Err(HestonError::InvalidIntegration(
                "step count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl IntegrationConfig {
    /// Grid covering the decay of the integrand for a given total variance.
    ///
    /// The integrand falls off like exp(-w·u²/2) for total variance `w`, so
    /// the upper limit is raised to at least `DECAY_WIDTH / √w` and the step
    /// count grows with it to keep the spacing. Steps are capped at
    /// `MAX_WIDENED_STEPS`. A grid that already covers the decay is returned
    /// unchanged.
    pub fn widened_for(&self, total_variance: f64) -> Self {
        if total_variance.is_nan() || total_variance <= 0.0 {
            return *self;
        }
        let needed = DECAY_WIDTH / total_variance.sqrt();
        if needed <= self.upper_limit {
            return *self;
        }
        let spacing = self.upper_limit / self.steps as f64;
        let steps = (needed / spacing).ceil().min(MAX_WIDENED_STEPS as f64) as usize;
        Self {
            upper_limit: needed,
            steps: steps.max(self.steps),
        }
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            upper_limit: 100.0,
            steps: 1000,
        }
    }
}

/// Heston model for a single European contract.
///
/// Owns the Black-Scholes contract (with its Greeks) and the variance-process
/// parameters. Like the Black-Scholes core, it can be built from NaN
/// parameters; pricing then fails with a [`HestonError`].
#[derive(Debug, Clone, PartialEq)]
pub struct HestonModel {
    contract: OptionGreeks,
    heston: HestonParameters,
}

impl HestonModel {
    /// Creates a model from a contract and variance-process parameters.
    pub fn new(contract: ContractParameters, heston: HestonParameters) -> Self {
        Self {
            contract: OptionGreeks::from_parameters(contract),
            heston,
        }
    }

    /// Returns the contract parameters.
    #[inline]
    pub fn contract(&self) -> &ContractParameters {
        self.contract.parameters()
    }

    /// Returns the variance-process parameters.
    #[inline]
    pub fn heston_parameters(&self) -> &HestonParameters {
        &self.heston
    }

    /// Returns the embedded Black-Scholes core.
    #[inline]
    pub fn core(&self) -> &BlackScholesCore {
        self.contract.core()
    }

    /// Returns the embedded Greeks engine.
    #[inline]
    pub fn option_greeks(&self) -> &OptionGreeks {
        &self.contract
    }

    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.contract().option_type
    }

    /// Replaces the contract parameters.
    pub fn set_contract(&mut self, contract: ContractParameters) {
        self.contract.set_parameters(contract);
    }

    /// Sets the spot price.
    pub fn set_underlying_price(&mut self, value: f64) {
        self.contract.set_underlying_price(value);
    }

    /// Sets the strike price.
    pub fn set_strike_price(&mut self, value: f64) {
        self.contract.set_strike_price(value);
    }

    /// Sets the time to expiration.
    pub fn set_time_to_expiration(&mut self, value: f64) {
        self.contract.set_time_to_expiration(value);
    }

    /// Sets the risk-free rate.
    pub fn set_risk_free_rate(&mut self, value: f64) {
        self.contract.set_risk_free_rate(value);
    }

    /// Sets the Black-Scholes volatility.
    pub fn set_volatility(&mut self, value: f64) {
        self.contract.set_volatility(value);
    }

    /// Sets the option type.
    pub fn set_option_type(&mut self, option_type: OptionType) {
        self.contract.set_option_type(option_type);
    }

    /// Replaces the variance-process parameters.
    pub fn set_heston_parameters(&mut self, heston: HestonParameters) {
        self.heston = heston;
    }

    /// Sets the initial variance.
    pub fn set_v0(&mut self, value: f64) {
        self.heston.v0 = value;
    }

    /// Sets the mean-reversion speed.
    pub fn set_kappa(&mut self, value: f64) {
        self.heston.kappa = value;
    }

    /// Sets the long-run variance.
    pub fn set_theta(&mut self, value: f64) {
        self.heston.theta = value;
    }

    /// Sets the vol-of-vol.
    pub fn set_sigma(&mut self, value: f64) {
        self.heston.sigma = value;
    }

    /// Sets the correlation.
    pub fn set_rho(&mut self, value: f64) {
        self.heston.rho = value;
    }

    /// Validates all ten parameters before any pricing work starts.
    ///
    /// # Errors
    /// Returns the first violation found, contract parameters first.
    pub fn validate(&self) -> Result<(), HestonError> {
        self.contract().validate()?;
        self.heston.validate()
    }

    /// Characteristic function of ln(S_T / F_T) at a complex argument.
    ///
    /// φ(-i) = φ(0) = 1 for any valid parameter set. Requires sigma > 0.
    pub fn characteristic_function(&self, u: Complex64) -> Complex64 {
        let HestonParameters {
            v0,
            kappa,
            theta,
            sigma,
            rho,
        } = self.heston;
        let t = self.contract().time_to_expiration;
        let i = Complex64::i();
        let sigma_sq = sigma * sigma;

        let alpha = -0.5 * (u * u + i * u);
        let beta = kappa - rho * sigma * i * u;
        let gamma = 0.5 * sigma_sq;
        let d = (beta * beta - 4.0 * alpha * gamma).sqrt();

        let r_minus = (beta - d) / sigma_sq;
        let r_plus = (beta + d) / sigma_sq;
        let g = r_minus / r_plus;
        let decay = (-d * t).exp();

        let big_d = r_minus * (1.0 - decay) / (1.0 - g * decay);
        let big_c = kappa * (r_minus * t - (2.0 / sigma_sq) * ((1.0 - g * decay) / (1.0 - g)).ln());

        (big_c * theta + big_d * v0).exp()
    }

    /// Semi-analytic price by Fourier integration.
    ///
    /// # Errors
    /// - Any parameter violation reported by [`HestonModel::validate`]
    /// - `HestonError::InvalidIntegration` for an unusable quadrature grid
    /// - `HestonError::NumericalInstability` if the integral is not finite or
    ///   the price falls outside the no-arbitrage bounds
    pub fn price_analytic(&self, integration: &IntegrationConfig) -> Result<f64, HestonError> {
        self.validate()?;
        integration.validate()?;

        let p = *self.contract();
        if p.time_to_expiration == 0.0 {
            return Ok(p.intrinsic_value());
        }

        if !self.heston.satisfies_feller() {
            tracing::warn!(
                feller_ratio = self.heston.feller_ratio(),
                "Feller condition violated; variance can reach zero"
            );
        }

        let variance = self.heston.mean_integrated_variance(p.time_to_expiration);
        // Zero vol-of-vol or a variance pinned at zero: deterministic variance path
        if self.heston.sigma == 0.0 || variance == 0.0 {
            return Ok(black_scholes_price(
                p.underlying_price,
                p.strike_price,
                p.time_to_expiration,
                p.risk_free_rate,
                variance.sqrt(),
                p.option_type,
            ));
        }

        let grid = integration.widened_for(variance * p.time_to_expiration);
        let x = (p.underlying_price / p.strike_price).ln() + p.risk_free_rate * p.time_to_expiration;
        let integral = trapezoid(
            |u| {
                let phase = Complex64::new(0.0, u * x).exp();
                let phi = self.characteristic_function(Complex64::new(u, -0.5));
                (phase * phi).re / (u * u + 0.25)
            },
            0.0,
            grid.upper_limit,
            grid.steps,
        );

        let discount = p.discount_factor();
        let call = p.underlying_price
            - (p.underlying_price * p.strike_price).sqrt() * discount.sqrt() / PI * integral;

        let price = match p.option_type {
            OptionType::Call => call,
            OptionType::Put => call - p.underlying_price + p.strike_price * discount,
        };

        if !price.is_finite() {
            return Err(HestonError::NumericalInstability(format!(
                "Fourier integral evaluated to {}",
                integral
            )));
        }

        let (lower, upper) = no_arbitrage_bounds(&p);
        let tolerance = BOUNDS_TOLERANCE * p.underlying_price.max(p.strike_price);
        if price < lower - tolerance || price > upper + tolerance {
            return Err(HestonError::NumericalInstability(format!(
                "price {} outside no-arbitrage bounds [{}, {}] (u <= {}, {} steps)",
                price, lower, upper, grid.upper_limit, grid.steps
            )));
        }

        tracing::debug!(
            price,
            integral,
            upper_limit = grid.upper_limit,
            steps = grid.steps,
            "Heston semi-analytic price"
        );
        Ok(price.clamp(lower, upper))
    }

    /// Correlated standard normals (Z₁, ρ·Z₁ + √(1-ρ²)·Z₁′) from two
    /// independent draws.
    #[inline]
    pub fn correlated_normals(&self, z1: f64, z2: f64) -> (f64, f64) {
        let rho = self.heston.rho;
        let complement = (1.0 - rho * rho).max(0.0).sqrt();
        (z1, rho * z1 + complement * z2)
    }

    /// One Euler step of the variance process with full truncation.
    ///
    /// V' = max(V + κ(θ - V)dt + σ√(V·dt)·Z₂, 0) where
    /// Z₂ = ρ·Z₁ + √(1-ρ²)·Z₁′.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::ContractParameters;
    /// use pricer_models::models::heston::{HestonModel, HestonParameters};
    ///
    /// let model = HestonModel::new(
    ///     ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2),
    ///     HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7),
    /// );
    /// // A large negative shock is floored at zero
    /// assert_eq!(model.variance_step(0.04, 0.01, 50.0, 0.0), 0.0);
    /// ```
    #[inline]
    pub fn variance_step(&self, v: f64, dt: f64, z1: f64, z2: f64) -> f64 {
        let HestonParameters {
            kappa,
            theta,
            sigma,
            ..
        } = self.heston;
        let v = v.max(0.0);
        let (_, dw_v) = self.correlated_normals(z1, z2);

        let next = v + kappa * (theta - v) * dt + sigma * (v * dt).sqrt() * dw_v;
        next.max(0.0)
    }
}

impl Default for HestonModel {
    /// Every contract and variance-process parameter is `NaN`.
    fn default() -> Self {
        Self::new(ContractParameters::default(), HestonParameters::default())
    }
}

impl Priceable for HestonModel {
    fn price(&self) -> Result<f64, PricingError> {
        Ok(self.price_analytic(&IntegrationConfig::default())?)
    }
}

impl GreeksBearing for HestonModel {
    fn delta(&self) -> f64 {
        self.contract.delta()
    }

    fn gamma(&self) -> f64 {
        self.contract.gamma()
    }

    fn vega(&self) -> f64 {
        self.contract.vega()
    }

    fn theta(&self) -> f64 {
        self.contract.theta()
    }

    fn rho(&self) -> f64 {
        self.contract.rho()
    }
}

impl StochasticVolatility for HestonModel {
    fn initial_variance(&self) -> f64 {
        self.heston.v0
    }

    fn mean_reversion(&self) -> f64 {
        self.heston.kappa
    }

    fn long_run_variance(&self) -> f64 {
        self.heston.theta
    }

    fn vol_of_vol(&self) -> f64 {
        self.heston.sigma
    }

    fn correlation(&self) -> f64 {
        self.heston.rho
    }
}

/// Model-free price bounds of a European option.
///
/// Call: max(S - K·e^(-rT), 0) ≤ C ≤ S. Put: max(K·e^(-rT) - S, 0) ≤ P ≤ K·e^(-rT).
fn no_arbitrage_bounds(p: &ContractParameters) -> (f64, f64) {
    let discounted_strike = p.strike_price * p.discount_factor();
    match p.option_type {
        OptionType::Call => ((p.underlying_price - discounted_strike).max(0.0), p.underlying_price),
        OptionType::Put => ((discounted_strike - p.underlying_price).max(0.0), discounted_strike),
    }
}
