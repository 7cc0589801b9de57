//! Closed-form Black-Scholes Greeks.
//!
//! [`OptionGreeks`] owns a [`BlackScholesCore`] and a [`GreeksBundle`]
//! holding the five sensitivities, recomputed together whenever a
//! parameter changes.
//!
//! | Greek | Call | Put |
//! |-------|------|-----|
//! | Delta | N(d₁) | N(d₁) - 1 |
//! | Gamma | φ(d₁)/(S·σ·√T) | same |
//! | Vega  | S·φ(d₁)·√T | same |
//! | Theta | -S·φ(d₁)·σ/(2√T) - r·K·e^(-rT)·N(d₂) | -S·φ(d₁)·σ/(2√T) + r·K·e^(-rT)·N(-d₂) |
//! | Rho   | K·T·e^(-rT)·N(d₂) | -K·T·e^(-rT)·N(-d₂) |
//!
//! Each Greek checks its own inputs and evaluates to `NaN` on violation,
//! so one unavailable sensitivity never prevents the others.

use pricer_core::math::distributions::{norm_cdf, norm_pdf};
use pricer_core::traits::priceable::{GreeksBearing, Priceable};
use pricer_core::types::{OptionType, PricingError};

use super::black_scholes::{BlackScholesCore, ContractParameters};

/// The five sensitivities of one contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GreeksBundle {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

impl GreeksBundle {
    /// Returns true when every Greek is finite.
    pub fn is_finite(&self) -> bool {
        [self.delta, self.gamma, self.vega, self.theta, self.rho]
            .iter()
            .all(|g| g.is_finite())
    }
}

impl Default for GreeksBundle {
    fn default() -> Self {
        Self {
            delta: f64::NAN,
            gamma: f64::NAN,
            vega: f64::NAN,
            theta: f64::NAN,
            rho: f64::NAN,
        }
    }
}

/// Black-Scholes contract with cached Greeks.
///
/// # Examples
/// ```
/// use pricer_core::traits::priceable::GreeksBearing;
/// use pricer_models::analytical::OptionGreeks;
///
/// let greeks = OptionGreeks::new(100.0, 100.0, 1.0, 0.05, 0.2);
/// assert!((greeks.delta() - 0.6368).abs() < 1e-3);
/// assert!(greeks.gamma() > 0.0);
///
/// let unset = OptionGreeks::default();
/// assert!(unset.delta().is_nan());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptionGreeks {
    core: BlackScholesCore,
    greeks: GreeksBundle,
}

impl OptionGreeks {
    /// Creates a call contract and computes its Greeks.
    pub fn new(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiration: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Self {
        Self::from_core(BlackScholesCore::new(
            underlying_price,
            strike_price,
            time_to_expiration,
            risk_free_rate,
            volatility,
        ))
    }

    /// Creates a contract with an explicit option type and computes its Greeks.
    pub fn with_option_type(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiration: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self::from_core(BlackScholesCore::with_option_type(
            underlying_price,
            strike_price,
            time_to_expiration,
            risk_free_rate,
            volatility,
            option_type,
        ))
    }

    /// Creates the Greeks engine from a parameter set.
    pub fn from_parameters(params: ContractParameters) -> Self {
        Self::from_core(BlackScholesCore::from_parameters(params))
    }

    /// Wraps an existing core and computes its Greeks.
    pub fn from_core(core: BlackScholesCore) -> Self {
        let mut engine = Self {
            core,
            greeks: GreeksBundle::default(),
        };
        engine.recompute();
        engine
    }

    /// Recomputes the core's derived quantities and all five Greeks.
    pub fn recompute(&mut self) {
        self.core.recompute();
        self.refresh_greeks();
    }

    fn refresh_greeks(&mut self) {
        self.greeks = GreeksBundle {
            delta: self.calculate_delta(),
            gamma: self.calculate_gamma(),
            vega: self.calculate_vega(),
            theta: self.calculate_theta(),
            rho: self.calculate_rho(),
        };
    }

    /// Returns the embedded Black-Scholes core.
    #[inline]
    pub fn core(&self) -> &BlackScholesCore {
        &self.core
    }

    /// Returns the cached Greeks.
    #[inline]
    pub fn greeks(&self) -> &GreeksBundle {
        &self.greeks
    }

    /// Returns the contract parameters.
    #[inline]
    pub fn parameters(&self) -> &ContractParameters {
        self.core.parameters()
    }

    /// Closed-form price of the embedded contract (`NaN` on invalid inputs).
    #[inline]
    pub fn option_price(&self) -> f64 {
        self.core.option_price()
    }

    /// Applies `update` to the core, then refreshes the Greeks.
    fn update_core(&mut self, update: impl FnOnce(&mut BlackScholesCore)) {
        update(&mut self.core);
        self.refresh_greeks();
    }

    /// Sets the spot price.
    pub fn set_underlying_price(&mut self, value: f64) {
        self.update_core(|core| core.set_underlying_price(value));
    }

    /// Sets the strike price.
    pub fn set_strike_price(&mut self, value: f64) {
        self.update_core(|core| core.set_strike_price(value));
    }

    /// Sets the time to expiration.
    pub fn set_time_to_expiration(&mut self, value: f64) {
        self.update_core(|core| core.set_time_to_expiration(value));
    }

    /// Sets the risk-free rate.
    pub fn set_risk_free_rate(&mut self, value: f64) {
        self.update_core(|core| core.set_risk_free_rate(value));
    }

    /// Sets the volatility.
    pub fn set_volatility(&mut self, value: f64) {
        self.update_core(|core| core.set_volatility(value));
    }

    /// Sets the option type.
    pub fn set_option_type(&mut self, option_type: OptionType) {
        self.update_core(|core| core.set_option_type(option_type));
    }

    /// Replaces the whole parameter set.
    pub fn set_parameters(&mut self, params: ContractParameters) {
        self.update_core(|core| core.set_parameters(params));
    }

    /// Shared preconditions: a valid contract and a defined d₁.
    fn inputs_valid(&self) -> bool {
        self.core.parameters().in_domain() && !self.core.d1().is_nan()
    }

    /// Delta: N(d₁) for calls, N(d₁) - 1 for puts.
    pub fn calculate_delta(&self) -> f64 {
        if !self.inputs_valid() {
            return f64::NAN;
        }
        let n_d1 = norm_cdf(self.core.d1());
        match self.core.option_type() {
            OptionType::Call => n_d1,
            OptionType::Put => n_d1 - 1.0,
        }
    }

    /// Gamma: φ(d₁)/(S·σ·√T). Zero at expiry.
    pub fn calculate_gamma(&self) -> f64 {
        if !self.inputs_valid() {
            return f64::NAN;
        }
        let p = self.core.parameters();
        if p.time_to_expiration == 0.0 {
            return 0.0;
        }
        norm_pdf(self.core.d1())
            / (p.underlying_price * p.volatility * p.time_to_expiration.sqrt())
    }

    /// Vega: S·φ(d₁)·√T.
    pub fn calculate_vega(&self) -> f64 {
        if !self.inputs_valid() {
            return f64::NAN;
        }
        let p = self.core.parameters();
        p.underlying_price * norm_pdf(self.core.d1()) * p.time_to_expiration.sqrt()
    }

    /// Theta (time decay, usually negative). Zero at expiry.
    pub fn calculate_theta(&self) -> f64 {
        if !self.inputs_valid() || self.core.d2().is_nan() {
            return f64::NAN;
        }
        let p = self.core.parameters();
        if p.time_to_expiration == 0.0 {
            return 0.0;
        }

        let decay = -p.underlying_price * norm_pdf(self.core.d1()) * p.volatility
            / (2.0 * p.time_to_expiration.sqrt());
        let carry = p.risk_free_rate * p.strike_price * p.discount_factor();

        match p.option_type {
            OptionType::Call => decay - carry * norm_cdf(self.core.d2()),
            OptionType::Put => decay + carry * norm_cdf(-self.core.d2()),
        }
    }

    /// Rho: ±K·T·e^(-rT)·N(±d₂).
    pub fn calculate_rho(&self) -> f64 {
        if !self.inputs_valid() || self.core.d2().is_nan() {
            return f64::NAN;
        }
        let p = self.core.parameters();
        let scale = p.strike_price * p.time_to_expiration * p.discount_factor();

        match p.option_type {
            OptionType::Call => scale * norm_cdf(self.core.d2()),
            OptionType::Put => -scale * norm_cdf(-self.core.d2()),
        }
    }
}

impl Default for OptionGreeks {
    fn default() -> Self {
        Self::from_core(BlackScholesCore::default())
    }
}

impl Priceable for OptionGreeks {
    fn price(&self) -> Result<f64, PricingError> {
        self.core.price()
    }
}

impl GreeksBearing for OptionGreeks {
    fn delta(&self) -> f64 {
        self.greeks.delta
    }

    fn gamma(&self) -> f64 {
        self.greeks.gamma
    }

    fn vega(&self) -> f64 {
        self.greeks.vega
    }

    fn theta(&self) -> f64 {
        self.greeks.theta
    }

    fn rho(&self) -> f64 {
        self.greeks.rho
    }
}
