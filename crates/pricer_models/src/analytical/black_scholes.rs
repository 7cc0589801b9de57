//! Black-Scholes pricing core for European options.
//!
//! This module provides the contract/market parameter set, the cached
//! derived quantities d₁, d₂ and K, and the closed-form option price.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## NaN Policy
//!
//! A default-constructed core holds `NaN` in every parameter. Any parameter
//! that is `NaN`, infinite or outside the model's domain (S ≤ 0, K ≤ 0,
//! T < 0, σ ≤ 0) turns d₁ into `NaN`, and every quantity read from d₁
//! follows. Use [`Priceable::price`] for a checked, caller-facing price.

use pricer_core::math::distributions::{cdf_k_factor, norm_cdf};
use pricer_core::traits::priceable::Priceable;
use pricer_core::types::{OptionType, PricingError};

use super::error::AnalyticalError;

/// Contract and market parameters of a European option.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::ContractParameters;
///
/// let params = ContractParameters::new(100.0, 95.0, 0.5, 0.03, 0.25)
///     .with_option_type(OptionType::Put);
/// assert!(params.option_type.is_put());
/// assert!(params.validate().is_ok());
///
/// assert!(ContractParameters::default().underlying_price.is_nan());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractParameters {
    /// Spot price of the underlying (S)
    pub underlying_price: f64,
    /// Strike price (K)
    pub strike_price: f64,
    /// Time to expiration in years (T)
    pub time_to_expiration: f64,
    /// Continuously compounded risk-free rate (r)
    pub risk_free_rate: f64,
    /// Volatility of the underlying (σ)
    pub volatility: f64,
    /// Call or put
    #[cfg_attr(feature = "serde", serde(default))]
    pub option_type: OptionType,
}

impl ContractParameters {
    /// Creates a call contract.
    pub fn new(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiration: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Self {
        Self {
            underlying_price,
            strike_price,
            time_to_expiration,
            risk_free_rate,
            volatility,
            option_type: OptionType::Call,
        }
    }

    /// Returns the same contract with a different option type.
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Returns true when every parameter lies in the model's domain.
    #[inline]
    pub fn in_domain(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks every parameter, reporting the first violation.
    ///
    /// # Errors
    /// - `AnalyticalError::NonFinite` if any parameter is NaN or infinite
    /// - `AnalyticalError::InvalidSpot` if S <= 0
    /// - `AnalyticalError::InvalidStrike` if K <= 0
    /// - `AnalyticalError::InvalidMaturity` if T < 0
    /// - `AnalyticalError::InvalidVolatility` if σ <= 0
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        let named = [
            ("underlying_price", self.underlying_price),
            ("strike_price", self.strike_price),
            ("time_to_expiration", self.time_to_expiration),
            ("risk_free_rate", self.risk_free_rate),
            ("volatility", self.volatility),
        ];
        if let Some(&(name, value)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AnalyticalError::NonFinite { name, value });
        }

        if self.underlying_price <= 0.0 {
            return Err(AnalyticalError::InvalidSpot {
                spot: self.underlying_price,
            });
        }
        if self.strike_price <= 0.0 {
            return Err(AnalyticalError::InvalidStrike {
                strike: self.strike_price,
            });
        }
        if self.time_to_expiration < 0.0 {
            return Err(AnalyticalError::InvalidMaturity {
                maturity: self.time_to_expiration,
            });
        }
        if self.volatility <= 0.0 {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        Ok(())
    }

    /// Discount factor e^(-rT).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiration).exp()
    }

    /// Intrinsic value max(S - K, 0) for calls, max(K - S, 0) for puts.
    #[inline]
    pub fn intrinsic_value(&self) -> f64 {
        (self.option_type.sign() * (self.underlying_price - self.strike_price)).max(0.0)
    }
}

impl Default for ContractParameters {
    /// An unconfigured call: every numeric field is `NaN`.
    fn default() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }
}

/// Cached intermediates of the Black-Scholes formula.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DerivedQuantities {
    d1: f64,
    d2: f64,
    k: f64,
}

impl DerivedQuantities {
    const UNSET: Self = Self {
        d1: f64::NAN,
        d2: f64::NAN,
        k: f64::NAN,
    };
}

/// Black-Scholes core for European option pricing.
///
/// Holds a [`ContractParameters`] value and the derived d₁, d₂ and K,
/// which are recomputed eagerly on construction and after every setter.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::BlackScholesCore;
///
/// let call = BlackScholesCore::new(100.0, 100.0, 1.0, 0.05, 0.2);
/// let put = BlackScholesCore::with_option_type(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Put);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call.option_price() - put.option_price() - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
///
/// // An unconfigured core prices to NaN
/// assert!(BlackScholesCore::default().option_price().is_nan());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BlackScholesCore {
    params: ContractParameters,
    derived: DerivedQuantities,
}

impl BlackScholesCore {
    /// Creates a call option core.
    ///
    /// # Arguments
    /// * `underlying_price` - Spot price S
    /// * `strike_price` - Strike price K
    /// * `time_to_expiration` - Time to expiration T in years
    /// * `risk_free_rate` - Risk-free rate r
    /// * `volatility` - Volatility σ
    pub fn new(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiration: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> Self {
        Self::from_parameters(ContractParameters::new(
            underlying_price,
            strike_price,
            time_to_expiration,
            risk_free_rate,
            volatility,
        ))
    }

    /// Creates a core with an explicit option type.
    pub fn with_option_type(
        underlying_price: f64,
        strike_price: f64,
        time_to_expiration: f64,
        risk_free_rate: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        Self::from_parameters(
            ContractParameters::new(
                underlying_price,
                strike_price,
                time_to_expiration,
                risk_free_rate,
                volatility,
            )
            .with_option_type(option_type),
        )
    }

    /// Creates a core from a parameter set.
    pub fn from_parameters(params: ContractParameters) -> Self {
        let mut core = Self {
            params,
            derived: DerivedQuantities::UNSET,
        };
        core.recompute();
        core
    }

    /// Refreshes d₁, d₂ and K from the current parameters.
    pub fn recompute(&mut self) {
        let d1 = self.calculate_d1();
        let d2 = self.calculate_d2();
        self.derived = DerivedQuantities {
            d1,
            d2,
            k: cdf_k_factor(d1),
        };
    }

    /// Returns the parameter set.
    #[inline]
    pub fn parameters(&self) -> &ContractParameters {
        &self.params
    }

    /// Returns the spot price S.
    #[inline]
    pub fn underlying_price(&self) -> f64 {
        self.params.underlying_price
    }

    /// Returns the strike price K.
    #[inline]
    pub fn strike_price(&self) -> f64 {
        self.params.strike_price
    }

    /// Returns the time to expiration T.
    #[inline]
    pub fn time_to_expiration(&self) -> f64 {
        self.params.time_to_expiration
    }

    /// Returns the risk-free rate r.
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.params.risk_free_rate
    }

    /// Returns the volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.params.volatility
    }

    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.params.option_type
    }

    /// Cached d₁.
    #[inline]
    pub fn d1(&self) -> f64 {
        self.derived.d1
    }

    /// Cached d₂.
    #[inline]
    pub fn d2(&self) -> f64 {
        self.derived.d2
    }

    /// Cached K = 1/(1 + 0.2316419·|d₁|), the factor of the CDF approximation.
    #[inline]
    pub fn k(&self) -> f64 {
        self.derived.k
    }

    /// Sets the spot price and recomputes derived quantities.
    pub fn set_underlying_price(&mut self, value: f64) {
        self.params.underlying_price = value;
        self.recompute();
    }

    /// Sets the strike price and recomputes derived quantities.
    pub fn set_strike_price(&mut self, value: f64) {
        self.params.strike_price = value;
        self.recompute();
    }

    /// Sets the time to expiration and recomputes derived quantities.
    pub fn set_time_to_expiration(&mut self, value: f64) {
        self.params.time_to_expiration = value;
        self.recompute();
    }

    /// Sets the risk-free rate and recomputes derived quantities.
    pub fn set_risk_free_rate(&mut self, value: f64) {
        self.params.risk_free_rate = value;
        self.recompute();
    }

    /// Sets the volatility and recomputes derived quantities.
    pub fn set_volatility(&mut self, value: f64) {
        self.params.volatility = value;
        self.recompute();
    }

    /// Sets the option type. d₁ and d₂ do not depend on it.
    pub fn set_option_type(&mut self, option_type: OptionType) {
        self.params.option_type = option_type;
    }

    /// Replaces the whole parameter set and recomputes derived quantities.
    pub fn set_parameters(&mut self, params: ContractParameters) {
        self.params = params;
        self.recompute();
    }

    /// Computes d₁ from the current parameters.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// # Returns
    /// `NaN` if any parameter is invalid. At T = 0 the result is ±∞, or
    /// zero at the money, so the price collapses to intrinsic value.
    pub fn calculate_d1(&self) -> f64 {
        let p = &self.params;
        if !p.in_domain() {
            return f64::NAN;
        }

        let log_moneyness = (p.underlying_price / p.strike_price).ln();

        if p.time_to_expiration == 0.0 {
            return if log_moneyness > 0.0 {
                f64::INFINITY
            } else if log_moneyness < 0.0 {
                f64::NEG_INFINITY
            } else {
                0.0
            };
        }

        let drift = (p.risk_free_rate + 0.5 * p.volatility * p.volatility) * p.time_to_expiration;
        (log_moneyness + drift) / (p.volatility * p.time_to_expiration.sqrt())
    }

    /// Computes d₂ = d₁ - σ√T from the current parameters.
    pub fn calculate_d2(&self) -> f64 {
        let d1 = self.calculate_d1();
        if d1.is_nan() {
            return f64::NAN;
        }
        d1 - self.params.volatility * self.params.time_to_expiration.sqrt()
    }

    /// Computes the option price from the cached d₁ and d₂.
    ///
    /// Returns `NaN` when either is `NaN`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholesCore;
    ///
    /// let core = BlackScholesCore::new(100.0, 100.0, 1.0, 0.05, 0.2);
    /// assert!((core.option_price() - 10.4506).abs() < 1e-3);
    /// ```
    pub fn option_price(&self) -> f64 {
        let DerivedQuantities { d1, d2, .. } = self.derived;
        if d1.is_nan() || d2.is_nan() {
            return f64::NAN;
        }

        let p = &self.params;
        let discounted_strike = p.strike_price * p.discount_factor();

        match p.option_type {
            // C = S·N(d₁) - K·e^(-rT)·N(d₂)
            OptionType::Call => {
                p.underlying_price * norm_cdf(d1) - discounted_strike * norm_cdf(d2)
            }
            // P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
            OptionType::Put => {
                discounted_strike * norm_cdf(-d2) - p.underlying_price * norm_cdf(-d1)
            }
        }
    }
}

impl Default for BlackScholesCore {
    /// A core with every parameter and derived quantity set to `NaN`.
    fn default() -> Self {
        Self::from_parameters(ContractParameters::default())
    }
}

impl Priceable for BlackScholesCore {
    fn price(&self) -> Result<f64, PricingError> {
        self.params.validate()?;

        let price = self.option_price();
        if !price.is_finite() {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("Black-Scholes price evaluated to {}", price),
            }
            .into());
        }
        Ok(price)
    }
}

/// Stateless Black-Scholes price.
///
/// Used where the volatility changes per evaluation, such as the conditional
/// valuation of a simulated variance path. Unlike [`BlackScholesCore`], a
/// zero volatility is accepted: when σ√T = 0 the price is the discounted
/// forward intrinsic value max(±(S - K·e^(-rT)), 0).
///
/// # Returns
/// `NaN` if any input is non-finite, S ≤ 0, K ≤ 0, T < 0 or σ < 0.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::black_scholes_price;
///
/// let price = black_scholes_price(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call);
/// assert!((price - 10.4506).abs() < 1e-3);
///
/// // Zero volatility: discounted forward intrinsic value
/// let floor = black_scholes_price(100.0, 100.0, 1.0, 0.05, 0.0, OptionType::Call);
/// assert!((floor - (100.0 - 100.0 * (-0.05_f64).exp())).abs() < 1e-12);
/// ```
pub fn black_scholes_price(
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    option_type: OptionType,
) -> f64 {
    let finite = [spot, strike, expiry, rate, volatility]
        .iter()
        .all(|v| v.is_finite());
    if !finite || spot <= 0.0 || strike <= 0.0 || expiry < 0.0 || volatility < 0.0 {
        return f64::NAN;
    }

    let discounted_strike = strike * (-rate * expiry).exp();
    let vol_sqrt_t = volatility * expiry.sqrt();
    let sign = option_type.sign();

    if vol_sqrt_t == 0.0 {
        return (sign * (spot - discounted_strike)).max(0.0);
    }

    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * expiry) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    sign * (spot * norm_cdf(sign * d1) - discounted_strike * norm_cdf(sign * d2))
}
