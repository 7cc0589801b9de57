//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Argument groups shared
//! between commands live here.

pub mod greeks;
pub mod price;
pub mod validate;

use clap::{Args, ValueEnum};
use pricer_core::types::OptionType;
use pricer_models::analytical::ContractParameters;
use pricer_models::models::heston::HestonParameters;

/// Contract terms of a single European option
#[derive(Args, Debug, Clone)]
pub struct ContractArgs {
    /// Spot price of the underlying
    #[arg(long, default_value_t = 100.0)]
    pub spot: f64,

    /// Strike price
    #[arg(long, default_value_t = 100.0)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long, default_value_t = 1.0)]
    pub expiry: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub rate: f64,

    /// Black-Scholes volatility
    #[arg(long, default_value_t = 0.2)]
    pub volatility: f64,

    /// Option type (call, put)
    #[arg(short = 't', long, default_value = "call")]
    pub option_type: OptionType,
}

impl Default for ContractArgs {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            expiry: 1.0,
            rate: 0.05,
            volatility: 0.2,
            option_type: OptionType::Call,
        }
    }
}

impl ContractArgs {
    /// Contract parameters as given
    pub fn to_parameters(&self) -> ContractParameters {
        ContractParameters::new(self.spot, self.strike, self.expiry, self.rate, self.volatility)
            .with_option_type(self.option_type)
    }
}

/// Overrides of the configured variance-process parameters
#[derive(Args, Debug, Clone, Default)]
pub struct HestonArgs {
    /// Initial variance
    #[arg(long)]
    pub v0: Option<f64>,

    /// Mean-reversion speed
    #[arg(long)]
    pub kappa: Option<f64>,

    /// Long-run variance
    #[arg(long)]
    pub theta: Option<f64>,

    /// Volatility of variance
    #[arg(long)]
    pub vol_of_vol: Option<f64>,

    /// Correlation between spot and variance shocks
    #[arg(long, allow_negative_numbers = true)]
    pub rho: Option<f64>,
}

impl HestonArgs {
    /// `base` with every given field replaced
    pub fn resolve(&self, base: HestonParameters) -> HestonParameters {
        HestonParameters {
            v0: self.v0.unwrap_or(base.v0),
            kappa: self.kappa.unwrap_or(base.kappa),
            theta: self.theta.unwrap_or(base.theta),
            sigma: self.vol_of_vol.unwrap_or(base.sigma),
            rho: self.rho.unwrap_or(base.rho),
        }
    }
}

/// Monte Carlo overrides
#[derive(Args, Debug, Clone, Default)]
pub struct SimulationArgs {
    /// Number of simulated paths
    #[arg(long)]
    pub paths: Option<usize>,

    /// Euler steps per path
    #[arg(long)]
    pub steps: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Model used to reprice market quotes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelChoice {
    /// Closed-form Black-Scholes
    BlackScholes,
    /// Heston Fourier integral
    #[default]
    HestonAnalytic,
    /// Heston Monte Carlo simulation
    HestonMonteCarlo,
}

impl ModelChoice {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::BlackScholes => "black-scholes",
            ModelChoice::HestonAnalytic => "heston-analytic",
            ModelChoice::HestonMonteCarlo => "heston-monte-carlo",
        }
    }
}

impl std::fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heston_args_override_only_given_fields() {
        let base = HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7);
        let args = HestonArgs {
            kappa: Some(1.5),
            rho: Some(0.1),
            ..Default::default()
        };
        let resolved = args.resolve(base);
        assert_eq!(resolved, HestonParameters::new(0.04, 1.5, 0.04, 0.3, 0.1));
    }

    #[test]
    fn test_contract_args_to_parameters() {
        let args = ContractArgs {
            option_type: OptionType::Put,
            ..Default::default()
        };
        let params = args.to_parameters();
        assert_eq!(params.underlying_price, 100.0);
        assert_eq!(params.option_type, OptionType::Put);
    }

    #[test]
    fn test_model_choice_names() {
        assert_eq!(ModelChoice::default(), ModelChoice::HestonAnalytic);
        assert_eq!(ModelChoice::HestonMonteCarlo.to_string(), "heston-monte-carlo");
    }
}
