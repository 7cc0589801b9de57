//! Price command implementation
//!
//! Prices one contract three ways: closed-form Black-Scholes, the Heston
//! Fourier integral, and Heston Monte Carlo.

use std::fmt;
use std::time::{Duration, Instant};

use pricer_core::traits::priceable::Priceable;
use pricer_models::analytical::BlackScholesCore;
use pricer_models::models::heston::{HestonModel, HestonParameters};
use pricer_pricing::engine::HestonEngine;
use pricer_pricing::mc::MonteCarloResult;
use tracing::info;

use super::ContractArgs;
use crate::config::CliConfig;
use crate::Result;

/// Prices reported by the `price` command
#[derive(Debug, Clone, PartialEq)]
pub struct PriceReport {
    /// Closed-form Black-Scholes price at the contract volatility
    pub black_scholes: f64,
    /// Heston semi-analytic price
    pub heston_analytic: f64,
    /// Heston Monte Carlo estimate
    pub heston_monte_carlo: MonteCarloResult,
    /// Wall-clock time of all three
    pub elapsed: Duration,
}

impl fmt::Display for PriceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mc = &self.heston_monte_carlo;
        let (lo, hi) = mc.confidence_interval(1.96);
        writeln!(f, "Black-Scholes price:      {:.6}", self.black_scholes)?;
        writeln!(f, "Heston analytic price:    {:.6}", self.heston_analytic)?;
        writeln!(
            f,
            "Heston Monte Carlo price: {:.6} ± {:.6} (95% CI [{:.6}, {:.6}], {} paths, seed {})",
            mc.price, mc.std_error, lo, hi, mc.n_paths, mc.seed
        )?;
        write!(f, "Elapsed time: {:.3} seconds", self.elapsed.as_secs_f64())
    }
}

/// Run the price command
pub fn run(contract: &ContractArgs, heston: HestonParameters, config: &CliConfig) -> Result<PriceReport> {
    let start = Instant::now();
    let parameters = contract.to_parameters();

    info!(
        spot = parameters.underlying_price,
        strike = parameters.strike_price,
        expiry = parameters.time_to_expiration,
        option_type = %parameters.option_type,
        "Starting pricing..."
    );

    let black_scholes = BlackScholesCore::from_parameters(parameters).price()?;

    let engine = HestonEngine::new(HestonModel::new(parameters, heston))
        .with_integration(config.integration)
        .with_maybe_seed(config.monte_carlo.seed);
    let heston_analytic = engine.calculate_option_price()?;

    let mc_config = config.monte_carlo_config()?;
    let heston_monte_carlo = engine.monte_carlo(&mc_config)?;

    let report = PriceReport {
        black_scholes,
        heston_analytic,
        heston_monte_carlo,
        elapsed: start.elapsed(),
    };

    info!("Pricing complete");
    println!("{}", report);
    Ok(report)
}
