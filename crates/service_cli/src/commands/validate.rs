//! Validate command implementation
//!
//! Reprices observed call quotes under the chosen model and reports the
//! root-mean-square error against the observed prices.

use std::fmt;
use std::path::Path;

use pricer_core::math::statistics::root_mean_square_error;
use pricer_core::traits::priceable::Priceable;
use pricer_core::types::PricingError;
use pricer_models::analytical::{BlackScholesCore, ContractParameters};
use pricer_models::models::heston::{HestonModel, HestonParameters};
use pricer_pricing::engine::HestonEngine;
use pricer_pricing::mc::MonteCarloConfig;
use tracing::{info, warn};

use super::ModelChoice;
use crate::config::CliConfig;
use crate::error_log::ErrorLog;
use crate::inputs::{read_market_data, MarketQuote};
use crate::{CliError, Result};

/// Model-independent inputs of a validation run
#[derive(Debug, Clone, Copy)]
pub struct ValidationInputs {
    /// Risk-free rate applied to every quote
    pub rate: f64,
    /// Black-Scholes volatility applied to every quote
    pub volatility: f64,
    /// Pricing model
    pub model: ModelChoice,
    /// Variance-process parameters for the Heston models
    pub heston: HestonParameters,
}

/// Outcome of the validate command
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Model used
    pub model: ModelChoice,
    /// Quotes repriced
    pub priced: usize,
    /// Quotes loaded but not priced
    pub skipped: usize,
    /// RMSE between model and observed prices
    pub rmse: f64,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Model: {}\nQuotes priced: {} (skipped {})\nRMSE: {:.6}",
            self.model, self.priced, self.skipped, self.rmse
        )
    }
}

struct QuotePricer<'a> {
    inputs: ValidationInputs,
    config: &'a CliConfig,
    mc_config: MonteCarloConfig,
}

impl QuotePricer<'_> {
    fn price(&self, quote: &MarketQuote) -> std::result::Result<f64, PricingError> {
        let contract = ContractParameters::new(
            quote.stock_price,
            quote.strike_price,
            quote.time_to_expiration(),
            self.inputs.rate,
            self.inputs.volatility,
        );

        match self.inputs.model {
            ModelChoice::BlackScholes => BlackScholesCore::from_parameters(contract).price(),
            ModelChoice::HestonAnalytic => HestonEngine::new(HestonModel::new(contract, self.inputs.heston))
                .with_integration(self.config.integration)
                .calculate_option_price(),
            ModelChoice::HestonMonteCarlo => {
                let engine = HestonEngine::new(HestonModel::new(contract, self.inputs.heston));
                Ok(engine.monte_carlo(&self.mc_config)?.price)
            }
        }
    }
}

/// Run the validate command
pub fn run(
    market_data: &Path,
    inputs: ValidationInputs,
    config: &CliConfig,
    error_log: &ErrorLog,
) -> Result<ValidationReport> {
    info!(path = %market_data.display(), model = %inputs.model, "Starting validation...");

    let quotes = read_market_data(market_data, error_log)?;
    let pricer = QuotePricer {
        inputs,
        config,
        mc_config: config.monte_carlo_config()?,
    };

    let mut estimates = Vec::with_capacity(quotes.len());
    let mut observed = Vec::with_capacity(quotes.len());
    for quote in &quotes {
        match pricer.price(quote) {
            Ok(price) => {
                estimates.push(price);
                observed.push(quote.call_price);
            }
            Err(e) => {
                warn!(?quote, error = %e, "Skipping quote that could not be priced");
                error_log.record(&format!("Skipping quote {:?}: {}", quote, e));
            }
        }
    }

    if estimates.is_empty() {
        return Err(CliError::MarketData("No quote could be priced".to_string()));
    }

    let rmse = root_mean_square_error(&estimates, &observed)?;
    let report = ValidationReport {
        model: inputs.model,
        priced: estimates.len(),
        skipped: quotes.len() - estimates.len(),
        rmse,
    };

    info!(rmse, priced = report.priced, "Validation complete");
    println!("{}", report);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::black_scholes_price;
    use pricer_core::types::OptionType;
    use std::io::Write;

    fn inputs(model: ModelChoice) -> ValidationInputs {
        ValidationInputs {
            rate: 0.05,
            volatility: 0.2,
            model,
            heston: CliConfig::default().heston,
        }
    }

    fn write_quotes(dir: &tempfile::TempDir, rows: &[(f64, f64, f64, f64)]) -> std::path::PathBuf {
        let path = dir.path().join("quotes.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Expiration,StockPrice,StrikePrice,CallPrice").unwrap();
        for (t, s, k, c) in rows {
            writeln!(file, "{},{},{},{}", t, s, k, c).unwrap();
        }
        path
    }

    #[test]
    fn test_black_scholes_reprices_own_quotes_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        let rows: Vec<(f64, f64, f64, f64)> = [(365.0, 100.0, 100.0), (182.5, 100.0, 110.0), (730.0, 95.0, 90.0)]
            .iter()
            .map(|&(t, s, k)| {
                let c = black_scholes_price(s, k, t / 365.0, 0.05, 0.2, OptionType::Call);
                (t, s, k, c)
            })
            .collect();
        let path = write_quotes(&dir, &rows);

        let report = run(&path, inputs(ModelChoice::BlackScholes), &CliConfig::default(), &log).unwrap();
        assert_eq!(report.priced, 3);
        assert_eq!(report.skipped, 0);
        assert!(report.rmse < 1e-9, "rmse = {}", report.rmse);
    }

    #[test]
    fn test_heston_analytic_rmse() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        // Observed price 1.0 above the Heston reference value
        let path = write_quotes(&dir, &[(365.0, 100.0, 100.0, 11.3942)]);

        let report = run(&path, inputs(ModelChoice::HestonAnalytic), &CliConfig::default(), &log).unwrap();
        assert_relative_eq!(report.rmse, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_heston_monte_carlo_rmse_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        let path = write_quotes(&dir, &[(365.0, 100.0, 100.0, 10.3942)]);

        let mut config = CliConfig::default();
        config.monte_carlo.paths = 2_000;
        config.monte_carlo.steps = 50;
        config.monte_carlo.seed = Some(3);

        let report = run(&path, inputs(ModelChoice::HestonMonteCarlo), &config, &log).unwrap();
        assert!(report.rmse < 1.0, "rmse = {}", report.rmse);
    }

    #[test]
    fn test_unpriceable_quote_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        // Zero spot passes ingestion but fails pricing
        let path = write_quotes(&dir, &[(365.0, 0.0, 100.0, 1.0), (365.0, 100.0, 100.0, 10.4506)]);

        let report = run(&path, inputs(ModelChoice::BlackScholes), &CliConfig::default(), &log).unwrap();
        assert_eq!(report.priced, 1);
        assert_eq!(report.skipped, 1);
        assert!(std::fs::read_to_string(log.path()).unwrap().contains("Skipping quote"));
    }

    #[test]
    fn test_missing_market_data() {
        let dir = tempfile::tempdir().unwrap();
        let log = ErrorLog::new(dir.path().join("error.log"));
        let err = run(
            &dir.path().join("absent.csv"),
            inputs(ModelChoice::BlackScholes),
            &CliConfig::default(),
            &log,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
