//! Dual-mode Heston pricing engine.
//!
//! [`HestonEngine`] owns a [`HestonModel`] and prices it either with the
//! semi-analytic Fourier integral or by Monte Carlo simulation of the
//! variance process. Both paths validate all ten model parameters before
//! doing any work and report failures as [`PricingError`].

use pricer_core::traits::priceable::Priceable;
use pricer_core::types::PricingError;
use pricer_models::models::heston::{HestonModel, IntegrationConfig};

use crate::mc::{HestonMonteCarlo, MonteCarloConfig, MonteCarloResult, SimulationError};

/// Pricing strategy selected for a [`HestonEngine`] run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PricingMethod {
    /// Fourier integral of the characteristic function.
    #[default]
    Analytic,
    /// Simulation of the variance process.
    MonteCarlo {
        /// Number of independent paths.
        num_simulations: usize,
        /// Euler steps per path.
        num_time_steps: usize,
    },
}

impl PricingMethod {
    /// Monte Carlo with the default 10,000 paths of 1,000 steps.
    pub fn monte_carlo_default() -> Self {
        let defaults = MonteCarloConfig::default();
        PricingMethod::MonteCarlo {
            num_simulations: defaults.n_paths(),
            num_time_steps: defaults.n_steps(),
        }
    }

    /// Short label for logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            PricingMethod::Analytic => "analytic",
            PricingMethod::MonteCarlo { .. } => "monte-carlo",
        }
    }
}

/// Heston pricing engine with a selectable pricing strategy.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionType;
/// use pricer_models::analytical::ContractParameters;
/// use pricer_models::models::heston::{HestonModel, HestonParameters};
/// use pricer_pricing::engine::{HestonEngine, PricingMethod};
///
/// let contract = ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2)
///     .with_option_type(OptionType::Put);
/// let model = HestonModel::new(contract, HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7));
/// let engine = HestonEngine::new(model).with_seed(11);
///
/// let put = engine.price(PricingMethod::Analytic).unwrap();
/// assert!(put > 5.0 && put < 6.5);
/// ```
#[derive(Clone, Debug)]
pub struct HestonEngine {
    model: HestonModel,
    integration: IntegrationConfig,
    seed: Option<u64>,
}

impl HestonEngine {
    /// Creates an engine with the default integration grid and no fixed seed.
    pub fn new(model: HestonModel) -> Self {
        Self {
            model,
            integration: IntegrationConfig::default(),
            seed: None,
        }
    }

    /// Replaces the integration grid of the analytic path.
    pub fn with_integration(mut self, integration: IntegrationConfig) -> Self {
        self.integration = integration;
        self
    }

    /// Fixes the seed of every Monte Carlo run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the Monte Carlo seed.
    pub fn with_maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the model.
    #[inline]
    pub fn model(&self) -> &HestonModel {
        &self.model
    }

    /// Returns the model for in-place parameter updates.
    #[inline]
    pub fn model_mut(&mut self) -> &mut HestonModel {
        &mut self.model
    }

    /// Returns the integration grid.
    #[inline]
    pub fn integration(&self) -> &IntegrationConfig {
        &self.integration
    }

    /// Returns the Monte Carlo seed, if fixed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Semi-analytic price.
    pub fn calculate_option_price(&self) -> Result<f64, PricingError> {
        self.price(PricingMethod::Analytic)
    }

    /// Analytic price, or a Monte Carlo estimate when `use_monte_carlo` is set.
    ///
    /// The path and step counts are ignored by the analytic path.
    pub fn calculate_option_price_with(
        &self,
        use_monte_carlo: bool,
        num_simulations: usize,
        num_time_steps: usize,
    ) -> Result<f64, PricingError> {
        let method = if use_monte_carlo {
            PricingMethod::MonteCarlo {
                num_simulations,
                num_time_steps,
            }
        } else {
            PricingMethod::Analytic
        };
        self.price(method)
    }

    /// Prices the model with the given strategy.
    ///
    /// # Errors
    /// - `PricingError::InvalidInput` for invalid model parameters or
    ///   simulation settings
    /// - `PricingError::NumericalInstability` if the analytic integral is
    ///   not finite
    pub fn price(&self, method: PricingMethod) -> Result<f64, PricingError> {
        match method {
            PricingMethod::Analytic => Ok(self.model.price_analytic(&self.integration)?),
            PricingMethod::MonteCarlo {
                num_simulations,
                num_time_steps,
            } => {
                self.model.validate()?;
                let config = MonteCarloConfig::builder()
                    .n_paths(num_simulations)
                    .n_steps(num_time_steps)
                    .maybe_seed(self.seed)
                    .build()
                    .map_err(SimulationError::from)?;
                Ok(self.monte_carlo(&config)?.price)
            }
        }
    }

    /// Runs a Monte Carlo simulation and returns the full result.
    ///
    /// The engine seed, when set, overrides an unseeded configuration.
    pub fn monte_carlo(&self, config: &MonteCarloConfig) -> Result<MonteCarloResult, SimulationError> {
        let config = match (config.seed(), self.seed) {
            (None, Some(seed)) => MonteCarloConfig::builder()
                .n_paths(config.n_paths())
                .n_steps(config.n_steps())
                .seed(seed)
                .build()?,
            _ => config.clone(),
        };
        HestonMonteCarlo::new(config)?.price(&self.model)
    }
}

impl Priceable for HestonEngine {
    fn price(&self) -> Result<f64, PricingError> {
        self.calculate_option_price()
    }
}
