//! Monte Carlo pricing under the Heston variance process.
//!
//! Each path evolves the variance with the Euler full-truncation step of
//! [`HestonModel::variance_step`] over `n_steps` intervals of T / n_steps.
//! The terminal variance V_T gives the path volatility √V_T, with which the
//! contract is valued in closed form; the price is the mean over all paths.
//!
//! ```text
//! price = (1/N) Σ BS(S, K, T, r, √V_T⁽ⁱ⁾)
//! ```
//!
//! Paths run in parallel on the rayon pool. Each path owns a generator from
//! [`PricerRng::for_path`], and per-worker partial sums are merged with an
//! associative reduction, so a seeded run is reproducible.

use pricer_models::analytical::black_scholes_price;
use pricer_models::models::heston::HestonModel;
use rayon::prelude::*;

use super::config::MonteCarloConfig;
use super::error::SimulationError;
use crate::rng::PricerRng;

/// Outcome of a Monte Carlo pricing run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonteCarloResult {
    /// Mean of the per-path prices.
    pub price: f64,
    /// Standard error of the mean.
    pub std_error: f64,
    /// Number of simulated paths.
    pub n_paths: usize,
    /// Seed the run was derived from.
    pub seed: u64,
}

impl MonteCarloResult {
    /// Symmetric confidence interval `price ± z · std_error`.
    ///
    /// ```rust
    /// use pricer_pricing::mc::MonteCarloResult;
    ///
    /// let result = MonteCarloResult { price: 10.0, std_error: 0.1, n_paths: 100, seed: 1 };
    /// let (lo, hi) = result.confidence_interval(1.96);
    /// assert!((lo - 9.804).abs() < 1e-12 && (hi - 10.196).abs() < 1e-12);
    /// ```
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        let half_width = z * self.std_error;
        (self.price - half_width, self.price + half_width)
    }
}

/// Running first and second moments of path prices.
#[derive(Clone, Copy, Debug, Default)]
struct PayoffAccumulator {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl PayoffAccumulator {
    #[inline]
    fn add(mut self, value: f64) -> Self {
        self.sum += value;
        self.sum_sq += value * value;
        self.count += 1;
        self
    }

    #[inline]
    fn merge(mut self, other: Self) -> Self {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.count += other.count;
        self
    }

    fn mean_and_std_error(&self) -> (f64, f64) {
        let n = self.count as f64;
        let mean = self.sum / n;
        if self.count < 2 {
            return (mean, 0.0);
        }
        let variance = ((self.sum_sq - n * mean * mean) / (n - 1.0)).max(0.0);
        (mean, (variance / n).sqrt())
    }
}

/// Monte Carlo pricer for European options under Heston variance dynamics.
///
/// # Examples
///
/// ```rust
/// use pricer_models::analytical::ContractParameters;
/// use pricer_models::models::heston::{HestonModel, HestonParameters};
/// use pricer_pricing::mc::{HestonMonteCarlo, MonteCarloConfig};
///
/// let model = HestonModel::new(
///     ContractParameters::new(100.0, 100.0, 1.0, 0.05, 0.2),
///     HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7),
/// );
/// let config = MonteCarloConfig::builder()
///     .n_paths(2_000)
///     .n_steps(50)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let result = HestonMonteCarlo::new(config).unwrap().price(&model).unwrap();
/// assert!(result.price > 9.0 && result.price < 11.0);
/// assert!(result.std_error < 0.2);
/// ```
#[derive(Clone, Debug)]
pub struct HestonMonteCarlo {
    config: MonteCarloConfig,
}

impl HestonMonteCarlo {
    /// Creates a pricer after validating the configuration.
    pub fn new(config: MonteCarloConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Simulates one variance path and returns the terminal variance V_T.
    ///
    /// Two independent normals are drawn per step; the model correlates
    /// them with its ρ before applying the step. The result is never
    /// negative.
    pub fn simulate_variance(model: &HestonModel, rng: &mut PricerRng, n_steps: usize) -> f64 {
        let dt = model.contract().time_to_expiration / n_steps as f64;
        let mut variance = model.heston_parameters().v0;

        for _ in 0..n_steps {
            let (z1, z2) = rng.gen_normal_pair();
            variance = model.variance_step(variance, dt, z1, z2);
        }
        variance
    }

    /// Prices the model's contract by simulation.
    ///
    /// # Errors
    /// Returns `SimulationError::Model` if any of the ten model parameters
    /// is invalid; nothing is simulated in that case.
    pub fn price(&self, model: &HestonModel) -> Result<MonteCarloResult, SimulationError> {
        model.validate()?;

        let seed = self
            .config
            .seed()
            .unwrap_or_else(|| PricerRng::from_entropy().seed());
        let n_paths = self.config.n_paths();
        let n_steps = self.config.n_steps();
        let contract = *model.contract();

        let span = tracing::debug_span!("heston_monte_carlo", n_paths, n_steps, seed);
        let _guard = span.enter();

        let moments = (0..n_paths)
            .into_par_iter()
            .fold(PayoffAccumulator::default, |acc, path_index| {
                let mut rng = PricerRng::for_path(seed, path_index as u64);
                let terminal_variance = Self::simulate_variance(model, &mut rng, n_steps);
                acc.add(black_scholes_price(
                    contract.underlying_price,
                    contract.strike_price,
                    contract.time_to_expiration,
                    contract.risk_free_rate,
                    terminal_variance.sqrt(),
                    contract.option_type,
                ))
            })
            .reduce(PayoffAccumulator::default, PayoffAccumulator::merge);

        let (price, std_error) = moments.mean_and_std_error();
        tracing::debug!(price, std_error, "Monte Carlo run complete");

        Ok(MonteCarloResult {
            price,
            std_error,
            n_paths,
            seed,
        })
    }
}
