//! Heston Pricer CLI
//!
//! Command-line entry point for European option pricing under the
//! Black-Scholes and Heston models.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service_cli::commands::{self, ContractArgs, HestonArgs, ModelChoice, SimulationArgs};
use service_cli::config::{build_config, CliConfig, CliOverrides};
use service_cli::error_log::ErrorLog;
use service_cli::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Heston stochastic-volatility option pricer
#[derive(Parser, Debug)]
#[command(name = "heston-pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Error log file
    #[arg(long, global = true, value_name = "FILE")]
    error_log: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price one contract with Black-Scholes and both Heston methods
    Price {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        heston: HestonArgs,

        #[command(flatten)]
        simulation: SimulationArgs,
    },

    /// Print the Black-Scholes Greeks of one contract
    Greeks {
        #[command(flatten)]
        contract: ContractArgs,
    },

    /// Reprice observed call quotes and report the RMSE
    Validate {
        /// Path to market data file (CSV)
        #[arg(short, long)]
        market_data: PathBuf,

        /// Continuously compounded risk-free rate
        #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
        rate: f64,

        /// Black-Scholes volatility
        #[arg(long, default_value_t = 0.2)]
        volatility: f64,

        /// Pricing model
        #[arg(long, value_enum, default_value_t = ModelChoice::HestonAnalytic)]
        model: ModelChoice,

        #[command(flatten)]
        heston: HestonArgs,

        #[command(flatten)]
        simulation: SimulationArgs,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let simulation = match &self.command {
            Commands::Price { simulation, .. } | Commands::Validate { simulation, .. } => {
                simulation.clone()
            }
            Commands::Greeks { .. } => SimulationArgs::default(),
        };
        CliOverrides {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            error_log: self.error_log.clone(),
            paths: simulation.paths,
            steps: simulation.steps,
            seed: simulation.seed,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn dispatch(command: Commands, config: &CliConfig, error_log: &ErrorLog) -> Result<()> {
    match command {
        Commands::Price {
            contract, heston, ..
        } => commands::price::run(&contract, heston.resolve(config.heston), config).map(|_| ()),
        Commands::Greeks { contract } => commands::greeks::run(&contract).map(|_| ()),
        Commands::Validate {
            market_data,
            rate,
            volatility,
            model,
            heston,
            ..
        } => {
            let inputs = commands::validate::ValidationInputs {
                rate,
                volatility,
                model,
                heston: heston.resolve(config.heston),
            };
            commands::validate::run(&market_data, inputs, config, error_log).map(|_| ())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = cli.overrides();

    let config = match build_config(&overrides) {
        Ok(config) => config,
        Err(e) => {
            let error_log = ErrorLog::new(
                overrides
                    .error_log
                    .clone()
                    .unwrap_or_else(|| CliConfig::default().error_log),
            );
            error_log.record(&format!("Configuration error: {}", e));
            return Err(e.into());
        }
    };

    init_tracing(config.log_level.as_filter_str());
    info!("Heston Pricer v{}", service_cli::VERSION);

    let error_log = ErrorLog::new(config.error_log.clone());
    dispatch(cli.command, &config, &error_log)
        .inspect_err(|e| error_log.record_error("Command failed", e))
}
