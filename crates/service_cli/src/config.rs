//! CLI configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use pricer_models::models::heston::{HestonParameters, IntegrationConfig};
use pricer_pricing::mc::{MonteCarloConfig, DEFAULT_PATHS, DEFAULT_STEPS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable naming the log level
pub const ENV_LOG_LEVEL: &str = "HESTON_LOG_LEVEL";
/// Environment variable naming the Monte Carlo path count
pub const ENV_MC_PATHS: &str = "HESTON_MC_PATHS";
/// Environment variable naming the Monte Carlo step count
pub const ENV_MC_STEPS: &str = "HESTON_MC_STEPS";
/// Environment variable naming the Monte Carlo seed
pub const ENV_MC_SEED: &str = "HESTON_MC_SEED";
/// Environment variable naming the error log file
pub const ENV_ERROR_LOG: &str = "HESTON_ERROR_LOG";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Path/step counts outside the simulator limits
    #[error("Invalid Monte Carlo settings: {0}")]
    InvalidMonteCarlo(String),

    /// Default model parameters or integration grid rejected
    #[error("Invalid model settings: {0}")]
    InvalidModel(String),

    /// Unreadable or unparsable configuration file
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable with an unparsable value
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Monte Carlo defaults applied when a command does not override them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MonteCarloSettings {
    /// Number of simulated paths
    pub paths: usize,
    /// Euler steps per path
    pub steps: usize,
    /// Fixed seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            paths: DEFAULT_PATHS,
            steps: DEFAULT_STEPS,
            seed: None,
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// File receiving persistent error messages
    pub error_log: PathBuf,
    /// Monte Carlo defaults
    pub monte_carlo: MonteCarloSettings,
    /// Fourier integration grid
    pub integration: IntegrationConfig,
    /// Default variance-process parameters
    pub heston: HestonParameters,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            error_log: PathBuf::from("error.log"),
            monte_carlo: MonteCarloSettings::default(),
            integration: IntegrationConfig::default(),
            heston: HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7),
        }
    }
}

fn parse_env<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} is not valid", key, raw)))
}

impl CliConfig {
    /// Create a new CliConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Overrides fields from environment-style variables.
    ///
    /// `lookup` returns the raw value of a variable, if set.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(paths) = lookup(ENV_MC_PATHS) {
            self.monte_carlo.paths = parse_env(ENV_MC_PATHS, &paths)?;
        }
        if let Some(steps) = lookup(ENV_MC_STEPS) {
            self.monte_carlo.steps = parse_env(ENV_MC_STEPS, &steps)?;
        }
        if let Some(seed) = lookup(ENV_MC_SEED) {
            self.monte_carlo.seed = Some(parse_env(ENV_MC_SEED, &seed)?);
        }
        if let Some(path) = lookup(ENV_ERROR_LOG) {
            self.error_log = PathBuf::from(path);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.monte_carlo_config()?;
        self.integration
            .validate()
            .map_err(|e| ConfigError::InvalidModel(e.to_string()))?;
        self.heston
            .validate()
            .map_err(|e| ConfigError::InvalidModel(e.to_string()))?;
        Ok(())
    }

    /// Simulation settings as a validated [`MonteCarloConfig`]
    pub fn monte_carlo_config(&self) -> Result<MonteCarloConfig, ConfigError> {
        MonteCarloConfig::builder()
            .n_paths(self.monte_carlo.paths)
            .n_steps(self.monte_carlo.steps)
            .maybe_seed(self.monte_carlo.seed)
            .build()
            .map_err(|e| ConfigError::InvalidMonteCarlo(e.to_string()))
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(error_log) = &cli.error_log {
            self.error_log = error_log.clone();
        }
        if let Some(paths) = cli.paths {
            self.monte_carlo.paths = paths;
        }
        if let Some(steps) = cli.steps {
            self.monte_carlo.steps = steps;
        }
        if let Some(seed) = cli.seed {
            self.monte_carlo.seed = Some(seed);
        }
        Ok(())
    }
}

/// Command-line overrides
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Error log override
    pub error_log: Option<PathBuf>,
    /// Path count override
    pub paths: Option<usize>,
    /// Step count override
    pub steps: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliOverrides) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliOverrides, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(config_path) = &cli.config_file {
        CliConfig::from_file(config_path)?
    } else {
        CliConfig::default()
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.error_log, PathBuf::from("error.log"));
        assert_eq!(config.monte_carlo.paths, 10_000);
        assert_eq!(config.monte_carlo.steps, 1_000);
        assert_eq!(config.monte_carlo.seed, None);
        assert_eq!(config.integration, IntegrationConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Warn").unwrap(), LogLevel::Warn);
        assert!(LogLevel::from_str("verbose").is_err());
        assert_eq!(format!("{}", LogLevel::Error), "error");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"
            error_log = "/tmp/pricer-errors.log"

            [monte_carlo]
            paths = 20000
            steps = 250
            seed = 42

            [integration]
            upper_limit = 150.0
            steps = 2000

            [heston]
            v0 = 0.09
            kappa = 1.5
            theta = 0.04
            sigma = 0.5
            rho = -0.5
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.error_log, PathBuf::from("/tmp/pricer-errors.log"));
        assert_eq!(config.monte_carlo.paths, 20_000);
        assert_eq!(config.monte_carlo.seed, Some(42));
        assert_eq!(config.integration.steps, 2000);
        assert_eq!(config.heston.kappa, 1.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let toml_str = r#"
            [monte_carlo]
            paths = 5000
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.monte_carlo.paths, 5_000);
        assert_eq!(config.monte_carlo.steps, 1_000);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.heston, CliConfig::default().heston);
    }

    #[test]
    fn test_invalid_toml_values() {
        assert!(toml::from_str::<CliConfig>(r#"log_level = "loud""#).is_err());

        let config: CliConfig = toml::from_str("[monte_carlo]\npaths = 0").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMonteCarlo(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"warn\"\n[monte_carlo]\nsteps = 100").unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.monte_carlo.steps, 100);

        let missing = CliConfig::from_file(Path::new("/nonexistent/heston.toml"));
        assert!(matches!(missing, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_env(env(&[
                (ENV_LOG_LEVEL, "trace"),
                (ENV_MC_PATHS, "2500"),
                (ENV_MC_STEPS, " 50 "),
                (ENV_MC_SEED, "7"),
                (ENV_ERROR_LOG, "custom.log"),
            ]))
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.monte_carlo.paths, 2_500);
        assert_eq!(config.monte_carlo.steps, 50);
        assert_eq!(config.monte_carlo.seed, Some(7));
        assert_eq!(config.error_log, PathBuf::from("custom.log"));
    }

    #[test]
    fn test_env_rejects_garbage() {
        let mut config = CliConfig::default();
        let err = config.apply_env(env(&[(ENV_MC_PATHS, "many")])).unwrap_err();
        assert!(err.to_string().contains("HESTON_MC_PATHS=many"));
    }

    #[test]
    fn test_precedence_cli_over_env_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[monte_carlo]\npaths = 100\nsteps = 10\nseed = 1").unwrap();

        let cli = CliOverrides {
            config_file: Some(file.path().to_path_buf()),
            paths: Some(300),
            ..Default::default()
        };
        let config =
            build_config_with_env(&cli, env(&[(ENV_MC_PATHS, "200"), (ENV_MC_STEPS, "20")]))
                .unwrap();

        assert_eq!(config.monte_carlo.paths, 300);
        assert_eq!(config.monte_carlo.steps, 20);
        assert_eq!(config.monte_carlo.seed, Some(1));
    }

    #[test]
    fn test_build_config_validates_result() {
        let cli = CliOverrides {
            steps: Some(20_000),
            ..Default::default()
        };
        assert!(build_config_with_env(&cli, env(&[])).is_err());

        let cli = CliOverrides {
            log_level: Some("chatty".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with_env(&cli, env(&[])),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_monte_carlo_config_conversion() {
        let mut config = CliConfig::default();
        config.monte_carlo.seed = Some(9);
        let mc = config.monte_carlo_config().unwrap();
        assert_eq!(mc.n_paths(), 10_000);
        assert_eq!(mc.seed(), Some(9));
    }
}
