//! Configuration management for Cadence
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags (--tick-ms, --max-ticks)
//! 2. Environment variables (CADENCE_RUNNER__TICK_INTERVAL_MS, etc.)
//! 3. Config file (cadence.toml in the working directory or
//!    ~/.config/cadence/config.toml)
//! 4. Built-in defaults
//!
//! # Example Config File (cadence.toml)
//!
//! ```toml
//! [runner]
//! tick_interval_ms = 16
//! max_ticks = 0
//! stop_on_error = true
//!
//! [log]
//! level = "info"
//! ```
//!
//! # Environment Variables
//!
//! Nested keys use a double underscore after the CADENCE_ prefix:
//! - CADENCE_RUNNER__TICK_INTERVAL_MS
//! - CADENCE_RUNNER__MAX_TICKS
//! - CADENCE_RUNNER__STOP_ON_ERROR
//! - CADENCE_LOG__LEVEL
//!
//! CADENCE_CONFIG_PATH points at an explicit config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "CADENCE";
pub const CONFIG_PATH_VAR: &str = "CADENCE_CONFIG_PATH";
pub const PROJECT_CONFIG_FILE: &str = "cadence.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Host tick loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Milliseconds between ticks
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Upper bound on ticks per run; 0 means unbounded
    #[serde(default)]
    pub max_ticks: u64,

    /// Abort the run on the first script error instead of retrying
    #[serde(default = "default_stop_on_error")]
    pub stop_on_error: bool,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions for serde
fn default_tick_interval_ms() -> u64 {
    16
}
fn default_stop_on_error() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
            stop_on_error: default_stop_on_error(),
        }
    }
}

impl RunnerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Tick bound, `None` when unbounded
    pub fn tick_limit(&self) -> Option<u64> {
        (self.max_ticks > 0).then_some(self.max_ticks)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration with full priority chain:
    /// env vars → config file → defaults
    pub fn load() -> Result<Self> {
        Self::builder().build()
    }

    /// Load configuration from a specific file, without env overlay
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Create a builder for constructing config with overrides
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for constructing Config with optional overrides
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_path: Option<PathBuf>,
    tick_interval_ms: Option<u64>,
    max_ticks: Option<u64>,
    stop_on_error: Option<bool>,
    log_level: Option<String>,
}

impl ConfigBuilder {
    /// Override the config file path
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn tick_interval_ms(mut self, ms: Option<u64>) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    pub fn max_ticks(mut self, ticks: Option<u64>) -> Self {
        self.max_ticks = ticks;
        self
    }

    pub fn stop_on_error(mut self, stop: Option<bool>) -> Self {
        self.stop_on_error = stop;
        self
    }

    pub fn log_level(mut self, level: Option<String>) -> Self {
        self.log_level = level;
        self
    }

    /// Build the final config by applying priority chain
    pub fn build(self) -> Result<Config> {
        // Load .env file if present, before reading CADENCE_* variables
        let _ = dotenvy::dotenv();

        let defaults = RunnerConfig::default();
        let mut layers = config::Config::builder()
            .set_default("runner.tick_interval_ms", defaults.tick_interval_ms)?
            .set_default("runner.max_ticks", defaults.max_ticks)?
            .set_default("runner.stop_on_error", defaults.stop_on_error)?
            .set_default("log.level", default_log_level())?;

        if let Some(path) = self.resolve_config_path()? {
            tracing::debug!(path = %path.display(), "loading config file");
            layers = layers.add_source(
                config::File::from(path.as_path()).format(config::FileFormat::Toml),
            );
        }

        let layers = layers.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Config = layers
            .build()
            .and_then(|settings| settings.try_deserialize())
            .context("Invalid configuration")?;

        self.apply_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Explicit path, then CADENCE_CONFIG_PATH, then default locations
    fn resolve_config_path(&self) -> Result<Option<PathBuf>> {
        let explicit = match &self.config_path {
            Some(path) => Some(path.clone()),
            None => env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from),
        };

        match explicit {
            Some(path) if !path.exists() => anyhow::bail!("Config file not found: {:?}", path),
            Some(path) => Ok(Some(path)),
            None => Ok(find_config_file()),
        }
    }

    /// Apply CLI overrides (highest priority)
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(ms) = self.tick_interval_ms {
            config.runner.tick_interval_ms = ms;
        }

        if let Some(ticks) = self.max_ticks {
            config.runner.max_ticks = ticks;
        }

        if let Some(stop) = self.stop_on_error {
            config.runner.stop_on_error = stop;
        }

        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
    }
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.runner.tick_interval_ms == 0 {
            anyhow::bail!(
                "runner.tick_interval_ms must be at least 1\n\n\
                Set it using one of:\n\
                  1. Config file: 'tick_interval_ms = 16' in the [runner] section of cadence.toml\n\
                  2. Environment variable: CADENCE_RUNNER__TICK_INTERVAL_MS=16\n\
                  3. CLI flag: --tick-ms 16"
            );
        }
        Ok(())
    }
}

/// Search for config file in default locations
fn find_config_file() -> Option<PathBuf> {
    // 1. Project root: ./cadence.toml
    let project_config = PathBuf::from(PROJECT_CONFIG_FILE);
    if project_config.exists() {
        return Some(project_config);
    }

    // 2. User config: ~/.config/cadence/config.toml
    let home = env::var_os("HOME")?;
    let user_config = PathBuf::from(home)
        .join(".config")
        .join("cadence")
        .join("config.toml");
    user_config.exists().then_some(user_config)
}
