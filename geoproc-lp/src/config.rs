//! Configuration for the location processor
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments (each with an environment variable fallback)
//! 2. TOML configuration file
//! 3. Built-in defaults (code constants)
//!
//! The TOML file is located by [`geoproc_common::config::resolve_config_path`];
//! a missing file leaves every setting at its default.

use geoproc_common::config::{load_toml_or_default, resolve_config_path};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable naming the TOML file
pub const CONFIG_ENV_VAR: &str = "GEOPROC_CONFIG";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_WORKERS: usize = 100;
const DEFAULT_MAX_BATCH_SIZE: usize = 1000;
const DEFAULT_PERSIST_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_KEY_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_STORE_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Bootstrap configuration as written in the TOML file
///
/// Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub bind_addr: Option<String>,
    pub redis_url: Option<String>,
    pub max_workers: Option<usize>,
    pub max_batch_size: Option<usize>,
    pub persist_timeout_ms: Option<u64>,
    pub key_ttl_secs: Option<u64>,
    pub store_connect_timeout_ms: Option<u64>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_addr: Option<String>,
    pub redis_url: Option<String>,
    pub max_workers: Option<usize>,
    pub max_batch_size: Option<usize>,
    pub log_level: Option<String>,
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address, e.g. `0.0.0.0:8080`
    pub bind_addr: String,

    /// Key-value store URL; `None` disables persistence
    pub redis_url: Option<String>,

    /// Worker pool capacity (concurrent chunks across all requests)
    pub max_workers: usize,

    /// Largest accepted batch
    pub max_batch_size: usize,

    /// Deadline for one sample write
    pub persist_timeout: Duration,

    /// Expiry of stored samples
    pub key_ttl: Duration,

    /// Deadline for the startup connection to the store
    pub store_connect_timeout: Duration,

    pub log_level: String,

    /// File the settings were read from, if any
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            redis_url: None,
            max_workers: DEFAULT_MAX_WORKERS,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            persist_timeout: Duration::from_millis(DEFAULT_PERSIST_TIMEOUT_MS),
            key_ttl: Duration::from_secs(DEFAULT_KEY_TTL_SECS),
            store_connect_timeout: Duration::from_millis(DEFAULT_STORE_CONNECT_TIMEOUT_MS),
            log_level: default_log_level(),
            source: None,
        }
    }
}

impl Config {
    /// Resolve the TOML file, load it and apply `overrides`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file exists but cannot be parsed, or
    /// if the merged settings are invalid.
    pub async fn load(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let path = resolve_config_path(config_path, CONFIG_ENV_VAR);
        let toml_config: TomlConfig = load_toml_or_default(path.as_deref()).await?;

        let mut config = Self::from_sources(toml_config, overrides)?;
        config.source = path.filter(|p| p.exists());
        Ok(config)
    }

    /// Merge TOML settings and overrides over the built-in defaults
    pub fn from_sources(toml_config: TomlConfig, overrides: ConfigOverrides) -> Result<Self> {
        let defaults = Self::default();

        let redis_url = overrides
            .redis_url
            .or(toml_config.redis_url)
            .filter(|url| !url.trim().is_empty());

        let config = Self {
            bind_addr: overrides
                .bind_addr
                .or(toml_config.bind_addr)
                .unwrap_or(defaults.bind_addr),
            redis_url,
            max_workers: overrides
                .max_workers
                .or(toml_config.max_workers)
                .unwrap_or(defaults.max_workers),
            max_batch_size: overrides
                .max_batch_size
                .or(toml_config.max_batch_size)
                .unwrap_or(defaults.max_batch_size),
            persist_timeout: toml_config
                .persist_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.persist_timeout),
            key_ttl: toml_config
                .key_ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.key_ttl),
            store_connect_timeout: toml_config
                .store_connect_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.store_connect_timeout),
            log_level: overrides.log_level.unwrap_or(toml_config.logging.level),
            source: None,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            return Err(Error::Config("max_workers must be at least 1".to_string()));
        }
        if self.max_batch_size == 0 {
            return Err(Error::Config("max_batch_size must be at least 1".to_string()));
        }
        if self.persist_timeout.is_zero() {
            return Err(Error::Config("persist_timeout_ms must be positive".to_string()));
        }
        if self.key_ttl.as_secs() == 0 {
            return Err(Error::Config("key_ttl_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}
