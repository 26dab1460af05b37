//! Configuration management for sysbeat
//!
//! This module defines the `Config` struct shared by both binaries. It uses
//! the `figment` crate to layer, in increasing precedence, the built-in
//! defaults, a `sysbeat.toml` file, `SYSBEAT_` environment variables, and the
//! command-line arguments.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::cli::ConfigArgs;

/// Config file read when `--config` is not given. Optional.
pub const DEFAULT_CONFIG_FILE: &str = "sysbeat.toml";

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error(transparent)]
    Figment(#[from] figment::Error),

    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level, used unless `RUST_LOG` is set.
    pub log_level: String,
    /// Settings for the heartbeat emitter.
    pub heartbeat: HeartbeatConfig,
    /// Settings for the resource sampler.
    pub sampler: SamplerConfig,
}

/// Settings for the heartbeat emitter.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HeartbeatConfig {
    /// The line printed on every tick.
    pub message: String,
    /// Milliseconds between heartbeats.
    pub interval_ms: u64,
}

/// Settings for the resource sampler.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SamplerConfig {
    /// The append-only stats log.
    pub log_path: PathBuf,
    /// The memory-info pseudo-file.
    pub meminfo_path: PathBuf,
    /// Any path on the filesystem whose size is reported.
    pub disk_path: PathBuf,
    /// Milliseconds between samples.
    pub interval_ms: u64,
}

impl HeartbeatConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl SamplerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Loads the configuration, layering defaults, the TOML file, the
    /// environment, and finally the parsed command line.
    ///
    /// An explicitly requested config file must exist; the default one is
    /// skipped when absent.
    pub fn load<C: ConfigArgs + Clone>(cli: &C) -> Result<Self, ConfigError> {
        let config_path = match cli.config_path() {
            Some(path) if !path.exists() => {
                return Err(ConfigError::MissingFile(path.to_path_buf()))
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // e.g. SYSBEAT_SAMPLER__LOG_PATH=/var/log/stats.log
            .merge(Env::prefixed("SYSBEAT_").split("__"))
            .merge(cli.clone())
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.heartbeat.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("heartbeat.interval_ms"));
        }
        if self.sampler.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("sampler.interval_ms"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            heartbeat: HeartbeatConfig {
                message: "Hello from container v1.1".to_string(),
                interval_ms: 1000,
            },
            sampler: SamplerConfig {
                log_path: PathBuf::from("/tmp/system_stats.log"),
                meminfo_path: PathBuf::from("/proc/meminfo"),
                disk_path: PathBuf::from("/"),
                interval_ms: 1000,
            },
        }
    }
}
