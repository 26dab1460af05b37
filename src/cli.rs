//! Command-Line Interface (CLI) argument parsing.
//!
//! Each binary has its own `clap` argument struct. Both implement
//! `figment::Provider`, so whatever the user passed on the command line is
//! merged on top of the defaults, the `sysbeat.toml` file, and the
//! environment.

use clap::Parser;
use figment::{
    value::{Dict, Map, Tag, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::{Path, PathBuf};

/// Command-line arguments that can feed `Config::load`.
pub trait ConfigArgs: Provider {
    /// The config file requested with `--config`, if any.
    fn config_path(&self) -> Option<&Path>;
}

/// Prints a heartbeat line once per interval until interrupted.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, long_about = None)]
pub struct HeartbeatCli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The line to print on every heartbeat.
    #[arg(long, value_name = "TEXT")]
    pub message: Option<String>,

    /// Milliseconds between heartbeats.
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Log level (overridden by RUST_LOG).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Periodically appends memory and disk usage to a log file.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, long_about = None)]
pub struct SamplerCli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The stats log to append to.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// A path on the filesystem to report disk usage for.
    #[arg(long, value_name = "PATH")]
    pub disk_path: Option<PathBuf>,

    /// The memory-info file to read.
    #[arg(long, value_name = "PATH")]
    pub meminfo_path: Option<PathBuf>,

    /// Milliseconds between samples.
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Log level (overridden by RUST_LOG).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl ConfigArgs for HeartbeatCli {
    fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

impl ConfigArgs for SamplerCli {
    fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

impl Provider for HeartbeatCli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        let mut heartbeat = Dict::new();
        if let Some(message) = &self.message {
            heartbeat.insert("message".into(), Value::from(message.clone()));
        }
        if let Some(interval) = self.interval_ms {
            heartbeat.insert("interval_ms".into(), Value::from(interval));
        }
        insert_section(&mut dict, "heartbeat", heartbeat);

        Ok(default_profile(dict))
    }
}

impl Provider for SamplerCli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        let mut sampler = Dict::new();
        if let Some(path) = &self.log_file {
            sampler.insert("log_path".into(), path_value(path));
        }
        if let Some(path) = &self.disk_path {
            sampler.insert("disk_path".into(), path_value(path));
        }
        if let Some(path) = &self.meminfo_path {
            sampler.insert("meminfo_path".into(), path_value(path));
        }
        if let Some(interval) = self.interval_ms {
            sampler.insert("interval_ms".into(), Value::from(interval));
        }
        insert_section(&mut dict, "sampler", sampler);

        Ok(default_profile(dict))
    }
}

fn path_value(path: &Path) -> Value {
    Value::from(path.to_string_lossy().into_owned())
}

// Only present sections are emitted, so absent flags never mask lower layers.
fn insert_section(dict: &mut Dict, name: &str, section: Dict) {
    if !section.is_empty() {
        dict.insert(name.into(), Value::Dict(Tag::Default, section));
    }
}

fn default_profile(dict: Dict) -> Map<Profile, Dict> {
    let mut map = Map::new();
    map.insert(Profile::Default, dict);
    map
}
