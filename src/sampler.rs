//! # Resource Sampler
//!
//! This module defines the `ResourceSampler`, which on every tick opens the
//! stats log in append mode, samples memory and disk usage, writes one
//! timestamped record and closes the file again. No handle is kept across
//! the sleep between ticks.
//!
//! A metric source that cannot be read turns into a diagnostic line in the
//! record and a warning in the process log. Only a log file that cannot be
//! opened or written stops the sampler.

use crate::config::SamplerConfig;
use crate::disk::FsStatsSource;
use crate::error::SamplerError;
use crate::memory::MemInfo;
use crate::record::Sample;
use chrono::Local;
use log::{debug, info, warn};
use std::convert::Infallible;
use std::fs::OpenOptions;
use std::io::Write;
use tokio::time;

pub struct ResourceSampler<S> {
    config: SamplerConfig,
    source: S,
}

impl<S: FsStatsSource> ResourceSampler<S> {
    pub fn new(config: SamplerConfig, source: S) -> Self {
        Self { config, source }
    }

    /// Measures memory and disk right now.
    pub fn take_sample(&self) -> Sample {
        let memory = MemInfo::read_from(&self.config.meminfo_path);
        if let Err(e) = &memory {
            warn!(
                "Failed to read memory info from {}: {}",
                self.config.meminfo_path.display(),
                e
            );
        }

        let disk = self.source.stats(&self.config.disk_path);
        if let Err(e) = &disk {
            warn!(
                "Failed to get disk stats for {}: {}",
                self.config.disk_path.display(),
                e
            );
        }

        Sample::new(Local::now(), memory, disk)
    }

    /// Appends exactly one record to the log and closes it.
    pub fn sample_once(&self) -> Result<(), SamplerError> {
        let path = &self.config.log_path;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SamplerError::OpenLog {
                path: path.clone(),
                source,
            })?;

        // One write per record keeps concurrent readers from seeing half of it.
        let record = self.take_sample().render();
        file.write_all(record.as_bytes())
            .map_err(|source| SamplerError::WriteLog {
                path: path.clone(),
                source,
            })?;
        drop(file);

        debug!("Appended {} bytes to {}.", record.len(), path.display());
        Ok(())
    }

    /// Samples forever. Returns only when the log becomes unusable.
    pub async fn run(self) -> Result<Infallible, SamplerError> {
        info!(
            "Resource sampler writing to {} every {:?}.",
            self.config.log_path.display(),
            self.config.interval()
        );
        loop {
            self.sample_once()?;
            time::sleep(self.config.interval()).await;
        }
    }
}
