//! Error types for sampling.
//!
//! Two kinds exist. A [`SampleError`] means one metric source could not be
//! read; the sampler records a diagnostic line and keeps going. A
//! [`SamplerError`] means the log destination itself is unusable and the
//! process has to stop.

use std::path::PathBuf;
use thiserror::Error;

/// A single metric source was unavailable for this tick.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("failed to read metric source: {0}")]
    Io(#[from] std::io::Error),

    #[error("field '{0}' not found")]
    MissingField(&'static str),

    #[error("field '{field}' has invalid value '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("no mounted filesystem covers {}", .0.display())]
    NoMountPoint(PathBuf),
}

/// The log destination could not be used. Unrecoverable.
#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("failed to open log file {}: {source}", path.display())]
    OpenLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to log file {}: {source}", path.display())]
    WriteLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
