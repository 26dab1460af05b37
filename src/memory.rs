//! Memory sampling from the kernel's memory-info pseudo-file.

use crate::error::SampleError;
use std::path::Path;

/// Total and free memory as reported by `/proc/meminfo`, in kilobytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemInfo {
    pub total_kb: u64,
    pub free_kb: u64,
}

impl MemInfo {
    /// Reads and parses a memory-info file.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, SampleError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses memory-info content.
    ///
    /// Only the `MemTotal:` and `MemFree:` lines are used; both must be
    /// present. Format:
    /// ```text
    /// MemTotal:       16318412 kB
    /// MemFree:         1032540 kB
    /// ```
    pub fn parse(content: &str) -> Result<Self, SampleError> {
        let mut total = None;
        let mut free = None;

        for line in content.lines() {
            let mut parts = line.split_whitespace();
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            let (field, slot) = match key {
                "MemTotal:" => ("MemTotal", &mut total),
                "MemFree:" => ("MemFree", &mut free),
                _ => continue,
            };
            let kb = value.parse::<u64>().map_err(|_| SampleError::InvalidValue {
                field,
                value: value.to_string(),
            })?;
            *slot = Some(kb);
        }

        Ok(Self {
            total_kb: total.ok_or(SampleError::MissingField("MemTotal"))?,
            free_kb: free.ok_or(SampleError::MissingField("MemFree"))?,
        })
    }

    /// Total memory in whole megabytes (truncated).
    pub fn total_mb(&self) -> u64 {
        self.total_kb / 1024
    }

    /// Free memory in whole megabytes (truncated).
    pub fn free_mb(&self) -> u64 {
        self.free_kb / 1024
    }
}
