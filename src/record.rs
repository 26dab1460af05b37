//! The text record appended to the stats log on every tick.

use crate::disk::FsStats;
use crate::error::SampleError;
use crate::memory::MemInfo;
use chrono::{DateTime, Local};

/// ctime-style local timestamp, e.g. `Mon Jan 15 09:05:03 2024`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Written instead of the memory line when memory could not be sampled.
pub const MEMORY_FAILURE: &str = "Memory - Failed to read memory info";

/// Written instead of the disk line when disk could not be sampled.
pub const DISK_FAILURE: &str = "Disk  - Failed to get disk stats";

/// One tick's worth of measurements. Built, rendered, then dropped.
#[derive(Debug)]
pub struct Sample {
    pub timestamp: DateTime<Local>,
    pub memory: Result<MemInfo, SampleError>,
    pub disk: Result<FsStats, SampleError>,
}

impl Sample {
    pub fn new(
        timestamp: DateTime<Local>,
        memory: Result<MemInfo, SampleError>,
        disk: Result<FsStats, SampleError>,
    ) -> Self {
        Self {
            timestamp,
            memory,
            disk,
        }
    }

    /// Renders the full record, trailing newline included.
    pub fn render(&self) -> String {
        let mut out = format!("[{}]\n", self.timestamp.format(TIMESTAMP_FORMAT));

        match &self.memory {
            Ok(mem) => out.push_str(&format!(
                "Memory - Total: {} MB, Free: {} MB\n",
                mem.total_mb(),
                mem.free_mb()
            )),
            Err(_) => {
                out.push_str(MEMORY_FAILURE);
                out.push('\n');
            }
        }

        match &self.disk {
            Ok(fs) => out.push_str(&format!(
                "Disk  - Total: {} MB, Free: {} MB\n",
                fs.total_mb(),
                fs.free_mb()
            )),
            Err(_) => {
                out.push_str(DISK_FAILURE);
                out.push('\n');
            }
        }

        out
    }
}
