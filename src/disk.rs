//! Filesystem statistics for the disk a path lives on.

use crate::error::SampleError;
use nix::sys::statvfs::statvfs;
use std::path::Path;

const BYTES_PER_MB: u128 = 1024 * 1024;

/// Block counts for one filesystem.
///
/// Sizes come out as `blocks * fragment_size`. `blocks_free` counts every
/// free block, including those reserved for root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStats {
    pub blocks: u64,
    pub blocks_free: u64,
    pub fragment_size: u64,
}

impl FsStats {
    /// Total size in whole megabytes (truncated).
    pub fn total_mb(&self) -> u64 {
        to_mb(self.blocks, self.fragment_size)
    }

    /// Free space in whole megabytes (truncated).
    pub fn free_mb(&self) -> u64 {
        to_mb(self.blocks_free, self.fragment_size)
    }
}

fn to_mb(blocks: u64, fragment_size: u64) -> u64 {
    let mb = u128::from(blocks) * u128::from(fragment_size) / BYTES_PER_MB;
    u64::try_from(mb).unwrap_or(u64::MAX)
}

/// Anything that can answer "how big is the filesystem holding this path".
pub trait FsStatsSource {
    fn stats(&self, path: &Path) -> Result<FsStats, SampleError>;
}

/// [`FsStatsSource`] backed by `statvfs(3)` on the path itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatvfsFs;

impl FsStatsSource for StatvfsFs {
    fn stats(&self, path: &Path) -> Result<FsStats, SampleError> {
        let vfs = statvfs(path).map_err(std::io::Error::from)?;
        Ok(FsStats {
            blocks: u64::from(vfs.blocks()),
            blocks_free: u64::from(vfs.blocks_free()),
            fragment_size: u64::from(vfs.fragment_size()),
        })
    }
}
