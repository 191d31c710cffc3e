//! Raw and gzip sizing of individual files.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{self, Write};

/// Gzip level used for every size measurement, fixed for run-to-run reproducibility.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Raw and compressed byte length of one file's contents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSizes {
    /// Uncompressed length in bytes
    pub raw_bytes: u64,
    /// Gzip-compressed length in bytes
    pub gzip_bytes: u64,
}

impl FileSizes {
    /// Measure `contents` at the given gzip level
    pub fn measure(contents: &[u8], level: u32) -> io::Result<Self> {
        Ok(Self {
            raw_bytes: contents.len() as u64,
            gzip_bytes: gzip_len(contents, level)?,
        })
    }
}

impl std::ops::AddAssign for FileSizes {
    fn add_assign(&mut self, rhs: Self) {
        self.raw_bytes += rhs.raw_bytes;
        self.gzip_bytes += rhs.gzip_bytes;
    }
}

/// Length of `data` after a gzip pass at `level` (0-9).
pub fn gzip_len(data: &[u8], level: u32) -> io::Result<u64> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data)?;
    Ok(encoder.finish()?.len() as u64)
}
