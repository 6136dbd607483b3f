//! Run artifact: a fast pseudo-checksum of the source graph file.
//!
//! Written beside the target database after a successful full rebuild and
//! compared on later invocations to warn when the target is stale relative
//! to the source. The hash samples the head and tail of the file plus its
//! length rather than reading the whole content.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::Result;

/// File name of the checksum artifact inside the target database directory.
pub const CHECKSUM_FILE: &str = "checksum.txt";

const SAMPLE_BYTES: u64 = 64 * 1024;

/// Compute the fast pseudo-checksum of a source graph file.
pub fn source_checksum<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&len.to_le_bytes());

    let mut head = vec![0u8; len.min(SAMPLE_BYTES) as usize];
    file.read_exact(&mut head)?;
    hasher.update(&head);

    if len > SAMPLE_BYTES {
        let mut tail = vec![0u8; SAMPLE_BYTES.min(len - SAMPLE_BYTES) as usize];
        file.seek(SeekFrom::End(-(tail.len() as i64)))?;
        file.read_exact(&mut tail)?;
        hasher.update(&tail);
    }

    Ok(format!("{:08x}-{:x}", hasher.finalize(), len))
}

/// Write the checksum artifact after a successful rebuild.
pub fn write_checksum<P: AsRef<Path>>(database_dir: P, checksum: &str) -> Result<()> {
    std::fs::create_dir_all(&database_dir)?;
    std::fs::write(database_dir.as_ref().join(CHECKSUM_FILE), checksum)?;
    Ok(())
}

/// Read the stored checksum, if any.
pub fn read_checksum<P: AsRef<Path>>(database_dir: P) -> Result<Option<String>> {
    let path = database_dir.as_ref().join(CHECKSUM_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(Some(content.trim().to_string()))
}

/// Check whether the target database is stale relative to the source graph.
///
/// A missing checksum artifact counts as stale.
pub fn is_stale<P: AsRef<Path>, Q: AsRef<Path>>(database_dir: P, source_path: Q) -> Result<bool> {
    match read_checksum(database_dir)? {
        Some(stored) => Ok(stored != source_checksum(source_path)?),
        None => Ok(true),
    }
}
