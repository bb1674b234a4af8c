//! SHA-256 checksum utilities
//!
//! Provides the canonical content checksum format (`sha256:<hex>`) used for
//! change detection and post-copy verification, and the path hash used to
//! correlate the same relative path across two trees.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Prefix for all content checksums produced by this module
const PREFIX: &str = "sha256:";

const READ_BUFFER: usize = 64 * 1024;

/// Compute the SHA-256 checksum of in-memory content.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_content_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// The file is streamed, so memory use does not grow with file size.
/// Returns a string in the canonical format `"sha256:<hex>"`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn compute_file_checksum(path: &Path) -> std::io::Result<String> {
    let mut reader = BufReader::with_capacity(READ_BUFFER, File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; READ_BUFFER];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}

/// Compute the stable hash of a relative subpath.
///
/// Used purely as a map key joining the two trees, so the value carries
/// no prefix: 64 lower-case hex characters.
pub fn compute_path_hash(relative: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(relative.as_bytes());
    format!("{:x}", hasher.finalize())
}
