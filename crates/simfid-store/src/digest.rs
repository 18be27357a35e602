//! Content digests for compared artifacts

use crate::errors::{io_error, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// SHA-256 of `content`, hex encoded
pub fn compute_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// SHA-256 of a file's bytes, hex encoded
pub fn file_digest(path: &Path) -> Result<String> {
    let content = fs::read(path).map_err(|e| io_error("file_digest", path, e))?;
    Ok(compute_digest(&content))
}
