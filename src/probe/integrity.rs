//! Document integrity guard.
//!
//! The probe never writes to the template. This module proves it: a SHA-256
//! digest of the file is taken before and after, and any difference fails the
//! probe with [`ProbeError::MutationDetected`].
use crate::common::error::{ProbeError, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::{self, Write};
use std::path::Path;

/// Lowercase hex SHA-256 digest of a file's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Checksum(String);

impl Checksum {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Digest of `data`.
pub fn checksum_bytes(data: &[u8]) -> Checksum {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hasher.finalize();

    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest.iter() {
        let _ = write!(hex, "{:02x}", byte);
    }
    Checksum(hex)
}

/// Digest of the file at `path`.
pub fn checksum<P: AsRef<Path>>(path: P) -> Result<Checksum> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| ProbeError::from_io(path, e))?;
    Ok(checksum_bytes(&data))
}

/// Fail with [`ProbeError::MutationDetected`] unless the digests are equal.
pub fn assert_unchanged(before: &Checksum, after: &Checksum) -> Result<()> {
    if before == after {
        Ok(())
    } else {
        Err(ProbeError::MutationDetected {
            before: before.to_string(),
            after: after.to_string(),
        })
    }
}
