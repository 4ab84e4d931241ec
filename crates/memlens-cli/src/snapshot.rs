//! Memory snapshot files.
//!
//! A snapshot is a raw dump of an address space. The whole file becomes the
//! buffer, so file offsets are buffer addresses.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Load a snapshot file into memory
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    debug!("Loaded snapshot {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes)
}

/// Write a snapshot back to disk
pub fn save<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    info!("Saved snapshot to {}", path.display());
    Ok(())
}
