//! Read command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use memlens::{MemoryView, ValueKind};

use super::hex_utils::{format_hex_address, format_hex_bytes};
use crate::snapshot;

/// Run the read command
pub fn run(
    file: &Path,
    address: usize,
    kind: Option<ValueKind>,
    string: bool,
    bytes: Option<usize>,
) -> Result<()> {
    let view = MemoryView::new(snapshot::load(file)?);
    let addr = format_hex_address(address);

    if let Some(kind) = kind {
        let value = view.read_value(kind, address)?;
        let raw = view.slice(address, kind.width())?;
        println!("{} {} = {} [{}]", addr, kind, value, format_hex_bytes(raw));
    } else if string {
        let s = view.read_string(address)?;
        println!("{} string ({} bytes) = {:?}", addr, s.chars().count(), s);
    } else if let Some(length) = bytes {
        let raw = view.read_bytes(address, length)?;
        println!("{} bytes ({}) = {}", addr, length, format_hex_bytes(&raw));
    } else {
        bail!("Nothing to read. Use --kind, --string, or --bytes");
    }

    Ok(())
}
