//! Hexdump command implementation.
//!
//! Displays snapshot bytes in traditional hexdump format, useful for
//! inspecting the surroundings of a search hit.

use std::path::Path;

use anyhow::Result;
use memlens::{MemoryDump, MemoryView};

use crate::snapshot;

/// Run the hexdump command
pub fn run(file: &Path, address: usize, size: usize, ascii: bool) -> Result<()> {
    let view = MemoryView::new(snapshot::load(file)?);
    let dump = MemoryDump::collect(&view, address, size, ascii)?;

    println!("Hexdump at 0x{:X} ({} bytes):", dump.address, dump.size);
    println!();
    for line in &dump.hex_dump {
        println!("{}", line);
    }

    Ok(())
}
