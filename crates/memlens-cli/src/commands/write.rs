//! Write command implementation.
//!
//! Patches a snapshot in place, or writes the patched buffer to `--output`.

use std::path::Path;

use anyhow::{Result, bail};
use memlens::{MemoryView, ValueKind};

use super::hex_utils::{format_hex_address, parse_hex_bytes};
use crate::snapshot;

/// Value to store, as given on the command line
pub enum Patch<'a> {
    Value { kind: ValueKind, literal: &'a str },
    String(&'a str),
    Bytes(&'a str),
}

/// Run the write command
pub fn run(file: &Path, address: usize, patch: Patch<'_>, output: Option<&Path>) -> Result<()> {
    let mut view = MemoryView::new(snapshot::load(file)?);
    let addr = format_hex_address(address);

    match patch {
        Patch::Value { kind, literal } => {
            let value = view.write_literal(kind, address, literal)?;
            println!("{} {} <- {}", addr, kind, value);
        }
        Patch::String(s) => {
            view.write_string(address, s)?;
            println!("{} string <- {:?}", addr, s);
        }
        Patch::Bytes(hex) => {
            let bytes = parse_hex_bytes(hex)?;
            if bytes.is_empty() {
                bail!("No bytes to write");
            }
            view.write_bytes(address, &bytes)?;
            println!("{} bytes <- {} byte(s)", addr, bytes.len());
        }
    }

    snapshot::save(output.unwrap_or(file), view.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_value_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mem.bin");
        snapshot::save(&path, &[0u8; 8]).unwrap();

        let patch = Patch::Value {
            kind: ValueKind::U32,
            literal: "0x01020304",
        };
        run(&path, 0, patch, None).unwrap();
        assert_eq!(
            snapshot::load(&path).unwrap(),
            vec![0x04, 0x03, 0x02, 0x01, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_write_string_to_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mem.bin");
        let out = dir.path().join("patched.bin");
        snapshot::save(&path, &[0xFFu8; 6]).unwrap();

        run(&path, 1, Patch::String("hi"), Some(&out)).unwrap();
        assert_eq!(snapshot::load(&path).unwrap(), vec![0xFF; 6]);
        assert_eq!(
            snapshot::load(&out).unwrap(),
            vec![0xFF, b'h', b'i', 0, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_write_out_of_bounds_keeps_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mem.bin");
        snapshot::save(&path, &[0u8; 4]).unwrap();

        assert!(run(&path, 2, Patch::Bytes("01 02 03"), None).is_err());
        let patch = Patch::Value {
            kind: ValueKind::I64,
            literal: "twelve",
        };
        assert!(run(&path, 0, patch, None).is_err());
        assert_eq!(snapshot::load(&path).unwrap(), vec![0; 4]);
    }
}
