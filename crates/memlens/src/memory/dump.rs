//! Hexdump formatting for buffer regions.
//!
//! # Output Format
//!
//! ```text
//! 0x000010: 48 65 6C 6C 6F 20 57 6F  72 6C 64 00 00 00 00 00  |Hello World.....|
//! ```

use serde::Serialize;

use super::MemoryView;
use crate::error::Result;

const BYTES_PER_LINE: usize = 16;

/// A formatted region of the buffer
#[derive(Debug, Clone, Serialize)]
pub struct MemoryDump {
    pub address: usize,
    pub size: usize,
    pub hex_dump: Vec<String>,
}

impl MemoryDump {
    /// Dump `size` bytes at `address`, clamped to the end of the buffer.
    ///
    /// An `address` past the end of the buffer is an out-of-bounds error.
    pub fn collect<B: AsRef<[u8]>>(
        view: &MemoryView<B>,
        address: usize,
        size: usize,
        ascii: bool,
    ) -> Result<Self> {
        let available = view.len().saturating_sub(address);
        let bytes = view.slice(address, size.min(available))?;
        Ok(Self {
            address,
            size: bytes.len(),
            hex_dump: hex_dump_lines(bytes, address, ascii),
        })
    }
}

/// Format `bytes` as hexdump lines, labelling each line with its buffer address.
pub fn hex_dump_lines(bytes: &[u8], base: usize, ascii: bool) -> Vec<String> {
    bytes
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| format_line(chunk, base + i * BYTES_PER_LINE, ascii))
        .collect()
}

fn format_line(chunk: &[u8], address: usize, ascii: bool) -> String {
    let mut line = format!("0x{:06X}: ", address);

    for j in 0..BYTES_PER_LINE {
        if j == 8 {
            line.push(' ');
        }
        match chunk.get(j) {
            Some(byte) => line.push_str(&format!("{:02X} ", byte)),
            None => line.push_str("   "),
        }
    }

    if ascii {
        line.push_str(" |");
        for byte in chunk {
            line.push(printable(*byte));
        }
        for _ in chunk.len()..BYTES_PER_LINE {
            line.push(' ');
        }
        line.push('|');
    }

    line.trim_end().to_string()
}

/// ASCII rendering of a byte, with `.` for anything non-printable
pub fn printable(byte: u8) -> char {
    if (0x20..0x7F).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_line_with_ascii() {
        let lines = hex_dump_lines(b"Hello World\0\0\0\0\0", 0x10, true);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            "0x000010: 48 65 6C 6C 6F 20 57 6F  72 6C 64 00 00 00 00 00  |Hello World.....|"
        );
    }

    #[test]
    fn test_partial_line_is_padded() {
        let lines = hex_dump_lines(&[0xAB, 0xCD], 0, true);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("0x000000: AB CD "));
        assert!(lines[0].ends_with("|..              |"));
    }

    #[test]
    fn test_line_addresses() {
        let lines = hex_dump_lines(&[0u8; 40], 0x100, false);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0x000110:"));
        assert!(lines[2].starts_with("0x000120: 00 00 00 00 00 00 00 00"));
    }

    #[test]
    fn test_collect_clamps_to_buffer() {
        let view = MemoryView::new(vec![1u8; 20]);
        let dump = MemoryDump::collect(&view, 16, 64, false).unwrap();
        assert_eq!(dump.size, 4);
        assert_eq!(dump.hex_dump, vec!["0x000010: 01 01 01 01".to_string()]);

        assert!(MemoryDump::collect(&view, 21, 4, false).is_err());
    }
}
