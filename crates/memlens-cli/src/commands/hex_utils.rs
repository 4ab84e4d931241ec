//! Hex address and byte parsing utilities.

use anyhow::{Result, anyhow};

/// Parse a hex address string (with or without 0x prefix).
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_hex_address("0x1000").unwrap(), 0x1000);
/// assert_eq!(parse_hex_address("1000").unwrap(), 0x1000);
/// ```
pub fn parse_hex_address(s: &str) -> Result<usize> {
    let s = s.trim();
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    usize::from_str_radix(s, 16).map_err(|e| anyhow!("Invalid hex address: {}", e))
}

/// Format an address as a hex string with 0x prefix.
pub fn format_hex_address(addr: usize) -> String {
    format!("0x{:X}", addr)
}

/// Parse whitespace separated hex bytes (e.g. "00 04 7F FF").
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>> {
    s.split_whitespace()
        .map(|part| {
            let part = part.trim_start_matches("0x").trim_start_matches("0X");
            u8::from_str_radix(part, 16).map_err(|_| anyhow!("Invalid hex byte: {}", part))
        })
        .collect()
}

/// Format bytes as space separated hex.
pub fn format_hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
