//! Search command implementation.

use std::path::Path;

use anyhow::Result;
use memlens::{MatchSet, MemoryView, ScanOptions, Scanner, Value};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::hex_utils::format_hex_address;
use crate::interrupt::Interrupt;
use crate::snapshot;

/// What to look for
pub enum Query<'a> {
    Value(Value),
    String(&'a str),
    Regex(&'a str),
}

impl Query<'_> {
    fn label(&self) -> String {
        match self {
            Query::Value(v) => format!("{} {}", v.kind(), v),
            Query::String(s) => format!("string {:?}", s),
            Query::Regex(p) => format!("regex {:?}", p),
        }
    }

    /// Bytes highlighted at each hit
    fn highlight_width(&self) -> usize {
        match self {
            Query::Value(v) => v.width(),
            Query::String(s) => s.chars().count(),
            Query::Regex(_) => 1,
        }
    }
}

#[derive(Serialize)]
struct SearchReport<'a> {
    file: &'a Path,
    query: String,
    #[serde(flatten)]
    matches: &'a MatchSet,
}

/// Output settings for the search command
pub struct SearchOutput {
    pub limit: usize,
    pub context_bytes: usize,
    pub json: bool,
}

/// Run the search command
pub fn run(
    file: &Path,
    query: Query<'_>,
    output: &SearchOutput,
    interrupt: &Interrupt,
) -> Result<()> {
    let view = MemoryView::new(snapshot::load(file)?);
    let options = ScanOptions::default()
        .limit(output.limit)
        .cancel(interrupt.as_atomic());

    if !output.json {
        println!(
            "Searching for {} in {} ({} bytes)",
            query.label(),
            file.display(),
            view.len()
        );
        println!();
    }

    let matches = search(&view, &query, options)?;

    if output.json {
        let report = SearchReport {
            file,
            query: query.label(),
            matches: &matches,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let width = query.highlight_width();
    for (i, &address) in matches.iter().enumerate() {
        println!("[{}] {}", i + 1, format_hex_address(address));
        if output.context_bytes > 0 {
            let context = context_line(&view, address, width, output.context_bytes);
            println!("     {}", context);
        }
    }

    println!();
    println!("Found {} result(s)", matches.len());
    if matches.is_truncated() {
        println!("(limit reached, use --limit to increase)");
    }
    if matches.is_cancelled() {
        println!("(interrupted, results are partial)");
    }

    Ok(())
}

/// Run the scan for `query`. An invalid regex is reported as an error.
pub fn search<B: AsRef<[u8]>>(
    view: &MemoryView<B>,
    query: &Query<'_>,
    options: ScanOptions<'_>,
) -> Result<MatchSet> {
    let scanner = Scanner::with_options(view, options);
    let matches = match query {
        Query::Value(v) => scanner.search_value(v),
        Query::String(s) => scanner.search_string(s),
        Query::Regex(p) => scanner.try_search_string_regex(p)?,
    };
    Ok(matches)
}

/// Hex bytes following a hit, with the matched bytes highlighted
fn context_line<B: AsRef<[u8]>>(
    view: &MemoryView<B>,
    address: usize,
    width: usize,
    context_bytes: usize,
) -> String {
    let len = context_bytes.min(view.len() - address);
    let bytes = view.slice(address, len).unwrap_or_default();
    bytes
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let hex = format!("{:02X}", b);
            if i < width {
                hex.yellow().bold().to_string()
            } else {
                hex
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
