use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use memlens::{Value, ValueKind};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod interrupt;
mod snapshot;

use commands::hex_utils::parse_hex_address;
use commands::search::{Query, SearchOutput};
use commands::write::Patch;
use config::Config;
use interrupt::Interrupt;

#[derive(Parser)]
#[command(name = "memlens")]
#[command(about = "Inspect and patch memory snapshots", version)]
struct Cli {
    /// Config file (defaults to <config dir>/memlens/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a typed value, string, or byte run
    Read {
        /// Snapshot file
        file: PathBuf,

        /// Address in hex (with or without 0x prefix)
        #[arg(short, long, value_parser = parse_hex_address)]
        address: usize,

        #[command(flatten)]
        target: ReadTarget,
    },

    /// Write a typed value, string, or byte run into a snapshot
    Write {
        /// Snapshot file
        file: PathBuf,

        /// Address in hex (with or without 0x prefix)
        #[arg(short, long, value_parser = parse_hex_address)]
        address: usize,

        /// Value kind (u8, i8, u16, i16, u32, i32, u64, i64, f32, f64)
        #[arg(short, long, requires = "value")]
        kind: Option<ValueKind>,

        /// Value literal for --kind (decimal, or hex with 0x prefix)
        #[arg(long, requires = "kind", allow_hyphen_values = true)]
        value: Option<String>,

        /// String to write (NUL terminated, one byte per character)
        #[arg(short, long, conflicts_with_all = ["kind", "bytes"])]
        string: Option<String>,

        /// Hex bytes to write (e.g. "00 04 07 0A")
        #[arg(short, long, conflicts_with = "kind")]
        bytes: Option<String>,

        /// Write the patched snapshot here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Search the whole snapshot for a value, string, or regex
    Search {
        /// Snapshot file
        file: PathBuf,

        #[command(flatten)]
        target: SearchTarget,

        /// Maximum number of results (overrides config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display raw bytes in hexdump format
    Hexdump {
        /// Snapshot file
        file: PathBuf,

        /// Address in hex (with or without 0x prefix)
        #[arg(short, long, value_parser = parse_hex_address)]
        address: usize,

        /// Number of bytes (overrides config)
        #[arg(short, long)]
        size: Option<usize>,

        /// Hide the ASCII column
        #[arg(long)]
        no_ascii: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ReadTarget {
    /// Value kind (u8, i8, u16, i16, u32, i32, u64, i64, f32, f64)
    #[arg(short, long)]
    kind: Option<ValueKind>,

    /// Read a NUL terminated string
    #[arg(short, long)]
    string: bool,

    /// Read this many raw bytes
    #[arg(short, long, value_name = "LEN")]
    bytes: Option<usize>,
}

#[derive(Args)]
#[group(required = true, multiple = true)]
struct SearchTarget {
    /// Value kind, used with --value
    #[arg(short, long, requires = "value")]
    kind: Option<ValueKind>,

    /// Value literal to search for
    #[arg(long, requires = "kind", allow_hyphen_values = true)]
    value: Option<String>,

    /// Exact string to search for
    #[arg(short, long, conflicts_with_all = ["kind", "regex"])]
    string: Option<String>,

    /// Regular expression matched against NUL terminated strings
    #[arg(short, long, conflicts_with = "kind")]
    regex: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "memlens=debug"
    } else {
        "memlens=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load_or_default(cli.config.as_deref());
    debug!("Using config: {:?}", config);

    match cli.command {
        Command::Read {
            file,
            address,
            target,
        } => commands::read::run(&file, address, target.kind, target.string, target.bytes),
        Command::Write {
            file,
            address,
            kind,
            value,
            string,
            bytes,
            output,
        } => {
            let patch = match (kind, value.as_deref(), string.as_deref(), bytes.as_deref()) {
                (Some(kind), Some(literal), None, None) => Patch::Value { kind, literal },
                (None, None, Some(s), None) => Patch::String(s),
                (None, None, None, Some(hex)) => Patch::Bytes(hex),
                _ => bail!("Specify exactly one of --kind/--value, --string, or --bytes"),
            };
            commands::write::run(&file, address, patch, output.as_deref())
        }
        Command::Search {
            file,
            target,
            limit,
            json,
        } => {
            let query = match (
                target.kind,
                target.value.as_deref(),
                target.string.as_deref(),
                target.regex.as_deref(),
            ) {
                (Some(kind), Some(literal), None, None) => {
                    Query::Value(Value::parse(kind, literal)?)
                }
                (None, None, Some(s), None) => Query::String(s),
                (None, None, None, Some(pattern)) => Query::Regex(pattern),
                _ => bail!("Specify exactly one of --kind/--value, --string, or --regex"),
            };
            let output = SearchOutput {
                limit: limit.unwrap_or(config.search.limit),
                context_bytes: config.search.context_bytes,
                json,
            };
            let interrupt = Interrupt::install()?;
            commands::search::run(&file, query, &output, &interrupt)
        }
        Command::Hexdump {
            file,
            address,
            size,
            no_ascii,
        } => commands::hexdump::run(
            &file,
            address,
            size.unwrap_or(config.hexdump.size),
            config.hexdump.ascii && !no_ascii,
        ),
    }
}
