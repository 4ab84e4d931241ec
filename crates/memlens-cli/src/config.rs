//! CLI configuration file.
//!
//! Read from `--config`, or from `<config dir>/memlens/config.toml` when no
//! path is given. Every key is optional:
//!
//! ```toml
//! [search]
//! limit = 100
//! context_bytes = 16
//!
//! [hexdump]
//! size = 256
//! ascii = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub hexdump: HexdumpConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of matches reported by a search
    pub limit: usize,
    /// Bytes of context printed after each match
    pub context_bytes: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: 100,
            context_bytes: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HexdumpConfig {
    pub size: usize,
    pub ascii: bool,
}

impl Default for HexdumpConfig {
    fn default() -> Self {
        Self {
            size: 256,
            ascii: true,
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("memlens").join("config.toml"))
    }

    /// Load from `path`, or from the default location.
    ///
    /// Never fails: a missing or malformed file falls back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Self::default(),
            },
        };

        if !explicit && !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load config: {:#}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
