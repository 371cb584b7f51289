//! # Configuration
//!
//! Roster configuration is managed by [`confique`], which handles layered
//! loading from a TOML file and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `ROSTER_DATA_DIR`, `ROSTER_FILE_STEM`, `ROSTER_FORMAT`, `ROSTER_CSV_BOM`.
//! 2. **Config file**: `<dir>/roster.toml`, optional.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! A relative `data_dir` is resolved against the directory passed to
//! [`RosterConfig::load`].
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | `.` | Directory holding the data files |
//! | `file_stem` | `employees` | File name without extension |
//! | `format` | `.txt` | Active format: `.txt`, `.csv`, `.json` or `.xml` |
//! | `csv_bom` | `true` | Write a UTF-8 byte-order mark at the start of CSV files |

use std::path::{Path, PathBuf};

use confique::Config;

use crate::codec::FileFormat;
use crate::error::Result;

pub const CONFIG_FILE: &str = "roster.toml";

/// Configuration for the roster, stored in `roster.toml`.
#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// Directory holding the data files.
    #[config(env = "ROSTER_DATA_DIR", default = ".")]
    pub data_dir: PathBuf,

    /// Data file name without extension.
    #[config(env = "ROSTER_FILE_STEM", default = "employees")]
    pub file_stem: String,

    /// Active file format (".txt", ".csv", ".json", ".xml").
    #[config(env = "ROSTER_FORMAT", default = ".txt")]
    pub format: String,

    /// Prefix CSV files with a UTF-8 byte-order mark.
    #[config(env = "ROSTER_CSV_BOM", default = true)]
    pub csv_bom: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            file_stem: "employees".to_string(),
            format: ".txt".to_string(),
            csv_bom: true,
        }
    }
}

impl RosterConfig {
    /// Loads `<dir>/roster.toml` (if present) under the environment.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut config = Self::builder()
            .env()
            .file(dir.join(CONFIG_FILE))
            .load()?;
        if config.data_dir.is_relative() {
            config.data_dir = dir.join(&config.data_dir);
        }
        Ok(config)
    }

    /// The configured format, parsed.
    pub fn format(&self) -> Result<FileFormat> {
        FileFormat::from_extension(&self.format)
    }
}
