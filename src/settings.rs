//! # Settings Module
//!
//! ## Purpose
//! Persistent user configuration of StoichCalc, stored as pretty-printed JSON in
//! `stoichio_config.json` (current directory) unless another path is given.
//!
//! ## Key Features
//! - **Load or default**: a missing file gives the default settings; an unreadable or
//!   malformed file gives the defaults too, with a warning in the log
//! - **Periodic table source**: `periodic_table` points to an alternative table JSON file;
//!   when it is `None` the table embedded in the binary is used
//! - **Logging**: level name and optional log file consumed by [`crate::logger::init_logger`]
//!
//! ## Usage Pattern
//! ```rust
//! use StoichCalc::settings::Settings;
//!
//! let settings = Settings::load("no_such_config.json");
//! assert_eq!(settings.log_level, "info");
//! let table = settings.load_table().unwrap();
//! assert_eq!(table.len(), 118);
//! ```
use crate::Stoichiometry::errors::TableError;
use crate::Stoichiometry::periodic_table::PeriodicTable;
use log::{LevelFilter, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "stoichio_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// path to a periodic table JSON file, `None` for the embedded table
    pub periodic_table: Option<String>,
    /// "off", "error", "warn", "info", "debug" or "trace"
    pub log_level: String,
    /// when set, the log is also written to this file
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            periodic_table: None,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Loads settings from `config_file`, falling back to the defaults when the file
    /// does not exist or cannot be parsed.
    pub fn load<P: AsRef<Path>>(config_file: P) -> Self {
        let path = config_file.as_ref();
        match Self::try_load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "failed to read settings from {}: {}, using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Like [`Settings::load`] but reports an unreadable or malformed file as an error.
    /// A missing file still gives the defaults.
    pub fn try_load<P: AsRef<Path>>(
        config_file: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let path = config_file.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Writes the settings as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, config_file: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_file, content)?;
        Ok(())
    }

    /// Level filter for the logger; unknown names mean `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.trim().to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }

    /// The configured periodic table: the file named in `periodic_table` or the embedded one.
    pub fn load_table(&self) -> Result<PeriodicTable, TableError> {
        match &self.periodic_table {
            Some(path) => PeriodicTable::from_file(path),
            None => PeriodicTable::embedded(),
        }
    }
}
