//! Run configuration
//!
//! Values come from three layers, later ones winning: built-in defaults,
//! an optional TOML file, then command-line flags.

use crate::core::error::{LookoutError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Crate version, reported in the User-Agent and in the workbook.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds minor update takes to visit every region.
///
/// Minor update timing is not observable from the census, so this is a
/// configured figure rather than a measured one.
pub const DEFAULT_MINOR_UPDATE_LENGTH: u64 = 2640;

pub const DEFAULT_DUMP_URL: &str = "https://www.nationstates.net/pages/regions.xml.gz";
pub const DEFAULT_API_URL: &str = "https://www.nationstates.net/cgi-bin/api.cgi";

/// Configuration for one pipeline run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookoutConfig {
    /// Identifies the operator to the NationStates API (nation name or email)
    ///
    /// Required. Requests without a descriptive user agent may be blocked.
    pub user_agent: Option<String>,

    /// Configured minor update duration, in seconds
    pub minor_update_length: u64,

    /// Where the gzipped daily region dump is downloaded from
    pub dump_url: String,

    /// Base URL of the API used for the password and founderless lists
    pub api_url: String,

    /// Read the census from this file instead of downloading it
    ///
    /// Gzip decoding is applied when the file name ends in `.gz`.
    pub dump_path: Option<PathBuf>,

    /// Output workbook path. Defaults to today's date with an `.xlsx` suffix.
    pub output: Option<PathBuf>,

    /// Leave the WFE and Embassies columns out of the sheet
    pub minified: bool,
}

impl Default for LookoutConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            minor_update_length: DEFAULT_MINOR_UPDATE_LENGTH,
            dump_url: DEFAULT_DUMP_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            dump_path: None,
            output: None,
            minified: false,
        }
    }
}

impl LookoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| LookoutError::Config(format!("Failed to parse config TOML: {}", e)))
    }

    /// Load a configuration file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LookoutError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&contents)
    }

    /// Validate configuration before any request is made
    pub fn validate(&self) -> Result<()> {
        match self.user_agent.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(LookoutError::Config(
                    "a user agent is required (--user-agent)".into(),
                ))
            }
            Some(_) => {}
        }

        if self.minor_update_length == 0 {
            return Err(LookoutError::Config(
                "minor_update_length must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Full User-Agent header sent with every request
    pub fn user_agent_header(&self) -> String {
        format!(
            "Lookout/{} (Run by {})",
            VERSION,
            self.user_agent.as_deref().unwrap_or_default().trim()
        )
    }

    /// Output path, falling back to `<YYYY-MM-DD>.xlsx` for the given date
    pub fn output_path(&self, today: chrono::NaiveDate) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.xlsx", today.format("%Y-%m-%d"))))
    }
}
