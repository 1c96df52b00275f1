//! User configuration loaded from `config.toml`.
//!
//! The file is optional. Every key has a default, so a partial file only
//! overrides what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Error, Result};
use crate::printer::PrinterConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub convert: ConvertConfig,
    pub printer: PrinterSection,
    pub viewer: ViewerConfig,
}

/// `[convert]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Output path used when `--output_file` is not given.
    pub output_file: PathBuf,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from(constants::DEFAULT_OUTPUT_FILE),
        }
    }
}

/// `[printer]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterSection {
    pub summary_threshold: usize,
}

impl Default for PrinterSection {
    fn default() -> Self {
        Self {
            summary_threshold: constants::DEFAULT_SUMMARY_THRESHOLD,
        }
    }
}

/// `[viewer]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Play every Nth frame.
    pub frame_stride: usize,
    /// Redraw interval in milliseconds.
    pub tick_rate_ms: u64,
    /// Margin around the bounds fitted from the first frame.
    pub axis_padding: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            frame_stride: constants::DEFAULT_FRAME_STRIDE,
            tick_rate_ms: constants::DEFAULT_TICK_RATE_MS,
            axis_padding: constants::DEFAULT_AXIS_PADDING,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/nymeria-proto/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(constants::APP_NAME)
                .join(constants::CONFIG_FILE_NAME)
        })
    }

    /// Loads the configuration from `explicit`, or from the default path.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read and
    /// [`Error::Config`] if it is not valid TOML for this schema.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let config = Self::parse(&content).map_err(|source| Error::Config {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses TOML content.
    ///
    /// # Errors
    ///
    /// Returns the TOML error on malformed input.
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn printer(&self) -> PrinterConfig {
        PrinterConfig {
            summary_threshold: self.printer.summary_threshold,
        }
    }
}
