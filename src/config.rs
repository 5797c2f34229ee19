//! Configuration loaded from `~/.config/retitle/config.toml`.
//!
//! ```toml
//! # Fragments within this fraction of the largest font size form the title.
//! height_tolerance = 0.95
//!
//! # pdfium shared library, or a directory containing it.
//! pdfium_library = "/opt/pdfium/lib"
//!
//! # Replaces the built-in placeholder list when present.
//! [[placeholders]]
//! prefix = "untitled"
//! reason = "generic untitled document"
//!
//! [[placeholders]]
//! prefix = "scan_"
//! reason = "scanner default name"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::infer::DEFAULT_HEIGHT_TOLERANCE;
use crate::validate::{default_placeholders, PlaceholderRule};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("height_tolerance must be in (0, 1], got {0}")]
    Tolerance(f64),
}

/// Settings for title suggestion.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Placeholder title prefixes rejected by the validator.
    pub placeholders: Vec<PlaceholderRule>,
    /// Tolerance band for grouping title fragments by font size.
    pub height_tolerance: f64,
    /// pdfium shared library (or its directory). System library when unset.
    pub pdfium_library: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placeholders: default_placeholders(),
            height_tolerance: DEFAULT_HEIGHT_TOLERANCE,
            pdfium_library: None,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validated()
    }

    /// Load from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load from the default location.
    ///
    /// Returns the defaults if the file doesn't exist (configuration is
    /// optional).
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !(self.height_tolerance > 0.0 && self.height_tolerance <= 1.0) {
            return Err(ConfigError::Tolerance(self.height_tolerance));
        }
        Ok(self)
    }
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("retitle")
        .join("config.toml")
}
