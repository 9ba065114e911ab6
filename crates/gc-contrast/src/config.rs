//! Defaults for contrast generation, loadable from TOML.
//!
//! Every field is optional in the file; missing ones take the built-in
//! defaults:
//!
//! ```toml
//! min_contrast = 7.0
//! priority = "main"      # main | secondary | both
//! output = "rgb"         # rgb | hex | lrgb | hsl | oklab | oklch
//! style = "css"          # css | object
//! gamut = "srgb"         # srgb | display-p3 | rec2020
//! secondary = "#bbbbbb"  # omitted: neutral gray
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use gc_color::parse::parse_color;
use gc_color::{Color, ColorError, Gamut, OutputSpace, OutputStyle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::Priority;

/// Secondary color used when none is given: a light neutral gray, 0xBB per
/// channel.
pub const NEUTRAL_GRAY: Color = Color::rgb(0.73333, 0.73333, 0.73333);

/// WCAG AAA for normal text.
pub const DEFAULT_MIN_CONTRAST: f64 = 7.0;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to parse config file {}: {source}", .path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("min_contrast must be a number, got {0}")]
    InvalidContrast(f64),

    #[error("invalid default secondary color `{input}`: {source}")]
    InvalidSecondary {
        input: String,
        #[source]
        source: ColorError,
    },
}

/// Defaults applied to requests that leave a field unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    /// Target ratio; clamped into [1, 21] when used.
    pub min_contrast: f64,
    pub priority: Priority,
    pub output: OutputSpace,
    pub style: OutputStyle,
    /// Gamut results are mapped into.
    pub gamut: Gamut,
    /// Default secondary color as CSS text; [`NEUTRAL_GRAY`] when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            min_contrast: DEFAULT_MIN_CONTRAST,
            priority: Priority::default(),
            output: OutputSpace::default(),
            style: OutputStyle::default(),
            gamut: Gamut::default(),
            secondary: None,
        }
    }
}

impl ContrastConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keywords, or a
    /// validation error from [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::ParseFile`] if it is not a valid config, or a
    /// validation error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot: a numeric ratio and a parseable secondary.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidContrast`] or [`ConfigError::InvalidSecondary`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_contrast.is_nan() {
            return Err(ConfigError::InvalidContrast(self.min_contrast));
        }
        self.default_secondary()?;
        Ok(())
    }

    /// The secondary color used when a request omits one.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSecondary`] if the configured text is not a color.
    pub fn default_secondary(&self) -> Result<Color, ConfigError> {
        match &self.secondary {
            None => Ok(NEUTRAL_GRAY),
            Some(text) => parse_color(text).map_err(|source| ConfigError::InvalidSecondary {
                input: text.clone(),
                source,
            }),
        }
    }

    /// Render as TOML, suitable for writing back to a config file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
