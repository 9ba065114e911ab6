//! Error types for the contrast engine.
//!
//! Bad input colors are fatal and surface immediately. Falling short of the
//! requested contrast is *not* an error: the best-effort pair is returned and
//! the shortfall is visible on [`ContrastedPair`](crate::ContrastedPair).

use std::fmt;

use gc_color::ColorError;
use thiserror::Error;

use crate::config::ConfigError;

/// Which argument a bad color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Main,
    Secondary,
    /// The single color passed to `set_luminance`.
    Subject,
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Main => "main color",
            Self::Secondary => "secondary color",
            Self::Subject => "color",
        })
    }
}

/// Main error type for the contrast engine
#[derive(Debug, Error)]
pub enum ContrastError {
    /// A caller-supplied color failed to parse or convert.
    #[error("invalid {role} `{input}`: {source}")]
    InvalidInputColor {
        role: ColorRole,
        input: String,
        #[source]
        source: ColorError,
    },

    /// A conversion failed mid-computation.
    #[error("color conversion failed: {0}")]
    Color(#[from] ColorError),

    /// A numeric argument was NaN.
    #[error("{what} must be a number, got {value}")]
    NotANumber { what: &'static str, value: f64 },

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ContrastError>;
