// SPDX-License-Identifier: MIT
//
// Error type shared by parsing, conversion, and keyword lookup.

use thiserror::Error;

/// Everything that can go wrong turning input into a [`Color`](crate::Color).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input was empty or whitespace only.
    #[error("empty color string")]
    Empty,

    /// A `#` color with the wrong length or non-hex digits.
    #[error("invalid hex color `#{0}`")]
    InvalidHex(String),

    /// A bare word that is not a CSS named color.
    #[error("unknown color name `{0}`")]
    UnknownName(String),

    /// A functional notation whose arguments don't fit the function.
    #[error("invalid {function}() arguments `{args}`")]
    InvalidFunction { function: String, args: String },

    /// A keyword (space, output, style, gamut) that is not recognised.
    #[error("unknown {kind} `{value}`")]
    UnknownKeyword { kind: &'static str, value: String },

    /// A channel or alpha value is NaN or infinite.
    #[error("color has non-finite channel values")]
    NonFinite,
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ColorError>;
