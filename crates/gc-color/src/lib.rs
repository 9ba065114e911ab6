// SPDX-License-Identifier: MIT
//
// gc-color: color spaces for gencontrast.
//
// Everything the contrast engine treats as a black box lives here: a
// space-tagged `Color` value, conversions between sRGB, linear sRGB, HSL,
// Oklab and OKLCH, CSS parsing (hex, functional notations, named colors),
// chroma-reducing gamut mapping, and output formatting. The `ColorEngine`
// trait bundles those four capabilities so the contrast crate can be
// driven by any implementation with the same linear-sRGB semantics.

pub mod color;
pub mod engine;
pub mod error;
pub mod format;
pub mod gamut;
mod named;
pub mod parse;

pub use color::{Color, Space};
pub use engine::{ColorEngine, CssEngine};
pub use error::ColorError;
pub use format::{OutputSpace, OutputStyle, OutputValue};
pub use gamut::Gamut;
