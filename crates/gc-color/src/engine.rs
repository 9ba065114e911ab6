// SPDX-License-Identifier: MIT
//
// The color capability the contrast engine is written against.
//
// Contrast code never touches color-space math directly. It asks an engine
// to parse text, convert between spaces, map into a display gamut, and
// format results. `CssEngine` is the stock implementation; anything that
// honours linear-sRGB semantics for `Space::Lrgb` can stand in for it.

use crate::color::{Color, Space};
use crate::error::{ColorError, Result};
use crate::format::{self, OutputSpace, OutputStyle, OutputValue};
use crate::gamut::Gamut;
use crate::parse::parse_color;

/// Parse / convert / clamp / format, as one capability.
pub trait ColorEngine {
    /// Turn user text into a color.
    ///
    /// # Errors
    ///
    /// Returns a [`ColorError`] when the text is not a recognised color.
    fn parse(&self, text: &str) -> Result<Color>;

    /// Express `color` in `space`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::NonFinite`] when the color cannot be converted.
    fn convert(&self, color: Color, space: Space) -> Result<Color>;

    /// Map `color` into the engine's display gamut, keeping its space.
    fn clamp_to_gamut(&self, color: Color) -> Color;

    /// Render `color` for output.
    fn format(&self, color: Color, output: OutputSpace, style: OutputStyle) -> OutputValue;
}

/// CSS-syntax, OKLCH-based engine targeting a configurable RGB gamut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CssEngine {
    gamut: Gamut,
}

impl CssEngine {
    #[must_use]
    pub const fn new(gamut: Gamut) -> Self {
        Self { gamut }
    }

    #[must_use]
    pub const fn gamut(&self) -> Gamut {
        self.gamut
    }
}

impl ColorEngine for CssEngine {
    fn parse(&self, text: &str) -> Result<Color> {
        let color = parse_color(text)?;
        if color.is_finite() {
            Ok(color)
        } else {
            Err(ColorError::NonFinite)
        }
    }

    fn convert(&self, color: Color, space: Space) -> Result<Color> {
        if !color.is_finite() {
            return Err(ColorError::NonFinite);
        }
        let converted = color.to_space(space);
        if converted.is_finite() {
            Ok(converted)
        } else {
            Err(ColorError::NonFinite)
        }
    }

    fn clamp_to_gamut(&self, color: Color) -> Color {
        self.gamut.clamp(color)
    }

    fn format(&self, color: Color, output: OutputSpace, style: OutputStyle) -> OutputValue {
        format::format(self.clamp_to_gamut(color), output, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_rejects_overflowing_numbers() {
        let engine = CssEngine::default();
        assert_eq!(engine.parse("oklch(1e400 0 0)"), Err(ColorError::NonFinite));
        assert!(engine.parse("aliceblue").is_ok());
    }

    #[test]
    fn convert_rejects_non_finite() {
        let engine = CssEngine::default();
        let bad = Color::rgb(f64::NAN, 0.0, 0.0);
        assert_eq!(engine.convert(bad, Space::Oklch), Err(ColorError::NonFinite));
        let ok = engine.convert(Color::WHITE, Space::Lrgb).unwrap();
        assert_eq!(ok.space, Space::Lrgb);
    }

    #[test]
    fn format_clamps_before_rendering() {
        let engine = CssEngine::default();
        let vivid = Color::oklch(0.8, 0.19, 266.4);
        let css = engine.format(vivid, OutputSpace::Rgb, OutputStyle::Css);
        let OutputValue::Css(text) = css else {
            panic!("expected css output");
        };
        assert!(text.starts_with("rgb("), "{text}");
        let object = engine.format(vivid, OutputSpace::Oklch, OutputStyle::Object);
        let clamped = object.as_object().unwrap();
        assert!(clamped.channels[1] < 0.19);
        assert!(engine.gamut().contains(clamped));
    }

    #[test]
    fn wide_gamut_engine_keeps_more_chroma() {
        let vivid = Color::oklch(0.6, 0.3, 150.0);
        let srgb = CssEngine::new(Gamut::Srgb).clamp_to_gamut(vivid);
        let p3 = CssEngine::new(Gamut::DisplayP3).clamp_to_gamut(vivid);
        assert!(p3.channels[1] > srgb.channels[1]);
    }
}
