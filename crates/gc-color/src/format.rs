// SPDX-License-Identifier: MIT
//
// Output formatting: CSS strings or structured values in a chosen space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Color, Space, to_u8};
use crate::error::ColorError;

// ─── Output selection ────────────────────────────────────────────────────────

/// Which space (or hex notation) results are emitted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSpace {
    #[default]
    Rgb,
    /// `#rrggbb`; only meaningful as CSS, objects fall back to `rgb`.
    Hex,
    Lrgb,
    Hsl,
    Oklab,
    Oklch,
}

impl OutputSpace {
    /// The color space values are converted into before formatting.
    #[must_use]
    pub const fn space(self) -> Space {
        match self {
            Self::Rgb | Self::Hex => Space::Rgb,
            Self::Lrgb => Space::Lrgb,
            Self::Hsl => Space::Hsl,
            Self::Oklab => Space::Oklab,
            Self::Oklch => Space::Oklch,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            other => other.space().name(),
        }
    }
}

impl fmt::Display for OutputSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputSpace {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("hex") {
            return Ok(Self::Hex);
        }
        let space = s.parse::<Space>().map_err(|_| ColorError::UnknownKeyword {
            kind: "output space",
            value: s.to_owned(),
        })?;
        Ok(match space {
            Space::Rgb => Self::Rgb,
            Space::Lrgb => Self::Lrgb,
            Space::Hsl => Self::Hsl,
            Space::Oklab => Self::Oklab,
            Space::Oklch => Self::Oklch,
        })
    }
}

/// Whether results are CSS text or structured [`Color`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Css,
    Object,
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Css => "css",
            Self::Object => "object",
        })
    }
}

impl FromStr for OutputStyle {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(Self::Css),
            "object" => Ok(Self::Object),
            _ => Err(ColorError::UnknownKeyword {
                kind: "output style",
                value: s.to_owned(),
            }),
        }
    }
}

/// A formatted result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputValue {
    Css(String),
    Object(Color),
}

impl OutputValue {
    /// The CSS text, if this is a CSS value.
    #[must_use]
    pub fn as_css(&self) -> Option<&str> {
        match self {
            Self::Css(s) => Some(s),
            Self::Object(_) => None,
        }
    }

    /// The structured color, if this is an object value.
    #[must_use]
    pub const fn as_object(&self) -> Option<Color> {
        match self {
            Self::Css(_) => None,
            Self::Object(c) => Some(*c),
        }
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => f.write_str(s),
            Self::Object(c) => write!(f, "{c}"),
        }
    }
}

// ─── Formatting ──────────────────────────────────────────────────────────────

/// Convert `color` into `output`'s space and render it in `style`.
///
/// No gamut mapping happens here; callers clamp first.
#[must_use]
pub fn format(color: Color, output: OutputSpace, style: OutputStyle) -> OutputValue {
    let converted = color.to_space(output.space());
    match (style, output) {
        (OutputStyle::Css, OutputSpace::Hex) => OutputValue::Css(to_hex(converted)),
        (OutputStyle::Css, _) => OutputValue::Css(to_css(converted)),
        (OutputStyle::Object, _) => OutputValue::Object(converted),
    }
}

/// CSS text for a color in its own space.
///
/// sRGB uses the legacy `rgb(r, g, b)` form with 0–255 integers so the
/// output reads the way most stylesheets write it.
#[must_use]
pub fn to_css(color: Color) -> String {
    let [x, y, z] = color.channels;
    let alpha = if color.is_opaque() {
        String::new()
    } else {
        format!(" / {}", color.alpha.clamp(0.0, 1.0))
    };

    match color.space {
        Space::Rgb => {
            let (r, g, b) = (to_u8(x), to_u8(y), to_u8(z));
            if color.is_opaque() {
                format!("rgb({r}, {g}, {b})")
            } else {
                format!("rgba({r}, {g}, {b}, {})", color.alpha.clamp(0.0, 1.0))
            }
        }
        Space::Lrgb => format!("color(srgb-linear {x} {y} {z}{alpha})"),
        Space::Hsl => format!("hsl({x} {}% {}%{alpha})", y * 100.0, z * 100.0),
        Space::Oklab => format!("oklab({x} {y} {z}{alpha})"),
        Space::Oklch => format!("oklch({x} {y} {z}{alpha})"),
    }
}

/// `#rrggbb`, or `#rrggbbaa` when the color is not opaque.
#[must_use]
pub fn to_hex(color: Color) -> String {
    let [r, g, b] = color.to_rgb8();
    if color.is_opaque() {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        let a = to_u8(color.alpha.clamp(0.0, 1.0));
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rgb_css() {
        let tan = Color::rgb8(195, 165, 111);
        assert_eq!(to_css(tan), "rgb(195, 165, 111)");
        assert_eq!(to_css(tan.with_alpha(0.5)), "rgba(195, 165, 111, 0.5)");
    }

    #[test]
    fn hex_output() {
        let tan = Color::rgb8(195, 165, 111);
        assert_eq!(
            format(tan, OutputSpace::Hex, OutputStyle::Css),
            OutputValue::Css("#c3a56f".into())
        );
        assert_eq!(to_hex(tan.with_alpha(0.0)), "#c3a56f00");
    }

    #[test]
    fn hex_object_falls_back_to_rgb() {
        let tan = Color::rgb8(195, 165, 111);
        assert_eq!(format(tan, OutputSpace::Hex, OutputStyle::Object), OutputValue::Object(tan));
    }

    #[test]
    fn modern_css_forms() {
        assert_eq!(to_css(Color::oklch(0.5, 0.1, 180.0)), "oklch(0.5 0.1 180)");
        assert_eq!(to_css(Color::oklab(0.5, -0.1, 0.25)), "oklab(0.5 -0.1 0.25)");
        assert_eq!(to_css(Color::hsl(120.0, 0.5, 0.25)), "hsl(120 50% 25%)");
        assert_eq!(
            to_css(Color::lrgb(1.0, 0.5, 0.0).with_alpha(0.25)),
            "color(srgb-linear 1 0.5 0 / 0.25)"
        );
    }

    #[test]
    fn object_output_converts_space() {
        let value = format(Color::WHITE, OutputSpace::Oklch, OutputStyle::Object);
        let color = value.as_object().unwrap();
        assert_eq!(color.space, Space::Oklch);
        assert!((color.channels[0] - 1.0).abs() < 1e-6);
        assert_eq!(value.as_css(), None);
    }

    #[test]
    fn keyword_parsing() {
        assert_eq!("HEX".parse::<OutputSpace>(), Ok(OutputSpace::Hex));
        assert_eq!("oklch".parse::<OutputSpace>(), Ok(OutputSpace::Oklch));
        assert_eq!("object".parse::<OutputStyle>(), Ok(OutputStyle::Object));
        assert!("cmyk".parse::<OutputSpace>().is_err());
        assert!("json".parse::<OutputStyle>().is_err());
    }

    #[test]
    fn object_serializes_as_plain_color() {
        let json = serde_json::to_string(&OutputValue::Object(Color::rgb(1.0, 0.0, 0.5))).unwrap();
        assert_eq!(json, r#"{"space":"rgb","channels":[1.0,0.0,0.5],"alpha":1.0}"#);
        let css = serde_json::to_string(&OutputValue::Css("rgb(1, 2, 3)".into())).unwrap();
        assert_eq!(css, r#""rgb(1, 2, 3)""#);
    }
}
