// SPDX-License-Identifier: MIT
//
// CSS color parsing: hex, functional notations, and named colors.
//
// Accepted forms:
//
//   #rgb  #rgba  #rrggbb  #rrggbbaa
//   rgb() rgba() hsl() hsla() oklab() oklch() color(srgb|srgb-linear …)
//   aliceblue, RebeccaPurple, transparent, …
//
// Functional arguments may use the legacy comma syntax (`rgb(1, 2, 3)`,
// `rgba(1, 2, 3, 0.5)`) or the modern space syntax with an optional
// slash alpha (`oklch(0.7 0.1 120 / 50%)`). `none` reads as zero.

use std::sync::LazyLock;

use regex::Regex;

use crate::color::{Color, Space};
use crate::error::{ColorError, Result};
use crate::named;

static FUNCTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z][a-z-]*)\(([^()]*)\)$").expect("Invalid color function regex")
});

static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:e[+-]?\d+)?)(%|deg|rad|grad|turn)?$")
        .expect("Invalid color number regex")
});

/// Parse any supported CSS color string.
///
/// # Errors
///
/// Returns a [`ColorError`] describing why the input is not a color.
pub fn parse_color(input: &str) -> Result<Color> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(caps) = FUNCTION_REGEX.captures(&lower) {
        return parse_function(&caps[1], caps[2].trim());
    }

    if lower == "transparent" {
        return Ok(Color::BLACK.with_alpha(0.0));
    }

    named::lookup(&lower)
        .map(|[r, g, b]| Color::rgb8(r, g, b))
        .ok_or_else(|| ColorError::UnknownName(s.to_owned()))
}

// ─── Hex ─────────────────────────────────────────────────────────────────────

fn parse_hex(hex: &str) -> Result<Color> {
    let invalid = || ColorError::InvalidHex(hex.to_owned());
    let bytes = hex.as_bytes();
    let nibble = |i: usize| parse_hex_digit(bytes[i]).ok_or_else(invalid);
    let byte = |i: usize| -> Result<u8> { Ok((nibble(i)? << 4) | nibble(i + 1)?) };

    let (rgb, alpha) = match bytes.len() {
        3 | 4 => {
            let short = |i: usize| nibble(i).map(|v| v * 17);
            let alpha = if bytes.len() == 4 { Some(short(3)?) } else { None };
            ([short(0)?, short(1)?, short(2)?], alpha)
        }
        6 | 8 => {
            let alpha = if bytes.len() == 8 { Some(byte(6)?) } else { None };
            ([byte(0)?, byte(2)?, byte(4)?], alpha)
        }
        _ => return Err(invalid()),
    };

    let color = Color::rgb8(rgb[0], rgb[1], rgb[2]);
    Ok(alpha.map_or(color, |a| color.with_alpha(f64::from(a) / 255.0)))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// ─── Functional notation ─────────────────────────────────────────────────────

/// One numeric argument, with angle units already folded into degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Percent(f64),
    Angle(f64),
    None,
}

impl Token {
    fn read(text: &str) -> Option<Self> {
        if text == "none" {
            return Some(Self::None);
        }
        let caps = NUMBER_REGEX.captures(text)?;
        let value: f64 = caps[1].parse().ok()?;
        let token = match caps.get(2).map(|m| m.as_str()) {
            None => Self::Number(value),
            Some("%") => Self::Percent(value),
            Some("deg") => Self::Angle(value),
            Some("rad") => Self::Angle(value.to_degrees()),
            Some("grad") => Self::Angle(value * 0.9),
            Some("turn") => Self::Angle(value * 360.0),
            Some(_) => return None,
        };
        Some(token)
    }

    /// 0–255 number or percentage → 0.0–1.0.
    fn rgb_channel(self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(v / 255.0),
            Self::Percent(p) => Some(p / 100.0),
            Self::None => Some(0.0),
            Self::Angle(_) => None,
        }
    }

    /// Plain number, or percentage scaled so 100% == `full`.
    fn scaled(self, full: f64) -> Option<f64> {
        match self {
            Self::Number(v) => Some(v),
            Self::Percent(p) => Some(p / 100.0 * full),
            Self::None => Some(0.0),
            Self::Angle(_) => None,
        }
    }

    /// HSL saturation/lightness: both `50%` and `50` mean one half.
    fn hsl_fraction(self) -> Option<f64> {
        match self {
            Self::Number(v) | Self::Percent(v) => Some(v / 100.0),
            Self::None => Some(0.0),
            Self::Angle(_) => None,
        }
    }

    fn hue(self) -> Option<f64> {
        match self {
            Self::Number(v) | Self::Angle(v) => Some(v),
            Self::None => Some(0.0),
            Self::Percent(_) => None,
        }
    }

    fn alpha(self) -> Option<f64> {
        self.scaled(1.0).map(|a| a.clamp(0.0, 1.0))
    }
}

fn parse_function(function: &str, args: &str) -> Result<Color> {
    let invalid = || ColorError::InvalidFunction {
        function: function.to_owned(),
        args: args.to_owned(),
    };

    let (body, slash_alpha) = match args.split_once('/') {
        Some((body, alpha)) => (body, Some(alpha.trim())),
        None => (args, None),
    };
    let mut words: Vec<&str> = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();

    // color(<space> c1 c2 c3)
    let color_space = if function == "color" {
        if words.is_empty() {
            return Err(invalid());
        }
        match words.remove(0) {
            "srgb" => Some(Space::Rgb),
            "srgb-linear" => Some(Space::Lrgb),
            _ => return Err(invalid()),
        }
    } else {
        None
    };

    // Legacy `rgba(r, g, b, a)`: a fourth comma-separated value is alpha.
    let alpha_text = match slash_alpha {
        Some(a) => Some(a),
        None if words.len() == 4 => words.pop(),
        None => None,
    };
    if words.len() != 3 {
        return Err(invalid());
    }

    let tokens = words
        .iter()
        .map(|w| Token::read(w))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)?;
    let [t0, t1, t2] = [tokens[0], tokens[1], tokens[2]];

    let alpha = match alpha_text {
        Some(text) => Token::read(text).and_then(Token::alpha).ok_or_else(invalid)?,
        None => 1.0,
    };

    let color = match (function, color_space) {
        ("rgb" | "rgba", _) => {
            let rgb = (t0.rgb_channel(), t1.rgb_channel(), t2.rgb_channel());
            match rgb {
                (Some(r), Some(g), Some(b)) => Color::rgb(r, g, b),
                _ => return Err(invalid()),
            }
        }
        ("hsl" | "hsla", _) => match (t0.hue(), t1.hsl_fraction(), t2.hsl_fraction()) {
            (Some(h), Some(s), Some(l)) => Color::hsl(h, s, l),
            _ => return Err(invalid()),
        },
        ("oklab", _) => match (t0.scaled(1.0), t1.scaled(0.4), t2.scaled(0.4)) {
            (Some(l), Some(a), Some(b)) => Color::oklab(l, a, b),
            _ => return Err(invalid()),
        },
        ("oklch", _) => match (t0.scaled(1.0), t1.scaled(0.4), t2.hue()) {
            (Some(l), Some(c), Some(h)) => Color::oklch(l, c, h),
            _ => return Err(invalid()),
        },
        ("color", Some(space)) => match (t0.scaled(1.0), t1.scaled(1.0), t2.scaled(1.0)) {
            (Some(x), Some(y), Some(z)) => Color::new(space, [x, y, z]),
            _ => return Err(invalid()),
        },
        _ => return Err(invalid()),
    };

    Ok(color.with_alpha(alpha))
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorError;

    fn try_from(value: &str) -> Result<Self> {
        parse_color(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
