// SPDX-License-Identifier: MIT
//
// gc-color value type: a color tagged with the space its channels live in.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline (linear sRGB is the hub):
//
//   HSL ↔ sRGB ↔ Linear sRGB ↔ Oklab ↔ OKLCH
//
// The sRGB transfer function is applied sign-preserving, so colors that
// sit outside the sRGB gamut (negative or > 1 linear channels) survive a
// round trip through any space. Gamut mapping lives in `gamut.rs`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

// ─── Space ───────────────────────────────────────────────────────────────────

/// The color space a [`Color`]'s channels are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    /// Gamma-encoded sRGB, channels nominally in 0.0–1.0.
    Rgb,
    /// Linear-light sRGB (what the WCAG luminance formula consumes).
    Lrgb,
    /// Hue in degrees, saturation and lightness in 0.0–1.0.
    Hsl,
    /// Oklab: lightness 0.0–1.0 plus opponent axes a, b.
    Oklab,
    /// Cylindrical Oklab: lightness, chroma, hue in degrees.
    Oklch,
}

impl Space {
    /// Every supported space, in declaration order.
    pub const ALL: [Self; 5] = [Self::Rgb, Self::Lrgb, Self::Hsl, Self::Oklab, Self::Oklch];

    /// The lowercase identifier used in config files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Lrgb => "lrgb",
            Self::Hsl => "hsl",
            Self::Oklab => "oklab",
            Self::Oklch => "oklch",
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Space {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" | "srgb" => Ok(Self::Rgb),
            "lrgb" | "srgb-linear" => Ok(Self::Lrgb),
            "hsl" => Ok(Self::Hsl),
            "oklab" => Ok(Self::Oklab),
            "oklch" => Ok(Self::Oklch),
            _ => Err(ColorError::UnknownKeyword {
                kind: "color space",
                value: s.to_owned(),
            }),
        }
    }
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// A color value: three channels in a tagged space plus alpha.
///
/// Colors are plain `Copy` values. Nothing mutates a color in place;
/// every conversion and adjustment hands back a new one.
///
/// ```
/// use gc_color::{Color, Space};
///
/// let tan = Color::rgb8(195, 165, 111);
/// let lch = tan.to_space(Space::Oklch);
/// assert_eq!(lch.space, Space::Oklch);
/// assert!((lch.channels[0] - 0.736).abs() < 0.001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Space the channels are expressed in.
    pub space: Space,

    /// Channel values in the space's native order and range.
    pub channels: [f64; 3],

    /// Opacity: 0.0 (fully transparent) to 1.0 (fully opaque).
    #[serde(default = "opaque")]
    pub alpha: f64,
}

const fn opaque() -> f64 {
    1.0
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create an opaque color from raw channels in `space`.
    #[inline]
    #[must_use]
    pub const fn new(space: Space, channels: [f64; 3]) -> Self {
        Self {
            space,
            channels,
            alpha: 1.0,
        }
    }

    /// Create a color from gamma-encoded sRGB values (0.0 to 1.0 range).
    #[inline]
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Space::Rgb, [r, g, b])
    }

    /// Create a color from 8-bit sRGB values (0 to 255).
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Create a color from linear-light sRGB values.
    #[inline]
    #[must_use]
    pub const fn lrgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Space::Lrgb, [r, g, b])
    }

    /// Create a color from HSL values (hue in degrees, s/l in 0.0–1.0).
    #[inline]
    #[must_use]
    pub const fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::new(Space::Hsl, [h, s, l])
    }

    /// Create a color from Oklab values.
    #[inline]
    #[must_use]
    pub const fn oklab(l: f64, a: f64, b: f64) -> Self {
        Self::new(Space::Oklab, [l, a, b])
    }

    /// Create a color from OKLCH values.
    ///
    /// - `l`: Lightness, 0.0 to 1.0
    /// - `c`: Chroma, 0.0 to ~0.37
    /// - `h`: Hue angle in degrees, 0.0 to 360.0
    #[inline]
    #[must_use]
    pub const fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self::new(Space::Oklch, [l, c, h])
    }

    /// Pure black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    // ─── Alpha ───────────────────────────────────────────────────────────

    /// Return a copy with the given alpha value.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Whether this color is fully opaque (alpha >= 1.0).
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    /// Whether every channel and the alpha are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.alpha.is_finite() && self.channels.iter().all(|v| v.is_finite())
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// Convert to another space. Total over finite input; out-of-gamut
    /// values are carried through unclamped.
    #[must_use]
    pub fn to_space(self, space: Space) -> Self {
        if self.space == space {
            return self;
        }

        let [x, y, z] = self.channels;
        let channels = match (self.space, space) {
            (Space::Oklab, Space::Oklch) => oklab_to_oklch(x, y, z),
            (Space::Oklch, Space::Oklab) => oklch_to_oklab(x, y, z),
            (Space::Rgb, Space::Hsl) => srgb_to_hsl(x, y, z),
            (Space::Hsl, Space::Rgb) => hsl_to_srgb(x, y, z),
            _ => from_linear_srgb(self.to_linear_srgb(), space),
        };

        Self {
            space,
            channels,
            alpha: self.alpha,
        }
    }

    /// Linear-light sRGB channels, unclamped.
    #[must_use]
    pub fn to_linear_srgb(self) -> [f64; 3] {
        let [x, y, z] = self.channels;
        match self.space {
            Space::Rgb => [srgb_to_linear(x), srgb_to_linear(y), srgb_to_linear(z)],
            Space::Lrgb => self.channels,
            Space::Hsl => {
                let [r, g, b] = hsl_to_srgb(x, y, z);
                [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)]
            }
            Space::Oklab => oklab_to_linear_srgb(x, y, z),
            Space::Oklch => {
                let [l, a, b] = oklch_to_oklab(x, y, z);
                oklab_to_linear_srgb(l, a, b)
            }
        }
    }

    /// Convert to 8-bit sRGB, clipping each channel into range.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        let [r, g, b] = self.to_space(Space::Rgb).channels;
        [to_u8(r), to_u8(g), to_u8(b)]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::to_css(*self))
    }
}

// ─── Color Space Conversion Functions ────────────────────────────────────────
//
// Oklab math by Björn Ottosson, https://bottosson.github.io/posts/oklab/
// with the double-precision matrices used by CSS Color 4 implementations.

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Chroma below this is treated as achromatic (hue undefined → 0).
const ACHROMATIC: f64 = 1e-8;

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

#[inline]
fn oklch_to_oklab(l: f64, c: f64, h: f64) -> [f64; 3] {
    let h_rad = h.to_radians();
    [l, c * h_rad.cos(), c * h_rad.sin()]
}

#[inline]
fn oklab_to_oklch(l: f64, a: f64, b: f64) -> [f64; 3] {
    let c = a.hypot(b);
    let h = if c < ACHROMATIC {
        0.0
    } else {
        normalize_hue(b.atan2(a).to_degrees())
    };
    [l, c, h]
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────

/// Convert Oklab (L, a, b) to linear sRGB.
#[inline]
#[must_use]
pub fn oklab_to_linear_srgb(l_ok: f64, a: f64, b: f64) -> [f64; 3] {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_757_309_913_6f64.mul_add(b, 0.396_337_777_376_174_9f64.mul_add(a, l_ok));
    let m_ = 0.063_854_172_825_813_3f64.mul_add(-b, 0.105_561_345_815_658_6f64.mul_add(-a, l_ok));
    let s_ = 1.291_485_548_019_409_2f64.mul_add(-b, 0.089_484_177_529_811_9f64.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    [
        0.230_969_903_182_104_4f64.mul_add(s, 4.076_741_636_075_957f64.mul_add(l, -(3.307_711_539_258_061_6 * m))),
        0.341_319_376_002_657_3f64.mul_add(-s, (-1.268_437_973_285_031_7f64).mul_add(l, 2.609_757_349_287_688_7 * m)),
        1.707_614_694_074_611_7f64.mul_add(s, (-0.004_196_076_138_675_6f64).mul_add(l, -(0.703_418_617_935_936_2 * m))),
    ]
}

/// Convert linear sRGB to Oklab (L, a, b).
#[inline]
#[must_use]
pub fn linear_srgb_to_oklab([r, g, b]: [f64; 3]) -> [f64; 3] {
    // Linear sRGB → LMS
    let l = 0.051_445_993_267_502_2f64.mul_add(b, 0.412_221_469_470_763f64.mul_add(r, 0.536_332_537_261_734_8 * g));
    let m = 0.107_396_953_536_940_6f64.mul_add(b, 0.211_903_495_817_825_2f64.mul_add(r, 0.680_699_550_645_234_4 * g));
    let s = 0.629_978_701_673_822_3f64.mul_add(b, 0.088_302_459_190_056_4f64.mul_add(r, 0.281_718_839_136_121_5 * g));

    // Cube root (LMS → Oklab intermediate)
    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    [
        0.004_072_043_011_619_3f64.mul_add(-s_, 0.210_454_268_309_314f64.mul_add(l_, 0.793_617_774_702_305_4 * m_)),
        0.450_593_709_617_411f64.mul_add(s_, 1.977_998_532_431_168_4f64.mul_add(l_, -(2.428_592_242_048_58 * m_))),
        0.808_675_754_923_077_4f64.mul_add(-s_, 0.025_904_042_465_547_8f64.mul_add(l_, 0.782_771_712_457_529_6 * m_)),
    ]
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
///
/// Sign-preserving: negative inputs map to the mirrored curve.
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(abs.powf(1.0 / 2.4), -0.055).copysign(c)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
///
/// Sign-preserving: negative inputs map to the mirrored curve.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.040_45 {
        c / 12.92
    } else {
        ((abs + 0.055) / 1.055).powf(2.4).copysign(c)
    }
}

// ─── sRGB ↔ HSL ─────────────────────────────────────────────────────────────

fn srgb_to_hsl(r: f64, g: f64, b: f64) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) * 0.5;
    let d = max - min;

    if d.abs() < f64::EPSILON {
        return [0.0, 0.0, l];
    }

    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    #[allow(clippy::float_cmp)]
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    [normalize_hue(h * 60.0), s, l]
}

fn hsl_to_srgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    let h = normalize_hue(h);
    let a = s * l.min(1.0 - l);
    let channel = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        a.mul_add(-(k - 3.0).min(9.0 - k).clamp(-1.0, 1.0), l)
    };
    [channel(0.0), channel(8.0), channel(4.0)]
}

// ─── Hub ─────────────────────────────────────────────────────────────────────

fn from_linear_srgb(lin: [f64; 3], space: Space) -> [f64; 3] {
    let encode = |[r, g, b]: [f64; 3]| [linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b)];
    match space {
        Space::Rgb => encode(lin),
        Space::Lrgb => lin,
        Space::Hsl => {
            let [r, g, b] = encode(lin);
            srgb_to_hsl(r, g, b)
        }
        Space::Oklab => linear_srgb_to_oklab(lin),
        Space::Oklch => {
            let [l, a, b] = linear_srgb_to_oklab(lin);
            oklab_to_oklch(l, a, b)
        }
    }
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
