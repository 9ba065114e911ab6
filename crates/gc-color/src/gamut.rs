// SPDX-License-Identifier: MIT
//
// Gamut membership and chroma-reducing gamut mapping.
//
// A color is "in gamut" when its linear-light channels, expressed in the
// target display's RGB primaries, all land in [0, 1]. Mapping keeps OKLCH
// lightness and hue fixed and binary-searches the largest chroma that fits,
// so a clamped color differs from the original only in colorfulness.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Color, Space};
use crate::error::ColorError;

/// Slack for floating-point noise at the gamut boundary.
const GAMUT_EPSILON: f64 = 1e-9;

/// Chroma bisection steps; resolves chroma to ~0.4 / 2^24.
const CHROMA_STEPS: u32 = 24;

/// Linear sRGB → linear Display P3.
const SRGB_TO_P3: [[f64; 3]; 3] = [
    [0.822_462_1, 0.177_538, 0.0],
    [0.033_194_1, 0.966_805_8, 0.0],
    [0.017_082_7, 0.072_397_4, 0.910_519_9],
];

/// Linear sRGB → linear Rec. 2020.
const SRGB_TO_REC2020: [[f64; 3]; 3] = [
    [0.627_404, 0.329_282, 0.043_313_6],
    [0.069_097, 0.919_540, 0.011_361_2],
    [0.016_391_6, 0.088_013_2, 0.895_595],
];

/// The RGB gamut colors are mapped into before display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gamut {
    /// Standard sRGB displays.
    #[default]
    Srgb,
    /// Wide-gamut Display P3 panels.
    DisplayP3,
    /// Rec. 2020 (HDR / UHD).
    Rec2020,
}

impl Gamut {
    /// The lowercase identifier used in config files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Srgb => "srgb",
            Self::DisplayP3 => "display-p3",
            Self::Rec2020 => "rec2020",
        }
    }

    fn linear_channels(self, color: Color) -> [f64; 3] {
        let lin = color.to_linear_srgb();
        let matrix = match self {
            Self::Srgb => return lin,
            Self::DisplayP3 => &SRGB_TO_P3,
            Self::Rec2020 => &SRGB_TO_REC2020,
        };
        matrix.map(|row| row[2].mul_add(lin[2], row[0].mul_add(lin[0], row[1] * lin[1])))
    }

    /// Whether `color` is displayable in this gamut.
    #[must_use]
    pub fn contains(self, color: Color) -> bool {
        self.linear_channels(color)
            .iter()
            .all(|v| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(v))
    }

    /// Reduce chroma until `color` fits this gamut.
    ///
    /// In-gamut colors come back unchanged. Lightness at or beyond the ends
    /// of the range maps to pure white or black. The result is expressed in
    /// the input's space and keeps its alpha.
    #[must_use]
    pub fn clamp(self, color: Color) -> Color {
        if self.contains(color) {
            return color;
        }

        let [l, c, h] = color.to_space(Space::Oklch).channels;
        let mapped = if l >= 1.0 {
            Color::WHITE
        } else if l <= 0.0 {
            Color::BLACK
        } else {
            // Binary search for maximum in-gamut chroma
            let mut lo = 0.0;
            let mut hi = c;
            for _ in 0..CHROMA_STEPS {
                let mid = (lo + hi) * 0.5;
                if self.contains(Color::oklch(l, mid, h)) {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            Color::oklch(l, lo, h)
        };

        mapped.with_alpha(color.alpha).to_space(color.space)
    }
}

impl fmt::Display for Gamut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gamut {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srgb" | "rgb" => Ok(Self::Srgb),
            "display-p3" | "p3" => Ok(Self::DisplayP3),
            "rec2020" | "rec-2020" => Ok(Self::Rec2020),
            _ => Err(ColorError::UnknownKeyword {
                kind: "gamut",
                value: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn in_gamut_is_untouched() {
        let tan = Color::rgb8(195, 165, 111);
        assert_eq!(Gamut::Srgb.clamp(tan), tan);
    }

    #[test]
    fn vivid_blue_loses_chroma_only() {
        let vivid = Color::oklch(0.8, 0.19, 266.4);
        assert!(!Gamut::Srgb.contains(vivid));
        let clamped = Gamut::Srgb.clamp(vivid);
        assert_eq!(clamped.space, Space::Oklch);
        assert!(Gamut::Srgb.contains(clamped));
        assert!(approx_eq(clamped.channels[0], 0.8, 1e-12));
        assert!(approx_eq(clamped.channels[2], 266.4, 1e-12));
        assert!(clamped.channels[1] < 0.19 && clamped.channels[1] > 0.05, "{clamped:?}");
    }

    #[test]
    fn wide_gamuts_hold_more_chroma() {
        let vivid = Color::oklch(0.6, 0.3, 150.0);
        let srgb = Gamut::Srgb.clamp(vivid).channels[1];
        let p3 = Gamut::DisplayP3.clamp(vivid).channels[1];
        let rec = Gamut::Rec2020.clamp(vivid).channels[1];
        assert!(srgb < p3 && p3 < rec, "srgb {srgb}, p3 {p3}, rec2020 {rec}");
    }

    #[test]
    fn pure_srgb_red_fits_p3() {
        assert!(Gamut::DisplayP3.contains(Color::rgb(1.0, 0.0, 0.0)));
        assert!(!Gamut::Srgb.contains(Color::rgb(1.02, 0.0, 0.0)));
    }

    #[test]
    fn lightness_extremes_map_to_black_and_white() {
        let over = Gamut::Srgb.clamp(Color::oklch(1.2, 0.1, 30.0).with_alpha(0.5));
        assert_eq!(over.space, Space::Oklch);
        assert!(approx_eq(over.channels[0], 1.0, 1e-6));
        assert!(approx_eq(over.alpha, 0.5, 1e-15));
        let under = Gamut::Srgb.clamp(Color::rgb(-0.2, -0.1, -0.3));
        assert_eq!(under.space, Space::Rgb);
        assert!(under.channels.iter().all(|v| approx_eq(*v, 0.0, 1e-9)), "{under:?}");
    }

    #[test]
    fn gamut_names_round_trip() {
        for gamut in [Gamut::Srgb, Gamut::DisplayP3, Gamut::Rec2020] {
            assert_eq!(gamut.name().parse::<Gamut>(), Ok(gamut));
        }
        assert_eq!("P3".parse::<Gamut>(), Ok(Gamut::DisplayP3));
        assert!("adobe".parse::<Gamut>().is_err());
    }
}
