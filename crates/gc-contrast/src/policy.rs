//! Contrast enforcement between a main and a secondary color.
//!
//! [`enforce_contrast`] decides which color moves and asks the solver for
//! the luminance that reaches the ratio, measured on the gamut-mapped color
//! that will be emitted. Three priorities are supported:
//!
//! - **Main**: the main color is kept; the secondary moves away from it.
//! - **Secondary**: the mirror image.
//! - **Both**: the two meet halfway, each shifting luminance by the same
//!   amount in opposite directions.
//!
//! A single-sided move can run into white or black before the ratio is met.
//! When that leaves the pair short, a second pass nudges the kept color away
//! from the adjusted one. Whatever still falls short is returned anyway, with
//! the shortfall logged and visible through [`ContrastedPair::meets_target`].

use std::fmt;
use std::str::FromStr;

use gc_color::{Color, ColorEngine, ColorError, Space};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ContrastError, Result};
use crate::luminance::{
    both_luminance_goals, clamp_contrast, contrast_between, luminance_goals, luminance_of,
};
use crate::solver::{Aim, solve_in_gamut};

/// YIQ brightness (0–255 scale) below which a color reads as dark.
const YIQ_DARK_THRESHOLD: f64 = 128.0;

/// Which color is kept when contrast has to be fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Keep the main color, move the secondary.
    #[default]
    Main,
    /// Keep the secondary color, move the main.
    Secondary,
    /// Move both symmetrically.
    Both,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Main => "main",
            Self::Secondary => "secondary",
            Self::Both => "both",
        })
    }
}

impl FromStr for Priority {
    type Err = ColorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(Self::Main),
            "secondary" => Ok(Self::Secondary),
            "both" => Ok(Self::Both),
            _ => Err(ColorError::UnknownKeyword {
                kind: "priority",
                value: s.to_owned(),
            }),
        }
    }
}

/// A main/secondary pair after enforcement, both in OKLCH and in gamut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastedPair {
    pub main: Color,
    pub secondary: Color,
    /// Contrast ratio the pair actually achieves.
    pub contrast: f64,
    /// Requested ratio after clamping into [1, 21].
    pub target: f64,
    /// Adjustment passes run: 0 when the input already passed.
    pub passes: u8,
}

impl ContrastedPair {
    /// Whether the achieved contrast reaches the target.
    #[must_use]
    pub fn meets_target(&self) -> bool {
        self.contrast >= self.target
    }
}

/// Whether `color` reads as dark, by its YIQ brightness in sRGB.
///
/// # Errors
///
/// Propagates the engine's conversion failure.
pub fn is_dark<E: ColorEngine + ?Sized>(engine: &E, color: Color) -> Result<bool> {
    let [r, g, b] = engine
        .convert(color, Space::Rgb)?
        .channels
        .map(|v| v.clamp(0.0, 1.0) * 255.0);
    let yiq = (r * 299.0 + g * 587.0 + b * 114.0) / 1000.0;
    Ok(yiq < YIQ_DARK_THRESHOLD)
}

/// Adjust `main` and/or `secondary` so their contrast reaches `min_contrast`.
///
/// Both colors are first expressed in OKLCH and mapped into the engine's
/// gamut. A pair that already passes comes back with `passes == 0` and no
/// further changes. `min_contrast` is clamped into [1, 21].
///
/// # Errors
///
/// [`ContrastError::NotANumber`] for a NaN ratio, or a conversion failure
/// from the engine. Falling short of the ratio is not an error.
pub fn enforce_contrast<E: ColorEngine + ?Sized>(
    engine: &E,
    main: Color,
    secondary: Color,
    min_contrast: f64,
    priority: Priority,
) -> Result<ContrastedPair> {
    if min_contrast.is_nan() {
        return Err(ContrastError::NotANumber {
            what: "minimum contrast",
            value: min_contrast,
        });
    }
    let target = clamp_contrast(min_contrast);

    let main = to_working(engine, main)?;
    let secondary = to_working(engine, secondary)?;

    let initial = contrast_between(engine, main, secondary)?;
    if initial >= target {
        debug!("contrast {initial:.3} already meets {target}, nothing to do");
        return Ok(ContrastedPair {
            main,
            secondary,
            contrast: initial,
            target,
            passes: 0,
        });
    }

    debug!("contrast {initial:.3} below {target}, adjusting with priority {priority}");
    let (main, secondary, passes) = match priority {
        Priority::Main => {
            let (kept, moved, passes) = keep_one(engine, main, secondary, target)?;
            (kept, moved, passes)
        }
        Priority::Secondary => {
            let (kept, moved, passes) = keep_one(engine, secondary, main, target)?;
            (moved, kept, passes)
        }
        Priority::Both => {
            let (main, secondary) = meet_halfway(engine, main, secondary, target)?;
            (main, secondary, 1)
        }
    };

    let contrast = contrast_between(engine, main, secondary)?;
    if contrast < target {
        warn!(
            "could only reach contrast {contrast:.3} of {target} between {main} and {secondary} \
             (priority {priority})"
        );
    } else {
        debug!("reached contrast {contrast:.3} after {passes} pass(es)");
    }

    Ok(ContrastedPair {
        main,
        secondary,
        contrast,
        target,
        passes,
    })
}

fn to_working<E: ColorEngine + ?Sized>(engine: &E, color: Color) -> Result<Color> {
    Ok(engine.clamp_to_gamut(engine.convert(color, Space::Oklch)?))
}

/// Move `color` to `goal`, landing in gamut on the aimed side.
fn settle<E: ColorEngine + ?Sized>(
    engine: &E,
    color: Color,
    goal: f64,
    aim: Option<Aim>,
) -> Result<Color> {
    Ok(solve_in_gamut(engine, color, goal, aim)?.color)
}

/// Move `moving` away from `kept`; nudge `kept` if the first move left the
/// pair short. Returns `(kept, moved, passes)`.
fn keep_one<E: ColorEngine + ?Sized>(
    engine: &E,
    kept: Color,
    moving: Color,
    target: f64,
) -> Result<(Color, Color, u8)> {
    let dark = is_dark(engine, kept)?;
    let goals = luminance_goals(luminance_of(engine, kept)?, target);

    // A dark kept color pushes its partner lighter, a light one darker.
    let moved = if dark {
        settle(engine, moving, goals.high, Some(Aim::Above))?
    } else {
        settle(engine, moving, goals.low, Some(Aim::Below))?
    };

    if contrast_between(engine, kept, moved)? >= target {
        return Ok((kept, moved, 1));
    }

    let goals = luminance_goals(luminance_of(engine, moved)?, target);
    let kept_goal = if dark { goals.low } else { goals.high };
    debug!("first pass fell short, moving the kept color toward Y = {kept_goal:.4}");
    let kept = settle(engine, kept, kept_goal, None)?;
    Ok((kept, moved, 2))
}

fn meet_halfway<E: ColorEngine + ?Sized>(
    engine: &E,
    main: Color,
    secondary: Color,
    target: f64,
) -> Result<(Color, Color)> {
    let main_lum = luminance_of(engine, main)?;
    let secondary_lum = luminance_of(engine, secondary)?;
    let goals = both_luminance_goals(main_lum, secondary_lum, target);

    let (main_goal, secondary_goal) = if main_lum >= secondary_lum {
        (goals.high, goals.low)
    } else {
        (goals.low, goals.high)
    };

    Ok((
        settle(engine, main, main_goal, None)?,
        settle(engine, secondary, secondary_goal, None)?,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NEUTRAL_GRAY;
    use gc_color::CssEngine;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn rgb8<E: ColorEngine>(engine: &E, color: Color) -> [u8; 3] {
        engine.convert(color, Space::Rgb).unwrap().to_rgb8()
    }

    fn tan() -> Color {
        Color::rgb8(195, 165, 111)
    }

    fn alice_blue() -> Color {
        Color::rgb8(240, 248, 255)
    }

    // ── is_dark ─────────────────────────────────────────────────────

    #[test]
    fn dark_and_light() {
        let engine = CssEngine::default();
        assert!(is_dark(&engine, Color::BLACK).unwrap());
        assert!(is_dark(&engine, Color::rgb8(0, 0, 128)).unwrap());
        assert!(!is_dark(&engine, Color::WHITE).unwrap());
        assert!(!is_dark(&engine, tan()).unwrap());
        assert!(!is_dark(&engine, Color::rgb8(128, 128, 128)).unwrap());
        assert!(is_dark(&engine, Color::rgb8(127, 127, 127)).unwrap());
    }

    #[test]
    fn is_dark_clamps_channels() {
        let engine = CssEngine::default();
        // Out-of-range channels saturate instead of skewing the average.
        assert!(!is_dark(&engine, Color::rgb(0.2, 3.0, 0.2)).unwrap());
        assert!(is_dark(&engine, Color::rgb(-4.0, 0.3, 0.3)).unwrap());
    }

    // ── Priorities ──────────────────────────────────────────────────

    #[test]
    fn main_priority_moves_secondary() {
        let engine = CssEngine::default();
        let pair = enforce_contrast(&engine, tan(), alice_blue(), 7.0, Priority::Main).unwrap();
        assert_eq!(rgb8(&engine, pair.main), [195, 165, 111]);
        assert_eq!(rgb8(&engine, pair.secondary), [26, 32, 37]);
        assert_eq!(pair.passes, 1);
        assert!(pair.meets_target(), "contrast {}", pair.contrast);
        assert!(approx_eq(pair.contrast, 7.002, 1e-3), "contrast {}", pair.contrast);
    }

    #[test]
    fn secondary_priority_moves_main() {
        let engine = CssEngine::default();
        let pair =
            enforce_contrast(&engine, tan(), alice_blue(), 7.0, Priority::Secondary).unwrap();
        assert_eq!(rgb8(&engine, pair.main), [107, 80, 25]);
        assert_eq!(rgb8(&engine, pair.secondary), [240, 248, 255]);
        assert_eq!(pair.passes, 1);
        assert!(approx_eq(pair.contrast, 7.005, 1e-3), "contrast {}", pair.contrast);
    }

    #[test]
    fn both_priority_moves_both() {
        let engine = CssEngine::default();
        let pair = enforce_contrast(&engine, tan(), alice_blue(), 7.0, Priority::Both).unwrap();
        assert_eq!(rgb8(&engine, pair.main), [112, 85, 30]);
        assert_eq!(rgb8(&engine, pair.secondary), [255, 255, 255]);
        assert!(pair.meets_target(), "contrast {}", pair.contrast);
    }

    #[test]
    fn both_priority_is_symmetric() {
        let engine = CssEngine::default();
        let ab = enforce_contrast(&engine, tan(), NEUTRAL_GRAY, 4.5, Priority::Both).unwrap();
        let ba = enforce_contrast(&engine, NEUTRAL_GRAY, tan(), 4.5, Priority::Both).unwrap();
        assert_eq!(ab.main, ba.secondary);
        assert_eq!(ab.secondary, ba.main);
        assert!(approx_eq(ab.contrast, ba.contrast, 1e-12));
    }

    #[test]
    fn main_and_secondary_priorities_mirror() {
        let engine = CssEngine::default();
        let keep_main =
            enforce_contrast(&engine, tan(), NEUTRAL_GRAY, 4.5, Priority::Main).unwrap();
        let keep_second =
            enforce_contrast(&engine, NEUTRAL_GRAY, tan(), 4.5, Priority::Secondary).unwrap();
        assert_eq!(keep_main.main, keep_second.secondary);
        assert_eq!(keep_main.secondary, keep_second.main);
    }

    // ── Short circuit and clamping ──────────────────────────────────

    #[test]
    fn passing_pair_is_left_alone() {
        let engine = CssEngine::default();
        for priority in [Priority::Main, Priority::Secondary, Priority::Both] {
            let pair =
                enforce_contrast(&engine, Color::BLACK, Color::WHITE, 7.0, priority).unwrap();
            assert_eq!(pair.passes, 0);
            assert_eq!(pair.main, Color::BLACK.to_space(Space::Oklch));
            assert_eq!(pair.secondary, Color::WHITE.to_space(Space::Oklch));
            assert!(approx_eq(pair.contrast, 21.0, 1e-6));
        }
    }

    #[test]
    fn ratio_is_clamped() {
        let engine = CssEngine::default();
        let over = enforce_contrast(&engine, tan(), alice_blue(), 30.0, Priority::Main).unwrap();
        let max = enforce_contrast(&engine, tan(), alice_blue(), 21.0, Priority::Main).unwrap();
        assert_eq!(over, max);
        assert_eq!(over.target, 21.0);

        let under = enforce_contrast(&engine, tan(), tan(), 0.0, Priority::Main).unwrap();
        assert_eq!(under.target, 1.0);
        assert_eq!(under.passes, 0);
    }

    #[test]
    fn nan_ratio_is_rejected() {
        let engine = CssEngine::default();
        let err = enforce_contrast(&engine, tan(), alice_blue(), f64::NAN, Priority::Main)
            .unwrap_err();
        assert!(matches!(err, ContrastError::NotANumber { .. }), "{err}");
    }

    #[test]
    fn results_are_in_gamut_and_oklch() {
        let engine = CssEngine::default();
        let vivid = Color::oklch(0.7, 0.3, 30.0);
        for priority in [Priority::Main, Priority::Secondary, Priority::Both] {
            let pair = enforce_contrast(&engine, vivid, NEUTRAL_GRAY, 4.5, priority).unwrap();
            assert_eq!(pair.main.space, Space::Oklch);
            assert_eq!(pair.secondary.space, Space::Oklch);
            assert!(engine.gamut().contains(pair.main), "{priority}: {}", pair.main);
            assert!(engine.gamut().contains(pair.secondary), "{priority}: {}", pair.secondary);
        }
    }

    // ── Contrast satisfaction ───────────────────────────────────────

    #[test]
    fn ratios_are_met_across_the_rgb_cube() {
        let engine = CssEngine::default();
        let levels = [0, 51, 102, 153, 204, 255];
        for reference in [NEUTRAL_GRAY, alice_blue()] {
            for r in levels {
                for g in levels {
                    for b in levels {
                        let color = Color::rgb8(r, g, b);
                        for ratio in [3.0, 4.5, 7.0] {
                            for priority in [Priority::Main, Priority::Secondary, Priority::Both] {
                                let pair =
                                    enforce_contrast(&engine, color, reference, ratio, priority)
                                        .unwrap();
                                assert!(
                                    pair.contrast >= ratio - 1e-6,
                                    "{color} vs {reference} at {ratio} ({priority}): {} in {} \
                                     pass(es)",
                                    pair.contrast,
                                    pair.passes
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn saturated_colors_keep_their_aim_after_gamut_mapping() {
        let engine = CssEngine::default();
        let cases = [
            (Color::rgb8(0, 0, 255), 4.5, Priority::Both),
            (Color::rgb8(0, 102, 204), 3.0, Priority::Both),
            (Color::rgb8(0, 153, 255), 4.5, Priority::Main),
        ];
        for (color, ratio, priority) in cases {
            let pair = enforce_contrast(&engine, color, NEUTRAL_GRAY, ratio, priority).unwrap();
            assert!(pair.contrast >= ratio - 1e-6, "{color} ({priority}): {}", pair.contrast);
            assert!(engine.gamut().contains(pair.main), "{}", pair.main);
            assert!(engine.gamut().contains(pair.secondary), "{}", pair.secondary);
        }
    }

    #[test]
    fn shortfall_is_reported_not_raised() {
        let engine = CssEngine::default();
        let red = Color::rgb(1.0, 0.0, 0.0);
        let pair = enforce_contrast(&engine, red, red, 21.0, Priority::Main).unwrap();
        assert_eq!(pair.target, 21.0);
        assert_eq!(pair.meets_target(), pair.contrast >= 21.0);
        assert!(pair.passes >= 1);
    }

    #[test]
    fn alpha_survives_adjustment() {
        let engine = CssEngine::default();
        let pair = enforce_contrast(
            &engine,
            tan().with_alpha(0.5),
            alice_blue().with_alpha(0.25),
            7.0,
            Priority::Main,
        )
        .unwrap();
        assert!(approx_eq(pair.main.alpha, 0.5, 1e-15));
        assert!(approx_eq(pair.secondary.alpha, 0.25, 1e-15));
    }

    #[test]
    fn priority_keywords() {
        assert_eq!("BOTH".parse::<Priority>(), Ok(Priority::Both));
        assert_eq!(" secondary ".parse::<Priority>(), Ok(Priority::Secondary));
        assert!("either".parse::<Priority>().is_err());
        assert_eq!(Priority::default(), Priority::Main);
    }
}
