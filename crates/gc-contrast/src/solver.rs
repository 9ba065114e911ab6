//! Luminance-targeting lightness search.
//!
//! Given a color and a target WCAG luminance, find the OKLCH lightness that
//! reaches it while chroma and hue stay put. Luminance rises monotonically
//! with OKLCH lightness at fixed chroma and hue, so a plain bisection on `l`
//! converges.
//!
//! [`solve`] runs on *unclamped* colors: luminance comes straight from the
//! linear channels even when they stray outside [0, 1]. Gamut mapping then
//! trims chroma and can shift the luminance it found, so callers that emit
//! the color use [`solve_in_gamut`], which checks the mapped result and
//! searches again over mapped colors when it slipped.

use std::fmt;
use std::str::FromStr;

use gc_color::{Color, ColorEngine, ColorError, Space};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{ContrastError, Result};
use crate::luminance::luminance_of;

/// Bisection stops once the bracket is this narrow and the chosen edge is
/// this close to the target luminance.
pub const TOLERANCE: f64 = 2e-4;

/// Hard cap on bisection steps, for targets the hue cannot reach.
pub const MAX_ITERATIONS: u32 = 48;

/// Which side of the target the result must land on.
///
/// `Above` guarantees a luminance no lower than the target (up to
/// [`TOLERANCE`]), `Below` no higher. Contrast enforcement uses this to keep
/// rounding from eating into the ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aim {
    Above,
    Below,
}

impl fmt::Display for Aim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Above => "above",
            Self::Below => "below",
        })
    }
}

impl FromStr for Aim {
    type Err = ColorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "above" => Ok(Self::Above),
            "below" => Ok(Self::Below),
            _ => Err(ColorError::UnknownKeyword {
                kind: "aim",
                value: s.to_owned(),
            }),
        }
    }
}

impl Aim {
    /// Whether `luminance` lies on this side of `target`.
    const fn accepts(self, luminance: f64, target: f64) -> bool {
        match self {
            Self::Above => luminance >= target,
            Self::Below => luminance <= target,
        }
    }
}

/// Outcome of a luminance search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// The adjusted color, in OKLCH (pure white or black at the extremes).
    pub color: Color,
    /// Luminance actually reached.
    pub luminance: f64,
    /// Bisection steps taken; zero for the trivial targets.
    pub iterations: u32,
}

/// Adjust `color`'s lightness until its luminance reaches `target`.
///
/// Targets at or above 1 give pure white and at or below 0 pure black, both
/// keeping the input's alpha. Otherwise the bracket starts at the current
/// lightness and extends toward whichever end the target lies in. With no
/// `aim`, the result lands on the side it approached from.
///
/// # Errors
///
/// [`ContrastError::NotANumber`] for a NaN target, or a conversion failure
/// from the engine.
pub fn solve<E: ColorEngine + ?Sized>(
    engine: &E,
    color: Color,
    target: f64,
    aim: Option<Aim>,
) -> Result<Solution> {
    if let Some(boundary) = boundary_solution(color, target)? {
        return Ok(boundary);
    }

    let [l, c, h] = engine.convert(color, Space::Oklch)?.channels;
    let measure = |lightness: f64| luminance_of(engine, Color::oklch(lightness, c, h));
    let found = bisect(measure, l, target, aim)?;
    if found.iterations == MAX_ITERATIONS {
        trace!(
            "target {target:.6} not reached at hue {h:.2}, settled on Y = {:.6}",
            found.luminance
        );
    }

    Ok(Solution {
        color: Color::oklch(found.lightness, c, h).with_alpha(color.alpha),
        luminance: found.luminance,
        iterations: found.iterations,
    })
}

/// Like [`solve`], but the luminance that counts is the one of the color
/// after the engine maps it into gamut.
///
/// The unclamped answer is kept when gamut mapping leaves it on the aimed
/// side and within [`TOLERANCE`]. Otherwise lightness is bisected again,
/// this time measuring mapped colors, so `Aim::Above` results are never
/// darker than `target` and `Aim::Below` results never lighter. Without an
/// `aim`, the side is chosen from the mapped input's luminance. The result
/// is in gamut and in OKLCH.
///
/// # Errors
///
/// As [`solve`].
pub fn solve_in_gamut<E: ColorEngine + ?Sized>(
    engine: &E,
    color: Color,
    target: f64,
    aim: Option<Aim>,
) -> Result<Solution> {
    if let Some(boundary) = boundary_solution(color, target)? {
        return Ok(Solution {
            color: engine.convert(boundary.color, Space::Oklch)?,
            ..boundary
        });
    }

    let [l, c, h] = engine.convert(color, Space::Oklch)?.channels;
    let mapped = |lightness: f64| engine.clamp_to_gamut(Color::oklch(lightness, c, h));
    let measure = |lightness: f64| luminance_of(engine, mapped(lightness));
    let aim = match aim {
        Some(aim) => aim,
        None => {
            if measure(l.clamp(0.0, 1.0))? < target {
                Aim::Above
            } else {
                Aim::Below
            }
        }
    };

    let first = solve(engine, color, target, Some(aim))?;
    let color_in_gamut = engine.clamp_to_gamut(first.color);
    let luminance = luminance_of(engine, color_in_gamut)?;
    if aim.accepts(luminance, target) && (luminance - target).abs() <= TOLERANCE {
        return Ok(Solution {
            color: color_in_gamut,
            luminance,
            iterations: first.iterations,
        });
    }

    trace!("gamut mapping moved Y to {luminance:.6}, searching mapped colors for {target:.6}");
    let found = bisect(measure, l, target, Some(aim))?;
    Ok(Solution {
        color: mapped(found.lightness).with_alpha(color.alpha),
        luminance: found.luminance,
        iterations: first.iterations + found.iterations,
    })
}

/// White or black for targets at the ends of the range, `None` otherwise.
fn boundary_solution(color: Color, target: f64) -> Result<Option<Solution>> {
    if target.is_nan() {
        return Err(ContrastError::NotANumber {
            what: "target luminance",
            value: target,
        });
    }

    let (extreme, luminance) = if target >= 1.0 {
        (Color::WHITE, 1.0)
    } else if target <= 0.0 {
        (Color::BLACK, 0.0)
    } else {
        return Ok(None);
    };
    Ok(Some(Solution {
        color: extreme.with_alpha(color.alpha),
        luminance,
        iterations: 0,
    }))
}

struct Bisection {
    lightness: f64,
    luminance: f64,
    iterations: u32,
}

/// Bisect lightness in [0, 1] for `target`, starting from `start`.
///
/// `measure` maps a lightness to a luminance. The low end of the bracket
/// always measures below `target` and the high end at or above it, unless
/// the far end of the range cannot reach the target at all.
fn bisect<F>(measure: F, start: f64, target: f64, aim: Option<Aim>) -> Result<Bisection>
where
    F: Fn(f64) -> Result<f64>,
{
    let start = start.clamp(0.0, 1.0);
    let start_luminance = measure(start)?;
    let rising = start_luminance < target;

    // (lightness, luminance) at each end of the bracket
    let (mut lo, mut hi) = if rising {
        ((start, start_luminance), (1.0, measure(1.0)?))
    } else {
        ((0.0, measure(0.0)?), (start, start_luminance))
    };

    let aim = aim.unwrap_or(if rising { Aim::Above } else { Aim::Below });
    let edge = |lo: (f64, f64), hi: (f64, f64)| match aim {
        Aim::Above => hi,
        Aim::Below => lo,
    };

    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        let (_, edge_luminance) = edge(lo, hi);
        if hi.0 - lo.0 <= TOLERANCE && (edge_luminance - target).abs() <= TOLERANCE {
            break;
        }

        let mid = (lo.0 + hi.0) * 0.5;
        let mid_luminance = measure(mid)?;
        if mid_luminance < target {
            lo = (mid, mid_luminance);
        } else {
            hi = (mid, mid_luminance);
        }
        iterations += 1;
        trace!(
            "bisect #{iterations}: l in [{:.6}, {:.6}], Y(mid) = {mid_luminance:.6}",
            lo.0,
            hi.0
        );
    }

    let (lightness, luminance) = edge(lo, hi);
    Ok(Bisection {
        lightness,
        luminance,
        iterations,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
