//! WCAG luminance and contrast arithmetic.
//!
//! Pure functions over plain numbers, plus two thin helpers that measure a
//! [`Color`] through a [`ColorEngine`]. The contrast ratio is defined as
//!
//! ```text
//! (L_lighter + 0.05) / (L_darker + 0.05)
//! ```
//!
//! and everything else here is that formula solved for one side.

use gc_color::{Color, ColorEngine, Space};

use crate::error::Result;

/// Lowest meaningful contrast ratio (identical luminances).
pub const MIN_CONTRAST: f64 = 1.0;

/// Highest possible contrast ratio (black against white).
pub const MAX_CONTRAST: f64 = 21.0;

/// WCAG's flare term added to both luminances.
const FLARE: f64 = 0.05;

/// The two luminances that sit exactly at a contrast ratio from a reference.
///
/// Either bound may fall outside [0, 1] when the ratio is out of reach on
/// that side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminanceGoals {
    pub low: f64,
    pub high: f64,
}

/// WCAG 2.x relative luminance of linear-light sRGB channels.
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
#[must_use]
pub fn relative_luminance([r, g, b]: [f64; 3]) -> f64 {
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

/// Relative luminance of any color the engine can convert.
///
/// # Errors
///
/// Propagates the engine's conversion failure.
pub fn luminance_of<E: ColorEngine + ?Sized>(engine: &E, color: Color) -> Result<f64> {
    let lin = engine.convert(color, Space::Lrgb)?;
    Ok(relative_luminance(lin.channels))
}

/// WCAG contrast ratio between two luminances. Symmetric; always >= 1 for
/// luminances in [0, 1].
#[must_use]
pub fn contrast_ratio(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + FLARE) / (darker + FLARE)
}

/// Contrast ratio between two colors.
///
/// # Errors
///
/// Propagates the engine's conversion failure.
pub fn contrast_between<E: ColorEngine + ?Sized>(engine: &E, a: Color, b: Color) -> Result<f64> {
    Ok(contrast_ratio(luminance_of(engine, a)?, luminance_of(engine, b)?))
}

/// Clamp a requested contrast ratio into [1, 21].
#[must_use]
pub fn clamp_contrast(ratio: f64) -> f64 {
    ratio.clamp(MIN_CONTRAST, MAX_CONTRAST)
}

/// Luminances that hit `min_contrast` exactly against `reference`.
#[must_use]
pub fn luminance_goals(reference: f64, min_contrast: f64) -> LuminanceGoals {
    LuminanceGoals {
        low: (reference + FLARE) / min_contrast - FLARE,
        high: min_contrast.mul_add(reference + FLARE, -FLARE),
    }
}

/// Luminances for two colors that both move, by the same amount, to reach
/// `min_contrast` together.
///
/// The darker one is pushed down and the lighter one up by a shared step.
/// When that would push past black (or white), the far side is re-derived
/// against the boundary instead, so the pair still lands on the ratio. Both
/// bounds come back clamped into [0, 1].
#[must_use]
pub fn both_luminance_goals(a: f64, b: f64, min_contrast: f64) -> LuminanceGoals {
    let (darker, lighter) = if a <= b { (a, b) } else { (b, a) };

    let step = (min_contrast.mul_add(darker, min_contrast * FLARE) - lighter - FLARE)
        / (min_contrast + 1.0);

    let mut low = darker - step;
    let mut high = lighter + step;

    if low < 0.0 {
        high = luminance_goals(0.0, min_contrast).high;
    }
    if high > 1.0 {
        low = luminance_goals(1.0, min_contrast).low;
    }

    LuminanceGoals {
        low: low.clamp(0.0, 1.0),
        high: high.clamp(0.0, 1.0),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gc_color::CssEngine;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        let lum = luminance_of(&CssEngine::default(), Color::BLACK).unwrap();
        assert!(approx_eq(lum, 0.0, 1e-12), "Black luminance: {lum}");
    }

    #[test]
    fn luminance_white_is_one() {
        let lum = luminance_of(&CssEngine::default(), Color::WHITE).unwrap();
        assert!(approx_eq(lum, 1.0, 1e-12), "White luminance: {lum}");
    }

    #[test]
    fn luminance_primaries_are_the_coefficients() {
        assert!(approx_eq(relative_luminance([1.0, 0.0, 0.0]), 0.2126, 1e-15));
        assert!(approx_eq(relative_luminance([0.0, 1.0, 0.0]), 0.7152, 1e-15));
        assert!(approx_eq(relative_luminance([0.0, 0.0, 1.0]), 0.0722, 1e-15));
    }

    #[test]
    fn luminance_of_known_colors() {
        let engine = CssEngine::default();
        let tan = luminance_of(&engine, Color::rgb8(195, 165, 111)).unwrap();
        assert!(approx_eq(tan, 0.3966, 1e-4), "tan: {tan}");
        let alice = luminance_of(&engine, Color::rgb8(240, 248, 255)).unwrap();
        assert!(approx_eq(alice, 0.9288, 1e-4), "aliceblue: {alice}");
    }

    #[test]
    fn luminance_is_space_independent() {
        let engine = CssEngine::default();
        let rgb = Color::rgb8(65, 105, 225);
        let a = luminance_of(&engine, rgb).unwrap();
        let b = luminance_of(&engine, rgb.to_space(Space::Oklch)).unwrap();
        let c = luminance_of(&engine, rgb.to_space(Space::Hsl)).unwrap();
        assert!(approx_eq(a, b, 1e-12) && approx_eq(a, c, 1e-12), "{a} {b} {c}");
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        assert!(approx_eq(contrast_ratio(0.0, 1.0), 21.0, 1e-12));
    }

    #[test]
    fn contrast_same_is_1() {
        assert!(approx_eq(contrast_ratio(0.37, 0.37), 1.0, 1e-15));
    }

    #[test]
    fn contrast_is_symmetric() {
        assert_eq!(contrast_ratio(0.1, 0.8), contrast_ratio(0.8, 0.1));
    }

    #[test]
    fn contrast_between_colors() {
        let engine = CssEngine::default();
        let ratio = contrast_between(&engine, Color::BLACK, Color::WHITE).unwrap();
        assert!(approx_eq(ratio, 21.0, 1e-9), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_clamping() {
        assert_eq!(clamp_contrast(30.0), 21.0);
        assert_eq!(clamp_contrast(0.0), 1.0);
        assert_eq!(clamp_contrast(4.5), 4.5);
    }

    // ── Luminance goals ─────────────────────────────────────────────

    #[test]
    fn goals_hit_the_ratio_exactly() {
        let reference = 0.3966;
        let goals = luminance_goals(reference, 7.0);
        assert!(approx_eq(contrast_ratio(reference, goals.low), 7.0, 1e-12));
        assert!(goals.high > 1.0, "7:1 above tan is out of reach: {goals:?}");
    }

    #[test]
    fn goals_against_black_and_white() {
        let black = luminance_goals(0.0, 21.0);
        assert!(approx_eq(black.high, 1.0, 1e-12));
        let white = luminance_goals(1.0, 21.0);
        assert!(approx_eq(white.low, 0.0, 1e-12));
    }

    #[test]
    fn goals_at_ratio_one_are_the_reference() {
        let goals = luminance_goals(0.42, 1.0);
        assert!(approx_eq(goals.low, 0.42, 1e-15));
        assert!(approx_eq(goals.high, 0.42, 1e-15));
    }

    // ── Both luminance goals ────────────────────────────────────────

    #[test]
    fn both_goals_move_symmetrically() {
        let (a, b) = (0.2, 0.3);
        let goals = both_luminance_goals(a, b, 3.0);
        assert!(approx_eq(a - goals.low, goals.high - b, 1e-12), "{goals:?}");
        assert!(approx_eq(contrast_ratio(goals.low, goals.high), 3.0, 1e-12));
    }

    #[test]
    fn both_goals_order_independent() {
        assert_eq!(both_luminance_goals(0.3, 0.2, 3.0), both_luminance_goals(0.2, 0.3, 3.0));
    }

    #[test]
    fn both_goals_bounce_off_white() {
        // Tan vs. aliceblue at 7:1 would push the lighter side past white.
        let goals = both_luminance_goals(0.3966, 0.9288, 7.0);
        assert!(approx_eq(goals.high, 1.0, 1e-12), "{goals:?}");
        assert!(approx_eq(goals.low, 0.1, 1e-12), "{goals:?}");
    }

    #[test]
    fn both_goals_bounce_off_black() {
        let goals = both_luminance_goals(0.01, 0.5, 15.0);
        assert!(approx_eq(goals.low, 0.0, 1e-12), "{goals:?}");
        assert!(approx_eq(goals.high, 0.7, 1e-12), "{goals:?}");
        assert!(approx_eq(contrast_ratio(goals.low, goals.high), 15.0, 1e-9));
    }

    #[test]
    fn both_goals_inside_range_are_untouched_by_bounds() {
        let goals = both_luminance_goals(0.05, 0.95, 15.0);
        assert!(approx_eq(goals.low, 0.01875, 1e-12), "{goals:?}");
        assert!(approx_eq(goals.high, 0.98125, 1e-12), "{goals:?}");
    }

    #[test]
    fn both_goals_at_maximum_contrast() {
        let goals = both_luminance_goals(0.4, 0.5, 21.0);
        assert!(approx_eq(goals.low, 0.0, 1e-12) && approx_eq(goals.high, 1.0, 1e-12));
    }
}
