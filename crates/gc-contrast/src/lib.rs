//! # gc-contrast: WCAG contrast by lightness alone
//!
//! Produces color pairs that reach a minimum WCAG contrast ratio while
//! keeping each color's hue and chroma. Only perceptual lightness moves.
//!
//! # Architecture
//!
//! ```text
//! PairRequest / set_luminance
//!     │
//!     ▼
//! facade.rs:    resolve inputs, apply ContrastConfig defaults
//!     │
//!     ▼
//! policy.rs:    pick which color moves and toward which luminance
//!     │
//!     ▼
//! solver.rs:    bisect OKLCH lightness until luminance hits the target
//!     │
//!     ▼
//! luminance.rs: WCAG luminance, contrast ratio, luminance goals
//! ```
//!
//! All color-space work goes through the [`ColorEngine`](gc_color::ColorEngine)
//! trait; [`CssEngine`](gc_color::CssEngine) is the stock implementation.
//!
//! ```
//! use gc_contrast::{PairRequest, Priority, generate_contrasted_colors};
//!
//! let out = generate_contrasted_colors(
//!     &PairRequest::new("rgb(195, 165, 111)")
//!         .secondary("aliceblue")
//!         .priority(Priority::Secondary),
//! )
//! .unwrap();
//! assert_eq!(out.main.as_css(), Some("rgb(107, 80, 25)"));
//! assert!(out.meets_target);
//! ```

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Contrast and luminance names differ by a letter or two.
#![allow(clippy::similar_names)]

pub mod config;
pub mod error;
pub mod facade;
pub mod luminance;
pub mod policy;
pub mod solver;

pub use config::{ConfigError, ContrastConfig, NEUTRAL_GRAY};
pub use error::{ColorRole, ContrastError, Result};
pub use facade::{
    ColorInput, ContrastReport, ContrastedOutput, Contraster, LuminanceOptions, PairRequest,
    generate_contrasted_colors, set_luminance,
};
pub use luminance::{LuminanceGoals, contrast_ratio, relative_luminance};
pub use policy::{ContrastedPair, Priority, enforce_contrast, is_dark};
pub use solver::{Aim, Solution, solve, solve_in_gamut};
