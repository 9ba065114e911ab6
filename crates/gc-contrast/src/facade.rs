//! Entry points: resolve inputs, fill in defaults, enforce, format.
//!
//! [`Contraster`] owns an engine and a [`ContrastConfig`]; every request
//! field left as `None` falls back to the config. The free functions
//! [`generate_contrasted_colors`] and [`set_luminance`] run against the
//! stock [`CssEngine`] with default settings.
//!
//! Both input colors are resolved before any solving starts, so a bad
//! secondary never costs a wasted search on the main color.

use std::fmt;

use gc_color::{Color, ColorEngine, CssEngine, OutputSpace, OutputStyle, OutputValue};
use log::debug;
use serde::Serialize;

use crate::config::ContrastConfig;
use crate::error::{ColorRole, ContrastError, Result};
use crate::luminance::{contrast_ratio, luminance_of};
use crate::policy::{Priority, enforce_contrast};
use crate::solver::{Aim, solve_in_gamut};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// A color as the caller has it: CSS text or an already-built [`Color`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
    Css(String),
    Color(Color),
}

impl ColorInput {
    fn resolve<E: ColorEngine + ?Sized>(&self, engine: &E, role: ColorRole) -> Result<Color> {
        let resolved = match self {
            Self::Css(text) => engine.parse(text),
            Self::Color(color) => engine.convert(*color, color.space),
        };
        resolved.map_err(|source| ContrastError::InvalidInputColor {
            role,
            input: self.to_string(),
            source,
        })
    }
}

impl fmt::Display for ColorInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(text) => f.write_str(text),
            Self::Color(color) => write!(f, "{color}"),
        }
    }
}

impl From<&str> for ColorInput {
    fn from(text: &str) -> Self {
        Self::Css(text.to_owned())
    }
}

impl From<String> for ColorInput {
    fn from(text: String) -> Self {
        Self::Css(text)
    }
}

impl From<Color> for ColorInput {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

/// A request for a contrasting pair. Unset fields use the config defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRequest {
    pub main: ColorInput,
    pub secondary: Option<ColorInput>,
    pub min_contrast: Option<f64>,
    pub priority: Option<Priority>,
    pub output: Option<OutputSpace>,
    pub style: Option<OutputStyle>,
}

impl PairRequest {
    #[must_use]
    pub fn new(main: impl Into<ColorInput>) -> Self {
        Self {
            main: main.into(),
            secondary: None,
            min_contrast: None,
            priority: None,
            output: None,
            style: None,
        }
    }

    #[must_use]
    pub fn secondary(mut self, secondary: impl Into<ColorInput>) -> Self {
        self.secondary = Some(secondary.into());
        self
    }

    #[must_use]
    pub const fn min_contrast(mut self, ratio: f64) -> Self {
        self.min_contrast = Some(ratio);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub const fn output(mut self, output: OutputSpace) -> Self {
        self.output = Some(output);
        self
    }

    #[must_use]
    pub const fn style(mut self, style: OutputStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// Options for [`Contraster::set_luminance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LuminanceOptions {
    pub output: Option<OutputSpace>,
    pub style: Option<OutputStyle>,
    /// Side of the target to land on; by default the side approached from.
    pub aim: Option<Aim>,
}

// ─── Outputs ─────────────────────────────────────────────────────────────────

/// A formatted pair plus how well it did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastedOutput {
    pub main: OutputValue,
    pub secondary: OutputValue,
    pub contrast: f64,
    pub target: f64,
    pub meets_target: bool,
}

/// Luminances and ratio of two colors as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastReport {
    pub luminances: [f64; 2],
    pub contrast: f64,
}

impl ContrastReport {
    /// Whether the ratio reaches `min_contrast`.
    #[must_use]
    pub fn passes(&self, min_contrast: f64) -> bool {
        self.contrast >= min_contrast
    }
}

// ─── Contraster ──────────────────────────────────────────────────────────────

/// Contrast generation bound to an engine and a set of defaults.
#[derive(Debug, Clone, Default)]
pub struct Contraster<E = CssEngine> {
    engine: E,
    config: ContrastConfig,
}

impl Contraster<CssEngine> {
    /// A CSS engine clamping into the config's gamut.
    #[must_use]
    pub const fn new(config: ContrastConfig) -> Self {
        Self {
            engine: CssEngine::new(config.gamut),
            config,
        }
    }
}

impl<E: ColorEngine> Contraster<E> {
    pub const fn with_engine(engine: E, config: ContrastConfig) -> Self {
        Self { engine, config }
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub const fn config(&self) -> &ContrastConfig {
        &self.config
    }

    /// Produce a pair meeting the requested contrast, formatted for output.
    ///
    /// # Errors
    ///
    /// [`ContrastError::InvalidInputColor`] if either color does not parse,
    /// [`ContrastError::NotANumber`] for a NaN ratio, or
    /// [`ContrastError::Config`] if the configured default secondary is bad.
    /// Missing the ratio is reported on the output, not as an error.
    pub fn generate(&self, request: &PairRequest) -> Result<ContrastedOutput> {
        let main = request.main.resolve(&self.engine, ColorRole::Main)?;
        let secondary = match &request.secondary {
            Some(input) => input.resolve(&self.engine, ColorRole::Secondary)?,
            None => self.config.default_secondary()?,
        };

        let min_contrast = request.min_contrast.unwrap_or(self.config.min_contrast);
        let priority = request.priority.unwrap_or(self.config.priority);
        let output = request.output.unwrap_or(self.config.output);
        let style = request.style.unwrap_or(self.config.style);

        debug!("pair {} / {secondary} at {min_contrast}:1, priority {priority}", request.main);
        let pair = enforce_contrast(&self.engine, main, secondary, min_contrast, priority)?;

        Ok(ContrastedOutput {
            main: self.engine.format(pair.main, output, style),
            secondary: self.engine.format(pair.secondary, output, style),
            contrast: pair.contrast,
            target: pair.target,
            meets_target: pair.meets_target(),
        })
    }

    /// Shift `color`'s lightness until its luminance reaches `target`.
    ///
    /// The luminance is met by the emitted, gamut-mapped color. Targets
    /// outside [0, 1] give pure white or black.
    ///
    /// # Errors
    ///
    /// [`ContrastError::InvalidInputColor`] if the color does not parse, or
    /// [`ContrastError::NotANumber`] for a NaN target.
    pub fn set_luminance(
        &self,
        color: impl Into<ColorInput>,
        target: f64,
        options: &LuminanceOptions,
    ) -> Result<OutputValue> {
        let color = color.into().resolve(&self.engine, ColorRole::Subject)?;
        let solution = solve_in_gamut(&self.engine, color, target, options.aim)?;
        debug!(
            "luminance {target} reached {:.6} in {} step(s)",
            solution.luminance, solution.iterations
        );

        Ok(self.engine.format(
            solution.color,
            options.output.unwrap_or(self.config.output),
            options.style.unwrap_or(self.config.style),
        ))
    }

    /// Measure two colors without changing them.
    ///
    /// # Errors
    ///
    /// [`ContrastError::InvalidInputColor`] if either color does not parse.
    pub fn check(
        &self,
        first: impl Into<ColorInput>,
        second: impl Into<ColorInput>,
    ) -> Result<ContrastReport> {
        let first = first.into().resolve(&self.engine, ColorRole::Main)?;
        let second = second.into().resolve(&self.engine, ColorRole::Secondary)?;
        let luminances = [luminance_of(&self.engine, first)?, luminance_of(&self.engine, second)?];
        Ok(ContrastReport {
            luminances,
            contrast: contrast_ratio(luminances[0], luminances[1]),
        })
    }
}

/// [`Contraster::generate`] with the stock engine and default settings.
///
/// # Errors
///
/// As [`Contraster::generate`].
pub fn generate_contrasted_colors(request: &PairRequest) -> Result<ContrastedOutput> {
    Contraster::new(ContrastConfig::default()).generate(request)
}

/// [`Contraster::set_luminance`] with the stock engine and default settings.
///
/// # Errors
///
/// As [`Contraster::set_luminance`].
pub fn set_luminance(
    color: impl Into<ColorInput>,
    target: f64,
    options: &LuminanceOptions,
) -> Result<OutputValue> {
    Contraster::new(ContrastConfig::default()).set_luminance(color, target, options)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
