// SPDX-License-Identifier: MIT
//
// Command-line surface: argument definitions and command dispatch.
//
// Commands return their output as text so main only has to print it. CSS
// style prints one value per line; object style prints pretty JSON.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gc_color::{Gamut, OutputSpace, OutputStyle};
use gc_contrast::{Aim, ColorInput, Contraster, LuminanceOptions, PairRequest, Priority};
use serde::Serialize;

use crate::config::AppConfig;

/// WCAG AA for normal text.
const AA_NORMAL: f64 = 4.5;
/// WCAG AAA for normal text.
const AAA_NORMAL: f64 = 7.0;

/// Generate color pairs that meet a WCAG contrast ratio, changing only lightness
#[derive(Parser, Debug)]
#[command(name = "gencontrast", version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config and RUST_LOG)
    #[arg(short, long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Gamut results are mapped into: srgb, display-p3, rec2020 (overrides config)
    #[arg(short, long, global = true, value_name = "GAMUT")]
    pub gamut: Option<Gamut>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Adjust a pair of colors until they reach a contrast ratio
    Pair {
        /// Main color (any CSS color)
        main: String,

        /// Secondary color; defaults to the configured one, else a neutral gray
        secondary: Option<String>,

        /// Minimum contrast ratio, clamped to 1-21
        #[arg(long, value_name = "RATIO")]
        contrast: Option<f64>,

        /// Which color to keep: main, secondary, both
        #[arg(short, long)]
        priority: Option<Priority>,

        /// Output space: rgb, hex, lrgb, hsl, oklab, oklch
        #[arg(short, long, value_name = "SPACE")]
        output: Option<OutputSpace>,

        /// Output style: css, object
        #[arg(short, long)]
        style: Option<OutputStyle>,
    },

    /// Change a color's lightness until it has a given WCAG luminance
    Luminance {
        /// Color to adjust (any CSS color)
        color: String,

        /// Target relative luminance, 0-1
        #[arg(allow_negative_numbers = true)]
        target: f64,

        /// Land above or below the target
        #[arg(short, long)]
        aim: Option<Aim>,

        /// Output space: rgb, hex, lrgb, hsl, oklab, oklch
        #[arg(short, long, value_name = "SPACE")]
        output: Option<OutputSpace>,

        /// Output style: css, object
        #[arg(short, long)]
        style: Option<OutputStyle>,
    },

    /// Report the luminances and contrast ratio of two colors
    Check {
        first: String,
        second: String,

        /// Output style: css, object
        #[arg(short, long)]
        style: Option<OutputStyle>,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Fold command-line overrides into the loaded config.
pub fn apply_overrides(args: &Args, config: &mut AppConfig) {
    if let Some(gamut) = args.gamut {
        config.contrast.gamut = gamut;
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
}

#[derive(Serialize)]
struct CheckOutput {
    luminances: [f64; 2],
    contrast: f64,
    aa: bool,
    aaa: bool,
}

/// Run `command` and return what should be printed.
pub fn run_command(command: &Command, config: &AppConfig) -> Result<String> {
    let contraster = Contraster::new(config.contrast.clone());
    let default_style = config.contrast.style;

    match command {
        Command::Pair {
            main,
            secondary,
            contrast,
            priority,
            output,
            style,
        } => {
            let request = PairRequest {
                main: ColorInput::from(main.as_str()),
                secondary: secondary.as_deref().map(ColorInput::from),
                min_contrast: *contrast,
                priority: *priority,
                output: *output,
                style: *style,
            };
            let result = contraster.generate(&request)?;
            match style.unwrap_or(default_style) {
                OutputStyle::Css => Ok(format!("{}\n{}", result.main, result.secondary)),
                OutputStyle::Object => Ok(serde_json::to_string_pretty(&result)?),
            }
        }

        Command::Luminance {
            color,
            target,
            aim,
            output,
            style,
        } => {
            let options = LuminanceOptions {
                output: *output,
                style: *style,
                aim: *aim,
            };
            let value = contraster.set_luminance(color.as_str(), *target, &options)?;
            match style.unwrap_or(default_style) {
                OutputStyle::Css => Ok(value.to_string()),
                OutputStyle::Object => Ok(serde_json::to_string_pretty(&value)?),
            }
        }

        Command::Check {
            first,
            second,
            style,
        } => {
            let report = contraster.check(first.as_str(), second.as_str())?;
            let check = CheckOutput {
                luminances: report.luminances,
                contrast: report.contrast,
                aa: report.passes(AA_NORMAL),
                aaa: report.passes(AAA_NORMAL),
            };
            match style.unwrap_or(default_style) {
                OutputStyle::Css => Ok(render_check(&check)),
                OutputStyle::Object => Ok(serde_json::to_string_pretty(&check)?),
            }
        }

        Command::Config => Ok(config.to_toml_string()?.trim_end().to_owned()),
    }
}

fn render_check(check: &CheckOutput) -> String {
    let verdict = |ok: bool| if ok { "pass" } else { "fail" };
    format!(
        "luminance  {:.4}  {:.4}\ncontrast   {:.2}:1\nAA         {}\nAAA        {}",
        check.luminances[0],
        check.luminances[1],
        check.contrast,
        verdict(check.aa),
        verdict(check.aaa),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("gencontrast").chain(argv.iter().copied())).unwrap()
    }

    fn run(argv: &[&str]) -> Result<String> {
        let args = parse(argv);
        let mut config = AppConfig::default();
        apply_overrides(&args, &mut config);
        run_command(&args.command, &config)
    }

    // ── Parsing ─────────────────────────────────────────────────────

    #[test]
    fn parses_pair_options() {
        let args = parse(&[
            "pair", "tan", "navy", "--contrast", "4.5", "-p", "both", "-o", "oklch", "-s", "object",
        ]);
        let Command::Pair {
            main,
            secondary,
            contrast,
            priority,
            output,
            style,
        } = args.command
        else {
            panic!("expected pair");
        };
        assert_eq!(main, "tan");
        assert_eq!(secondary.as_deref(), Some("navy"));
        assert_eq!(contrast, Some(4.5));
        assert_eq!(priority, Some(Priority::Both));
        assert_eq!(output, Some(OutputSpace::Oklch));
        assert_eq!(style, Some(OutputStyle::Object));
    }

    #[test]
    fn global_options_after_subcommand() {
        let args = parse(&["check", "red", "blue", "--gamut", "p3", "--log-level", "debug"]);
        assert_eq!(args.gamut, Some(Gamut::DisplayP3));
        let mut config = AppConfig::default();
        apply_overrides(&args, &mut config);
        assert_eq!(config.contrast.gamut, Gamut::DisplayP3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn rejects_unknown_keywords() {
        let argv = ["gencontrast", "pair", "tan", "--priority", "whichever"];
        assert!(Args::try_parse_from(argv).is_err());
        let argv = ["gencontrast", "luminance", "tan", "0.5", "--aim", "up"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    // ── Commands ────────────────────────────────────────────────────

    #[test]
    fn pair_prints_two_lines() {
        let out = run(&["pair", "rgb(195,165,111)", "aliceblue", "-p", "secondary"]).unwrap();
        assert_eq!(out, "rgb(107, 80, 25)\nrgb(240, 248, 255)");
    }

    #[test]
    fn pair_as_json() {
        let out = run(&["pair", "#c3a56f", "aliceblue", "-s", "object"]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["main"]["space"], "rgb");
        assert_eq!(json["meets_target"], true);
    }

    #[test]
    fn luminance_prints_one_value() {
        let out = run(&["luminance", "royalblue", "0.3", "-o", "hex"]).unwrap();
        assert_eq!(out, "#6690ff");
        let out = run(&["luminance", "royalblue", "-1"]).unwrap();
        assert_eq!(out, "rgb(0, 0, 0)");
    }

    #[test]
    fn check_reports_levels() {
        let out = run(&["check", "black", "white"]).unwrap();
        assert_eq!(
            out,
            "luminance  0.0000  1.0000\ncontrast   21.00:1\nAA         pass\nAAA        pass"
        );
        let out = run(&["check", "tan", "aliceblue", "-s", "object"]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["aa"], false);
    }

    #[test]
    fn invalid_color_is_an_error() {
        let err = run(&["pair", "rgb(1,2)"]).unwrap_err();
        assert!(err.to_string().contains("invalid main color"), "{err}");
    }

    #[test]
    fn config_command_shows_overrides() {
        let out = run(&["config", "--gamut", "rec2020"]).unwrap();
        assert!(out.contains("gamut = \"rec2020\""), "{out}");
        assert!(out.contains("[logging]"), "{out}");
    }
}
