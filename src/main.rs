// SPDX-License-Identifier: MIT
//
// gencontrast: color pairs that meet a WCAG contrast ratio.
//
// This binary is a thin shell over the gc-contrast crate:
//
//   gc-color    → color spaces, CSS parsing, gamut mapping, formatting
//   gc-contrast → luminance math, lightness solver, contrast policy
//
// Startup order: parse args → load config → apply overrides → init logger
// → run one command → print its output.

mod cli;
mod config;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use log::debug;

use cli::{Args, apply_overrides, run_command};
use config::AppConfig;

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("could not load config {}", path.display()))?,
        None => AppConfig::load_default().context("could not load default config")?,
    };
    apply_overrides(args, &mut config);
    Ok(config)
}

fn init_logger(args: &Args, config: &AppConfig) {
    // An explicit --log-level beats RUST_LOG; RUST_LOG beats the config file.
    let mut builder = if args.log_level.is_some() {
        let mut builder = Builder::new();
        builder.parse_filters(&config.logging.level);
        builder
    } else {
        Builder::from_env(Env::default().default_filter_or(&config.logging.level))
    };
    builder.format_timestamp(None).init();
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    init_logger(args, &config);
    debug!("effective config: {config:?}");

    let output = run_command(&args.command, &config)?;
    println!("{output}");
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("gencontrast: {e:#}");
        process::exit(1);
    }
}
