//! Revector - optimize SVG icons and turn them into React or Vue components.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod format;
mod generator;
mod logger;
mod pipeline;
mod svg;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::RevectorConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = RevectorConfig::load(&cli)?;

    match &cli.command {
        Commands::Optimize { args } => cli::optimize::run_optimize(args, &config),
        Commands::Serve { .. } => cli::serve::serve(&config),
    }
}
