//! Gastroli - feed, sitemap and sample-library backend for the live karaoke site.

mod cli;
mod config;
mod content;
mod core;
mod generator;
mod logger;
mod samples;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

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

    let config = init_config(SiteConfig::load(&cli)?);

    match &cli.command {
        Commands::Build { .. } => cli::build::build_site(&config),
        Commands::Serve { .. } => cli::serve::serve_site(&config),
        Commands::Check { args } => cli::check::run_check(args, &config),
    }
}
