//! Command-line interface definitions.

use crate::utils::date::DateTimeUtc;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Feed, sitemap and sample-library backend for the live karaoke site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: gastroli.toml)
    #[arg(short = 'C', long, global = true, default_value = "gastroli.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write rss.xml, sitemap.xml and the sample manifest
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Serve the feed, sitemap, manifest and public files over HTTP
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        document_args: DocumentArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check rendered documents and sample sprites against their assets
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Override site URL for the rendered documents
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Probe instrument assets and check sprite bounds
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub assets: Option<bool>,

    /// Treat check failures as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,

    /// Only check the instrument with this name
    #[arg(short, long)]
    pub instrument: Option<String>,
}

impl CheckArgs {
    pub fn check_assets(&self) -> bool {
        self.assets.unwrap_or(true)
    }
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Stamp documents with a fixed time instead of now.
    ///
    /// Accepts "YYYY-MM-DD", "YYYY-MM-DDTHH:MM:SSZ" or "YYYY-MM-DDTHH:MM:SS.mmmZ".
    /// When omitted, `SOURCE_DATE_EPOCH` is honored for reproducible builds.
    #[arg(short = 'D', long, value_parser = parse_date)]
    pub date: Option<DateTimeUtc>,

    #[command(flatten)]
    pub documents: DocumentArgs,
}

/// Document options shared by Build and Serve.
///
/// Serve renders every request at the current time, so pinning the date
/// belongs to Build only.
#[derive(clap::Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Minify the sitemap (the feed is always written on one line)
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Enable RSS feed generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub rss: Option<bool>,

    /// Enable sitemap generation
    #[arg(short = 'S', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override site URL.
    ///
    /// Useful for staging deployments where the origin differs from production,
    /// without touching gastroli.toml.
    ///
    /// Example:
    ///   gastroli build --site-url "https://staging.gastroli.moscow"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,
}

fn parse_date(s: &str) -> Result<DateTimeUtc, String> {
    DateTimeUtc::parse(s).ok_or_else(|| format!("`{s}` is not a UTC date like 2024-06-15T14:30:45Z"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bool_flags_accept_bare_and_value_forms() {
        let cli = Cli::parse_from(["gastroli", "build", "--minify", "--sitemap=false"]);
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(build_args.documents.minify, Some(true));
        assert_eq!(build_args.documents.sitemap, Some(false));
        assert_eq!(build_args.documents.rss, None);
    }

    #[test]
    fn test_serve_has_no_build_only_flags() {
        let cli = Cli::parse_from(["gastroli", "serve", "--minify", "-p", "9000"]);
        let Commands::Serve { document_args, port, .. } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(document_args.minify, Some(true));
        assert_eq!(port, Some(9000));

        assert!(Cli::try_parse_from(["gastroli", "serve", "--date", "2024-06-15"]).is_err());
        assert!(Cli::try_parse_from(["gastroli", "serve", "--output", "out"]).is_err());
    }

    #[test]
    fn test_date_flag() {
        let cli = Cli::parse_from(["gastroli", "build", "--date", "2024-06-15T14:30:45.123Z"]);
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(
            build_args.date,
            Some(DateTimeUtc::new(2024, 6, 15, 14, 30, 45).with_millis(123))
        );

        assert!(Cli::try_parse_from(["gastroli", "build", "--date", "yesterday"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["gastroli", "check", "-w", "-v", "-C", "site.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        let Commands::Check { args } = cli.command else {
            panic!("expected check");
        };
        assert!(args.warn_only);
        assert!(args.check_assets());
        assert_eq!(args.instrument, None);

        let cli = Cli::parse_from(["gastroli", "check", "-i", "Piano"]);
        let Commands::Check { args } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.instrument.as_deref(), Some("Piano"));
    }
}
