//! Site configuration management for `gastroli.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── samples    # [samples]
//! │   ├── serve      # [serve]
//! │   └── site/      # [site.info], [site.feed], [site.sitemap]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section            | Purpose                                      |
//! |--------------------|----------------------------------------------|
//! | `[site.info]`      | Site identity (title, origin, editors)       |
//! | `[site.feed]`      | RSS feed toggle and path                     |
//! | `[site.sitemap]`   | Sitemap toggle and path                      |
//! | `[build]`          | Output and public directories, minify        |
//! | `[samples]`        | Sample asset directory and manifest path     |
//! | `[serve]`          | HTTP server (interface, port, threads)       |
//!
//! The config file is optional: every field defaults to the production site.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    BuildConfig, FeedConfig, SamplesConfig, ServeConfig, SiteInfoConfig, SiteSectionConfig,
    SitemapConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config};

use crate::{
    cli::{BuildArgs, Cli, Commands, DocumentArgs},
    debug, log,
    utils::date::DateTimeUtc,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing gastroli.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site identity, feed and sitemap
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Output locations
    #[serde(default)]
    pub build: BuildConfig,

    /// Sample library asset locations
    #[serde(default)]
    pub samples: SamplesConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. A missing file is not
    /// an error: the built-in defaults describe the production site.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (mut config, root) = match find_config_file(&cli.config) {
            Some(path) => {
                let config = Self::from_path(&path)?;
                debug!("config"; "loaded {}", path.display());
                let root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                (config, root)
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                (Self::default(), cwd)
            }
        };

        config.finalize(cli, &root);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} are ignored:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Directory holding the instrument assets.
    pub fn samples_dir(&self) -> PathBuf {
        self.build.public.join(&self.samples.dir)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Finalize configuration after loading: CLI overrides, then paths.
    fn finalize(&mut self, cli: &Cli, root: &Path) {
        crate::logger::set_verbose(cli.verbose);
        self.apply_command_options(cli);
        self.normalize_paths(root);
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Serve {
                document_args,
                interface,
                port,
            } => {
                self.apply_document_args(document_args);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Check { args } => {
                Self::update_option(&mut self.site.info.url, args.site_url.as_ref());
            }
        }
    }

    /// Apply build arguments from CLI.
    ///
    /// Only `build` pins the render date; `serve` stamps each response with
    /// the request time.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.build.output, args.output.as_ref());
        self.apply_document_args(&args.documents);

        let date = args.date.or_else(|| {
            std::env::var("SOURCE_DATE_EPOCH")
                .ok()
                .and_then(|v| DateTimeUtc::from_epoch_secs(&v))
        });
        if date.is_some() {
            self.build.date = date;
        }
    }

    /// Apply document options shared by build and serve.
    fn apply_document_args(&mut self, args: &DocumentArgs) {
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        Self::update_option(&mut self.site.info.url, args.site_url.as_ref());
        Self::update_option(&mut self.site.feed.enable, args.rss.as_ref());
        Self::update_option(&mut self.site.sitemap.enable, args.sitemap.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize directories relative to the root.
    ///
    /// Feed, sitemap and manifest paths stay relative: they double as URL paths.
    fn normalize_paths(&mut self, root: &Path) {
        let root = crate::utils::path::normalize_path(root);
        self.build.output = crate::utils::path::normalize_path(&root.join(&self.build.output));
        self.build.public = crate::utils::path::normalize_path(&root.join(&self.build.public));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.info.validate(self.site.feed.enable, &mut diag);
        self.site.feed.validate(&mut diag);
        self.site.sitemap.validate(&mut diag);
        self.samples.validate(&mut diag);

        if self.site.feed.enable
            && self.site.sitemap.enable
            && self.site.feed.path == self.site.sitemap.path
        {
            diag.error(
                SitemapConfig::PATH,
                format!(
                    "collides with {} (`{}`)",
                    FeedConfig::PATH,
                    self.site.feed.path.display()
                ),
            );
        }

        if self.serve.threads == 0 {
            diag.warn(
                FieldPath::new("serve.threads"),
                "0 worker threads requested, using 1",
            );
        }

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML fragment.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// Build a finalized config from command-line arguments, rooted at `/srv/karaoke`.
#[cfg(test)]
pub fn test_config_from_args(args: &[&str]) -> SiteConfig {
    use clap::Parser;
    let cli = Cli::parse_from(args);
    let mut config = SiteConfig::default();
    config.finalize(&cli, Path::new("/srv/karaoke"));
    config
}

/// Pin `SOURCE_DATE_EPOCH` for the test process.
///
/// Every test that touches the variable sets the same value.
#[cfg(test)]
pub fn test_set_source_date_epoch() {
    // SAFETY: all writers store the same value and nothing removes it.
    unsafe { std::env::set_var("SOURCE_DATE_EPOCH", "1000000000") };
}

// ============================================================================
// tests
// ============================================================================
