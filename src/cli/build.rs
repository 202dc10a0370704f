//! `build` command: write every generated document into the output directory.
//!
//! - **Feed** (`rss.xml`) and **Sitemap** (`sitemap.xml`), rendered in parallel
//! - **Manifest** (`sounds.json`) for the browser synthesizer

use crate::{
    config::SiteConfig,
    generator::{feed::build_feed, sitemap::build_sitemap, write_document},
    log,
    samples::manifest::render_site_manifest,
};
use anyhow::{Context, Result};
use std::{fs, time::Instant};

/// Build all documents.
pub fn build_site(config: &SiteConfig) -> Result<()> {
    let started = Instant::now();
    let output = &config.build.output;

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output dir {}", output.display()))?;

    let (feed, sitemap) = rayon::join(|| build_feed(config), || build_sitemap(config));
    feed?;
    sitemap?;

    build_manifest(config)?;

    log!("build"; "done in {:.2?} -> {}", started.elapsed(), output.display());
    Ok(())
}

/// Write the sample manifest.
pub fn build_manifest(config: &SiteConfig) -> Result<()> {
    let json = render_site_manifest(config)?;
    write_document(&config.build.output, &config.samples.manifest, json.as_bytes(), "samples")
}
