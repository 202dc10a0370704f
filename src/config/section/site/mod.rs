//! `[site]` section configuration.
//!
//! Contains the site identity and the two generated documents.
//!
//! # Example
//!
//! ```toml
//! [site.info]
//! title = "Живое караоке — Гастроли по Москве"
//! url = "https://karaoke.gastroli.moscow"
//! language = "ru-RU"
//! editor = "povsemmestam@t.me (Федя)"
//!
//! [site.feed]
//! enable = true
//! path = "rss.xml"
//!
//! [site.sitemap]
//! enable = true
//! path = "sitemap.xml"
//! ```

mod feed;
mod info;
mod sitemap;

pub use feed::FeedConfig;
pub use info::SiteInfoConfig;
pub use sitemap::SitemapConfig;

use serde::{Deserialize, Serialize};

/// Site section configuration containing identity, feed and sitemap settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site identity (title, origin, editors, etc.)
    pub info: SiteInfoConfig,

    /// RSS feed settings.
    pub feed: FeedConfig,

    /// Sitemap settings.
    pub sitemap: SitemapConfig,
}
