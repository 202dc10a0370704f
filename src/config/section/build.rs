//! `[build]` section configuration.
//!
//! ```toml
//! [build]
//! output = "dist"     # Where `gastroli build` writes generated documents
//! public = "public"   # Static files (favicon, sounds/) served by `gastroli serve`
//! minify = false      # Strip indentation from the sitemap
//! ```

use crate::utils::date::DateTimeUtc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory for generated documents.
    pub output: PathBuf,
    /// Directory holding static files and audio assets.
    pub public: PathBuf,
    /// Minify the sitemap. The feed is always written without indentation.
    pub minify: bool,
    /// Pinned render time (`--date` or `SOURCE_DATE_EPOCH`).
    #[serde(skip)]
    pub date: Option<DateTimeUtc>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            public: "public".into(),
            minify: false,
            date: None,
        }
    }
}

impl BuildConfig {
    /// Time stamped into the generated documents.
    pub fn render_time(&self) -> DateTimeUtc {
        self.date.unwrap_or_else(DateTimeUtc::now)
    }
}
