//! `[site.info]` configuration.
//!
//! The site identity shared by the feed channel and the sitemap. Every
//! field defaults to the production site, so an empty config renders the
//! same documents as the live deployment.

use crate::config::{ConfigDiagnostics, FieldPath, section::FeedConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Production origin of the site.
pub const DEFAULT_ORIGIN: &str = "https://karaoke.gastroli.moscow";

/// Site identity used by the generated documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Channel title.
    pub title: String,

    /// Short title used for the feed image.
    pub short_title: String,

    /// Channel description.
    pub description: String,

    /// Site origin, e.g. "https://karaoke.gastroli.moscow".
    pub url: String,

    /// Language code (e.g., "ru-RU").
    pub language: String,

    /// Managing editor in RSS form: "email (Name)".
    pub editor: String,

    /// Webmaster in RSS form; falls back to `editor` when empty.
    pub webmaster: String,

    /// Site icon path relative to the origin.
    pub icon: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: "Живое караоке — Гастроли по Москве".into(),
            short_title: "Живое караоке".into(),
            description: "Интерактивное музыкальное шоу в Москве. Караоке с живой музыкой \
                          для свадеб, корпоративов и частных праздников. Ансамбль из \
                          профессиональных музыкантов."
                .into(),
            url: DEFAULT_ORIGIN.into(),
            language: "ru-RU".into(),
            editor: "povsemmestam@t.me (Федя)".into(),
            webmaster: String::new(),
            icon: "favicon.ico".into(),
        }
    }
}

impl SiteInfoConfig {
    pub const TITLE: FieldPath = FieldPath::new("site.info.title");
    pub const URL: FieldPath = FieldPath::new("site.info.url");
    pub const EDITOR: FieldPath = FieldPath::new("site.info.editor");
    pub const WEBMASTER: FieldPath = FieldPath::new("site.info.webmaster");

    /// Origin without trailing slash.
    pub fn origin(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Absolute URL for a site-relative path.
    ///
    /// An empty path yields the bare origin.
    pub fn absolute(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.origin().to_string()
        } else {
            format!("{}/{}", self.origin(), path)
        }
    }

    pub fn webmaster(&self) -> &str {
        if self.webmaster.is_empty() {
            &self.editor
        } else {
            &self.webmaster
        }
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `title` is not empty
    /// - `url` is a valid http(s) URL with a host (required by the feed)
    /// - `editor`/`webmaster` use the RSS `email (Name)` form
    pub fn validate(&self, feed_enabled: bool, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error(Self::TITLE, "title must not be empty");
        }

        if self.url.trim().is_empty() {
            if feed_enabled {
                diag.error_with_hint(
                    Self::URL,
                    format!("{} is enabled but {} is empty", FeedConfig::ENABLE, Self::URL),
                    format!("set {}, e.g.: \"{DEFAULT_ORIGIN}\"", Self::URL),
                );
            }
        } else {
            Self::validate_url(&self.url, diag);
        }

        Self::validate_person(&self.editor, Self::EDITOR, diag);
        if !self.webmaster.is_empty() {
            Self::validate_person(&self.webmaster, Self::WEBMASTER, diag);
        }
    }

    fn validate_url(url_str: &str, diag: &mut ConfigDiagnostics) {
        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::URL,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        Self::URL,
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                );
            }
        }
    }

    fn validate_person(value: &str, field: FieldPath, diag: &mut ConfigDiagnostics) {
        static RE_VALID_PERSON: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$")
                .expect("static regex")
        });

        if !RE_VALID_PERSON.is_match(value) {
            diag.error_with_hint(
                field,
                format!("`{value}` is not in RSS person form"),
                "use \"email (Name)\", e.g. \"editor@example.com (Name)\"",
            );
        }
    }
}
