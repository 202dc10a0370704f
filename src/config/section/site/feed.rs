//! RSS feed configuration.

use crate::config::{ConfigDiagnostics, FieldPath, section::validate_output_path};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Enable feed generation and the feed route.
    pub enable: bool,
    /// Output path (and URL path) of the feed.
    pub path: PathBuf,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "rss.xml".into(),
        }
    }
}

impl FeedConfig {
    pub const ENABLE: FieldPath = FieldPath::new("site.feed.enable");
    pub const PATH: FieldPath = FieldPath::new("site.feed.path");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_output_path(&self.path, "xml", Self::PATH, diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.site.feed.enable);
        assert_eq!(config.site.feed.path, PathBuf::from("rss.xml"));
    }

    #[test]
    fn test_custom_config() {
        let config = test_parse_config("[site.feed]\nenable = false\npath = \"feed.xml\"");
        assert!(!config.site.feed.enable);
        assert_eq!(config.site.feed.path, PathBuf::from("feed.xml"));
    }

    #[test]
    fn test_validate_rejects_parent_dir() {
        let config = test_parse_config("[site.feed]\npath = \"../rss.xml\"");
        let mut diag = ConfigDiagnostics::new();
        config.site.feed.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, FeedConfig::PATH);
    }

    #[test]
    fn test_validate_rejects_wrong_extension() {
        let config = test_parse_config("[site.feed]\npath = \"rss.json\"");
        let mut diag = ConfigDiagnostics::new();
        config.site.feed.validate(&mut diag);
        assert!(diag.errors()[0].message.contains(".xml"));
    }
}
