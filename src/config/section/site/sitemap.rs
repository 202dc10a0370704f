//! Sitemap configuration.

use crate::config::{ConfigDiagnostics, FieldPath, section::validate_output_path};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Enable sitemap generation and the sitemap route.
    pub enable: bool,
    /// Output path (and URL path) of the sitemap.
    pub path: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
        }
    }
}

impl SitemapConfig {
    pub const PATH: FieldPath = FieldPath::new("site.sitemap.path");

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
        assert!(config.site.sitemap.enable);
        assert_eq!(config.site.sitemap.path, PathBuf::from("sitemap.xml"));
    }

    #[test]
    fn test_nested_path_is_allowed() {
        let config = test_parse_config("[site.sitemap]\npath = \"seo/sitemap.xml\"");
        let mut diag = ConfigDiagnostics::new();
        config.site.sitemap.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_absolute_path_is_rejected() {
        let config = test_parse_config("[site.sitemap]\npath = \"/sitemap.xml\"");
        let mut diag = ConfigDiagnostics::new();
        config.site.sitemap.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
