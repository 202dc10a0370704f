//! Sitemap generation.
//!
//! Lists the literal [`crate::content::SITEMAP_PAGES`] for search engine
//! indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://karaoke.gastroli.moscow</loc>
//!     <lastmod>2024-06-15T14:30:45.123Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>1</priority>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    content::{ChangeFrequency, PageEntry, SITEMAP_PAGES},
    generator::{minify_xml, write_document},
    utils::date::DateTimeUtc,
};
use anyhow::Result;
use std::borrow::Cow;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Write the sitemap into the output directory if enabled.
pub fn build_sitemap(config: &SiteConfig) -> Result<()> {
    if config.site.sitemap.enable {
        let xml = render_sitemap(config);
        let xml = minify_xml(xml.as_bytes(), config.build.minify);
        write_document(&config.build.output, &config.site.sitemap.path, &xml, "sitemap")?;
    }
    Ok(())
}

/// Render the sitemap stamped with the current time, or the pinned
/// `build.date` when set.
pub fn render_sitemap(config: &SiteConfig) -> String {
    render_sitemap_at(config, config.build.render_time())
}

/// Render the sitemap stamped with `now`.
pub fn render_sitemap_at(config: &SiteConfig, now: DateTimeUtc) -> String {
    Sitemap::build(config, SITEMAP_PAGES, now).into_xml()
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: String,
    changefreq: ChangeFrequency,
    priority: f32,
}

impl Sitemap {
    fn build(config: &SiteConfig, pages: &[PageEntry], now: DateTimeUtc) -> Self {
        let lastmod = now.to_iso_string();
        let urls = pages
            .iter()
            .map(|page| UrlEntry {
                loc: config.site.info.absolute(page.path),
                lastmod: lastmod.clone(),
                changefreq: page.changefreq,
                priority: page.priority.clamp(0.0, 1.0),
            })
            .collect();

        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(512);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n    <lastmod>");
            xml.push_str(&entry.lastmod);
            xml.push_str("</lastmod>\n    <changefreq>");
            xml.push_str(entry.changefreq.as_str());
            xml.push_str("</changefreq>\n    <priority>");
            // f32 Display drops the fraction for whole numbers: 1.0 -> "1"
            xml.push_str(&entry.priority.to_string());
            xml.push_str("</priority>\n  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::xml::check_well_formed;

    fn at(millis: u64) -> DateTimeUtc {
        DateTimeUtc::from_unix_millis(millis)
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_single_landing_page() {
        let xml = render_sitemap_at(&SiteConfig::default(), at(1718461845123));

        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.contains("<loc>https://karaoke.gastroli.moscow</loc>"));
        assert!(xml.contains("<lastmod>2024-06-15T14:30:45.123Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>1</priority>"));
    }

    #[test]
    fn test_sitemap_xml_structure() {
        let xml = render_sitemap_at(&SiteConfig::default(), at(0));

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(lines[1], format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        assert_eq!(lines.last().unwrap().trim(), "</urlset>");
        check_well_formed(&xml).unwrap();
    }

    #[test]
    fn test_unpinned_sitemap_is_stamped_with_current_time() {
        // Fixed-width ISO strings order like the instants they encode.
        let before = DateTimeUtc::now().to_iso_string();
        let xml = render_sitemap(&SiteConfig::default());
        let after = DateTimeUtc::now().to_iso_string();

        let lastmod = xml
            .split_once("<lastmod>")
            .and_then(|(_, rest)| rest.split_once("</lastmod>"))
            .map(|(value, _)| value)
            .unwrap();
        assert!(
            before.as_str() <= lastmod && lastmod <= after.as_str(),
            "{lastmod} not between {before} and {after}"
        );
    }

    #[test]
    fn test_sitemap_structure_is_time_independent() {
        let first = render_sitemap_at(&SiteConfig::default(), at(1718461845123))
            .replace(&at(1718461845123).to_iso_string(), "NOW");
        let second = render_sitemap_at(&SiteConfig::default(), at(951782400000))
            .replace(&at(951782400000).to_iso_string(), "NOW");

        assert_eq!(first, second);
    }

    #[test]
    fn test_sitemap_fractional_priority_and_escaping() {
        let mut config = SiteConfig::default();
        config.site.info.url = "https://example.com".into();
        let pages = [PageEntry {
            path: "search?q=a&b=c",
            changefreq: ChangeFrequency::Daily,
            priority: 0.5,
        }];

        let xml = Sitemap::build(&config, &pages, at(0)).into_xml();
        assert!(xml.contains("<loc>https://example.com/search?q=a&amp;b=c</loc>"));
        assert!(xml.contains("<priority>0.5</priority>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
    }

    #[test]
    fn test_sitemap_clamps_priority() {
        let pages = [PageEntry {
            path: "",
            changefreq: ChangeFrequency::Never,
            priority: 3.0,
        }];
        let xml = Sitemap::build(&SiteConfig::default(), &pages, at(0)).into_xml();
        assert!(xml.contains("<priority>1</priority>"));
    }

    #[test]
    fn test_build_sitemap_respects_minify() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.build.output = dir.path().to_path_buf();
        config.build.minify = true;

        build_sitemap(&config).unwrap();
        let written = std::fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
        assert!(!written.contains('\n'));
        assert!(written.contains("<url><loc>"));
    }
}
