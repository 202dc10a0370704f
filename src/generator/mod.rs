//! Generated site documents.
//!
//! - **Feed**: RSS 2.0 channel (`rss.xml`)
//! - **Sitemap**: search engine indexing (`sitemap.xml`)
//!
//! Both render from literal content plus the configured origin, stamped with
//! the render time. The `*_at` variants take the time explicitly.

pub mod feed;
pub mod sitemap;
pub mod xml;

use crate::log;
use anyhow::{Context, Result};
use std::{borrow::Cow, fs, path::Path};

/// Minify XML content if enabled.
///
/// Lines are trimmed and joined. Text inside CDATA sections keeps its line
/// breaks, since feed descriptions are multi-line.
pub fn minify_xml(content: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if !enabled {
        return Cow::Borrowed(content);
    }

    let xml_str = std::str::from_utf8(content).unwrap_or("");
    let mut minified = String::with_capacity(xml_str.len());
    let mut in_cdata = false;

    for line in xml_str.lines() {
        if in_cdata {
            minified.push('\n');
            minified.push_str(line);
        } else {
            minified.push_str(line.trim());
        }

        if let Some(open) = line.rfind("<![CDATA[") {
            in_cdata = !line[open..].contains("]]>");
        } else if in_cdata && line.contains("]]>") {
            in_cdata = false;
        }
    }

    Cow::Owned(minified.into_bytes())
}

/// Write a rendered document into `output_dir`, creating parent directories.
pub fn write_document(output_dir: &Path, rel_path: &Path, content: &[u8], module: &str) -> Result<()> {
    let path = output_dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, content)
        .with_context(|| format!("Failed to write {} to {}", module, path.display()))?;

    log!(module; "{}", rel_path.display());
    Ok(())
}
