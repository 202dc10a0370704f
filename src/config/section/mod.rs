//! Configuration section definitions.
//!
//! Each module corresponds to a section in `gastroli.toml`:
//!
//! | Module    | TOML Section   | Purpose                               |
//! |-----------|----------------|---------------------------------------|
//! | `build`   | `[build]`      | Output and public directories         |
//! | `samples` | `[samples]`    | Sample library asset locations        |
//! | `serve`   | `[serve]`      | HTTP server                           |
//! | `site`    | `[site]`       | Site identity, feed, sitemap          |

mod build;
mod samples;
mod serve;
pub mod site;

pub use build::BuildConfig;
pub use samples::SamplesConfig;
pub use serve::ServeConfig;
pub use site::{FeedConfig, SiteInfoConfig, SiteSectionConfig, SitemapConfig};

use super::{ConfigDiagnostics, FieldPath};
use std::path::{Component, Path};

/// Require a plain relative output path with the given extension.
///
/// Generated documents are written below the output directory and routed
/// by the server under the same path, so `..`, roots and prefixes are rejected.
pub(crate) fn validate_output_path(
    path: &Path,
    extension: &str,
    field: FieldPath,
    diag: &mut ConfigDiagnostics,
) {
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));

    if path.as_os_str().is_empty() || escapes {
        diag.error_with_hint(
            field,
            format!("`{}` must be a relative path", path.display()),
            format!("use a plain file name, e.g. \"feed.{extension}\""),
        );
        return;
    }

    if path.extension().and_then(|e| e.to_str()) != Some(extension) {
        diag.error(
            field,
            format!("`{}` must have a .{extension} extension", path.display()),
        );
    }
}
