//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// Resolve URL to a file under `serve_root`, handling index.html for directories
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    // Reject paths with suspicious patterns early
    if clean.contains("..") {
        return None;
    }

    let local = serve_root.join(&clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: decode, strip query string, trim slashes
pub fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    decoded.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("/rss.xml"), "rss.xml");
        assert_eq!(normalize_url("/rss.xml?utm=1"), "rss.xml");
        assert_eq!(normalize_url("/sounds/piano%20grand.mp3"), "sounds/piano grand.mp3");
        assert_eq!(normalize_url("/"), "");
        // an encoded '?' is part of the path, not a query
        assert_eq!(normalize_url("/a%3Fb"), "a?b");
    }

    #[test]
    fn test_resolve_file_and_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sounds")).unwrap();
        fs::write(dir.path().join("sounds/piano.mp3"), b"ID3").unwrap();
        fs::write(dir.path().join("index.html"), b"<html></html>").unwrap();

        let file = resolve_path("/sounds/piano.mp3", dir.path()).unwrap();
        assert!(file.ends_with("sounds/piano.mp3"));

        let index = resolve_path("/", dir.path()).unwrap();
        assert!(index.ends_with("index.html"));

        assert!(resolve_path("/sounds/", dir.path()).is_none());
        assert!(resolve_path("/missing.mp3", dir.path()).is_none());
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        fs::create_dir_all(&public).unwrap();
        fs::write(dir.path().join("gastroli.toml"), b"").unwrap();

        assert!(resolve_path("/../gastroli.toml", &public).is_none());
        assert!(resolve_path("/%2e%2e/gastroli.toml", &public).is_none());
    }
}
