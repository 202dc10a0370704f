//! `[samples]` section configuration.
//!
//! ```toml
//! [samples]
//! dir = "sounds"            # Asset directory, relative to `build.public`
//! manifest = "sounds.json"  # Manifest path served to the browser synth
//! ```

use super::validate_output_path;
use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplesConfig {
    /// Directory holding instrument assets, relative to the public directory.
    pub dir: PathBuf,
    /// Output path of the JSON sample manifest.
    pub manifest: PathBuf,
}

impl Default for SamplesConfig {
    fn default() -> Self {
        Self {
            dir: "sounds".into(),
            manifest: "sounds.json".into(),
        }
    }
}

impl SamplesConfig {
    pub const DIR: FieldPath = FieldPath::new("samples.dir");
    pub const MANIFEST: FieldPath = FieldPath::new("samples.manifest");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.dir.is_absolute() {
            diag.error_with_hint(
                Self::DIR,
                format!("`{}` must be relative to build.public", self.dir.display()),
                "e.g. \"sounds\"",
            );
        }
        validate_output_path(&self.manifest, "json", Self::MANIFEST, diag);
    }
}
