//! JSON manifest consumed by the browser synthesizer.
//!
//! Mirrors the howler sprite format, one entry per instrument:
//!
//! ```json
//! {
//!   "instruments": [
//!     {
//!       "name": "Piano",
//!       "staffType": "normal",
//!       "src": ["sounds/piano.mp3"],
//!       "sprite": { "A3": [0.0, 3776.2131519274376], "...": [] }
//!     }
//!   ]
//! }
//! ```

use super::{Instrument, LIBRARY, SampleLibrary, StaffType};
use crate::config::SiteConfig;
use anyhow::Result;
use serde::Serialize;
use serde_json::Map;

#[derive(Serialize)]
struct Manifest<'a> {
    instruments: Vec<InstrumentEntry<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentEntry<'a> {
    name: &'a str,
    staff_type: StaffType,
    src: Vec<String>,
    sprite: Map<String, serde_json::Value>,
}

impl<'a> InstrumentEntry<'a> {
    fn new(instrument: &'a Instrument, base: &str) -> Result<Self> {
        // preserve_order keeps declaration order in the map
        let mut sprite = Map::new();
        for s in instrument.sprites {
            sprite.insert(s.label.to_string(), serde_json::to_value(s.region)?);
        }

        Ok(Self {
            name: instrument.name,
            staff_type: instrument.staff_type,
            src: vec![asset_url(base, instrument.asset)],
            sprite,
        })
    }
}

/// URL path of an asset relative to the site root, always `/`-separated.
pub fn asset_url(base: &str, asset: &str) -> String {
    let base = base.replace('\\', "/");
    let base = base.trim_matches('/');
    if base.is_empty() {
        asset.to_string()
    } else {
        format!("{base}/{asset}")
    }
}

/// Render the manifest for `library`, with asset URLs under `base`.
pub fn render_manifest(library: &SampleLibrary, base: &str) -> Result<String> {
    let instruments = library
        .iter()
        .map(|instrument| InstrumentEntry::new(instrument, base))
        .collect::<Result<Vec<_>>>()?;

    Ok(serde_json::to_string_pretty(&Manifest { instruments })?)
}

/// Render the shipped library with asset URLs under `samples.dir`.
pub fn render_site_manifest(config: &SiteConfig) -> Result<String> {
    render_manifest(&LIBRARY, &config.samples.dir.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::SpriteRegion;
    use serde_json::Value;

    fn region_from_value(value: &serde_json::Value) -> Option<SpriteRegion> {
        let pair = value.as_array()?;
        match pair.as_slice() {
            [start, duration] => Some(SpriteRegion::new(start.as_f64()?, duration.as_f64()?)),
            _ => None,
        }
    }

    fn parsed() -> Value {
        serde_json::from_str(&render_manifest(&LIBRARY, "sounds").unwrap()).unwrap()
    }

    #[test]
    fn test_manifest_shape() {
        let manifest = parsed();
        let piano = &manifest["instruments"][0];

        assert_eq!(piano["name"], "Piano");
        assert_eq!(piano["staffType"], "normal");
        assert_eq!(piano["src"][0], "sounds/piano.mp3");
        assert_eq!(piano["sprite"].as_object().unwrap().len(), 17);
    }

    #[test]
    fn test_manifest_keeps_declaration_order() {
        let manifest = parsed();
        let labels: Vec<&str> = manifest["instruments"][0]["sprite"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        let declared: Vec<&str> = LIBRARY.instruments[0].sprites.iter().map(|s| s.label).collect();
        assert_eq!(labels, declared);
    }

    #[test]
    fn test_manifest_regions_match_library() {
        let manifest = parsed();
        let piano = LIBRARY.instrument("Piano").unwrap();

        for (label, value) in manifest["instruments"][0]["sprite"].as_object().unwrap() {
            let region = region_from_value(value).unwrap();
            assert_eq!(Some(&region), piano.region(label), "{label}");
        }
    }

    #[test]
    fn test_site_manifest_follows_samples_dir() {
        let mut config = SiteConfig::default();
        config.samples.dir = "media/audio".into();

        let manifest: Value = serde_json::from_str(&render_site_manifest(&config).unwrap()).unwrap();
        assert_eq!(manifest["instruments"][0]["src"][0], "media/audio/piano.mp3");
    }

    #[test]
    fn test_asset_url() {
        assert_eq!(asset_url("sounds", "piano.mp3"), "sounds/piano.mp3");
        assert_eq!(asset_url("/sounds/", "piano.mp3"), "sounds/piano.mp3");
        assert_eq!(asset_url("", "piano.mp3"), "piano.mp3");
        assert_eq!(asset_url("media\\sounds", "piano.mp3"), "media/sounds/piano.mp3");
    }

    #[test]
    fn test_region_from_value_rejects_bad_shapes() {
        assert!(region_from_value(&serde_json::json!([1.0])).is_none());
        assert!(region_from_value(&serde_json::json!({"start": 1.0})).is_none());
        assert!(region_from_value(&serde_json::json!(["a", 1.0])).is_none());
    }
}
