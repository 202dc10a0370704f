//! In-browser synthesizer sample library.
//!
//! Each [`Instrument`] points at one compressed audio asset and slices it
//! into labelled sprites: `(start, duration)` regions in milliseconds of the
//! decoded time axis. The library is a `static` literal, never mutated, so
//! request threads read it without synchronization.
//!
//! - [`library`]: the shipped instruments
//! - [`pitch`]: parsing sprite labels such as `Csharp4`
//! - [`manifest`]: JSON manifest consumed by the browser player
//! - [`probe`]: decoded-duration probing and sprite bounds checks

pub mod library;
pub mod manifest;
pub mod pitch;
pub mod probe;

pub use library::LIBRARY;
pub use pitch::Pitch;

use serde::Serialize;

/// How the instrument is notated on the on-screen staff.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffType {
    Normal,
    Percussion,
}

/// A playback region inside an instrument asset, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRegion {
    pub start_ms: f64,
    pub duration_ms: f64,
}

impl SpriteRegion {
    pub const fn new(start_ms: f64, duration_ms: f64) -> Self {
        Self {
            start_ms,
            duration_ms,
        }
    }

    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms
    }
}

/// Serializes as the `[start, duration]` pair howler expects.
impl Serialize for SpriteRegion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.start_ms, self.duration_ms).serialize(serializer)
    }
}

/// A labelled sprite, e.g. `Csharp4`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub label: &'static str,
    pub region: SpriteRegion,
}

impl Sprite {
    pub const fn new(label: &'static str, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            label,
            region: SpriteRegion::new(start_ms, duration_ms),
        }
    }
}

#[derive(Debug)]
pub struct Instrument {
    pub name: &'static str,
    pub staff_type: StaffType,
    /// Asset file name inside the samples directory.
    pub asset: &'static str,
    /// Sprites in declaration order.
    pub sprites: &'static [Sprite],
}

impl Instrument {
    /// Look up a sprite region by label.
    pub fn region(&self, label: &str) -> Option<&SpriteRegion> {
        self.sprites
            .iter()
            .find(|sprite| sprite.label == label)
            .map(|sprite| &sprite.region)
    }

    /// Sprites whose labels parse as pitches, lowest first.
    pub fn sprites_by_pitch(&self) -> Vec<(Pitch, &Sprite)> {
        let mut pitched: Vec<_> = self
            .sprites
            .iter()
            .filter_map(|sprite| sprite.label.parse::<Pitch>().ok().map(|p| (p, sprite)))
            .collect();
        pitched.sort_by_key(|(pitch, _)| pitch.midi());
        pitched
    }
}

#[derive(Debug)]
pub struct SampleLibrary {
    pub instruments: &'static [Instrument],
}

impl SampleLibrary {
    pub fn instrument(&self, name: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_lookup() {
        let piano = LIBRARY.instrument("Piano").unwrap();
        let c4 = piano.region("C4").unwrap();
        assert_eq!(c4.start_ms, 24000.0);
        assert!((c4.duration_ms - 6752.970521541951).abs() < 1e-9);
        assert!(piano.region("C9").is_none());
    }

    #[test]
    fn test_unknown_instrument() {
        assert!(LIBRARY.instrument("Theremin").is_none());
    }

    #[test]
    fn test_sprites_by_pitch_is_chromatic_from_c3() {
        let piano = LIBRARY.instrument("Piano").unwrap();
        let ordered = piano.sprites_by_pitch();

        assert_eq!(ordered.len(), piano.sprites.len());
        assert_eq!(ordered.first().unwrap().1.label, "C3");
        assert_eq!(ordered.last().unwrap().1.label, "E4");

        let midi: Vec<u8> = ordered.iter().map(|(p, _)| p.midi()).collect();
        assert!(midi.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn test_sprite_region_serializes_as_pair() {
        let region = SpriteRegion::new(5000.0, 4848.5);
        assert_eq!(serde_json::to_string(&region).unwrap(), "[5000.0,4848.5]");
    }

    #[test]
    fn test_end_ms() {
        assert_eq!(SpriteRegion::new(100.0, 50.5).end_ms(), 150.5);
    }
}
