//! The shipped instruments.
//!
//! Offsets and durations are measured on `sounds/piano.mp3`; each note has
//! its own gap-separated slot so release tails never bleed into the next.

use super::{Instrument, SampleLibrary, Sprite, StaffType};

pub static LIBRARY: SampleLibrary = SampleLibrary {
    instruments: &[PIANO],
};

const PIANO: Instrument = Instrument {
    name: "Piano",
    staff_type: StaffType::Normal,
    asset: "piano.mp3",
    sprites: &[
        Sprite::new("A3", 0.0, 3776.2131519274376),
        Sprite::new("Asharp3", 5000.0, 4848.390022675737),
        Sprite::new("B3", 11000.0, 5923.968253968254),
        Sprite::new("C3", 18000.0, 4685.034013605442),
        Sprite::new("C4", 24000.0, 6752.970521541951),
        Sprite::new("Csharp3", 32000.0, 5236.213151927437),
        Sprite::new("Csharp4", 39000.0, 4604.285714285716),
        Sprite::new("D3", 45000.0, 4814.603174603179),
        Sprite::new("D4", 51000.0, 5732.607709750568),
        Sprite::new("Dsharp3", 58000.0, 5294.943310657593),
        Sprite::new("Dsharp4", 65000.0, 4705.011337868484),
        Sprite::new("E3", 71000.0, 4688.752834467124),
        Sprite::new("E4", 77000.0, 4537.25623582767),
        Sprite::new("F3", 83000.0, 3645.7369614512486),
        Sprite::new("Fsharp3", 88000.0, 4553.219954648526),
        Sprite::new("G3", 94000.0, 4056.712018140587),
        Sprite::new("Gsharp3", 100000.0, 3850.2040816326544),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piano_has_seventeen_sprites() {
        let piano = LIBRARY.instrument("Piano").unwrap();
        assert_eq!(piano.sprites.len(), 17);
        assert_eq!(piano.staff_type, StaffType::Normal);
        assert_eq!(piano.asset, "piano.mp3");
    }

    #[test]
    fn test_labels_are_unique() {
        for instrument in LIBRARY.iter() {
            let mut labels: Vec<_> = instrument.sprites.iter().map(|s| s.label).collect();
            labels.sort_unstable();
            labels.dedup();
            assert_eq!(labels.len(), instrument.sprites.len(), "{}", instrument.name);
        }
    }

    #[test]
    fn test_regions_do_not_overlap() {
        for instrument in LIBRARY.iter() {
            let mut regions: Vec<_> = instrument.sprites.iter().map(|s| s.region).collect();
            regions.sort_by(|a, b| a.start_ms.total_cmp(&b.start_ms));
            for pair in regions.windows(2) {
                assert!(pair[0].end_ms() <= pair[1].start_ms, "{pair:?}");
            }
        }
    }

    #[test]
    fn test_every_label_is_a_pitch() {
        for instrument in LIBRARY.iter() {
            for sprite in instrument.sprites {
                assert!(sprite.label.parse::<crate::samples::Pitch>().is_ok(), "{}", sprite.label);
            }
        }
    }
}
