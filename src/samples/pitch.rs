//! Sprite label parsing.
//!
//! Labels follow the `<Note>[sharp]<octave>` scheme used by the browser
//! synth, e.g. `A3`, `Csharp4`. Flats are not used.

use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PitchError {
    #[error("empty pitch label")]
    Empty,
    #[error("unknown note name in `{0}`")]
    Note(String),
    #[error("missing or invalid octave in `{0}`")]
    Octave(String),
    #[error("`{0}` has no sharp")]
    NoSharp(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    /// Semitone within the octave, C = 0.
    pub semitone: u8,
    pub octave: u8,
}

const NOTE_NAMES: [&str; 12] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];

impl Pitch {
    /// MIDI note number (C4 = 60).
    pub fn midi(&self) -> u8 {
        (self.octave + 1) * 12 + self.semitone
    }
}

impl FromStr for Pitch {
    type Err = PitchError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let mut chars = label.chars();
        let base = match chars.next().ok_or(PitchError::Empty)? {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(PitchError::Note(label.to_string())),
        };

        let rest = chars.as_str();
        let (semitone, octave) = match rest.strip_prefix("sharp") {
            // E♯ and B♯ alias other keys and never name a sprite
            Some(_) if base == 4 || base == 11 => {
                return Err(PitchError::NoSharp(label.to_string()));
            }
            Some(octave) => (base + 1, octave),
            None => (base, rest),
        };

        if octave.len() != 1 {
            return Err(PitchError::Octave(label.to_string()));
        }
        let octave = octave
            .parse::<u8>()
            .map_err(|_| PitchError::Octave(label.to_string()))?;

        Ok(Self { semitone, octave })
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", NOTE_NAMES[self.semitone as usize], self.octave)
    }
}
