//! Decoded-duration probing for instrument assets.
//!
//! Sprite regions are measured on the decoded time axis, so the check reads
//! the asset through symphonia rather than trusting container metadata alone.

use super::Instrument;
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};
use symphonia::core::{
    errors::Error as SymphoniaError, formats::FormatOptions, io::MediaSourceStream,
    meta::MetadataOptions, probe::Hint,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("cannot open `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("cannot decode audio: {0}")]
    Symphonia(#[from] SymphoniaError),

    #[error("no audio track")]
    NoTrack,

    #[error("unknown sample rate")]
    UnknownSampleRate,
}

/// Decoded duration of an audio file in milliseconds.
///
/// Uses the frame count from the track header when present, otherwise
/// walks every packet of the default track.
pub fn probe_duration_ms(path: &Path) -> Result<f64, ProbeError> {
    let file = File::open(path).map_err(|err| ProbeError::Io(path.to_path_buf(), err))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format.default_track().ok_or(ProbeError::NoTrack)?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(ProbeError::UnknownSampleRate)?;

    let frames = match track.codec_params.n_frames {
        Some(frames) => frames,
        None => {
            let mut frames = 0u64;
            loop {
                match format.next_packet() {
                    Ok(packet) if packet.track_id() == track_id => frames += packet.dur,
                    Ok(_) => {}
                    Err(SymphoniaError::IoError(ref e))
                        if e.kind() == io::ErrorKind::UnexpectedEof =>
                    {
                        break;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            frames
        }
    };

    Ok(frames as f64 * 1000.0 / f64::from(sample_rate))
}

/// Problem with one sprite region.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionIssue {
    /// Region starts before zero or has a negative duration.
    Negative,
    /// Region has zero duration.
    Empty,
    /// Region ends after the decoded asset.
    Overrun { end_ms: f64, asset_ms: f64 },
}

impl std::fmt::Display for RegionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative => write!(f, "negative start or duration"),
            Self::Empty => write!(f, "zero duration"),
            Self::Overrun { end_ms, asset_ms } => {
                write!(f, "ends at {end_ms:.1} ms, asset is {asset_ms:.1} ms")
            }
        }
    }
}

/// Rounding slack between the authored regions and the decoded length.
const TOLERANCE_MS: f64 = 1.0;

/// Check every sprite of `instrument` against the decoded asset length.
pub fn check_bounds(instrument: &Instrument, asset_ms: f64) -> Vec<(&'static str, RegionIssue)> {
    instrument
        .sprites
        .iter()
        .filter_map(|sprite| {
            let region = sprite.region;
            let issue = if region.start_ms < 0.0 || region.duration_ms < 0.0 {
                RegionIssue::Negative
            } else if region.duration_ms == 0.0 {
                RegionIssue::Empty
            } else if region.end_ms() > asset_ms + TOLERANCE_MS {
                RegionIssue::Overrun {
                    end_ms: region.end_ms(),
                    asset_ms,
                }
            } else {
                return None;
            };
            Some((sprite.label, issue))
        })
        .collect()
}
