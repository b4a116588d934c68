//! Audio duration measurement using symphonia.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use std::time::Duration;
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::{FormatOptions, Track};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;

/// Measure the playing time of an audio file.
///
/// Uses the frame count from the container header when present. Otherwise
/// the packets of the audio track are read (not decoded) and their
/// durations summed.
///
/// Supports WAV, FLAC, MP3, and AAC formats.
pub fn measure_duration(path: &Path) -> Result<Duration> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    // Create hint from file extension
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .filter(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .or_else(|| {
            format
                .tracks()
                .iter()
                .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        })
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let time_base = track_time_base(track).ok_or_else(|| Error::UnknownDuration {
        path: path.to_path_buf(),
    })?;

    if let Some(n_frames) = track.codec_params.n_frames {
        return Ok(to_duration(time_base, n_frames));
    }

    let mut total: u64 = 0;
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioOpen {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() == track_id {
            total = total.saturating_add(packet.dur());
        }
    }

    if total == 0 {
        return Err(Error::UnknownDuration {
            path: path.to_path_buf(),
        });
    }

    Ok(to_duration(time_base, total))
}

/// Time base of a track, falling back to one tick per sample.
fn track_time_base(track: &Track) -> Option<TimeBase> {
    track
        .codec_params
        .time_base
        .or_else(|| track.codec_params.sample_rate.map(|rate| TimeBase::new(1, rate)))
}

/// Convert a timestamp in `time_base` units to a [`Duration`].
fn to_duration(time_base: TimeBase, ticks: u64) -> Duration {
    let time = time_base.calc_time(ticks);
    Duration::from_secs(time.seconds) + Duration::from_secs_f64(time.frac)
}
