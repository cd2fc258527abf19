use crate::errors::{Mp4Error, Mp4SrtResult};
use crate::subtitles::TimecodeEntry;
use chrono::DateTime;
use serde::Serialize;

/// Seconds between the Mac epoch (1904-01-01) and the Unix epoch (1970-01-01)
pub const MAC_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Facts decoded from a version-0 movie header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieHeader {
    pub creation_time_raw: u32,
    pub time_scale: u32,
    pub duration_ticks: u32,
    pub creation_instant: i64,
    pub duration_seconds: u32,
}

impl MovieHeader {
    /// The creation instant rendered as `DD-MM-YYYY HH:MM:SS` in UTC.
    pub fn first_timestamp(&self) -> Option<String> {
        DateTime::from_timestamp(self.creation_instant, 0)
            .map(|dt| dt.format("%d-%m-%Y %H:%M:%S").to_string())
    }
}

/// Decode the movie header fields from a mvhd payload.
///
/// Payload layout (after the 8-byte box header): version+flags at 0..4,
/// creation time at 4..8, modification time at 8..12, time scale at 12..16,
/// duration at 16..20, all big-endian u32. A zero time scale is rejected
/// before the duration is derived.
pub fn parse_mvhd(payload: &[u8]) -> Mp4SrtResult<MovieHeader> {
    if payload.len() < 20 {
        return Err(Mp4Error::OutOfBounds {
            offset: payload.len() as u64,
            requested: 20,
        }
        .into());
    }
    let creation_time_raw = u32::from_be_bytes([payload[4], payload[5], payload[6], payload[7]]);
    let time_scale = u32::from_be_bytes([payload[12], payload[13], payload[14], payload[15]]);
    let duration_ticks = u32::from_be_bytes([payload[16], payload[17], payload[18], payload[19]]);

    if time_scale == 0 {
        return Err(Mp4Error::DivisionByZero.into());
    }
    let duration_seconds = (duration_ticks as f64 / time_scale as f64).round() as u32;

    Ok(MovieHeader {
        creation_time_raw,
        time_scale,
        duration_ticks,
        creation_instant: creation_time_raw as i64 - MAC_EPOCH_OFFSET,
        duration_seconds,
    })
}

/// Expand a movie header into one timecode entry per whole second.
///
/// Entry `i` renders `creation_instant + i` in UTC; the sequence covers
/// `0..duration_seconds`.
pub fn build_timecode_series(header: &MovieHeader) -> Vec<TimecodeEntry> {
    (0..header.duration_seconds)
        .filter_map(|i| DateTime::from_timestamp(header.creation_instant + i64::from(i), 0))
        .map(|dt| TimecodeEntry {
            date: dt.format("%d-%m-%Y").to_string(),
            time: dt.format("%H:%M:%S").to_string(),
        })
        .collect()
}
