use super::types::TimecodeEntry;
use super::utils::format_timestamp;
use crate::errors::{Mp4SrtResult, SubtitleError};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Derive the output path by replacing a trailing `.mp4`/`.MP4` with `.srt`.
/// A hint without that suffix gets `.srt` appended.
pub fn derive_srt_path(path_hint: &str) -> PathBuf {
    for suffix in [".mp4", ".MP4"] {
        if let Some(stem) = path_hint.strip_suffix(suffix) {
            return PathBuf::from(format!("{}.srt", stem));
        }
    }
    PathBuf::from(format!("{}.srt", path_hint))
}

/// Write the timecode series next to the source file as an SRT track.
///
/// Entry `i` (0-based) becomes the 1-based subtitle `i + 1` shown over the
/// interval `[i, i + 1)` seconds, with the entry's date and time on separate
/// lines and a blank separator after each entry.
pub fn write_series(path_hint: &str, entries: &[TimecodeEntry]) -> Mp4SrtResult<PathBuf> {
    let srt_path = derive_srt_path(path_hint);
    info!("Writing timecodes to SRT file: {}", srt_path.display());

    let file = File::create(&srt_path).map_err(|e| {
        SubtitleError::new(format!("Failed to create {}: {}", srt_path.display(), e))
    })?;
    let mut out = BufWriter::new(file);

    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "{}", i + 1)?;
        writeln!(
            out,
            "{} --> {}",
            format_timestamp(i as f64),
            format_timestamp((i + 1) as f64)
        )?;
        writeln!(out, "{}", entry.date)?;
        writeln!(out, "{}", entry.time)?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(srt_path)
}
