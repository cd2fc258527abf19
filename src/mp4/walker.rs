use crate::errors::Mp4SrtResult;
use crate::mp4::ftyp::{classify_brand, parse_major_brand, ContainerFormat};
use crate::mp4::meta::parse_meta;
use crate::mp4::mvhd::{build_timecode_series, parse_mvhd, MovieHeader};
use crate::mp4::r#box::{read_box_at, read_payload_at, RawBox};
use crate::streams::seekable_stream::SeekableStream;
use crate::subtitles::TimecodeEntry;
use log::{debug, warn};
use serde::Serialize;

/// Walker behavior switches
#[derive(Debug, Default, Clone, Copy)]
pub struct WalkerConfig {
    /// Decode only meta/xml content, eagerly.
    pub metadata_only: bool,
    /// Emit a per-box trace while scanning.
    pub verbose: bool,
}

/// Everything decoded from one pass over a container
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct MovieFacts {
    pub major_brand: Option<String>,
    pub format: Option<ContainerFormat>,
    pub movie_header: Option<MovieHeader>,
    pub timecodes: Vec<TimecodeEntry>,
    pub xml_metadata: Option<String>,
    pub has_xml_metadata: bool,
}

/// Scan every top-level box of the stream and decode the recognized ones.
///
/// Parsing is best-effort: `Truncated` and `InvalidBoxSize` are how streams
/// end, and any other fault logs a warning and stops the scan with whatever
/// was decoded so far. Payloads are fetched only for recognized types.
pub fn walk<S: SeekableStream>(stream: &mut S, config: &WalkerConfig) -> MovieFacts {
    let mut facts = MovieFacts::default();
    let mut offset = 0u64;

    loop {
        let raw = match read_box_at(stream, offset) {
            Ok(raw) => raw,
            Err(e) if e.is_end_of_boxes() => {
                debug!("end of boxes at offset {}", offset);
                break;
            }
            Err(e) => {
                warn!("stopping scan at offset {}: {}", offset, e);
                break;
            }
        };
        if config.verbose {
            debug!(
                "box {} size {} at offset {}",
                raw.kind_lossy(),
                raw.size,
                offset
            );
        }

        if let Err(e) = decode_box(stream, &raw, offset, config, &mut facts) {
            if e.is_end_of_boxes() {
                debug!("end of boxes inside {} at offset {}", raw.kind_lossy(), offset);
            } else {
                warn!(
                    "stopping scan after box {} at offset {}: {}",
                    raw.kind_lossy(),
                    offset,
                    e
                );
            }
            break;
        }

        offset += raw.size;
    }

    facts
}

/// Dispatch one box.
///
/// `moov` descends exactly one level, to its first child only; a movie
/// header that is not the first child is missed. The walker still advances
/// past `moov` by the box's own reported size.
fn decode_box<S: SeekableStream>(
    stream: &mut S,
    raw: &RawBox,
    offset: u64,
    config: &WalkerConfig,
    facts: &mut MovieFacts,
) -> Mp4SrtResult<()> {
    if raw.kind == *b"moov" && !config.metadata_only {
        let child_offset = offset + 8;
        let child = read_box_at(stream, child_offset)?;
        if config.verbose {
            debug!(
                "box {} size {} at offset {} (first child of moov)",
                child.kind_lossy(),
                child.size,
                child_offset
            );
        }
        return decode_leaf(stream, &child, child_offset, config, facts);
    }
    decode_leaf(stream, raw, offset, config, facts)
}

fn decode_leaf<S: SeekableStream>(
    stream: &mut S,
    raw: &RawBox,
    offset: u64,
    config: &WalkerConfig,
    facts: &mut MovieFacts,
) -> Mp4SrtResult<()> {
    match &raw.kind {
        b"ftyp" if !config.metadata_only => {
            let payload = read_payload_at(stream, offset + raw.header_len, raw.payload_len())?;
            facts.major_brand = parse_major_brand(&payload);
            facts.format = facts.major_brand.as_deref().map(classify_brand);
        }
        b"mvhd" if !config.metadata_only => {
            let payload = read_payload_at(stream, offset + raw.header_len, raw.payload_len())?;
            let header = parse_mvhd(&payload)?;
            facts.timecodes = build_timecode_series(&header);
            facts.movie_header = Some(header);
        }
        b"meta" => {
            let payload = read_payload_at(stream, offset + raw.header_len, raw.payload_len())?;
            let summary = parse_meta(&payload, config.metadata_only);
            facts.has_xml_metadata |= summary.has_xml;
            if summary.xml_text.is_some() {
                facts.xml_metadata = summary.xml_text;
            }
        }
        _ => {}
    }
    Ok(())
}
