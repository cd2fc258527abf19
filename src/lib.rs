pub mod bits;

pub mod mp4;
pub use mp4::{walk, ContainerFormat, MovieFacts, MovieHeader, WalkerConfig};

pub mod streams;
pub use streams::{LocalSeekableStream, SeekableHttpStream, SeekableStream};

pub mod subtitles;
pub use subtitles::{derive_srt_path, write_series, TimecodeEntry};

pub mod errors;
pub use errors::{Mp4Error, Mp4SrtError, Mp4SrtResult, StreamError, SubtitleError};

macro_rules! with_seekable_stream {
    ($source:expr, $body:expr) => {{
        fn __apply<S, R>(stream: S, f: impl FnOnce(S) -> R) -> R {
            f(stream)
        }
        if $source.starts_with("http://") || $source.starts_with("https://") {
            let stream = SeekableHttpStream::new($source)?;
            __apply(stream, $body)
        } else {
            let stream = LocalSeekableStream::open($source)?;
            __apply(stream, $body)
        }
    }};
}

/// Walk the container at `source` (local path or URL) and decode its facts.
pub fn extract_movie_facts(source: &str, config: &WalkerConfig) -> Mp4SrtResult<MovieFacts> {
    with_seekable_stream!(source, |mut stream| {
        let facts = walk(&mut stream, config);
        stream.print_stats();
        Ok(facts)
    })
}

/// Extract only the per-second timecode series.
pub fn extract_timecodes(source: &str) -> Mp4SrtResult<Vec<TimecodeEntry>> {
    let facts = extract_movie_facts(source, &WalkerConfig::default())?;
    Ok(facts.timecodes)
}

/// Extract only the null-stripped XML metadata, if the file carries any.
pub fn extract_xml_metadata(source: &str) -> Mp4SrtResult<Option<String>> {
    let config = WalkerConfig {
        metadata_only: true,
        verbose: false,
    };
    let facts = extract_movie_facts(source, &config)?;
    Ok(facts.xml_metadata)
}
