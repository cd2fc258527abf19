use std::error::Error;
use std::fmt;
use std::io;

/// Enumeration of all possible errors that can occur in the extractor
#[derive(Debug)]
pub enum Mp4SrtError {
    Subtitle(SubtitleError),
    Stream(StreamError),
    Mp4(Mp4Error),
    Other(io::Error),
}

impl Mp4SrtError {
    /// True when the error marks the normal end of the box sequence rather
    /// than corrupt data.
    pub fn is_end_of_boxes(&self) -> bool {
        matches!(self, Mp4SrtError::Mp4(e) if e.is_end_of_boxes())
    }
}

/// Subtitle serialization specific errors
#[derive(Debug)]
pub struct SubtitleError {
    pub message: String,
}

impl SubtitleError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct StreamError {
    pub message: String,
}

impl StreamError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// MP4 box-level errors
#[derive(Debug, PartialEq, Eq)]
pub enum Mp4Error {
    /// Fewer bytes were available than a header field requires.
    /// Expected at the end of the stream.
    Truncated { offset: u64 },
    /// A box declared size 0. Expected terminator condition.
    InvalidBoxSize { offset: u64 },
    /// A payload request reached past the end of the available data.
    OutOfBounds { offset: u64, requested: u64 },
    /// A movie header declared a zero time scale.
    DivisionByZero,
}

impl Mp4Error {
    /// `Truncated` and `InvalidBoxSize` are how well-formed streams end;
    /// the remaining kinds indicate corrupt data.
    pub fn is_end_of_boxes(&self) -> bool {
        matches!(
            self,
            Mp4Error::Truncated { .. } | Mp4Error::InvalidBoxSize { .. }
        )
    }
}

impl fmt::Display for Mp4SrtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mp4SrtError::Other(err) => write!(f, "I/O error: {}", err),
            Mp4SrtError::Subtitle(err) => write!(f, "Subtitle error: {}", err),
            Mp4SrtError::Stream(err) => write!(f, "Stream error: {}", err),
            Mp4SrtError::Mp4(err) => write!(f, "MP4 error: {}", err),
        }
    }
}

impl fmt::Display for SubtitleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for Mp4Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mp4Error::Truncated { offset } => {
                write!(f, "stream ended inside a box header at offset {}", offset)
            }
            Mp4Error::InvalidBoxSize { offset } => {
                write!(f, "box at offset {} declared size 0", offset)
            }
            Mp4Error::OutOfBounds { offset, requested } => write!(
                f,
                "read of {} bytes at offset {} reaches past the end of the stream",
                requested, offset
            ),
            Mp4Error::DivisionByZero => write!(f, "movie header time scale is 0"),
        }
    }
}

impl Error for Mp4SrtError {}
impl Error for SubtitleError {}
impl Error for StreamError {}
impl Error for Mp4Error {}

// Conversion implementations
impl From<io::Error> for Mp4SrtError {
    fn from(err: io::Error) -> Self {
        Mp4SrtError::Other(err)
    }
}

impl From<SubtitleError> for Mp4SrtError {
    fn from(err: SubtitleError) -> Self {
        Mp4SrtError::Subtitle(err)
    }
}

impl From<StreamError> for Mp4SrtError {
    fn from(err: StreamError) -> Self {
        Mp4SrtError::Stream(err)
    }
}

impl From<Mp4Error> for Mp4SrtError {
    fn from(err: Mp4Error) -> Self {
        Mp4SrtError::Mp4(err)
    }
}

// Type alias for Result with Mp4SrtError
pub type Mp4SrtResult<T> = Result<T, Mp4SrtError>;
