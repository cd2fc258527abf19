use serde::Serialize;

/// One per-second timecode entry, rendered as two lines in the SRT output
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TimecodeEntry {
    pub date: String,
    pub time: String,
}
