mod types;
mod utils;
mod writer;

pub use types::TimecodeEntry;
pub use utils::format_timestamp;
pub use writer::{derive_srt_path, write_series};
