pub mod r#box;
pub use r#box::{parse_box_header, read_box_at, read_payload_at, RawBox};
pub mod walker;
pub use walker::{walk, MovieFacts, WalkerConfig};
pub mod ftyp;
pub use ftyp::{classify_brand, parse_major_brand, ContainerFormat};
pub mod mvhd;
pub use mvhd::{build_timecode_series, parse_mvhd, MovieHeader, MAC_EPOCH_OFFSET};
pub mod meta;
pub use meta::{parse_meta, MetaSummary};
