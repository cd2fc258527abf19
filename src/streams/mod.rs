pub mod seekable_http_stream;
pub mod seekable_stream;

pub use seekable_http_stream::SeekableHttpStream;
pub use seekable_stream::{LocalSeekableStream, SeekableStream};
