use crate::errors::{Mp4SrtResult, StreamError};
use log::info;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_LENGTH, RANGE};
use std::io::{self, Read, Seek, SeekFrom};
use std::time::Duration;

use super::seekable_stream::SeekableStream;

/// Seekable reader over a remote file using HTTP range requests.
///
/// The box walker issues many small header reads; a read-through cache keeps
/// those from each costing a request. Reads larger than one cache chunk
/// bypass the cache and fetch their range directly.
pub struct SeekableHttpStream {
    url: String,
    client: Client,
    position: u64,
    length: u64,
    cache: Vec<u8>,
    cache_start: u64,
    request_count: u64,
    bytes_fetched: u64,
}

impl SeekableHttpStream {
    const CHUNK_SIZE: usize = 4096;

    /// Open the remote file. Issues one HEAD request to learn its length.
    pub fn new(url: impl Into<String>) -> Mp4SrtResult<Self> {
        let url = url.into();
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StreamError::new(e.to_string()))?;

        let response = client
            .head(&url)
            .send()
            .map_err(|e| StreamError::new(e.to_string()))?;
        if !response.status().is_success() {
            return Err(StreamError::new(format!("HTTP error: {}", response.status())).into());
        }
        let length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| StreamError::new("Content-Length header not found or invalid"))?;

        Ok(Self {
            url,
            client,
            position: 0,
            length,
            cache: Vec::new(),
            cache_start: 0,
            request_count: 1,
            bytes_fetched: 0,
        })
    }

    /// Total length of the remote file in bytes.
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    pub fn bytes_fetched(&self) -> u64 {
        self.bytes_fetched
    }

    /// Log how much of the file the scan actually downloaded.
    pub fn log_stats(&self) {
        info!("HTTP requests: {}", self.request_count);
        info!(
            "Downloaded: {} bytes ({:.2} KB)",
            self.bytes_fetched,
            self.bytes_fetched as f64 / 1024.0
        );
        if self.length > 0 {
            let percentage = (self.bytes_fetched as f64 / self.length as f64) * 100.0;
            info!("Downloaded {:.2}% of the file", percentage);
        }
    }

    fn fetch_range(&mut self, start: u64, len: usize) -> io::Result<Vec<u8>> {
        let end = (start + len as u64).min(self.length);
        if start >= end {
            return Ok(Vec::new());
        }

        let range_header = format!("bytes={}-{}", start, end - 1);
        let response = self
            .client
            .get(&self.url)
            .header(RANGE, range_header)
            .send()
            .map_err(io::Error::other)?;
        self.request_count += 1;

        if response.status().as_u16() == 416 {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(io::Error::other(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let bytes = response.bytes().map_err(io::Error::other)?;
        let mut data = bytes.to_vec();
        data.truncate((end - start) as usize);
        self.bytes_fetched += data.len() as u64;
        Ok(data)
    }

    fn cached_from_position(&self) -> Option<&[u8]> {
        let cache_end = self.cache_start + self.cache.len() as u64;
        if self.position >= self.cache_start && self.position < cache_end {
            Some(&self.cache[(self.position - self.cache_start) as usize..])
        } else {
            None
        }
    }
}

impl Read for SeekableHttpStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.position >= self.length {
            return Ok(0);
        }

        if let Some(cached) = self.cached_from_position() {
            let n = cached.len().min(buf.len());
            buf[..n].copy_from_slice(&cached[..n]);
            self.position += n as u64;
            return Ok(n);
        }

        if buf.len() >= Self::CHUNK_SIZE {
            // Large reads fetch their exact range and skip the cache.
            let data = self.fetch_range(self.position, buf.len())?;
            let n = data.len();
            buf[..n].copy_from_slice(&data);
            self.position += n as u64;
            return Ok(n);
        }

        let chunk = self.fetch_range(self.position, Self::CHUNK_SIZE)?;
        if chunk.is_empty() {
            return Ok(0);
        }
        self.cache_start = self.position;
        self.cache = chunk;

        let cached = self.cached_from_position().unwrap_or(&[]);
        let n = cached.len().min(buf.len());
        buf[..n].copy_from_slice(&cached[..n]);
        self.position += n as u64;
        Ok(n)
    }
}

impl Seek for SeekableHttpStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.position = match pos {
            SeekFrom::Start(offset) => offset,
            SeekFrom::End(offset) => {
                if offset >= 0 {
                    self.length + offset as u64
                } else {
                    self.length.saturating_sub(offset.unsigned_abs())
                }
            }
            SeekFrom::Current(offset) => {
                if offset >= 0 {
                    self.position + offset as u64
                } else {
                    self.position.saturating_sub(offset.unsigned_abs())
                }
            }
        };
        Ok(self.position)
    }
}

impl SeekableStream for SeekableHttpStream {
    fn print_stats(&self) {
        self.log_stats()
    }

    fn http_request_count(&self) -> u64 {
        self.request_count
    }

    fn http_request_bytes_read(&self) -> u64 {
        self.bytes_fetched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test(flavor = "multi_thread")]
    async fn test_seekable_http_stream_mock_server() {
        let mock_server = MockServer::start().await;
        let data = b"Hello wiremock!";
        let len_header = data.len().to_string();

        Mock::given(method("HEAD"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("Content-Length", len_header.as_str()),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let range_header = format!("bytes=0-{}", data.len() - 1);
        Mock::given(method("GET"))
            .and(header("Range", range_header.as_str()))
            .respond_with(ResponseTemplate::new(206).set_body_bytes(data.as_slice()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/file.mp4", mock_server.uri());
        // The blocking client must run off the async test runtime.
        tokio::task::spawn_blocking(move || {
            let mut stream = SeekableHttpStream::new(url).unwrap();
            assert_eq!(stream.len(), data.len() as u64);

            let mut buf = [0u8; 5];
            stream.read_exact(&mut buf).unwrap();
            assert_eq!(&buf, &data[0..5]);

            stream.seek(SeekFrom::Start(6)).unwrap();
            let mut rest = Vec::new();
            stream.read_to_end(&mut rest).unwrap();
            assert_eq!(rest, data[6..].to_vec());

            // One HEAD plus one ranged GET; everything else came from cache.
            assert_eq!(stream.request_count(), 2);
        })
        .await
        .unwrap();
    }
}
