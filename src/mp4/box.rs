use crate::bits::reader::{read_u32, read_u32_be, read_u64, read_u64_be};
use crate::errors::{Mp4Error, Mp4SrtError, Mp4SrtResult};
use std::io::{self, Read, Seek, SeekFrom};

/// One box header as found on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBox {
    pub kind: [u8; 4],
    pub size: u64,
    pub header_len: u64,
}

impl RawBox {
    /// Number of payload bytes following the header.
    pub fn payload_len(&self) -> u64 {
        self.size.saturating_sub(self.header_len)
    }

    /// The type tag as text. Tags are not guaranteed printable.
    pub fn kind_lossy(&self) -> String {
        String::from_utf8_lossy(&self.kind).into_owned()
    }
}

/// Read one box header at `offset`.
///
/// Every call is offset-addressed; the caller owns the notion of the current
/// position. A short read maps to `Truncated`, a declared size of 0 to
/// `InvalidBoxSize`, and a declared size of 1 pulls a 64-bit extended size
/// (header length 16 instead of 8).
pub fn read_box_at<S: Read + Seek>(stream: &mut S, offset: u64) -> Mp4SrtResult<RawBox> {
    stream.seek(SeekFrom::Start(offset))?;
    let size32 = read_u32_be(stream).map_err(|e| header_error(e, offset))?;
    let mut kind = [0u8; 4];
    stream
        .read_exact(&mut kind)
        .map_err(|e| header_error(e, offset))?;
    if size32 == 0 {
        return Err(Mp4Error::InvalidBoxSize { offset }.into());
    }
    let (size, header_len) = if size32 == 1 {
        let extended = read_u64_be(stream).map_err(|e| header_error(e, offset))?;
        // A zero extended size would stall the walker's advance.
        if extended == 0 {
            return Err(Mp4Error::InvalidBoxSize { offset }.into());
        }
        (extended, 16)
    } else {
        (size32 as u64, 8)
    };
    Ok(RawBox {
        kind,
        size,
        header_len,
    })
}

/// Read `len` payload bytes starting at `offset`.
///
/// The request is bounds-checked against the stream length before any
/// allocation so a corrupt size field cannot trigger an oversized buffer.
pub fn read_payload_at<S: Read + Seek>(
    stream: &mut S,
    offset: u64,
    len: u64,
) -> Mp4SrtResult<Vec<u8>> {
    let stream_len = stream.seek(SeekFrom::End(0))?;
    let in_range = offset
        .checked_add(len)
        .map(|end| end <= stream_len)
        .unwrap_or(false);
    if !in_range {
        return Err(Mp4Error::OutOfBounds {
            offset,
            requested: len,
        }
        .into());
    }
    stream.seek(SeekFrom::Start(offset))?;
    let mut buf = vec![0u8; len as usize];
    stream.read_exact(&mut buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Mp4SrtError::Mp4(Mp4Error::OutOfBounds {
                offset,
                requested: len,
            })
        } else {
            Mp4SrtError::Other(e)
        }
    })?;
    Ok(buf)
}

/// Parse a box header from a byte slice advancing the cursor.
///
/// Used for the nested children of already-buffered payloads. Returns `None`
/// when fewer than a full header's bytes remain.
pub fn parse_box_header(data: &[u8], pos: &mut usize) -> Option<([u8; 4], u64)> {
    if *pos + 8 > data.len() {
        return None;
    }
    let size = read_u32(data, pos)? as u64;
    let kind: [u8; 4] = data[*pos..*pos + 4].try_into().ok()?;
    *pos += 4;
    let mut real_size = size;
    if size == 1 {
        if *pos + 8 > data.len() {
            return None;
        }
        real_size = read_u64(data, pos)?;
    }
    Some((kind, real_size))
}

fn header_error(err: io::Error, offset: u64) -> Mp4SrtError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Mp4SrtError::Mp4(Mp4Error::Truncated { offset })
    } else {
        Mp4SrtError::Other(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Mp4Error, Mp4SrtError};
    use proptest::prelude::*;
    use std::io::Cursor;

    fn assert_mp4_err(result: Mp4SrtResult<RawBox>, expected: Mp4Error) {
        match result {
            Err(Mp4SrtError::Mp4(e)) => assert_eq!(e, expected),
            other => panic!("expected {:?}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_plain_header() {
        let mut cur = Cursor::new(vec![
            0x00, 0x00, 0x00, 0x10, // size (16 bytes)
            b'f', b't', b'y', b'p', // type
            0, 0, 0, 0, 0, 0, 0, 0, // payload
        ]);
        let raw = read_box_at(&mut cur, 0).unwrap();
        assert_eq!(raw.kind, *b"ftyp");
        assert_eq!(raw.size, 16);
        assert_eq!(raw.header_len, 8);
        assert_eq!(raw.payload_len(), 8);
    }

    #[test]
    fn test_extended_size_header() {
        let mut cur = Cursor::new(vec![
            0x00, 0x00, 0x00, 0x01, // size escape
            b'm', b'd', b'a', b't', // type
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, // extended size (2^32)
        ]);
        let raw = read_box_at(&mut cur, 0).unwrap();
        assert_eq!(raw.kind, *b"mdat");
        assert_eq!(raw.size, 1u64 << 32);
        assert_eq!(raw.header_len, 16);
    }

    #[test]
    fn test_zero_size_is_invalid() {
        let mut cur = Cursor::new(vec![0, 0, 0, 0, b'm', b'o', b'o', b'v']);
        assert_mp4_err(
            read_box_at(&mut cur, 0),
            Mp4Error::InvalidBoxSize { offset: 0 },
        );
    }

    #[test]
    fn test_short_header_is_truncated() {
        let mut cur = Cursor::new(vec![0x00, 0x00, 0x00, 0x10, b'f', b't']);
        assert_mp4_err(read_box_at(&mut cur, 0), Mp4Error::Truncated { offset: 0 });
    }

    #[test]
    fn test_short_extended_size_is_truncated() {
        let mut cur = Cursor::new(vec![
            0x00, 0x00, 0x00, 0x01, // size escape
            b'm', b'd', b'a', b't', // type
            0x00, 0x00, 0x00, // extended size cut short
        ]);
        assert_mp4_err(read_box_at(&mut cur, 0), Mp4Error::Truncated { offset: 0 });
    }

    #[test]
    fn test_payload_read_past_end_is_out_of_bounds() {
        let mut cur = Cursor::new(vec![0u8; 16]);
        match read_payload_at(&mut cur, 8, 32) {
            Err(Mp4SrtError::Mp4(Mp4Error::OutOfBounds { offset, requested })) => {
                assert_eq!(offset, 8);
                assert_eq!(requested, 32);
            }
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_slice_header_with_extended_size() {
        let data = [
            0x00, 0x00, 0x00, 0x01, // size escape
            b'x', b'm', b'l', b' ', // type
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, // extended size (32)
        ];
        let mut pos = 0;
        let (kind, size) = parse_box_header(&data, &mut pos).unwrap();
        assert_eq!(&kind, b"xml ");
        assert_eq!(size, 32);
        assert_eq!(pos, 16);
    }

    proptest! {
        #[test]
        fn prop_plain_headers_round_trip(size in 2u32.., kind in any::<[u8; 4]>()) {
            let mut bytes = size.to_be_bytes().to_vec();
            bytes.extend_from_slice(&kind);
            let raw = read_box_at(&mut Cursor::new(bytes), 0).unwrap();
            prop_assert_eq!(raw.size, size as u64);
            prop_assert_eq!(raw.kind, kind);
            prop_assert_eq!(raw.header_len, 8);
        }

        #[test]
        fn prop_extended_headers_round_trip(extended in any::<u64>(), kind in any::<[u8; 4]>()) {
            let mut bytes = 1u32.to_be_bytes().to_vec();
            bytes.extend_from_slice(&kind);
            bytes.extend_from_slice(&extended.to_be_bytes());
            let raw = read_box_at(&mut Cursor::new(bytes), 0).unwrap();
            prop_assert_eq!(raw.size, extended);
            prop_assert_eq!(raw.header_len, 16);
        }
    }
}
