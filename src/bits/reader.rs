/*
# Bits Reader Module

 Byte-aligned big-endian readers used by the box parsing code, both over
 `Read` implementations (for stream-backed sources) and over byte slices
 with position tracking (for in-memory payload scans).
*/

use std::io::{self, Read};

/// Read a 32-bit big endian value from `r`.
pub fn read_u32_be<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Read a 64-bit big endian value from `r`.
pub fn read_u64_be<R: Read>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_be_bytes(buf))
}

/// Read a 32-bit big endian value from a byte slice advancing the position.
pub fn read_u32(data: &[u8], pos: &mut usize) -> Option<u32> {
    if *pos + 4 > data.len() {
        return None;
    }
    let v = u32::from_be_bytes([data[*pos], data[*pos + 1], data[*pos + 2], data[*pos + 3]]);
    *pos += 4;
    Some(v)
}

/// Read a 64-bit big endian value from a byte slice advancing the position.
pub fn read_u64(data: &[u8], pos: &mut usize) -> Option<u64> {
    if *pos + 8 > data.len() {
        return None;
    }
    let v = u64::from_be_bytes([
        data[*pos],
        data[*pos + 1],
        data[*pos + 2],
        data[*pos + 3],
        data[*pos + 4],
        data[*pos + 5],
        data[*pos + 6],
        data[*pos + 7],
    ]);
    *pos += 8;
    Some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_be_from_stream() {
        let mut cur = Cursor::new(vec![0x00, 0x00, 0x01, 0x00, 0xFF]);
        assert_eq!(read_u32_be(&mut cur).unwrap(), 256);
        assert!(read_u32_be(&mut cur).is_err());
    }

    #[test]
    fn test_slice_readers_track_position() {
        let data = [0x00, 0x00, 0x00, 0x2A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
        let mut pos = 0;
        assert_eq!(read_u32(&data, &mut pos), Some(42));
        assert_eq!(read_u64(&data, &mut pos), Some(1));
        assert_eq!(pos, 12);
        assert_eq!(read_u32(&data, &mut pos), None);
    }
}
