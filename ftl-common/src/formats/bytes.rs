//! Little-endian byte helpers shared by the FTL records.

use crate::error::FtlError;
use crate::formats::BinarySerializable;

/// Cursor over FTL bytes that reports truncation per section.
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    section: &'static str,
}

impl<'a> ByteReader<'a> {
    pub fn at(data: &'a [u8], offset: usize, section: &'static str) -> Self {
        Self {
            data,
            pos: offset,
            section,
        }
    }

    pub fn set_section(&mut self, section: &'static str) {
        self.section = section;
    }

    pub fn take(&mut self, len: usize) -> Result<&'a [u8], FtlError> {
        let available = self.data.len().saturating_sub(self.pos);
        if available < len {
            return Err(FtlError::Truncated {
                section: self.section,
                offset: self.pos,
                needed: len,
                available,
            });
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Fail unless `count` records of `size` bytes fit in the remaining data.
    pub fn ensure_records(&self, count: usize, size: usize) -> Result<(), FtlError> {
        let available = self.data.len().saturating_sub(self.pos);
        match count.checked_mul(size) {
            Some(needed) if needed <= available => Ok(()),
            needed => Err(FtlError::Truncated {
                section: self.section,
                offset: self.pos,
                needed: needed.unwrap_or(usize::MAX),
                available,
            }),
        }
    }

    pub fn read_header<T: BinarySerializable>(&mut self) -> Result<T, FtlError> {
        let offset = self.pos;
        let bytes = self.take(T::SIZE)?;
        T::deserialize(bytes).ok_or(FtlError::Truncated {
            section: self.section,
            offset,
            needed: T::SIZE,
            available: bytes.len(),
        })
    }

    pub fn read_i32(&mut self) -> Result<i32, FtlError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, FtlError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_f32(&mut self) -> Result<f32, FtlError> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u16(&mut self) -> Result<u16, FtlError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_i16(&mut self) -> Result<i16, FtlError> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_vec3(&mut self) -> Result<[f32; 3], FtlError> {
        Ok([self.read_f32()?, self.read_f32()?, self.read_f32()?])
    }

    pub fn read_name(&mut self, size: usize) -> Result<String, FtlError> {
        Ok(decode_name(self.take(size)?))
    }

    /// Read a record count, rejecting negative values.
    pub fn read_count(&mut self, section: &'static str) -> Result<usize, FtlError> {
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| FtlError::InvalidCount { section, count })
    }
}

/// Read a little-endian i32 at `offset` (caller checks bounds).
pub(crate) fn le_i32(bytes: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Decode a NUL-padded Latin-1 string.
pub(crate) fn decode_name(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

/// Encode a string into a NUL-padded Latin-1 field of `N` bytes.
///
/// One byte is always left for the terminator.
pub(crate) fn encode_name<const N: usize>(name: &str) -> Result<[u8; N], FtlError> {
    let mut field = [0u8; N];
    let mut len = 0;
    for c in name.chars() {
        let code = c as u32;
        if code == 0 || code > 0xFF {
            return Err(FtlError::InvalidName {
                name: name.to_string(),
                reason: "only non-NUL Latin-1 characters are allowed",
            });
        }
        if len + 1 >= N {
            return Err(FtlError::InvalidName {
                name: name.to_string(),
                reason: "too long",
            });
        }
        field[len] = code as u8;
        len += 1;
    }
    Ok(field)
}

/// Like [`encode_name`], but truncates and replaces unsupported characters.
pub(crate) fn encode_name_lossy<const N: usize>(name: &str) -> [u8; N] {
    let mut field = [0u8; N];
    for (slot, c) in field.iter_mut().take(N - 1).zip(name.chars()) {
        let code = c as u32;
        *slot = if code == 0 || code > 0xFF { b'?' } else { code as u8 };
    }
    field
}

pub(crate) fn put_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_f32(out: &mut Vec<u8>, value: f32) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_i16(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_vec3(out: &mut Vec<u8>, value: [f32; 3]) {
    for component in value {
        put_f32(out, component);
    }
}

/// Convert a record count to the i32 stored on disk.
pub(crate) fn count_i32(section: &'static str, count: usize) -> Result<i32, FtlError> {
    i32::try_from(count).map_err(|_| FtlError::TooMany { section, count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_latin1_roundtrip() {
        let field: [u8; 16] = encode_name("caf\u{e9}").unwrap();
        assert_eq!(&field[..5], &[b'c', b'a', b'f', 0xE9, 0]);
        assert_eq!(decode_name(&field), "caf\u{e9}");
    }

    #[test]
    fn test_name_must_leave_terminator() {
        assert!(encode_name::<4>("abc").is_ok());
        assert!(matches!(
            encode_name::<4>("abcd"),
            Err(FtlError::InvalidName { reason: "too long", .. })
        ));
    }

    #[test]
    fn test_name_rejects_wide_chars() {
        assert!(encode_name::<8>("\u{263A}").is_err());
        let lossy: [u8; 8] = encode_name_lossy("a\u{263A}b");
        assert_eq!(decode_name(&lossy), "a?b");
    }

    #[test]
    fn test_reader_reports_section_on_truncation() {
        let data = [1u8, 0, 0];
        let mut reader = ByteReader::at(&data, 0, "vertices");
        match reader.read_i32() {
            Err(FtlError::Truncated {
                section,
                offset,
                needed,
                available,
            }) => {
                assert_eq!(section, "vertices");
                assert_eq!(offset, 0);
                assert_eq!(needed, 4);
                assert_eq!(available, 3);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        let data = (-3i32).to_le_bytes();
        let mut reader = ByteReader::at(&data, 0, "header");
        assert!(matches!(
            reader.read_count("faces"),
            Err(FtlError::InvalidCount { count: -3, .. })
        ));
    }
}
