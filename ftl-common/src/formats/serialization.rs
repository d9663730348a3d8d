//! Binary serialization trait for format headers.
//!
//! All FTL headers implement `BinarySerializable`; the codec reads and writes
//! every header through it. Each header keeps its type-specific
//! `to_bytes()` returning a fixed-size array; the trait returns `Vec<u8>`
//! because `[u8; Self::SIZE]` is not expressible in a trait signature yet.

/// Trait for binary-serializable format headers.
///
/// # Example
///
/// ```
/// use ftl_common::formats::{BinarySerializable, FtlPrimaryHeader};
///
/// let header = FtlPrimaryHeader::new();
/// let bytes = header.serialize();
/// let parsed = FtlPrimaryHeader::deserialize(&bytes).unwrap();
/// assert_eq!(parsed.ident, *b"FTL\0");
/// ```
pub trait BinarySerializable: Sized {
    /// Size of the serialized header in bytes.
    const SIZE: usize;

    /// Serialize to bytes.
    fn serialize(&self) -> Vec<u8>;

    /// Deserialize from bytes.
    ///
    /// Returns `None` if the byte slice is too short.
    fn deserialize(bytes: &[u8]) -> Option<Self>;
}

impl BinarySerializable for super::FtlPrimaryHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

impl BinarySerializable for super::FtlSecondaryHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

impl BinarySerializable for super::FtlDataHeader {
    const SIZE: usize = Self::SIZE;

    fn serialize(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }

    fn deserialize(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}
