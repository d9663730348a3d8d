//! Errors produced while decoding or encoding FTL data.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FtlError {
    #[error("FTL data truncated in {section}: need {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        section: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Not an FTL file (ident {0:?})")]
    BadIdent([u8; 4]),

    #[error("Packed FTL containers are not supported, unpack the file first")]
    Packed,

    #[error("Unsupported FTL version {0} (expected 0.83257)")]
    UnsupportedVersion(f32),

    #[error("FTL file has no 3D data section")]
    Missing3dData,

    #[error("Invalid {section} count {count}")]
    InvalidCount { section: &'static str, count: i32 },

    #[error("Invalid {section} offset {offset}")]
    InvalidOffset { section: &'static str, offset: i32 },

    #[error("Name {name:?} does not fit the FTL string field: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Too many {section} entries for an FTL file: {count}")]
    TooMany { section: &'static str, count: usize },
}
