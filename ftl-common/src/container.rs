//! Packing wrapper around the FTL container
//!
//! FTL files ship either plain or packed (PKWare implode). The conversion tools
//! treat packing as an opaque pass-through: data is unpacked before decoding and
//! packed after encoding. The engine loads plain files as-is, so packing on the
//! way out is the identity; packed input is rejected with [`FtlError::Packed`].

use std::borrow::Cow;

use crate::error::FtlError;
use crate::formats::FTL_IDENT;

/// Returns true when `data` starts with the plain FTL ident.
pub fn is_unpacked(data: &[u8]) -> bool {
    data.len() >= FTL_IDENT.len() && data[..FTL_IDENT.len()] == FTL_IDENT
}

/// Get plain FTL bytes from file contents.
pub fn ensure_unpacked(data: &[u8]) -> Result<Cow<'_, [u8]>, FtlError> {
    if is_unpacked(data) {
        Ok(Cow::Borrowed(data))
    } else {
        Err(FtlError::Packed)
    }
}

/// Get the bytes to store on disk for encoded FTL data.
pub fn ensure_packed(data: Vec<u8>) -> Vec<u8> {
    data
}
