//! Shared types and utilities for the FTL model format
//!
//! This crate provides the engine-side format used by:
//! - `ftl-convert` (conversion library and CLI)
//!
//! # Modules
//!
//! - [`formats`] - FTL binary layout: headers, records, reader and writer
//! - [`container`] - Packing wrapper around the FTL container
//! - [`error`] - Codec error type

pub mod container;
pub mod error;
pub mod formats;

pub use container::{ensure_packed, ensure_unpacked, is_unpacked};
pub use error::FtlError;

// Re-export commonly used format items
pub use formats::{
    BinarySerializable,
    // Records
    FtlAction,
    FtlDataHeader,
    FtlFace,
    FtlGroup,
    FtlModel,
    FtlPrimaryHeader,
    FtlSecondaryHeader,
    FtlSelection,
    FtlVertex,
    // Constants
    FTL_CHECKSUM_SIZE,
    FTL_IDENT,
    FTL_NO_TEXTURE,
    FTL_VERSION,
    NAME_SIZE,
    SELECTION_NAME_SIZE,
    // Codec
    read_ftl,
    write_ftl,
};
