//! FTL binary model format
//!
//! Little-endian POD records, addressed through offsets stored in the
//! secondary header. Headers implement the [`BinarySerializable`] trait for
//! consistent serialization/deserialization.

mod bytes;
pub mod ftl;
mod serialization;

pub use ftl::*;
pub use serialization::BinarySerializable;
