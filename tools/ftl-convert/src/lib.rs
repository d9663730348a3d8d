//! ftl-convert library
//!
//! Converts FTL engine models to and from OBJ/MTL, and imports glTF scenes
//! into FTL. Every conversion goes through one intermediate mesh model:
//!
//! - [`formats`] - file models for FTL, OBJ/MTL and glTF
//! - [`mesh`] - intermediate model, lookup tables and convention flips
//! - [`convert`] - file model ↔ intermediate model converters
//! - [`texture`] - texture lookup, copying and placeholders
//! - [`pipeline`] - per-file conversion with staged, atomic output
//! - [`manifest`] - TOML batch manifests

pub mod convert;
pub mod formats;
pub mod manifest;
pub mod mesh;
pub mod pipeline;
pub mod texture;

pub use manifest::{run_batch, BatchManifest, BatchSummary};
pub use mesh::{ConvertError, MeshModel};
pub use pipeline::{
    convert_file, default_output, ftl_summary, load_ftl, ConversionContext, ConvertOptions,
    ConvertOutcome, ConvertReport, ModelFormat, Stage,
};
pub use texture::MissingTexturePolicy;
