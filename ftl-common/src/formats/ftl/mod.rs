//! FTL binary model format (.ftl)
//!
//! Static model format of the Arx Fatalis / Arx Libertatis engine.
//! Plain (unpacked) layout, little-endian.
//!
//! # Layout
//! ```text
//! 0x000: primary header      ident "FTL\0", version f32 (8 bytes)
//! 0x008: checksum            512 opaque bytes
//! 0x208: secondary header    six i32 section offsets, -1 when absent (24 bytes)
//! var:   3D data header      seven i32 counts/origin + name[256] (284 bytes)
//!        vertices            vertex_count × 56 bytes
//!        faces               face_count × 116 bytes
//!        textures            texture_count × name[256]
//!        groups              group_count × 272 bytes
//!        group indices       Σ index_count × i32
//!        actions             action_count × 268 bytes
//!        selections          selection_count × 72 bytes
//!        selection indices   Σ selected_count × i32
//! ```
//!
//! Only the 3D data section is decoded; cylinder, progressive, clothes,
//! collision sphere and physics box sections are dropped and written as absent.

mod header;
mod types;

#[cfg(test)]
mod tests;

pub use header::{FtlDataHeader, FtlPrimaryHeader, FtlSecondaryHeader};
pub use types::{FtlAction, FtlFace, FtlGroup, FtlSelection, FtlVertex};

use crate::error::FtlError;
use crate::formats::bytes::{count_i32, encode_name, put_i32, ByteReader};
use crate::formats::BinarySerializable;

/// Ident at the start of every plain FTL file
pub const FTL_IDENT: [u8; 4] = *b"FTL\0";
/// Only supported format version
pub const FTL_VERSION: f32 = 0.83257;
/// Size of the opaque checksum block after the primary header
pub const FTL_CHECKSUM_SIZE: usize = 512;
/// Size of model, texture, group and action names
pub const NAME_SIZE: usize = 256;
/// Size of selection names
pub const SELECTION_NAME_SIZE: usize = 64;
/// Face texture index of untextured faces
pub const FTL_NO_TEXTURE: i16 = -1;

/// Offset of the 3D data header in files written by [`write_ftl`]
const DATA_OFFSET: usize = FtlPrimaryHeader::SIZE + FTL_CHECKSUM_SIZE + FtlSecondaryHeader::SIZE;

/// Decoded FTL 3D data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FtlModel {
    pub name: String,
    pub origin: i32,
    pub vertices: Vec<FtlVertex>,
    pub faces: Vec<FtlFace>,
    /// Texture container names, indexed by [`FtlFace::texture_index`]
    pub textures: Vec<String>,
    pub groups: Vec<FtlGroup>,
    pub actions: Vec<FtlAction>,
    pub selections: Vec<FtlSelection>,
}

/// Decode plain FTL bytes.
pub fn read_ftl(data: &[u8]) -> Result<FtlModel, FtlError> {
    let primary: FtlPrimaryHeader =
        ByteReader::at(data, 0, "primary header").read_header()?;
    if primary.ident != FTL_IDENT {
        return Err(FtlError::BadIdent(primary.ident));
    }
    if primary.version != FTL_VERSION {
        return Err(FtlError::UnsupportedVersion(primary.version));
    }

    let secondary_offset = FtlPrimaryHeader::SIZE + FTL_CHECKSUM_SIZE;
    let mut reader = ByteReader::at(data, secondary_offset, "secondary header");
    let secondary: FtlSecondaryHeader = reader.read_header()?;
    if secondary.offset_3d_data == -1 {
        return Err(FtlError::Missing3dData);
    }
    let data_offset =
        usize::try_from(secondary.offset_3d_data).map_err(|_| FtlError::InvalidOffset {
            section: "3D data",
            offset: secondary.offset_3d_data,
        })?;

    let mut reader = ByteReader::at(data, data_offset, "3D data header");
    let header: FtlDataHeader = reader.read_header()?;
    let checked = |section: &'static str, count: i32| {
        usize::try_from(count).map_err(|_| FtlError::InvalidCount { section, count })
    };
    let vertex_count = checked("vertex", header.vertex_count)?;
    let face_count = checked("face", header.face_count)?;
    let texture_count = checked("texture", header.texture_count)?;
    let group_count = checked("group", header.group_count)?;
    let action_count = checked("action", header.action_count)?;
    let selection_count = checked("selection", header.selection_count)?;

    reader.set_section("vertices");
    reader.ensure_records(vertex_count, FtlVertex::SIZE)?;
    let vertices = (0..vertex_count)
        .map(|_| FtlVertex::read(&mut reader))
        .collect::<Result<Vec<_>, _>>()?;

    reader.set_section("faces");
    reader.ensure_records(face_count, FtlFace::SIZE)?;
    let faces = (0..face_count)
        .map(|_| FtlFace::read(&mut reader))
        .collect::<Result<Vec<_>, _>>()?;

    reader.set_section("textures");
    reader.ensure_records(texture_count, NAME_SIZE)?;
    let textures = (0..texture_count)
        .map(|_| reader.read_name(NAME_SIZE))
        .collect::<Result<Vec<_>, _>>()?;

    reader.set_section("groups");
    reader.ensure_records(group_count, FtlGroup::SIZE)?;
    let mut groups = Vec::with_capacity(group_count);
    let mut group_sizes = Vec::with_capacity(group_count);
    for _ in 0..group_count {
        let (group, index_count) = FtlGroup::read_record(&mut reader)?;
        groups.push(group);
        group_sizes.push(index_count);
    }
    reader.set_section("group indices");
    for (group, index_count) in groups.iter_mut().zip(group_sizes) {
        reader.ensure_records(index_count, 4)?;
        group.indices = (0..index_count)
            .map(|_| reader.read_i32())
            .collect::<Result<Vec<_>, _>>()?;
    }

    reader.set_section("actions");
    reader.ensure_records(action_count, FtlAction::SIZE)?;
    let actions = (0..action_count)
        .map(|_| FtlAction::read(&mut reader))
        .collect::<Result<Vec<_>, _>>()?;

    reader.set_section("selections");
    reader.ensure_records(selection_count, FtlSelection::SIZE)?;
    let mut selections = Vec::with_capacity(selection_count);
    let mut selection_sizes = Vec::with_capacity(selection_count);
    for _ in 0..selection_count {
        let (selection, selected_count) = FtlSelection::read_record(&mut reader)?;
        selections.push(selection);
        selection_sizes.push(selected_count);
    }
    reader.set_section("selection indices");
    for (selection, selected_count) in selections.iter_mut().zip(selection_sizes) {
        reader.ensure_records(selected_count, 4)?;
        selection.indices = (0..selected_count)
            .map(|_| reader.read_i32())
            .collect::<Result<Vec<_>, _>>()?;
    }

    Ok(FtlModel {
        name: header.name,
        origin: header.origin,
        vertices,
        faces,
        textures,
        groups,
        actions,
        selections,
    })
}

/// Encode a model as plain FTL bytes.
pub fn write_ftl(model: &FtlModel) -> Result<Vec<u8>, FtlError> {
    // Validate the name up front; the header itself truncates silently.
    encode_name::<NAME_SIZE>(&model.name)?;

    let header = FtlDataHeader {
        vertex_count: count_i32("vertex", model.vertices.len())?,
        face_count: count_i32("face", model.faces.len())?,
        texture_count: count_i32("texture", model.textures.len())?,
        group_count: count_i32("group", model.groups.len())?,
        action_count: count_i32("action", model.actions.len())?,
        selection_count: count_i32("selection", model.selections.len())?,
        origin: model.origin,
        name: model.name.clone(),
    };

    let mut out = Vec::with_capacity(
        DATA_OFFSET
            + FtlDataHeader::SIZE
            + model.vertices.len() * FtlVertex::SIZE
            + model.faces.len() * FtlFace::SIZE
            + model.textures.len() * NAME_SIZE,
    );
    out.extend_from_slice(&FtlPrimaryHeader::new().serialize());
    out.extend_from_slice(&[0u8; FTL_CHECKSUM_SIZE]);
    out.extend_from_slice(&FtlSecondaryHeader::with_data_offset(DATA_OFFSET as i32).serialize());
    out.extend_from_slice(&header.serialize());

    for vertex in &model.vertices {
        vertex.write(&mut out);
    }
    for face in &model.faces {
        face.write(&mut out);
    }
    for texture in &model.textures {
        out.extend_from_slice(&encode_name::<NAME_SIZE>(texture)?);
    }
    for group in &model.groups {
        group.write_record(&mut out)?;
    }
    for group in &model.groups {
        group.indices.iter().for_each(|&i| put_i32(&mut out, i));
    }
    for action in &model.actions {
        action.write(&mut out)?;
    }
    for selection in &model.selections {
        selection.write_record(&mut out)?;
    }
    for selection in &model.selections {
        selection.indices.iter().for_each(|&i| put_i32(&mut out, i));
    }

    Ok(out)
}
