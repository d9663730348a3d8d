//! FTL record types: vertices, faces, groups, actions, selections

use super::{FTL_NO_TEXTURE, NAME_SIZE, SELECTION_NAME_SIZE};
use crate::error::FtlError;
use crate::formats::bytes::{
    encode_name, put_f32, put_i16, put_i32, put_u16, put_u32, put_vec3, ByteReader,
};

/// Vertex record (56 bytes)
///
/// On disk the record starts with a 32-byte transformed-vertex slot used by the
/// engine at runtime; it is filled from the position on write and ignored on read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FtlVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl FtlVertex {
    pub const SIZE: usize = 56;

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self, FtlError> {
        // transformed vertex: x y z rhw color specular tu tv
        reader.take(32)?;
        let position = reader.read_vec3()?;
        let normal = reader.read_vec3()?;
        Ok(Self { position, normal })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        put_vec3(out, self.position);
        put_f32(out, 1.0); // rhw
        put_u32(out, 0xFFFF_FFFF); // color
        put_u32(out, 0); // specular
        put_f32(out, 0.0); // tu
        put_f32(out, 0.0); // tv
        put_vec3(out, self.position);
        put_vec3(out, self.normal);
    }
}

/// Face record (116 bytes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FtlFace {
    pub face_type: i32,
    /// Per-corner color, packed ARGB
    pub rgb: [u32; 3],
    pub vertex_indices: [u16; 3],
    /// Texture container index, [`FTL_NO_TEXTURE`] when untextured
    pub texture_index: i16,
    pub u: [f32; 3],
    pub v: [f32; 3],
    pub ou: [i16; 3],
    pub ov: [i16; 3],
    pub transval: f32,
    pub normal: [f32; 3],
    pub corner_normals: [[f32; 3]; 3],
    pub temp: f32,
}

impl Default for FtlFace {
    fn default() -> Self {
        Self {
            face_type: 0,
            rgb: [0xFFFF_FFFF; 3],
            vertex_indices: [0; 3],
            texture_index: FTL_NO_TEXTURE,
            u: [0.0; 3],
            v: [0.0; 3],
            ou: [0; 3],
            ov: [0; 3],
            transval: 0.0,
            normal: [0.0; 3],
            corner_normals: [[0.0; 3]; 3],
            temp: 0.0,
        }
    }
}

impl FtlFace {
    pub const SIZE: usize = 116;

    /// Texture index as a table index, `None` for untextured faces.
    pub fn texture(&self) -> Option<usize> {
        usize::try_from(self.texture_index).ok()
    }

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self, FtlError> {
        let face_type = reader.read_i32()?;
        let rgb = [reader.read_u32()?, reader.read_u32()?, reader.read_u32()?];
        let vertex_indices = [reader.read_u16()?, reader.read_u16()?, reader.read_u16()?];
        let texture_index = reader.read_i16()?;
        let u = [reader.read_f32()?, reader.read_f32()?, reader.read_f32()?];
        let v = [reader.read_f32()?, reader.read_f32()?, reader.read_f32()?];
        let ou = [reader.read_i16()?, reader.read_i16()?, reader.read_i16()?];
        let ov = [reader.read_i16()?, reader.read_i16()?, reader.read_i16()?];
        let transval = reader.read_f32()?;
        let normal = reader.read_vec3()?;
        let corner_normals = [reader.read_vec3()?, reader.read_vec3()?, reader.read_vec3()?];
        let temp = reader.read_f32()?;
        Ok(Self {
            face_type,
            rgb,
            vertex_indices,
            texture_index,
            u,
            v,
            ou,
            ov,
            transval,
            normal,
            corner_normals,
            temp,
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        put_i32(out, self.face_type);
        self.rgb.iter().for_each(|&c| put_u32(out, c));
        self.vertex_indices.iter().for_each(|&i| put_u16(out, i));
        put_i16(out, self.texture_index);
        self.u.iter().for_each(|&u| put_f32(out, u));
        self.v.iter().for_each(|&v| put_f32(out, v));
        self.ou.iter().for_each(|&u| put_i16(out, u));
        self.ov.iter().for_each(|&v| put_i16(out, v));
        put_f32(out, self.transval);
        put_vec3(out, self.normal);
        self.corner_normals.iter().for_each(|&n| put_vec3(out, n));
        put_f32(out, self.temp);
    }
}

/// Vertex group (272-byte record + `index_count` i32 indices stored after all groups)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FtlGroup {
    pub name: String,
    /// Vertex used as the group's attachment point
    pub origin: i32,
    pub indexes: i32,
    pub size: f32,
    pub indices: Vec<i32>,
}

impl FtlGroup {
    pub const SIZE: usize = NAME_SIZE + 16;

    /// Read the fixed part; returns the group with an empty index list and its index count.
    pub(crate) fn read_record(reader: &mut ByteReader<'_>) -> Result<(Self, usize), FtlError> {
        let name = reader.read_name(NAME_SIZE)?;
        let origin = reader.read_i32()?;
        let index_count = reader.read_count("group index")?;
        let indexes = reader.read_i32()?;
        let size = reader.read_f32()?;
        Ok((
            Self {
                name,
                origin,
                indexes,
                size,
                indices: Vec::new(),
            },
            index_count,
        ))
    }

    pub(crate) fn write_record(&self, out: &mut Vec<u8>) -> Result<(), FtlError> {
        out.extend_from_slice(&encode_name::<NAME_SIZE>(&self.name)?);
        put_i32(out, self.origin);
        put_i32(out, crate::formats::bytes::count_i32("group index", self.indices.len())?);
        put_i32(out, self.indexes);
        put_f32(out, self.size);
        Ok(())
    }
}

/// Named action point (268 bytes)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FtlAction {
    pub name: String,
    pub vertex_index: i32,
    pub action: i32,
    pub sfx: i32,
}

impl FtlAction {
    pub const SIZE: usize = NAME_SIZE + 12;

    pub(crate) fn read(reader: &mut ByteReader<'_>) -> Result<Self, FtlError> {
        Ok(Self {
            name: reader.read_name(NAME_SIZE)?,
            vertex_index: reader.read_i32()?,
            action: reader.read_i32()?,
            sfx: reader.read_i32()?,
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) -> Result<(), FtlError> {
        out.extend_from_slice(&encode_name::<NAME_SIZE>(&self.name)?);
        put_i32(out, self.vertex_index);
        put_i32(out, self.action);
        put_i32(out, self.sfx);
        Ok(())
    }
}

/// Vertex selection (72-byte record + `selected_count` i32 indices after all selections)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FtlSelection {
    pub name: String,
    pub selected: i32,
    pub indices: Vec<i32>,
}

impl FtlSelection {
    pub const SIZE: usize = SELECTION_NAME_SIZE + 8;

    pub(crate) fn read_record(reader: &mut ByteReader<'_>) -> Result<(Self, usize), FtlError> {
        let name = reader.read_name(SELECTION_NAME_SIZE)?;
        let selected_count = reader.read_count("selection index")?;
        let selected = reader.read_i32()?;
        Ok((
            Self {
                name,
                selected,
                indices: Vec::new(),
            },
            selected_count,
        ))
    }

    pub(crate) fn write_record(&self, out: &mut Vec<u8>) -> Result<(), FtlError> {
        out.extend_from_slice(&encode_name::<SELECTION_NAME_SIZE>(&self.name)?);
        put_i32(
            out,
            crate::formats::bytes::count_i32("selection index", self.indices.len())?,
        );
        put_i32(out, self.selected);
        Ok(())
    }
}
