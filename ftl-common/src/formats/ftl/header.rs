//! FTL header structures

use super::{FTL_IDENT, FTL_VERSION, NAME_SIZE};
use crate::formats::bytes::{decode_name, encode_name_lossy, le_i32};

/// Primary header (8 bytes): ident + version
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct FtlPrimaryHeader {
    pub ident: [u8; 4],
    pub version: f32,
}

impl FtlPrimaryHeader {
    pub const SIZE: usize = 8;

    pub fn new() -> Self {
        Self {
            ident: FTL_IDENT,
            version: FTL_VERSION,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.ident);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            ident: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        })
    }
}

impl Default for FtlPrimaryHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Secondary header (24 bytes): section offsets, `-1` when absent
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct FtlSecondaryHeader {
    pub offset_3d_data: i32,
    pub offset_cylinder: i32,
    pub offset_progressive_data: i32,
    pub offset_clothes_data: i32,
    pub offset_collision_spheres: i32,
    pub offset_physics_box: i32,
}

impl FtlSecondaryHeader {
    pub const SIZE: usize = 24;

    /// Header pointing at a 3D data section, with every other section absent.
    pub fn with_data_offset(offset_3d_data: i32) -> Self {
        Self {
            offset_3d_data,
            offset_cylinder: -1,
            offset_progressive_data: -1,
            offset_clothes_data: -1,
            offset_collision_spheres: -1,
            offset_physics_box: -1,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        let fields = [
            self.offset_3d_data,
            self.offset_cylinder,
            self.offset_progressive_data,
            self.offset_clothes_data,
            self.offset_collision_spheres,
            self.offset_physics_box,
        ];
        for (chunk, value) in bytes.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            offset_3d_data: le_i32(bytes, 0),
            offset_cylinder: le_i32(bytes, 4),
            offset_progressive_data: le_i32(bytes, 8),
            offset_clothes_data: le_i32(bytes, 12),
            offset_collision_spheres: le_i32(bytes, 16),
            offset_physics_box: le_i32(bytes, 20),
        })
    }
}

/// 3D data header (284 bytes): record counts, origin vertex and model name
#[derive(Debug, Clone, Default)]
pub struct FtlDataHeader {
    pub vertex_count: i32,
    pub face_count: i32,
    pub texture_count: i32,
    pub group_count: i32,
    pub action_count: i32,
    pub selection_count: i32,
    pub origin: i32,
    pub name: String,
}

impl FtlDataHeader {
    pub const SIZE: usize = 7 * 4 + NAME_SIZE;

    /// Write header to bytes
    ///
    /// The name is truncated to fit; the codec validates it beforehand.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        let counts = [
            self.vertex_count,
            self.face_count,
            self.texture_count,
            self.group_count,
            self.action_count,
            self.selection_count,
            self.origin,
        ];
        for (chunk, value) in bytes[..28].chunks_exact_mut(4).zip(counts) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        let name: [u8; NAME_SIZE] = encode_name_lossy(&self.name);
        bytes[28..].copy_from_slice(&name);
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            vertex_count: le_i32(bytes, 0),
            face_count: le_i32(bytes, 4),
            texture_count: le_i32(bytes, 8),
            group_count: le_i32(bytes, 12),
            action_count: le_i32(bytes, 16),
            selection_count: le_i32(bytes, 20),
            origin: le_i32(bytes, 24),
            name: decode_name(&bytes[28..Self::SIZE]),
        })
    }
}
