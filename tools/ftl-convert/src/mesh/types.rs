//! Types and constants for the intermediate mesh model

use glam::{Vec2, Vec3};
use std::collections::BTreeSet;

use super::material::MaterialTable;
use super::vertex::VertexTable;

/// Maximum vertex count addressable by the engine's u16 face indices (65536)
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// Material name used for untextured faces in interchange output
pub const NO_MATERIAL_NAME: &str = "noMaterial";

/// Packed ARGB white, the corner color of interchange sources
pub const WHITE: u32 = 0xFFFF_FFFF;

/// One face corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Index into the model's vertex table
    pub vertex: u32,
    pub uv: Vec2,
    /// Packed ARGB
    pub color: u32,
}

impl Corner {
    pub fn new(vertex: u32, uv: Vec2) -> Self {
        Self {
            vertex,
            uv,
            color: WHITE,
        }
    }
}

/// Triangle with an optional material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub corners: [Corner; 3],
    /// Index into the material table, `None` for untextured faces
    pub material: Option<usize>,
    /// Face normal carried from the source; derived on output when absent
    pub normal: Option<Vec3>,
}

impl Face {
    pub fn new(corners: [Corner; 3], material: Option<usize>) -> Self {
        Self {
            corners,
            material,
            normal: None,
        }
    }

    pub fn vertices(&self) -> [u32; 3] {
        self.corners.map(|c| c.vertex)
    }
}

/// Named vertex subset
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    pub name: String,
    pub vertices: BTreeSet<u32>,
}

impl Group {
    pub fn new(name: impl Into<String>, vertices: impl IntoIterator<Item = u32>) -> Self {
        Self {
            name: name.into(),
            vertices: vertices.into_iter().collect(),
        }
    }
}

/// Intermediate mesh model, in interchange conventions (Y up, V up).
///
/// Every index is relative to this model only.
#[derive(Debug, Clone, Default)]
pub struct MeshModel {
    pub name: String,
    pub vertices: VertexTable,
    pub faces: Vec<Face>,
    pub groups: Vec<Group>,
    pub materials: MaterialTable,
}

impl MeshModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Material name of a face as written to interchange output.
    pub fn material_name(&self, face: &Face) -> &str {
        face.material
            .and_then(|index| self.materials.get(index))
            .map(|m| m.name.as_str())
            .unwrap_or(NO_MATERIAL_NAME)
    }
}
