//! Intermediate mesh model shared by every reader and writer

mod groups;
mod material;
pub mod normalize;
mod types;
mod vertex;

// Re-export public API
pub use groups::{sanitize_group_name, GroupBuilder, GroupMembership};
pub use material::{Material, MaterialTable};
pub use types::{Corner, Face, Group, MeshModel, MAX_VERTICES, NO_MATERIAL_NAME, WHITE};
pub use vertex::{Vertex, VertexTable};

/// Errors that abort the conversion of one file
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Unsupported topology in {mesh}: {topology} (only triangle lists are supported)")]
    UnsupportedTopology { mesh: String, topology: String },

    #[error("Mesh {mesh} has {count} primitives, expected exactly one")]
    PrimitiveCount { mesh: String, count: usize },

    #[error("Mesh {mesh}: {attribute} has {found} entries, expected {expected}")]
    AttributeCount {
        mesh: String,
        attribute: &'static str,
        found: usize,
        expected: usize,
    },

    #[error("Mesh {mesh}: index count {count} is not a multiple of 3")]
    IndexCount { mesh: String, count: usize },

    #[error("Face {face} references vertex {vertex}, but the model has {count} vertices")]
    VertexOutOfRange { face: usize, vertex: i64, count: usize },

    #[error("Face {face} uses material {material}, but the model has {count} materials")]
    MaterialOutOfRange {
        face: usize,
        material: usize,
        count: usize,
    },

    #[error("Group {group:?} references vertex {vertex}, but the model has {count} vertices")]
    GroupIndexOutOfRange {
        group: String,
        vertex: i64,
        count: usize,
    },

    #[error("{kind} reference {index} out of range ({count} available)")]
    ReferenceOutOfRange {
        kind: &'static str,
        index: usize,
        count: usize,
    },

    #[error("Model has {count} vertices, exceeds maximum {max} for u16 indices. Split the model into smaller parts.")]
    TooManyVertices { count: usize, max: usize },

    #[error("Model has {count} materials, exceeds maximum {max} for the engine format")]
    TooManyMaterials { count: usize, max: usize },
}

impl MeshModel {
    /// Check that every corner, material and group reference is in range.
    pub fn validate(&self) -> Result<(), ConvertError> {
        let vertex_count = self.vertices.len();
        for (index, face) in self.faces.iter().enumerate() {
            if let Some(&vertex) = face
                .vertices()
                .iter()
                .find(|&&v| v as usize >= vertex_count)
            {
                return Err(ConvertError::VertexOutOfRange {
                    face: index,
                    vertex: vertex as i64,
                    count: vertex_count,
                });
            }
            if let Some(material) = face.material.filter(|&m| m >= self.materials.len()) {
                return Err(ConvertError::MaterialOutOfRange {
                    face: index,
                    material,
                    count: self.materials.len(),
                });
            }
        }
        for group in &self.groups {
            if let Some(&vertex) = group
                .vertices
                .iter()
                .find(|&&v| v as usize >= vertex_count)
            {
                return Err(ConvertError::GroupIndexOutOfRange {
                    group: group.name.clone(),
                    vertex: vertex as i64,
                    count: vertex_count,
                });
            }
        }
        Ok(())
    }
}
