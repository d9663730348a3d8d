//! glTF/GLB scene reader

use anyhow::{Context, Result};
use gltf::mesh::Mode;
use std::path::Path;

/// First primitive of a mesh attached to a root node
#[derive(Debug, Clone, PartialEq)]
pub struct GltfMesh {
    pub name: String,
    /// Number of primitives in the source mesh; only the first is read
    pub primitive_count: usize,
    pub mode: Mode,
    pub positions: Vec<[f32; 3]>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub uvs: Option<Vec<[f32; 2]>>,
    /// Index triples, `None` for non-indexed primitives
    pub indices: Option<Vec<u32>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GltfScene {
    pub meshes: Vec<GltfMesh>,
}

/// Load the meshes of the default scene's root nodes.
///
/// Node transforms are not applied.
pub fn read_gltf(input: &Path) -> Result<GltfScene> {
    let (document, buffers, _images) =
        gltf::import(input).with_context(|| format!("Failed to load glTF: {:?}", input))?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .context("No scenes found in glTF")?;

    let mut meshes = Vec::new();
    for node in scene.nodes() {
        let Some(mesh) = node.mesh() else {
            tracing::debug!("Skipping root node {} without a mesh", node.index());
            continue;
        };
        let name = mesh
            .name()
            .or_else(|| node.name())
            .map(str::to_string)
            .unwrap_or_else(|| format!("mesh_{}", mesh.index()));

        let primitive_count = mesh.primitives().len();
        let primitive = mesh
            .primitives()
            .next()
            .with_context(|| format!("No primitives found in mesh {:?}", name))?;

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        // Positions (required)
        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .with_context(|| format!("No positions in mesh {:?}", name))?
            .collect();

        // Normals (optional)
        let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|iter| iter.collect());

        // UVs (optional)
        let uvs: Option<Vec<[f32; 2]>> = reader
            .read_tex_coords(0)
            .map(|iter| iter.into_f32().collect());

        // Indices (optional)
        let indices: Option<Vec<u32>> = reader.read_indices().map(|iter| iter.into_u32().collect());

        meshes.push(GltfMesh {
            name,
            primitive_count,
            mode: primitive.mode(),
            positions,
            normals,
            uvs,
            indices,
        });
    }

    Ok(GltfScene { meshes })
}
