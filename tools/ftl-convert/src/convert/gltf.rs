//! Indexed-triangle scene (glTF) → intermediate mesh model

use glam::{Vec2, Vec3};
use gltf::mesh::Mode;

use crate::formats::{GltfMesh, GltfScene};
use crate::mesh::normalize::flip_uv;
use crate::mesh::{ConvertError, Corner, Face, Material, MeshModel, Vertex};

/// Merge every scene mesh into one model.
///
/// Each mesh must have exactly one triangle-list primitive. Vertices are taken
/// as-is (no deduplication) and face indices are offset by the mesh's first
/// vertex. Each mesh gets a material named after it.
pub fn mesh_from_gltf(scene: &GltfScene, name: &str) -> Result<MeshModel, ConvertError> {
    let mut mesh = MeshModel::new(name);
    for source in &scene.meshes {
        append_mesh(&mut mesh, source)?;
    }
    tracing::debug!(
        "Merged {} glTF meshes: {} vertices, {} faces",
        scene.meshes.len(),
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

fn append_mesh(mesh: &mut MeshModel, source: &GltfMesh) -> Result<(), ConvertError> {
    if source.primitive_count != 1 {
        return Err(ConvertError::PrimitiveCount {
            mesh: source.name.clone(),
            count: source.primitive_count,
        });
    }
    if source.mode != Mode::Triangles {
        return Err(ConvertError::UnsupportedTopology {
            mesh: source.name.clone(),
            topology: format!("{:?}", source.mode),
        });
    }

    let count = source.positions.len();
    check_attribute(source, "normals", source.normals.as_ref().map(Vec::len))?;
    check_attribute(source, "uvs", source.uvs.as_ref().map(Vec::len))?;
    if source.normals.is_none() {
        tracing::warn!("Mesh {:?} has no normals, using (0, 1, 0)", source.name);
    }

    let base = mesh.vertices.len() as u64;
    for (i, &position) in source.positions.iter().enumerate() {
        let normal = source
            .normals
            .as_ref()
            .map_or(Vec3::Y, |normals| Vec3::from_array(normals[i]));
        mesh.vertices
            .push(Vertex::new(Vec3::from_array(position), normal));
    }

    let indices: Vec<u32> = match &source.indices {
        Some(indices) => indices.clone(),
        None => (0..count as u32).collect(),
    };
    if indices.len() % 3 != 0 {
        return Err(ConvertError::IndexCount {
            mesh: source.name.clone(),
            count: indices.len(),
        });
    }

    let material = mesh
        .materials
        .get_or_insert_with(&source.name, || Material::placeholder(&source.name));

    for triangle in indices.chunks_exact(3) {
        let mut corners = [Corner::new(0, Vec2::ZERO); 3];
        for (slot, &index) in corners.iter_mut().zip(triangle) {
            if index as usize >= count {
                return Err(ConvertError::VertexOutOfRange {
                    face: mesh.faces.len(),
                    vertex: index as i64,
                    count,
                });
            }
            // glTF UVs start at the top of the texture
            let uv = source
                .uvs
                .as_ref()
                .map_or(Vec2::ZERO, |uvs| flip_uv(Vec2::from_array(uvs[index as usize])));
            *slot = Corner::new((base + index as u64) as u32, uv);
        }
        mesh.faces.push(Face::new(corners, Some(material)));
    }

    Ok(())
}

fn check_attribute(
    source: &GltfMesh,
    attribute: &'static str,
    found: Option<usize>,
) -> Result<(), ConvertError> {
    match found {
        Some(found) if found != source.positions.len() => Err(ConvertError::AttributeCount {
            mesh: source.name.clone(),
            attribute,
            found,
            expected: source.positions.len(),
        }),
        _ => Ok(()),
    }
}
