//! Engine model (FTL) ↔ intermediate mesh model

use ftl_common::{FtlFace, FtlGroup, FtlModel, FtlVertex, FTL_NO_TEXTURE};
use glam::{Vec2, Vec3};

use crate::mesh::normalize::{face_normal, flip_axis, flip_uv, flip_vertex, swap_winding};
use crate::mesh::{
    ConvertError, Corner, Face, Group, Material, MaterialTable, MeshModel, Vertex, MAX_VERTICES,
    NO_MATERIAL_NAME,
};
use crate::texture::texture_stem;

/// Build the intermediate model from decoded FTL data.
///
/// Vertex indices are kept as-is; materials are one per texture slot, named
/// after the texture's file stem with a numeric suffix when stems collide.
pub fn mesh_from_ftl(ftl: &FtlModel) -> Result<MeshModel, ConvertError> {
    let mut mesh = MeshModel::new(ftl.name.clone());

    for vertex in &ftl.vertices {
        mesh.vertices.push(flip_vertex(Vertex::new(
            Vec3::from_array(vertex.position),
            Vec3::from_array(vertex.normal),
        )));
    }
    let vertex_count = mesh.vertices.len();

    for texture in &ftl.textures {
        let name = unique_material_name(&mesh.materials, &texture_stem(texture));
        mesh.materials.push(Material::new(name, texture.clone()));
    }

    for (index, face) in ftl.faces.iter().enumerate() {
        if let Some(&vertex) = face
            .vertex_indices
            .iter()
            .find(|&&v| v as usize >= vertex_count)
        {
            return Err(ConvertError::VertexOutOfRange {
                face: index,
                vertex: vertex as i64,
                count: vertex_count,
            });
        }
        let material = match face.texture() {
            Some(material) if material >= mesh.materials.len() => {
                return Err(ConvertError::MaterialOutOfRange {
                    face: index,
                    material,
                    count: mesh.materials.len(),
                });
            }
            other => other,
        };

        let mut corners = [0, 1, 2].map(|k| Corner {
            vertex: face.vertex_indices[k] as u32,
            uv: flip_uv(Vec2::new(face.u[k], face.v[k])),
            color: face.rgb[k],
        });
        swap_winding(&mut corners);

        mesh.faces.push(Face {
            corners,
            material,
            normal: Some(flip_axis(Vec3::from_array(face.normal))),
        });
    }

    for group in &ftl.groups {
        let mut vertices = Vec::with_capacity(group.indices.len());
        for &index in &group.indices {
            if index < 0 || index as usize >= vertex_count {
                return Err(ConvertError::GroupIndexOutOfRange {
                    group: group.name.clone(),
                    vertex: index as i64,
                    count: vertex_count,
                });
            }
            vertices.push(index as u32);
        }
        mesh.groups.push(Group::new(group.name.clone(), vertices));
    }

    tracing::debug!(
        "Loaded FTL model {:?}: {} vertices, {} faces, {} textures, {} groups",
        mesh.name,
        mesh.vertices.len(),
        mesh.faces.len(),
        mesh.materials.len(),
        mesh.groups.len()
    );

    Ok(mesh)
}

/// Build FTL data from the intermediate model.
///
/// The texture list is the final material table order.
pub fn mesh_to_ftl(mesh: &MeshModel) -> Result<FtlModel, ConvertError> {
    if mesh.vertices.len() > MAX_VERTICES {
        return Err(ConvertError::TooManyVertices {
            count: mesh.vertices.len(),
            max: MAX_VERTICES,
        });
    }
    let max_materials = i16::MAX as usize + 1;
    if mesh.materials.len() > max_materials {
        return Err(ConvertError::TooManyMaterials {
            count: mesh.materials.len(),
            max: max_materials,
        });
    }
    mesh.validate()?;

    let vertices: Vec<Vertex> = mesh.vertices.iter().map(|&v| flip_vertex(v)).collect();

    let faces = mesh
        .faces
        .iter()
        .map(|face| {
            let mut corners = face.corners;
            swap_winding(&mut corners);

            let normals = corners.map(|c| vertices[c.vertex as usize].normal);
            let normal = match face.normal {
                Some(normal) => flip_axis(normal),
                None => face_normal(normals),
            };
            let uvs = corners.map(|c| flip_uv(c.uv));

            FtlFace {
                rgb: corners.map(|c| c.color),
                vertex_indices: corners.map(|c| c.vertex as u16),
                texture_index: face.material.map_or(FTL_NO_TEXTURE, |m| m as i16),
                u: uvs.map(|uv| uv.x),
                v: uvs.map(|uv| uv.y),
                ou: uvs.map(|uv| (255.0 * uv.x) as i16),
                ov: uvs.map(|uv| (255.0 * uv.y) as i16),
                normal: normal.to_array(),
                corner_normals: normals.map(|n| n.to_array()),
                ..FtlFace::default()
            }
        })
        .collect();

    let groups = mesh
        .groups
        .iter()
        .map(|group| FtlGroup {
            name: group.name.clone(),
            origin: group_origin(group, &vertices) as i32,
            indices: group.vertices.iter().map(|&v| v as i32).collect(),
            ..FtlGroup::default()
        })
        .collect();

    Ok(FtlModel {
        name: mesh.name.clone(),
        origin: 0,
        vertices: vertices
            .iter()
            .map(|v| FtlVertex {
                position: v.position.to_array(),
                normal: v.normal.to_array(),
            })
            .collect(),
        faces,
        textures: mesh.materials.textures(),
        groups,
        actions: Vec::new(),
        selections: Vec::new(),
    })
}

/// `stem`, or `stem_1`, `stem_2`, ... when a material already uses the name.
fn unique_material_name(materials: &MaterialTable, stem: &str) -> String {
    let taken = |name: &str| name == NO_MATERIAL_NAME || materials.index_of(name).is_some();
    let mut name = stem.to_string();
    let mut suffix = 1;
    while taken(&name) {
        name = format!("{}_{}", stem, suffix);
        suffix += 1;
    }
    name
}

/// Member vertex closest to the group's centroid (first on ties, 0 when empty).
fn group_origin(group: &Group, vertices: &[Vertex]) -> u32 {
    if group.vertices.is_empty() {
        return 0;
    }
    let positions: Vec<(u32, Vec3)> = group
        .vertices
        .iter()
        .map(|&v| (v, vertices[v as usize].position))
        .collect();
    let centroid =
        positions.iter().map(|(_, p)| *p).sum::<Vec3>() / positions.len() as f32;

    let mut best = positions[0];
    let mut best_distance = best.1.distance_squared(centroid);
    for &(index, position) in &positions[1..] {
        let distance = position.distance_squared(centroid);
        if distance < best_distance {
            best = (index, position);
            best_distance = distance;
        }
    }
    best.0
}
