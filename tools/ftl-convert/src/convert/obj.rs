//! Polygon-grouped model (OBJ/MTL) ↔ intermediate mesh model

use glam::{Vec2, Vec3};
use hashbrown::HashMap;
use std::collections::BTreeSet;

use crate::formats::{MtlLibrary, MtlMaterial, ObjCorner, ObjObject, ObjScene, ObjVertexGroup};
use crate::mesh::{
    sanitize_group_name, ConvertError, Corner, Face, GroupBuilder, GroupMembership, Material,
    MeshModel, Vertex, NO_MATERIAL_NAME,
};

/// Build an OBJ scene and its material list from the intermediate model.
///
/// Faces are grouped into one object per material name. Each object carries
/// the union of the groups touched by its faces; vertex-precise membership is
/// written as vertex group records.
pub fn mesh_to_obj(mesh: &MeshModel) -> Result<(ObjScene, MtlLibrary), ConvertError> {
    mesh.validate()?;

    let mut scene = ObjScene {
        positions: mesh.vertices.iter().map(|v| v.position).collect(),
        normals: mesh.vertices.iter().map(|v| v.normal).collect(),
        ..ObjScene::default()
    };

    let membership = GroupMembership::new(&mesh.groups, mesh.vertices.len());
    let mut uv_lookup: HashMap<[u32; 2], usize> = HashMap::new();
    let mut object_groups: Vec<BTreeSet<usize>> = Vec::new();

    for face in &mesh.faces {
        let material = mesh.material_name(face);
        let polygon = face.corners.map(|corner| {
            let key = [corner.uv.x.to_bits(), corner.uv.y.to_bits()];
            let uv = *uv_lookup.entry(key).or_insert_with(|| {
                scene.uvs.push(corner.uv);
                scene.uvs.len() - 1
            });
            ObjCorner {
                position: corner.vertex as usize,
                uv: Some(uv),
                normal: Some(corner.vertex as usize),
            }
        });

        let object_index = match scene.objects.iter().position(|o| o.name == material) {
            Some(index) => index,
            None => {
                scene.objects.push(ObjObject::new(material));
                object_groups.push(BTreeSet::new());
                scene.objects.len() - 1
            }
        };
        scene.objects[object_index]
            .block_mut(Some(material))
            .polygons
            .push(polygon);
        object_groups[object_index].extend(membership.face_groups(face));
    }

    for (object, groups) in scene.objects.iter_mut().zip(object_groups) {
        for id in groups {
            let name = sanitize_group_name(&mesh.groups[id].name);
            if !object.group_names.contains(&name) {
                object.group_names.push(name);
            }
        }
    }

    scene.vertex_groups = mesh
        .groups
        .iter()
        .map(|group| ObjVertexGroup {
            name: sanitize_group_name(&group.name),
            positions: group.vertices.iter().map(|&v| v as usize).collect(),
        })
        .collect();

    let mut library = MtlLibrary::default();
    for material in mesh.materials.iter() {
        let declared = library
            .insert(MtlMaterial::new(material.name.clone()).with_diffuse_map(material.texture.clone()));
        if !declared {
            tracing::warn!(
                "Material {:?} is declared more than once, keeping the first texture",
                material.name
            );
        }
    }

    Ok((scene, library))
}

/// Build the intermediate model from an OBJ scene and its material list.
///
/// Corners are deduplicated by position + normal value. Declared materials
/// come first in declaration order; undeclared ones are appended on first use.
pub fn mesh_from_obj(
    scene: &ObjScene,
    library: Option<&MtlLibrary>,
    name: &str,
) -> Result<MeshModel, ConvertError> {
    let mut mesh = MeshModel::new(name);

    if let Some(library) = library {
        for material in &library.materials {
            let texture = material
                .diffuse_map
                .clone()
                .unwrap_or_else(|| material.name.clone());
            mesh.materials
                .declare(Material::new(material.name.clone(), texture));
        }
    }
    let declared = |name: &str| library.is_some_and(|l| l.contains(name));

    // Files written by this tool list one normal per position; keep that order.
    let seeded: Option<Vec<u32>> = is_index_shared(scene).then(|| {
        scene
            .positions
            .iter()
            .zip(&scene.normals)
            .map(|(&position, &normal)| mesh.vertices.insert(Vertex::new(position, normal)))
            .collect()
    });

    // With vertex group records, membership is resolved per position after
    // the faces; this maps each position to the vertices built from it.
    let mut position_vertices: Option<Vec<BTreeSet<u32>>> =
        (!scene.vertex_groups.is_empty()).then(|| match &seeded {
            Some(seeded) => seeded.iter().map(|&v| BTreeSet::from([v])).collect(),
            None => vec![BTreeSet::new(); scene.positions.len()],
        });
    let mut builder = GroupBuilder::new();
    let mut missing_normals = 0usize;
    let mut missing_uvs = 0usize;

    for object in &scene.objects {
        for block in &object.blocks {
            let material = match block.material.as_deref() {
                None => None,
                Some(NO_MATERIAL_NAME) if !declared(NO_MATERIAL_NAME) => None,
                Some(name) => Some(
                    mesh.materials
                        .get_or_insert_with(name, || Material::placeholder(name)),
                ),
            };

            for polygon in &block.polygons {
                let mut corners = [Corner::new(0, Vec2::ZERO); 3];
                for (slot, corner) in corners.iter_mut().zip(polygon) {
                    let position = lookup(&scene.positions, corner.position, "Position")?;
                    let normal = match corner.normal {
                        Some(index) => lookup(&scene.normals, index, "Normal")?,
                        None => {
                            missing_normals += 1;
                            Vec3::Y
                        }
                    };
                    let uv = match corner.uv {
                        Some(index) => lookup(&scene.uvs, index, "UV")?,
                        None => {
                            missing_uvs += 1;
                            Vec2::ZERO
                        }
                    };

                    let vertex = mesh.vertices.insert(Vertex::new(position, normal));
                    match position_vertices.as_mut() {
                        Some(table) => {
                            if let Some(vertices) = table.get_mut(corner.position) {
                                vertices.insert(vertex);
                            }
                        }
                        None => builder.add(vertex, object.group_names.iter().map(String::as_str)),
                    }
                    *slot = Corner::new(vertex, uv);
                }
                mesh.faces.push(Face::new(corners, material));
            }
        }
    }

    if missing_normals > 0 {
        tracing::warn!(
            "{} face corners have no normal, using (0, 1, 0)",
            missing_normals
        );
    }
    if missing_uvs > 0 {
        tracing::warn!("{} face corners have no UV, using (0, 0)", missing_uvs);
    }

    if let Some(table) = &position_vertices {
        for group in &scene.vertex_groups {
            let vertices = group
                .positions
                .iter()
                .filter_map(|&position| table.get(position))
                .flatten()
                .copied();
            builder.extend_group(&group.name, vertices);
        }
    }

    mesh.groups = builder.finish();
    Ok(mesh)
}

/// True when the normal pool parallels the position pool and every corner
/// references the normal at its position index.
fn is_index_shared(scene: &ObjScene) -> bool {
    scene.normals.len() == scene.positions.len()
        && scene
            .objects
            .iter()
            .flat_map(|o| &o.blocks)
            .flat_map(|b| &b.polygons)
            .flatten()
            .all(|c| c.normal == Some(c.position))
}

fn lookup<T: Copy>(pool: &[T], index: usize, kind: &'static str) -> Result<T, ConvertError> {
    pool.get(index)
        .copied()
        .ok_or(ConvertError::ReferenceOutOfRange {
            kind,
            index,
            count: pool.len(),
        })
}
