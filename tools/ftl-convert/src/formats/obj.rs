//! Wavefront OBJ text codec
//!
//! Polygon-grouped interchange format: global `v`/`vt`/`vn` pools, faces
//! organised per object (`o`) and material (`usemtl`). Object group names come
//! from `g` lines. Vertex-precise groups travel in `#@vgroup` comment records,
//! which other OBJ tools ignore.

use glam::{Vec2, Vec3};
use std::io::{self, Write};

/// Object name used for faces that precede any `o` line
pub const DEFAULT_OBJECT_NAME: &str = "default";

const VGROUP_TAG: &str = "#@vgroup";

/// Errors produced while parsing OBJ or MTL text
#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error("Line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Line {line}: face has {corners} corners, only triangles are supported")]
    UnsupportedTopology { line: usize, corners: usize },

    #[error("Line {line}: {kind} index {index} out of range ({count} defined)")]
    OutOfRange {
        line: usize,
        kind: &'static str,
        index: i64,
        count: usize,
    },
}

/// Corner reference into the scene pools (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjCorner {
    pub position: usize,
    pub uv: Option<usize>,
    pub normal: Option<usize>,
}

pub type ObjPolygon = [ObjCorner; 3];

/// Polygons of one object sharing a material
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjMaterialBlock {
    /// `None` for faces before any `usemtl`
    pub material: Option<String>,
    pub polygons: Vec<ObjPolygon>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjObject {
    pub name: String,
    pub group_names: Vec<String>,
    pub blocks: Vec<ObjMaterialBlock>,
}

impl ObjObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Polygon list for `material`, created on first use.
    pub fn block_mut(&mut self, material: Option<&str>) -> &mut ObjMaterialBlock {
        let position = self
            .blocks
            .iter()
            .position(|b| b.material.as_deref() == material);
        let index = match position {
            Some(index) => index,
            None => {
                self.blocks.push(ObjMaterialBlock {
                    material: material.map(str::to_string),
                    polygons: Vec::new(),
                });
                self.blocks.len() - 1
            }
        };
        &mut self.blocks[index]
    }

    pub fn polygon_count(&self) -> usize {
        self.blocks.iter().map(|b| b.polygons.len()).sum()
    }
}

/// Named set of position indices (0-based)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjVertexGroup {
    pub name: String,
    pub positions: Vec<usize>,
}

/// Parsed OBJ file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjScene {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub objects: Vec<ObjObject>,
    pub vertex_groups: Vec<ObjVertexGroup>,
    pub material_libraries: Vec<String>,
}

impl ObjScene {
    /// Object named `name`, created on first use.
    pub fn object_mut(&mut self, name: &str) -> &mut ObjObject {
        let index = match self.objects.iter().position(|o| o.name == name) {
            Some(index) => index,
            None => {
                self.objects.push(ObjObject::new(name));
                self.objects.len() - 1
            }
        };
        &mut self.objects[index]
    }

    pub fn polygon_count(&self) -> usize {
        self.objects.iter().map(ObjObject::polygon_count).sum()
    }
}

/// Parse OBJ text.
pub fn parse_obj(text: &str) -> Result<ObjScene, ObjError> {
    let mut scene = ObjScene::default();
    let mut current_object: Option<String> = None;
    let mut current_material: Option<String> = None;
    // (line, 1-based index) pairs, checked once every position is known
    let mut pending_groups: Vec<(String, Vec<(usize, i64)>)> = Vec::new();

    for (line_index, raw_line) in text.lines().enumerate() {
        let line = line_index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix(VGROUP_TAG) {
            let mut tokens = rest.split_whitespace();
            let name = tokens.next().ok_or_else(|| ObjError::Syntax {
                line,
                message: "vertex group without a name".to_string(),
            })?;
            let indices = tokens
                .map(|t| parse_index(t, line).map(|i| (line, i)))
                .collect::<Result<Vec<_>, _>>()?;
            pending_groups.push((name.to_string(), indices));
            continue;
        }
        if trimmed.starts_with('#') {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        let args: Vec<&str> = tokens.collect();

        match keyword {
            "v" => scene.positions.push(parse_vec3(&args, line)?),
            "vn" => scene.normals.push(parse_vec3(&args, line)?),
            "vt" => {
                let u = parse_float(args.first().copied(), line)?;
                let v = match args.get(1) {
                    Some(&token) => parse_float(Some(token), line)?,
                    None => 0.0,
                };
                scene.uvs.push(Vec2::new(u, v));
            }
            "o" => {
                let name = rest_of_line(&args, DEFAULT_OBJECT_NAME);
                scene.object_mut(&name);
                current_object = Some(name);
            }
            "g" => {
                let object = current_object.get_or_insert_with(|| DEFAULT_OBJECT_NAME.to_string());
                let object = scene.object_mut(object);
                for name in &args {
                    if !object.group_names.iter().any(|g| g == name) {
                        object.group_names.push(name.to_string());
                    }
                }
            }
            "usemtl" => {
                current_material = Some(rest_of_line(&args, ""));
            }
            "mtllib" => {
                let library = rest_of_line(&args, "");
                if !library.is_empty() {
                    scene.material_libraries.push(library);
                }
            }
            "f" => {
                if args.len() != 3 {
                    return Err(ObjError::UnsupportedTopology {
                        line,
                        corners: args.len(),
                    });
                }
                let counts = (scene.positions.len(), scene.uvs.len(), scene.normals.len());
                let polygon = [
                    parse_corner(args[0], counts, line)?,
                    parse_corner(args[1], counts, line)?,
                    parse_corner(args[2], counts, line)?,
                ];
                let object = current_object.get_or_insert_with(|| DEFAULT_OBJECT_NAME.to_string());
                scene
                    .object_mut(object)
                    .block_mut(current_material.as_deref())
                    .polygons
                    .push(polygon);
            }
            other => {
                tracing::debug!("Ignoring OBJ statement {:?} on line {}", other, line);
            }
        }
    }

    for (name, indices) in pending_groups {
        let positions = indices
            .into_iter()
            .map(|(line, index)| resolve_index(index, scene.positions.len(), "position", line))
            .collect::<Result<Vec<_>, _>>()?;
        match scene.vertex_groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.positions.extend(positions),
            None => scene.vertex_groups.push(ObjVertexGroup { name, positions }),
        }
    }

    Ok(scene)
}

/// Write OBJ text.
pub fn write_obj<W: Write>(w: &mut W, scene: &ObjScene) -> io::Result<()> {
    writeln!(w, "# Exported by ftl-convert")?;
    writeln!(
        w,
        "# {} positions, {} normals, {} uvs, {} faces",
        scene.positions.len(),
        scene.normals.len(),
        scene.uvs.len(),
        scene.polygon_count()
    )?;
    for library in &scene.material_libraries {
        writeln!(w, "mtllib {}", library)?;
    }

    for p in &scene.positions {
        writeln!(w, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in &scene.uvs {
        writeln!(w, "vt {} {}", uv.x, uv.y)?;
    }
    for n in &scene.normals {
        writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    for group in &scene.vertex_groups {
        write!(w, "{} {}", VGROUP_TAG, group.name)?;
        for position in &group.positions {
            write!(w, " {}", position + 1)?;
        }
        writeln!(w)?;
    }

    for object in &scene.objects {
        writeln!(w, "o {}", object.name)?;
        if !object.group_names.is_empty() {
            writeln!(w, "g {}", object.group_names.join(" "))?;
        }
        for block in &object.blocks {
            if let Some(material) = &block.material {
                writeln!(w, "usemtl {}", material)?;
            }
            for polygon in &block.polygons {
                write!(w, "f")?;
                for corner in polygon {
                    write_corner(w, corner)?;
                }
                writeln!(w)?;
            }
        }
    }

    Ok(())
}

fn write_corner<W: Write>(w: &mut W, corner: &ObjCorner) -> io::Result<()> {
    let position = corner.position + 1;
    match (corner.uv, corner.normal) {
        (Some(uv), Some(normal)) => write!(w, " {}/{}/{}", position, uv + 1, normal + 1),
        (None, Some(normal)) => write!(w, " {}//{}", position, normal + 1),
        (Some(uv), None) => write!(w, " {}/{}", position, uv + 1),
        (None, None) => write!(w, " {}", position),
    }
}

/// Join the remaining tokens so names with spaces survive.
pub(crate) fn rest_of_line(args: &[&str], default: &str) -> String {
    if args.is_empty() {
        default.to_string()
    } else {
        args.join(" ")
    }
}

pub(crate) fn parse_float(token: Option<&str>, line: usize) -> Result<f32, ObjError> {
    let token = token.ok_or_else(|| ObjError::Syntax {
        line,
        message: "missing number".to_string(),
    })?;
    token.parse::<f32>().map_err(|_| ObjError::Syntax {
        line,
        message: format!("invalid number {:?}", token),
    })
}

fn parse_vec3(args: &[&str], line: usize) -> Result<Vec3, ObjError> {
    Ok(Vec3::new(
        parse_float(args.first().copied(), line)?,
        parse_float(args.get(1).copied(), line)?,
        parse_float(args.get(2).copied(), line)?,
    ))
}

fn parse_index(token: &str, line: usize) -> Result<i64, ObjError> {
    token.parse::<i64>().map_err(|_| ObjError::Syntax {
        line,
        message: format!("invalid index {:?}", token),
    })
}

/// Resolve a 1-based (or negative, relative) OBJ index against a pool of `count`.
fn resolve_index(
    index: i64,
    count: usize,
    kind: &'static str,
    line: usize,
) -> Result<usize, ObjError> {
    let resolved = if index > 0 {
        index - 1
    } else {
        count as i64 + index
    };
    if index == 0 || resolved < 0 || resolved >= count as i64 {
        return Err(ObjError::OutOfRange {
            line,
            kind,
            index,
            count,
        });
    }
    Ok(resolved as usize)
}

/// Parse a corner reference: "v", "v/vt", "v//vn" or "v/vt/vn"
fn parse_corner(
    token: &str,
    (positions, uvs, normals): (usize, usize, usize),
    line: usize,
) -> Result<ObjCorner, ObjError> {
    let mut parts = token.split('/');
    let position = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ObjError::Syntax {
            line,
            message: format!("invalid face corner {:?}", token),
        })?;
    let position = resolve_index(parse_index(position, line)?, positions, "position", line)?;

    let uv = match parts.next().filter(|s| !s.is_empty()) {
        Some(uv) => Some(resolve_index(parse_index(uv, line)?, uvs, "uv", line)?),
        None => None,
    };
    let normal = match parts.next().filter(|s| !s.is_empty()) {
        Some(normal) => Some(resolve_index(
            parse_index(normal, line)?,
            normals,
            "normal",
            line,
        )?),
        None => None,
    };

    Ok(ObjCorner {
        position,
        uv,
        normal,
    })
}
