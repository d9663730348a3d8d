//! Wavefront MTL material list codec

use std::io::{self, Write};

use super::obj::{parse_float, rest_of_line, ObjError};

/// Illumination model "color on, ambient on, highlight on"
pub const ILLUM_HIGHLIGHT_ON: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct MtlMaterial {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    /// Opacity, `1.0` is opaque
    pub dissolve: f32,
    pub illum: u32,
    pub diffuse_map: Option<String>,
}

impl MtlMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: [0.0; 3],
            diffuse: [1.0; 3],
            specular: [0.0; 3],
            shininess: 0.0,
            dissolve: 1.0,
            illum: ILLUM_HIGHLIGHT_ON,
            diffuse_map: None,
        }
    }

    pub fn with_diffuse_map(mut self, map: impl Into<String>) -> Self {
        self.diffuse_map = Some(map.into());
        self
    }
}

/// Materials in declaration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MtlLibrary {
    pub materials: Vec<MtlMaterial>,
}

impl MtlLibrary {
    pub fn get(&self, name: &str) -> Option<&MtlMaterial> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Add a material unless one with the same name is already declared.
    ///
    /// Returns false when the name was taken.
    pub fn insert(&mut self, material: MtlMaterial) -> bool {
        if self.contains(&material.name) {
            return false;
        }
        self.materials.push(material);
        true
    }

    /// Append materials from another library, keeping first declarations.
    pub fn merge(&mut self, other: MtlLibrary) {
        for material in other.materials {
            self.insert(material);
        }
    }
}

/// Parse MTL text. Unknown statements are ignored.
pub fn parse_mtl(text: &str) -> Result<MtlLibrary, ObjError> {
    let mut library = MtlLibrary::default();
    let mut current: Option<MtlMaterial> = None;

    for (line_index, raw_line) in text.lines().enumerate() {
        let line = line_index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        let args: Vec<&str> = tokens.collect();

        if keyword == "newmtl" {
            if let Some(material) = current.take() {
                library.insert(material);
            }
            current = Some(MtlMaterial::new(rest_of_line(&args, "")));
            continue;
        }

        let Some(material) = current.as_mut() else {
            tracing::debug!("Ignoring MTL statement {:?} before newmtl on line {}", keyword, line);
            continue;
        };
        match keyword {
            "Ka" => material.ambient = parse_color(&args, line)?,
            "Kd" => material.diffuse = parse_color(&args, line)?,
            "Ks" => material.specular = parse_color(&args, line)?,
            "Ns" => material.shininess = parse_float(args.first().copied(), line)?,
            "d" => material.dissolve = parse_float(args.first().copied(), line)?,
            "Tr" => material.dissolve = 1.0 - parse_float(args.first().copied(), line)?,
            "illum" => {
                let token = args.first().copied().unwrap_or_default();
                material.illum = token.parse().map_err(|_| ObjError::Syntax {
                    line,
                    message: format!("invalid illumination model {:?}", token),
                })?;
            }
            "map_Kd" => {
                let map = rest_of_line(&args, "");
                if !map.is_empty() {
                    material.diffuse_map = Some(map);
                }
            }
            other => {
                tracing::debug!("Ignoring MTL statement {:?} on line {}", other, line);
            }
        }
    }

    if let Some(material) = current {
        library.insert(material);
    }
    Ok(library)
}

/// Write MTL text.
pub fn write_mtl<W: Write>(w: &mut W, library: &MtlLibrary) -> io::Result<()> {
    writeln!(w, "# Exported by ftl-convert")?;
    writeln!(w, "# {} materials", library.materials.len())?;
    for material in &library.materials {
        writeln!(w)?;
        writeln!(w, "newmtl {}", material.name)?;
        let [r, g, b] = material.ambient;
        writeln!(w, "Ka {} {} {}", r, g, b)?;
        let [r, g, b] = material.diffuse;
        writeln!(w, "Kd {} {} {}", r, g, b)?;
        let [r, g, b] = material.specular;
        writeln!(w, "Ks {} {} {}", r, g, b)?;
        writeln!(w, "Ns {}", material.shininess)?;
        writeln!(w, "d {}", material.dissolve)?;
        writeln!(w, "illum {}", material.illum)?;
        if let Some(map) = &material.diffuse_map {
            writeln!(w, "map_Kd {}", map)?;
        }
    }
    Ok(())
}

/// Parse "r [g b]"; a single value is a grey level.
fn parse_color(args: &[&str], line: usize) -> Result<[f32; 3], ObjError> {
    let r = parse_float(args.first().copied(), line)?;
    if args.len() < 3 {
        return Ok([r; 3]);
    }
    Ok([
        r,
        parse_float(args.get(1).copied(), line)?,
        parse_float(args.get(2).copied(), line)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_library() {
        let text = "\
# materials
newmtl wood
Ka 0 0 0
Kd 0.5 0.25 1
Ns 10
Tr 0.25
illum 2
map_Kd graph/obj3d/textures/dark wood.jpg

newmtl stone
d 0.5
bump stone_bump.jpg
";
        let library = parse_mtl(text).unwrap();
        assert_eq!(library.materials.len(), 2);

        let wood = library.get("wood").unwrap();
        assert_eq!(wood.diffuse, [0.5, 0.25, 1.0]);
        assert_eq!(wood.shininess, 10.0);
        assert_eq!(wood.dissolve, 0.75);
        assert_eq!(
            wood.diffuse_map.as_deref(),
            Some("graph/obj3d/textures/dark wood.jpg")
        );

        let stone = library.get("stone").unwrap();
        assert_eq!(stone.dissolve, 0.5);
        assert_eq!(stone.diffuse_map, None);
        assert_eq!(stone.diffuse, [1.0; 3]);
    }

    #[test]
    fn test_statements_before_newmtl_ignored() {
        let library = parse_mtl("Kd 1 0 0\nnewmtl a\n").unwrap();
        assert_eq!(library.materials, vec![MtlMaterial::new("a")]);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let library = parse_mtl("newmtl a\nmap_Kd one.bmp\nnewmtl a\nmap_Kd two.bmp\n").unwrap();
        assert_eq!(library.materials.len(), 1);
        assert_eq!(library.materials[0].diffuse_map.as_deref(), Some("one.bmp"));
    }

    #[test]
    fn test_written_defaults() {
        let library = MtlLibrary {
            materials: vec![MtlMaterial::new("wood").with_diffuse_map("textures/wood.jpg")],
        };
        let mut out = Vec::new();
        write_mtl(&mut out, &library).unwrap();
        let text = String::from_utf8(out).unwrap();

        for expected in [
            "newmtl wood",
            "Ka 0 0 0",
            "Kd 1 1 1",
            "Ks 0 0 0",
            "Ns 0",
            "d 1",
            "illum 2",
            "map_Kd textures/wood.jpg",
        ] {
            assert!(text.lines().any(|l| l == expected), "missing {:?}", expected);
        }
        assert_eq!(parse_mtl(&text).unwrap(), library);
    }

    #[test]
    fn test_bad_color_is_syntax_error() {
        assert!(matches!(
            parse_mtl("newmtl a\nKd red\n"),
            Err(ObjError::Syntax { line: 2, .. })
        ));
    }
}
