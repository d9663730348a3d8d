//! Per-file conversion pipeline
//!
//! Each file runs `Loaded → Normalized → Rebuilt → Emitted` once, with all
//! state held in a [`ConversionContext`]. Output files are staged next to
//! their destination and renamed into place, so a failed conversion leaves
//! nothing half-written.

use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::convert::{mesh_from_ftl, mesh_from_gltf, mesh_from_obj, mesh_to_ftl, mesh_to_obj};
use crate::formats::{
    ensure_packed, ensure_unpacked, parse_mtl, parse_obj, read_ftl, read_gltf, write_ftl,
    write_mtl, write_obj, FtlAction, FtlModel, FtlSelection, GltfScene, MtlLibrary, ObjScene,
};
use crate::mesh::MeshModel;
use crate::texture::{
    copy_textures, export_textures, guess_data_dir, texture_map_name, MissingTexturePolicy,
};

/// Model file format, detected by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Ftl,
    Obj,
    Gltf,
}

impl ModelFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())?;
        match ext.as_str() {
            "ftl" => Some(Self::Ftl),
            "obj" => Some(Self::Obj),
            "gltf" | "glb" => Some(Self::Gltf),
            _ => None,
        }
    }

    /// glTF is read-only.
    pub fn is_writable(self) -> bool {
        !matches!(self, Self::Gltf)
    }
}

/// Conversion stages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Loaded,
    Normalized,
    Rebuilt,
    Emitted,
}

/// Options shared by every file of a run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Game data directory; guessed per input file when unset
    pub data_dir: Option<PathBuf>,
    pub missing_textures: MissingTexturePolicy,
    pub copy_textures: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            data_dir: None,
            missing_textures: MissingTexturePolicy::Placeholder,
            copy_textures: true,
        }
    }
}

/// State of one file's conversion
#[derive(Debug)]
pub struct ConversionContext {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source: ModelFormat,
    pub target: ModelFormat,
    /// Directory texture names are resolved against
    pub data_dir: PathBuf,
    pub options: ConvertOptions,
    stage: Option<Stage>,
    /// Engine records outside the mesh model, carried for FTL → FTL
    engine_extras: Option<(Vec<FtlAction>, Vec<FtlSelection>)>,
}

impl ConversionContext {
    pub fn new(
        input: &Path,
        output: &Path,
        source: ModelFormat,
        target: ModelFormat,
        options: &ConvertOptions,
    ) -> Self {
        let data_dir = options
            .data_dir
            .clone()
            .unwrap_or_else(|| guess_data_dir(input));
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            source,
            target,
            data_dir,
            options: options.clone(),
            stage: None,
            engine_extras: None,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Move to `next`; stages only go forward.
    pub fn advance(&mut self, next: Stage) -> Result<()> {
        if let Some(current) = self.stage {
            if next <= current {
                bail!(
                    "Cannot move conversion of {:?} from {:?} back to {:?}",
                    self.input,
                    current,
                    next
                );
            }
        }
        tracing::debug!("{:?}: {:?}", self.input, next);
        self.stage = Some(next);
        Ok(())
    }

    /// Model name used when the source carries none.
    fn stem(&self) -> String {
        file_stem(&self.input)
    }
}

/// Decoded source file
#[derive(Debug)]
pub enum SourceModel {
    Ftl(FtlModel),
    Obj(ObjScene, Option<MtlLibrary>),
    Gltf(GltfScene),
}

/// Target file contents before emission
#[derive(Debug)]
pub enum TargetModel {
    Ftl(FtlModel),
    Obj(ObjScene, MtlLibrary),
}

/// Summary of a finished conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub vertices: usize,
    pub faces: usize,
    pub materials: usize,
    pub groups: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    Converted(ConvertReport),
    /// Not a conversion this tool performs; not an error
    Skipped { input: PathBuf, reason: String },
}

/// Output path used when none is given.
///
/// `.ftl` → `<dir>/<stem>_FTLToOBJ/<stem>.obj`; OBJ and glTF → `<dir>/<stem>.ftl`.
pub fn default_output(input: &Path, format: ModelFormat) -> PathBuf {
    let dir = input.parent().unwrap_or(Path::new(""));
    let stem = file_stem(input);
    match format {
        ModelFormat::Ftl => dir
            .join(format!("{}_FTLToOBJ", stem))
            .join(format!("{}.obj", stem)),
        ModelFormat::Obj | ModelFormat::Gltf => dir.join(format!("{}.ftl", stem)),
    }
}

/// Convert one file. Unknown or unsupported formats are skipped with a warning.
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<ConvertOutcome> {
    let Some(source) = ModelFormat::from_path(input) else {
        return Ok(skip(input, "unknown input format (use .ftl, .obj, .gltf or .glb)"));
    };
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, source));
    let Some(target) = ModelFormat::from_path(&output) else {
        return Ok(skip(input, "unknown output format (use .ftl or .obj)"));
    };
    if !target.is_writable() {
        return Ok(skip(input, "glTF output is not supported"));
    }

    tracing::info!("Converting {:?} -> {:?}", input, output);
    let mut ctx = ConversionContext::new(input, &output, source, target, options);

    let loaded = load(&mut ctx)?;
    let mesh = normalize(&mut ctx, loaded)?;
    let target_model = rebuild(&mut ctx, &mesh)?;
    emit(&mut ctx, target_model)?;

    let report = ConvertReport {
        output,
        vertices: mesh.vertices.len(),
        faces: mesh.faces.len(),
        materials: mesh.materials.len(),
        groups: mesh.groups.len(),
    };
    tracing::info!(
        "Converted {:?}: {} vertices, {} faces, {} materials, {} groups",
        input,
        report.vertices,
        report.faces,
        report.materials,
        report.groups
    );
    Ok(ConvertOutcome::Converted(report))
}

fn skip(input: &Path, reason: &str) -> ConvertOutcome {
    tracing::warn!("Skipping {:?}: {}", input, reason);
    ConvertOutcome::Skipped {
        input: input.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Read and decode the source file.
pub fn load(ctx: &mut ConversionContext) -> Result<SourceModel> {
    let input = ctx.input.as_path();
    let model = match ctx.source {
        ModelFormat::Ftl => SourceModel::Ftl(load_ftl(input)?),
        ModelFormat::Obj => {
            let text = std::fs::read_to_string(input)
                .with_context(|| format!("Failed to read OBJ: {:?}", input))?;
            let scene =
                parse_obj(&text).with_context(|| format!("Failed to parse OBJ: {:?}", input))?;
            let library = load_material_libraries(input, &scene)?;
            SourceModel::Obj(scene, library)
        }
        ModelFormat::Gltf => SourceModel::Gltf(read_gltf(input)?),
    };
    ctx.advance(Stage::Loaded)?;
    Ok(model)
}

/// Build the intermediate model in interchange conventions.
pub fn normalize(ctx: &mut ConversionContext, source: SourceModel) -> Result<MeshModel> {
    let mut mesh = match source {
        SourceModel::Ftl(ftl) => {
            let mesh = mesh_from_ftl(&ftl)?;
            if ctx.target == ModelFormat::Ftl {
                ctx.engine_extras = Some((ftl.actions, ftl.selections));
            }
            mesh
        }
        SourceModel::Obj(scene, library) => mesh_from_obj(&scene, library.as_ref(), &ctx.stem())?,
        SourceModel::Gltf(scene) => mesh_from_gltf(&scene, &ctx.stem())?,
    };
    if mesh.name.is_empty() {
        mesh.name = ctx.stem();
    }
    ctx.advance(Stage::Normalized)?;
    Ok(mesh)
}

/// Build the target file model.
pub fn rebuild(ctx: &mut ConversionContext, mesh: &MeshModel) -> Result<TargetModel> {
    let target = match ctx.target {
        ModelFormat::Ftl => {
            let mut ftl = mesh_to_ftl(mesh)?;
            if let Some((actions, selections)) = ctx.engine_extras.take() {
                ftl.actions = actions;
                ftl.selections = selections;
            }
            TargetModel::Ftl(ftl)
        }
        ModelFormat::Obj => {
            let (mut scene, library) = mesh_to_obj(mesh)?;
            scene.material_libraries = vec![format!("{}.mtl", file_stem(&ctx.output))];
            TargetModel::Obj(scene, library)
        }
        ModelFormat::Gltf => bail!("glTF output is not supported"),
    };
    ctx.advance(Stage::Rebuilt)?;
    Ok(target)
}

/// Write the target files and their textures.
pub fn emit(ctx: &mut ConversionContext, target: TargetModel) -> Result<()> {
    let output = ctx.output.clone();
    let out_dir = output
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    match target {
        TargetModel::Ftl(ftl) => {
            let bytes = ensure_packed(
                write_ftl(&ftl).with_context(|| format!("Failed to encode FTL: {:?}", output))?,
            );
            write_atomic(&output, &bytes)?;
            if ctx.options.copy_textures {
                let copied = copy_textures(&ftl.textures, &ctx.data_dir, &guess_data_dir(&output))?;
                tracing::debug!("Copied {} textures", copied);
            }
        }
        TargetModel::Obj(scene, mut library) => {
            let texture_names: Vec<String> = library
                .materials
                .iter()
                .filter_map(|m| m.diffuse_map.clone())
                .collect();
            let export = ctx.options.copy_textures && ctx.source == ModelFormat::Ftl;
            if export {
                for map in library.materials.iter_mut().filter_map(|m| m.diffuse_map.as_mut()) {
                    *map = texture_map_name(&ctx.data_dir, map);
                }
            }

            let mut mtl = Vec::new();
            write_mtl(&mut mtl, &library)?;
            let mut obj = Vec::new();
            write_obj(&mut obj, &scene)?;

            let mut staged = vec![(output.clone(), stage_file(&output, &obj)?)];
            for name in &scene.material_libraries {
                let path = out_dir.join(name);
                let file = stage_file(&path, &mtl)?;
                staged.push((path, file));
            }
            persist_all(staged)?;

            if export {
                export_textures(
                    &texture_names,
                    &ctx.data_dir,
                    &out_dir,
                    ctx.options.missing_textures,
                )?;
            } else if ctx.options.copy_textures {
                copy_textures(&texture_names, &ctx.data_dir, &out_dir)?;
            }
        }
    }

    ctx.advance(Stage::Emitted)?;
    Ok(())
}

/// Read an FTL file, unpacking it first.
pub fn load_ftl(path: &Path) -> Result<FtlModel> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read FTL: {:?}", path))?;
    let plain = ensure_unpacked(&data).with_context(|| format!("Failed to unpack: {:?}", path))?;
    read_ftl(&plain).with_context(|| format!("Failed to decode FTL: {:?}", path))
}

/// Load the material lists an OBJ references, or `<stem>.mtl` next to it.
///
/// A missing list is not an error; its materials are created on first use.
fn load_material_libraries(input: &Path, scene: &ObjScene) -> Result<Option<MtlLibrary>> {
    let dir = input.parent().unwrap_or(Path::new(""));
    let candidates: Vec<PathBuf> = if scene.material_libraries.is_empty() {
        vec![input.with_extension("mtl")]
    } else {
        scene
            .material_libraries
            .iter()
            .map(|name| dir.join(name))
            .collect()
    };

    let mut merged: Option<MtlLibrary> = None;
    for path in candidates {
        if !path.is_file() {
            if !scene.material_libraries.is_empty() {
                tracing::warn!("Material list {:?} not found", path);
            }
            continue;
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read MTL: {:?}", path))?;
        let library =
            parse_mtl(&text).with_context(|| format!("Failed to parse MTL: {:?}", path))?;
        merged.get_or_insert_with(MtlLibrary::default).merge(library);
    }
    Ok(merged)
}

/// Write `bytes` to `path` through a temporary file in the same directory.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let file = stage_file(path, bytes)?;
    persist_all(vec![(path.to_path_buf(), file)])
}

/// Write `bytes` to a temporary file next to `path`, ready to persist.
fn stage_file(path: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {:?}", dir))?;

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write output: {:?}", path))?;
    file.as_file().sync_all()?;
    Ok(file)
}

/// Move staged files into place in order. When one fails, the files already
/// moved are removed again.
fn persist_all(staged: Vec<(PathBuf, NamedTempFile)>) -> Result<()> {
    let mut persisted: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (path, file) in staged {
        if let Err(e) = file.persist(&path) {
            for done in &persisted {
                if let Err(err) = std::fs::remove_file(done) {
                    tracing::warn!("Failed to remove partial output {:?}: {}", done, err);
                }
            }
            return Err(e).with_context(|| format!("Failed to create output: {:?}", path));
        }
        persisted.push(path);
    }
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Human-readable summary of an FTL model.
pub fn ftl_summary(model: &FtlModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:       {}", model.name);
    let _ = writeln!(out, "Vertices:   {}", model.vertices.len());
    let _ = writeln!(out, "Faces:      {}", model.faces.len());
    let _ = writeln!(out, "Textures:   {}", model.textures.len());
    for (i, texture) in model.textures.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", i, texture);
    }
    let _ = writeln!(out, "Groups:     {}", model.groups.len());
    for group in &model.groups {
        let _ = writeln!(
            out,
            "  {} ({} vertices, origin {})",
            group.name,
            group.indices.len(),
            group.origin
        );
    }
    let _ = writeln!(out, "Actions:    {}", model.actions.len());
    for action in &model.actions {
        let _ = writeln!(out, "  {} (vertex {})", action.name, action.vertex_index);
    }
    let _ = writeln!(out, "Selections: {}", model.selections.len());
    for selection in &model.selections {
        let _ = writeln!(
            out,
            "  {} ({} vertices)",
            selection.name,
            selection.indices.len()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{FtlFace, FtlGroup, FtlVertex};
    use tempfile::tempdir;

    fn sample_ftl() -> FtlModel {
        FtlModel {
            name: "crate".to_string(),
            vertices: vec![
                FtlVertex {
                    position: [0.0, 0.0, 0.0],
                    normal: [0.0, -1.0, 0.0],
                },
                FtlVertex {
                    position: [1.0, 0.0, 0.0],
                    normal: [0.0, -1.0, 0.0],
                },
                FtlVertex {
                    position: [0.0, 0.0, 1.0],
                    normal: [0.0, -1.0, 0.0],
                },
            ],
            faces: vec![FtlFace {
                vertex_indices: [0, 1, 2],
                texture_index: 0,
                ..FtlFace::default()
            }],
            textures: vec!["graph\\obj3d\\textures\\crate_wood.bmp".to_string()],
            groups: vec![FtlGroup {
                name: "root".to_string(),
                indices: vec![0, 1, 2],
                ..FtlGroup::default()
            }],
            actions: vec![FtlAction {
                name: "hit".to_string(),
                vertex_index: 2,
                action: 0,
                sfx: 0,
            }],
            ..FtlModel::default()
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ModelFormat::from_path(Path::new("a.FTL")), Some(ModelFormat::Ftl));
        assert_eq!(ModelFormat::from_path(Path::new("a.obj")), Some(ModelFormat::Obj));
        assert_eq!(ModelFormat::from_path(Path::new("a.glb")), Some(ModelFormat::Gltf));
        assert_eq!(ModelFormat::from_path(Path::new("a.gltf")), Some(ModelFormat::Gltf));
        assert_eq!(ModelFormat::from_path(Path::new("a.fbx")), None);
        assert_eq!(ModelFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_default_outputs() {
        assert_eq!(
            default_output(Path::new("models/chest.ftl"), ModelFormat::Ftl),
            PathBuf::from("models/chest_FTLToOBJ/chest.obj")
        );
        assert_eq!(
            default_output(Path::new("models/chest.obj"), ModelFormat::Obj),
            PathBuf::from("models/chest.ftl")
        );
        assert_eq!(
            default_output(Path::new("models/chest.glb"), ModelFormat::Gltf),
            PathBuf::from("models/chest.ftl")
        );
    }

    #[test]
    fn test_stages_only_move_forward() {
        let options = ConvertOptions::default();
        let mut ctx = ConversionContext::new(
            Path::new("a.ftl"),
            Path::new("a.obj"),
            ModelFormat::Ftl,
            ModelFormat::Obj,
            &options,
        );
        assert_eq!(ctx.stage(), None);
        ctx.advance(Stage::Loaded).unwrap();
        ctx.advance(Stage::Rebuilt).unwrap();
        assert!(ctx.advance(Stage::Normalized).is_err());
        assert!(ctx.advance(Stage::Rebuilt).is_err());
        ctx.advance(Stage::Emitted).unwrap();
        assert_eq!(ctx.stage(), Some(Stage::Emitted));
    }

    #[test]
    fn test_unknown_extension_skipped() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("model.fbx");
        std::fs::write(&input, b"not a model").unwrap();

        let outcome = convert_file(&input, None, &ConvertOptions::default()).unwrap();
        assert!(matches!(outcome, ConvertOutcome::Skipped { .. }));

        let obj = dir.path().join("model.obj");
        std::fs::write(&obj, "v 0 0 0\n").unwrap();
        let outcome = convert_file(
            &obj,
            Some(&dir.path().join("model.gltf")),
            &ConvertOptions::default(),
        )
        .unwrap();
        assert!(matches!(outcome, ConvertOutcome::Skipped { .. }));
    }

    #[test]
    fn test_ftl_to_obj_writes_files() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("crate.ftl");
        std::fs::write(&input, write_ftl(&sample_ftl()).unwrap()).unwrap();

        let outcome = convert_file(&input, None, &ConvertOptions::default()).unwrap();
        let ConvertOutcome::Converted(report) = outcome else {
            panic!("expected conversion");
        };
        assert_eq!(report.output, dir.path().join("crate_FTLToOBJ").join("crate.obj"));
        assert_eq!(report.vertices, 3);
        assert_eq!(report.faces, 1);

        let out_dir = dir.path().join("crate_FTLToOBJ");
        let obj = std::fs::read_to_string(out_dir.join("crate.obj")).unwrap();
        assert!(obj.contains("mtllib crate.mtl"));
        assert!(obj.contains("usemtl crate_wood"));

        let mtl = std::fs::read_to_string(out_dir.join("crate.mtl")).unwrap();
        assert!(mtl.contains("map_Kd graph\\obj3d\\textures\\crate_wood.bmp"));
        let placeholder = out_dir
            .join("graph")
            .join("obj3d")
            .join("textures")
            .join("crate_wood.bmp");
        assert!(placeholder.is_file());
    }

    #[test]
    fn test_ftl_to_ftl_keeps_actions() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("crate.ftl");
        let output = dir.path().join("out").join("crate.ftl");
        std::fs::write(&input, write_ftl(&sample_ftl()).unwrap()).unwrap();

        let options = ConvertOptions {
            copy_textures: false,
            ..ConvertOptions::default()
        };
        convert_file(&input, Some(&output), &options).unwrap();

        let model = load_ftl(&output).unwrap();
        assert_eq!(model.actions, sample_ftl().actions);
        assert_eq!(model.vertices, sample_ftl().vertices);
        assert_eq!(model.faces[0].vertex_indices, [0, 1, 2]);
    }

    #[test]
    fn test_failed_conversion_leaves_no_output() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("quad.obj");
        std::fs::write(&input, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();

        let result = convert_file(&input, None, &ConvertOptions::default());
        assert!(result.is_err());
        assert!(!dir.path().join("quad.ftl").exists());
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_write_atomic_replaces() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("file.bin");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_obj_outputs_written_together_or_not_at_all() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("crate.ftl");
        std::fs::write(&input, write_ftl(&sample_ftl()).unwrap()).unwrap();

        // The .obj path is taken by a directory: no material list, no textures
        let out = dir.path().join("obj_blocked");
        std::fs::create_dir_all(out.join("crate.obj")).unwrap();
        assert!(convert_file(&input, Some(&out.join("crate.obj")), &ConvertOptions::default()).is_err());
        assert!(!out.join("crate.mtl").exists());
        assert!(!out.join("graph").exists());
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);

        // The .mtl path is taken: the .obj moved into place first is removed again
        let out = dir.path().join("mtl_blocked");
        std::fs::create_dir_all(out.join("crate.mtl")).unwrap();
        assert!(convert_file(&input, Some(&out.join("crate.obj")), &ConvertOptions::default()).is_err());
        assert!(!out.join("crate.obj").exists());
        assert!(!out.join("graph").exists());
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_mtl_is_recoverable() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("tri.obj");
        std::fs::write(
            &input,
            "mtllib missing.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl wood\nf 1 2 3\n",
        )
        .unwrap();

        let outcome = convert_file(&input, None, &ConvertOptions::default()).unwrap();
        assert!(matches!(outcome, ConvertOutcome::Converted(_)));
        let model = load_ftl(&dir.path().join("tri.ftl")).unwrap();
        assert_eq!(model.textures, vec!["wood"]);
    }

    #[test]
    fn test_summary() {
        let summary = ftl_summary(&sample_ftl());
        assert!(summary.contains("Vertices:   3"));
        assert!(summary.contains("[0] graph\\obj3d\\textures\\crate_wood.bmp"));
        assert!(summary.contains("root (3 vertices, origin 0)"));
        assert!(summary.contains("hit (vertex 2)"));
    }
}
