//! Texture discovery and copying
//!
//! Engine texture names are paths relative to the game data directory, using
//! `\` or `/` separators. The file on disk may carry a different extension
//! than the name, so lookups probe each supported extension in order.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Extensions probed when resolving a texture name, in order
pub const TEXTURE_EXTENSIONS: [&str; 2] = ["jpg", "bmp"];

/// Contents of the placeholder written for unresolved textures
pub const PLACEHOLDER_TEXT: &str = "could not find texture";

/// What to do when a texture referenced by an engine model is not found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingTexturePolicy {
    /// Write a small text file in place of the texture
    #[default]
    Placeholder,
    /// Only log a warning
    Skip,
}

/// Guess the game data directory for a model file.
///
/// Nearest ancestor directory named `game` → its parent; otherwise the file's
/// own directory.
pub fn guess_data_dir(path: &Path) -> PathBuf {
    let dir = path.parent().unwrap_or(Path::new(""));
    dir.ancestors()
        .find(|a| {
            a.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.eq_ignore_ascii_case("game"))
        })
        .and_then(Path::parent)
        .unwrap_or(dir)
        .to_path_buf()
}

fn components(name: &str) -> Vec<&str> {
    name.split(['\\', '/'])
        .filter(|c| !c.is_empty() && *c != ".")
        .collect()
}

/// File stem of a texture name (`graph\obj3d\textures\wood.bmp` → `wood`).
pub fn texture_stem(name: &str) -> String {
    let file = components(name).last().copied().unwrap_or_default();
    match file.rfind('.') {
        Some(dot) if dot > 0 => file[..dot].to_string(),
        _ => file.to_string(),
    }
}

/// Relative path of a texture name, keeping its extension.
pub fn texture_relative_path(name: &str) -> PathBuf {
    components(name).into_iter().collect()
}

/// Relative path of a texture name with its extension replaced by `ext`.
fn relative_with_extension(name: &str, ext: &str) -> PathBuf {
    let mut parts = components(name);
    let file = format!("{}.{}", texture_stem(name), ext);
    parts.pop();
    let mut path: PathBuf = parts.into_iter().collect();
    path.push(file);
    path
}

/// Resolved texture: file on disk plus its path relative to the data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTexture {
    pub source: PathBuf,
    pub relative: PathBuf,
}

impl ResolvedTexture {
    /// Relative path with `/` separators, as written to material lists.
    pub fn relative_name(&self) -> String {
        self.relative
            .iter()
            .map(|c| c.to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Probe `<data_dir>/<name without extension>.{jpg,bmp}`.
pub fn resolve_texture(data_dir: &Path, name: &str) -> Option<ResolvedTexture> {
    if components(name).is_empty() {
        return None;
    }
    TEXTURE_EXTENSIONS.iter().find_map(|ext| {
        let relative = relative_with_extension(name, ext);
        let source = data_dir.join(&relative);
        source.is_file().then_some(ResolvedTexture { source, relative })
    })
}

/// Map path for a material list: the resolved file's relative path when the
/// texture is found, the engine name otherwise.
pub fn texture_map_name(data_dir: &Path, name: &str) -> String {
    resolve_texture(data_dir, name).map_or_else(|| name.to_string(), |t| t.relative_name())
}

/// Copy a resolved texture under `out_dir`, keeping its relative path.
pub fn copy_texture(texture: &ResolvedTexture, out_dir: &Path) -> Result<PathBuf> {
    let dest = out_dir.join(&texture.relative);
    if dest == texture.source {
        return Ok(dest);
    }
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    std::fs::copy(&texture.source, &dest)
        .with_context(|| format!("Failed to copy texture {:?} -> {:?}", texture.source, dest))?;
    tracing::debug!("Copied texture {:?} -> {:?}", texture.source, dest);
    Ok(dest)
}

/// Write the placeholder for an unresolved texture under `out_dir`.
pub fn write_placeholder(name: &str, out_dir: &Path) -> Result<PathBuf> {
    let dest = out_dir.join(texture_relative_path(name));
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    std::fs::write(&dest, PLACEHOLDER_TEXT)
        .with_context(|| format!("Failed to write texture placeholder: {:?}", dest))?;
    Ok(dest)
}

/// Export the textures of an engine model next to an interchange file.
///
/// Returns, per texture name, the map path to write to the material list
/// (see [`texture_map_name`]).
pub fn export_textures(
    names: &[String],
    data_dir: &Path,
    out_dir: &Path,
    policy: MissingTexturePolicy,
) -> Result<Vec<String>> {
    let mut maps = Vec::with_capacity(names.len());
    for name in names {
        match resolve_texture(data_dir, name) {
            Some(texture) => {
                copy_texture(&texture, out_dir)?;
                maps.push(texture.relative_name());
            }
            None => {
                tracing::warn!("Could not find texture {:?} in {:?}", name, data_dir);
                if policy == MissingTexturePolicy::Placeholder && !components(name).is_empty() {
                    write_placeholder(name, out_dir)?;
                }
                maps.push(name.clone());
            }
        }
    }
    Ok(maps)
}

/// Copy the textures of a finished engine model next to it.
///
/// Unresolved names are only reported. Returns the number of files copied.
pub fn copy_textures(names: &[String], source_dir: &Path, out_dir: &Path) -> Result<usize> {
    let mut copied = 0;
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        if seen.contains(&name.as_str()) {
            continue;
        }
        seen.push(name);
        match resolve_texture(source_dir, name) {
            Some(texture) => {
                copy_texture(&texture, out_dir)?;
                copied += 1;
            }
            None => tracing::warn!("Could not find texture {:?} in {:?}", name, source_dir),
        }
    }
    Ok(copied)
}
