//! Batch manifest parsing and batch runs
//!
//! A manifest lists conversion jobs plus options shared by all of them:
//!
//! ```toml
//! [options]
//! missing_textures = "skip"
//! keep_going = true
//!
//! [[jobs]]
//! input = "game/graph/obj3d/interactive/chest.ftl"
//!
//! [[jobs]]
//! input = "edited/chest.obj"
//! output = "game/graph/obj3d/interactive/chest.ftl"
//! ```
//!
//! Relative paths are resolved against the manifest's directory.

use anyhow::{Context, Result};
use hashbrown::HashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::pipeline::{convert_file, default_output, ConvertOptions, ConvertOutcome, ModelFormat};
use crate::texture::MissingTexturePolicy;

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct BatchManifest {
    #[serde(default)]
    pub options: BatchOptions,
    #[serde(default)]
    pub jobs: Vec<JobEntry>,
}

#[derive(Debug, Deserialize)]
pub struct BatchOptions {
    #[serde(default)]
    pub missing_textures: MissingTexturePolicy,
    #[serde(default = "default_copy_textures")]
    pub copy_textures: bool,
    /// Continue after a failed job; the batch still fails at the end
    #[serde(default)]
    pub keep_going: bool,
    pub data_dir: Option<PathBuf>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            missing_textures: MissingTexturePolicy::default(),
            copy_textures: default_copy_textures(),
            keep_going: false,
            data_dir: None,
        }
    }
}

fn default_copy_textures() -> bool {
    true
}

/// Single conversion job
#[derive(Debug, Clone, Deserialize)]
pub struct JobEntry {
    pub input: PathBuf,
    /// Derived from the input when absent
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl JobEntry {
    /// Output this job writes to, or `None` if its input format is unknown.
    pub fn effective_output(&self) -> Option<PathBuf> {
        match &self.output {
            Some(output) => Some(output.clone()),
            None => ModelFormat::from_path(&self.input).map(|f| default_output(&self.input, f)),
        }
    }
}

impl BatchManifest {
    /// Load a manifest file, resolving its paths against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {:?}", path))?;
        let mut manifest = Self::parse(&content)
            .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
        manifest.resolve_paths(path.parent().unwrap_or(Path::new("")));
        Ok(manifest)
    }

    /// Parse manifest from string; paths are left as written
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse batch manifest")
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        if let Some(dir) = &mut self.options.data_dir {
            *dir = base.join(&*dir);
        }
        for job in &mut self.jobs {
            job.input = base.join(&job.input);
            if let Some(output) = &mut job.output {
                *output = base.join(&*output);
            }
        }
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            data_dir: self.options.data_dir.clone(),
            missing_textures: self.options.missing_textures,
            copy_textures: self.options.copy_textures,
        }
    }

    /// Validate the manifest without converting anything
    pub fn validate(&self) -> Result<()> {
        if self.jobs.is_empty() {
            anyhow::bail!("Manifest has no jobs");
        }

        let mut outputs: HashMap<PathBuf, usize> = HashMap::new();
        for (i, job) in self.jobs.iter().enumerate() {
            if !job.input.exists() {
                anyhow::bail!("Job {} input not found: {:?}", i, job.input);
            }
            if ModelFormat::from_path(&job.input).is_none() {
                tracing::warn!("Job {} input {:?} has an unknown format and will be skipped", i, job.input);
            }
            if let Some(output) = job.effective_output() {
                if let Some(first) = outputs.insert(output.clone(), i) {
                    anyhow::bail!("Jobs {} and {} both write {:?}", first, i, output);
                }
            }
        }

        if let Some(dir) = &self.options.data_dir {
            if !dir.is_dir() {
                anyhow::bail!("Data directory not found: {:?}", dir);
            }
        }
        Ok(())
    }
}

/// Result counts of a batch run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: Vec<PathBuf>,
}

/// Run every job in order.
///
/// Without `keep_going` the first failure aborts the batch. With it, failures
/// are logged and the batch fails after the last job if any job failed.
pub fn run_batch(manifest: &BatchManifest) -> Result<BatchSummary> {
    let options = manifest.convert_options();
    let mut summary = BatchSummary::default();

    for job in &manifest.jobs {
        match convert_file(&job.input, job.output.as_deref(), &options) {
            Ok(ConvertOutcome::Converted(_)) => summary.converted += 1,
            Ok(ConvertOutcome::Skipped { .. }) => summary.skipped += 1,
            Err(e) if manifest.options.keep_going => {
                tracing::error!("Failed to convert {:?}: {:#}", job.input, e);
                summary.failed.push(job.input.clone());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to convert {:?}", job.input));
            }
        }
    }

    tracing::info!(
        "Batch finished: {} converted, {} skipped, {} failed",
        summary.converted,
        summary.skipped,
        summary.failed.len()
    );
    if !summary.failed.is_empty() {
        anyhow::bail!(
            "{} of {} jobs failed: {:?}",
            summary.failed.len(),
            manifest.jobs.len(),
            summary.failed
        );
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TRIANGLE_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl wood\nf 1 2 3\n";
    const QUAD_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";

    #[test]
    fn test_manifest_defaults() {
        let manifest = BatchManifest::parse(
            r#"
[[jobs]]
input = "a.ftl"
"#,
        )
        .unwrap();
        assert_eq!(manifest.options.missing_textures, MissingTexturePolicy::Placeholder);
        assert!(manifest.options.copy_textures);
        assert!(!manifest.options.keep_going);
        assert!(manifest.options.data_dir.is_none());
        assert_eq!(manifest.jobs.len(), 1);
        assert!(manifest.jobs[0].output.is_none());
    }

    #[test]
    fn test_manifest_full() {
        let manifest = BatchManifest::parse(
            r#"
[options]
missing_textures = "skip"
copy_textures = false
keep_going = true
data_dir = "arx"

[[jobs]]
input = "a.obj"
output = "out/a.ftl"
"#,
        )
        .unwrap();
        assert_eq!(manifest.options.missing_textures, MissingTexturePolicy::Skip);
        assert!(!manifest.options.copy_textures);
        assert!(manifest.options.keep_going);
        assert_eq!(manifest.jobs[0].output, Some(PathBuf::from("out/a.ftl")));
    }

    #[test]
    fn test_manifest_rejects_unknown_policy() {
        let result = BatchManifest::parse(
            r#"
[options]
missing_textures = "ignore"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_paths_resolved_against_manifest() {
        let mut manifest = BatchManifest::parse(
            r#"
[options]
data_dir = "arx"

[[jobs]]
input = "a.obj"
output = "out/a.ftl"
"#,
        )
        .unwrap();
        manifest.resolve_paths(Path::new("/work"));
        assert_eq!(manifest.options.data_dir, Some(PathBuf::from("/work/arx")));
        assert_eq!(manifest.jobs[0].input, PathBuf::from("/work/a.obj"));
        assert_eq!(manifest.jobs[0].output, Some(PathBuf::from("/work/out/a.ftl")));
    }

    #[test]
    fn test_validate() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("a.obj"), TRIANGLE_OBJ).unwrap();

        let empty = BatchManifest::parse("").unwrap();
        assert!(empty.validate().is_err());

        let mut missing = BatchManifest::parse("[[jobs]]\ninput = \"nope.obj\"\n").unwrap();
        missing.resolve_paths(dir.path());
        assert!(missing.validate().is_err());

        let mut duplicate = BatchManifest::parse(
            "[[jobs]]\ninput = \"a.obj\"\n\n[[jobs]]\ninput = \"a.obj\"\noutput = \"a.ftl\"\n",
        )
        .unwrap();
        duplicate.resolve_paths(dir.path());
        assert!(duplicate.validate().is_err());

        let mut ok = BatchManifest::parse("[[jobs]]\ninput = \"a.obj\"\n").unwrap();
        ok.resolve_paths(dir.path());
        ok.validate().unwrap();
    }

    #[test]
    fn test_run_batch_stops_on_failure() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("quad.obj"), QUAD_OBJ).unwrap();
        std::fs::write(dir.path().join("tri.obj"), TRIANGLE_OBJ).unwrap();

        let mut manifest = BatchManifest::parse(
            "[[jobs]]\ninput = \"quad.obj\"\n\n[[jobs]]\ninput = \"tri.obj\"\n",
        )
        .unwrap();
        manifest.resolve_paths(dir.path());

        assert!(run_batch(&manifest).is_err());
        assert!(!dir.path().join("tri.ftl").exists());
    }

    #[test]
    fn test_run_batch_keep_going() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("quad.obj"), QUAD_OBJ).unwrap();
        std::fs::write(dir.path().join("tri.obj"), TRIANGLE_OBJ).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        let mut manifest = BatchManifest::parse(
            r#"
[options]
keep_going = true

[[jobs]]
input = "quad.obj"

[[jobs]]
input = "notes.txt"

[[jobs]]
input = "tri.obj"
"#,
        )
        .unwrap();
        manifest.resolve_paths(dir.path());

        let err = run_batch(&manifest).unwrap_err();
        assert!(err.to_string().contains("1 of 3 jobs failed"));
        assert!(dir.path().join("tri.ftl").is_file());
    }

    #[test]
    fn test_run_batch_summary() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("tri.obj"), TRIANGLE_OBJ).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        let mut manifest = BatchManifest::parse(
            "[[jobs]]\ninput = \"tri.obj\"\n\n[[jobs]]\ninput = \"notes.txt\"\n",
        )
        .unwrap();
        manifest.resolve_paths(dir.path());

        let summary = run_batch(&manifest).unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                converted: 1,
                skipped: 1,
                failed: Vec::new(),
            }
        );
    }
}
