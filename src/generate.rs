//! Generation orchestrator.
//!
//! Sequences validation, rendering, guarded-region merging, atomic writes
//! and optional auxiliary asset creation, and aggregates every outcome into
//! a [`GenerationSummary`]. Writes are best-effort and non-transactional: a
//! failed artifact never rolls back the other one.

use crate::assets::{AssetSink, JsonAssetSink};
use crate::error::GeneratorError;
use crate::ident::KeywordTable;
use crate::region::{extract_regions, merge};
use crate::render;
use crate::schema::AttributeSetSchema;
use crate::validate::validate;
use anyhow::Result;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Outcome of writing one primary artifact.
#[derive(Debug, Clone)]
pub struct ArtifactOutcome {
    pub path: PathBuf,
    /// True when an existing file was merged instead of overwritten.
    pub merged: bool,
    pub replaced_regions: Vec<String>,
    /// Fresh regions that had no counterpart in the existing file.
    pub skipped_regions: Vec<String>,
    /// Sha256 of the written content; empty when the write failed.
    pub content_hash: String,
    pub error: Option<String>,
}

impl ArtifactOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    fn failed(path: &Path, merged: bool, error: String) -> Self {
        Self {
            path: path.to_path_buf(),
            merged,
            replaced_regions: Vec::new(),
            skipped_regions: Vec::new(),
            content_hash: String::new(),
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    MetadataTable,
    InitEffect,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::MetadataTable => write!(f, "metadata table"),
            AssetKind::InitEffect => write!(f, "init effect"),
        }
    }
}

/// Outcome of one auxiliary asset. Failures here are recorded, not raised.
#[derive(Debug, Clone)]
pub struct AssetOutcome {
    pub kind: AssetKind,
    pub path: PathBuf,
    pub error: Option<String>,
}

impl AssetOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregated result of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    pub class_name: String,
    pub artifacts: Vec<ArtifactOutcome>,
    pub assets: Vec<AssetOutcome>,
}

impl GenerationSummary {
    /// True when both primary artifacts were written.
    pub fn primary_succeeded(&self) -> bool {
        self.artifacts.iter().all(ArtifactOutcome::succeeded)
    }

    /// True when every artifact and asset was written.
    pub fn all_succeeded(&self) -> bool {
        self.primary_succeeded() && self.assets.iter().all(AssetOutcome::succeeded)
    }

    pub fn written_paths(&self) -> impl Iterator<Item = &Path> {
        self.artifacts
            .iter()
            .filter(|artifact| artifact.succeeded())
            .map(|artifact| artifact.path.as_path())
    }
}

/// Compose the declaration/definition paths for a schema under `root`.
///
/// `target_module` and `target_directory` are opaque path segments supplied
/// by the schema; the class name doubles as the file stem.
pub fn output_paths(root: &Path, schema: &AttributeSetSchema) -> (PathBuf, PathBuf) {
    let dir = root
        .join(&schema.target_module)
        .join(&schema.target_directory);
    (
        dir.join(format!("{}.h", schema.class_name)),
        dir.join(format!("{}.cpp", schema.class_name)),
    )
}

/// Orchestrates one generation run per schema.
pub struct Generator {
    keywords: KeywordTable,
    sink: Option<Box<dyn AssetSink>>,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            keywords: KeywordTable::cpp(),
            sink: Some(Box::new(JsonAssetSink)),
        }
    }

    /// Replace the reserved-keyword table (retargeting the output language).
    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = keywords;
        self
    }

    /// Replace the auxiliary asset collaborator.
    pub fn with_sink(mut self, sink: Box<dyn AssetSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Disable auxiliary asset creation regardless of schema flags.
    pub fn without_assets(mut self) -> Self {
        self.sink = None;
        self
    }

    /// Run the full pipeline for `schema`, writing the declaration and
    /// definition artifacts to the given paths.
    pub fn generate(
        &self,
        schema: &AttributeSetSchema,
        declaration_path: &Path,
        definition_path: &Path,
    ) -> Result<GenerationSummary, GeneratorError> {
        validate(schema, &self.keywords)?;

        for path in [declaration_path, definition_path] {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|source| GeneratorError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
            }
        }

        let rendered = render::render(schema).map_err(GeneratorError::Render)?;

        let artifacts = vec![
            self.write_artifact(declaration_path, &rendered.declaration),
            self.write_artifact(definition_path, &rendered.definition),
        ];

        let mut assets = Vec::new();
        if let Some(sink) = &self.sink {
            let asset_dir = declaration_path.parent().unwrap_or_else(|| Path::new("."));
            if schema.generate_metadata_table {
                let path = asset_dir.join(format!("{}Metadata.json", schema.class_name));
                assets.push(run_asset(AssetKind::MetadataTable, path, |path| {
                    sink.write_metadata_table(schema, path)
                }));
            }
            if schema.generate_init_effect {
                let path = asset_dir.join(format!("GE_{}_Init.json", schema.class_name));
                assets.push(run_asset(AssetKind::InitEffect, path, |path| {
                    sink.write_init_effect(schema, path)
                }));
            }
        }

        let summary = GenerationSummary {
            class_name: schema.class_name.clone(),
            artifacts,
            assets,
        };
        tracing::info!(
            class = %summary.class_name,
            primary_ok = summary.primary_succeeded(),
            assets = summary.assets.len(),
            "generation run finished"
        );
        Ok(summary)
    }

    /// Write one artifact, merging into an existing file if there is one.
    /// A missing file takes the rendered text verbatim; that is the only
    /// path by which new region kinds reach disk.
    fn write_artifact(&self, path: &Path, rendered: &str) -> ArtifactOutcome {
        let (content, merged, replaced, skipped) = if path.exists() {
            let existing = match fs::read_to_string(path) {
                Ok(existing) => existing,
                Err(err) => {
                    tracing::error!(path = %path.display(), error = %err, "failed to read existing artifact");
                    return ArtifactOutcome::failed(
                        path,
                        true,
                        format!("failed to read existing file: {err}"),
                    );
                }
            };
            let (regions, _complete) = extract_regions(rendered);
            let outcome = merge(&existing, &regions);
            (outcome.text, true, outcome.replaced, outcome.skipped)
        } else {
            (rendered.to_string(), false, Vec::new(), Vec::new())
        };

        match atomic_write(path, &content) {
            Ok(()) => {
                tracing::info!(path = %path.display(), merged, "wrote generated artifact");
                ArtifactOutcome {
                    path: path.to_path_buf(),
                    merged,
                    replaced_regions: replaced,
                    skipped_regions: skipped,
                    content_hash: content_hash(&content),
                    error: None,
                }
            }
            Err(err) => {
                tracing::error!(path = %path.display(), error = %format!("{err:#}"), "failed to write artifact");
                ArtifactOutcome::failed(path, merged, format!("{err:#}"))
            }
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

fn run_asset(
    kind: AssetKind,
    path: PathBuf,
    write: impl FnOnce(&Path) -> Result<()>,
) -> AssetOutcome {
    match write(&path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "wrote {kind}");
            AssetOutcome {
                kind,
                path,
                error: None,
            }
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "failed to write {kind}");
            AssetOutcome {
                kind,
                path,
                error: Some(format!("{err:#}")),
            }
        }
    }
}

/// Write through a temp file in the target directory and rename into place,
/// so readers never observe a half-written artifact.
fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
