use super::{parse_source, render, ConvertOptions};
use crate::error::ConvertError;
use crate::file_io::{read_file, write_file};
use crate::snapshot::SnapshotManager;
use anyhow::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

const SOURCE_EXTENSION: &str = "py";
const TARGET_EXTENSION: &str = "ts";
const PACKAGE_INIT: &str = "__init__.py";

/// Totals for one folder conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub converted: usize,
    pub skipped: usize,
    pub declarations: usize,
}

enum FileOutcome {
    Converted { declarations: usize },
    Skipped,
}

/// Converts every Python module in a folder into a TypeScript file
pub struct FolderConverter {
    options: ConvertOptions,
    concurrency: usize,
    snapshot_manager: Option<Arc<SnapshotManager>>,
}

impl FolderConverter {
    pub fn new(options: ConvertOptions, concurrency: usize) -> Self {
        Self {
            options,
            concurrency: concurrency.max(1),
            snapshot_manager: None,
        }
    }

    /// Skip sources whose hash matches the snapshot
    pub fn with_snapshot(mut self, snapshot_manager: Arc<SnapshotManager>) -> Self {
        self.snapshot_manager = Some(snapshot_manager);
        self
    }

    /// Convert `input_dir/*.py` into `output_dir/*.ts`.
    ///
    /// The first failing file aborts the whole batch and the snapshot is left
    /// untouched.
    pub async fn convert_folder(&self, input_dir: &Path, output_dir: &Path) -> Result<ConversionSummary> {
        if !input_dir.exists() {
            return Err(ConvertError::InvalidInput {
                path: input_dir.to_path_buf(),
                reason: "path does not exist".to_string(),
            }
            .into());
        }

        if !input_dir.is_dir() {
            return Err(ConvertError::InvalidInput {
                path: input_dir.to_path_buf(),
                reason: "path is not a directory".to_string(),
            }
            .into());
        }

        if let Some(snapshot_manager) = &self.snapshot_manager {
            snapshot_manager.load().await?;
        }

        let sources = source_files(input_dir)?;
        tracing::info!(
            "Converting {} files from {} to {}",
            sources.len(),
            input_dir.display(),
            output_dir.display()
        );

        let outcomes: Vec<FileOutcome> = stream::iter(sources)
            .map(|source| async move {
                let output = output_path(&source, output_dir);
                self.convert_file(source, output).await
            })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        let mut summary = ConversionSummary::default();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Converted { declarations } => {
                    summary.converted += 1;
                    summary.declarations += declarations;
                }
                FileOutcome::Skipped => summary.skipped += 1,
            }
        }

        if let Some(snapshot_manager) = &self.snapshot_manager {
            snapshot_manager.save().await?;
        }

        Ok(summary)
    }

    async fn convert_file(&self, source: PathBuf, output: PathBuf) -> Result<FileOutcome, ConvertError> {
        let content = read_file(&source).await?;

        // Check if file has changed
        let hash = match &self.snapshot_manager {
            Some(snapshot_manager) => {
                let hash = SnapshotManager::hash_source(&content, &self.options);
                if snapshot_manager.is_unchanged(&source, &output, &hash).await {
                    tracing::debug!(file = %source.display(), "Unchanged, skipping");
                    return Ok(FileOutcome::Skipped);
                }
                Some(hash)
            }
            None => None,
        };

        let declarations = parse_source(&content).map_err(|e| ConvertError::Parse {
            file: source.clone(),
            source: e,
        })?;
        let typescript = render(&declarations, &self.options);
        write_file(&typescript, &output).await?;

        tracing::debug!(
            file = %source.display(),
            output = %output.display(),
            declarations = declarations.len(),
            "Converted"
        );

        if let (Some(snapshot_manager), Some(hash)) = (&self.snapshot_manager, hash) {
            snapshot_manager
                .update_file(source, hash, output, declarations.len())
                .await;
        }

        Ok(FileOutcome::Converted {
            declarations: declarations.len(),
        })
    }
}

/// Python modules directly inside `input_dir`, package inits excluded, sorted.
fn source_files(input_dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(input_dir).to_path_buf();
            ConvertError::io(path, e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!("Skipping non UTF-8 file name {:?}", path);
            continue;
        };

        if file_name == PACKAGE_INIT {
            continue;
        }

        if path.extension().map_or(false, |ext| ext == SOURCE_EXTENSION) {
            sources.push(path.to_path_buf());
        }
    }

    sources.sort();
    Ok(sources)
}

/// `input/models.py` -> `output/models.ts`
fn output_path(source: &Path, output_dir: &Path) -> PathBuf {
    let file_name = source
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_default()
        .with_extension(TARGET_EXTENSION);
    output_dir.join(file_name)
}
