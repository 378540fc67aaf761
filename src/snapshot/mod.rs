use crate::convert::ConvertOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

/// Snapshot of converted source files with their hashes
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Snapshot {
    pub files: HashMap<PathBuf, FileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub hash: String,
    pub output: PathBuf,
    pub declarations: usize,
    pub converted_at: u64,
}

/// Manages snapshots for incremental conversion
pub struct SnapshotManager {
    snapshot_path: PathBuf,
    snapshot: RwLock<Snapshot>,
}

impl SnapshotManager {
    pub fn new(snapshot_path: PathBuf) -> Self {
        Self {
            snapshot_path,
            snapshot: RwLock::new(Snapshot::default()),
        }
    }

    /// Hash a source file together with the options that shape its output
    pub fn hash_source(source: &str, options: &ConvertOptions) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        if let Some(header) = &options.header {
            hasher.update(b"\0header\0");
            hasher.update(header.as_bytes());
        }
        hex::encode(hasher.finalize())
    }

    pub async fn load(&self) -> Result<()> {
        if self.snapshot_path.exists() {
            let data = fs::read_to_string(&self.snapshot_path)
                .await
                .with_context(|| format!("Failed to read snapshot {}", self.snapshot_path.display()))?;
            let snapshot = serde_json::from_str(&data)
                .with_context(|| format!("Invalid snapshot {}", self.snapshot_path.display()))?;
            *self.snapshot.write().await = snapshot;
        }
        Ok(())
    }

    pub async fn save(&self) -> Result<()> {
        let snapshot = self.snapshot.read().await;
        let data = serde_json::to_string_pretty(&*snapshot)?;

        if let Some(parent) = self.snapshot_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&self.snapshot_path, data)
            .await
            .with_context(|| format!("Failed to write snapshot {}", self.snapshot_path.display()))?;
        Ok(())
    }

    /// True when `source` was converted with this hash into `output` and that
    /// file still exists
    pub async fn is_unchanged(&self, source: &Path, output: &Path, hash: &str) -> bool {
        {
            let snapshot = self.snapshot.read().await;
            match snapshot.files.get(source) {
                Some(entry) if entry.hash == hash && entry.output == output => {}
                _ => return false,
            }
        }
        fs::try_exists(output).await.unwrap_or(false)
    }

    pub async fn update_file(&self, source: PathBuf, hash: String, output: PathBuf, declarations: usize) {
        let mut snapshot = self.snapshot.write().await;
        snapshot.files.insert(
            source,
            FileEntry {
                hash,
                output,
                declarations,
                converted_at: std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or_default(),
            },
        );
    }
}
