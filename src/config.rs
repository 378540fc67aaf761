use crate::convert::ConvertOptions;
use anyhow::{Context, Result};
use std::path::PathBuf;

const CONCURRENCY_VAR: &str = "PY_TO_TS_CONCURRENCY";
const HEADER_VAR: &str = "PY_TO_TS_HEADER";
const SNAPSHOT_VAR: &str = "PY_TO_TS_SNAPSHOT";

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of files converted at once
    pub concurrency: usize,
    pub options: ConvertOptions,
    /// Enables incremental conversion when set
    pub snapshot_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let concurrency = match lookup(CONCURRENCY_VAR) {
            Some(value) => {
                let parsed: usize = value
                    .trim()
                    .parse()
                    .with_context(|| format!("{CONCURRENCY_VAR} must be a positive integer, got {value:?}"))?;
                anyhow::ensure!(parsed > 0, "{CONCURRENCY_VAR} must be at least 1");
                parsed
            }
            None => default_concurrency(),
        };

        let header = lookup(HEADER_VAR).filter(|h| !h.trim().is_empty());
        let snapshot_path = lookup(SNAPSHOT_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            concurrency,
            options: ConvertOptions { header },
            snapshot_path,
        })
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
