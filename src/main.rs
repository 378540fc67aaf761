mod config;
mod convert;
mod emit;
mod error;
mod file_io;
mod parser;
mod snapshot;
mod translate;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use convert::folder::FolderConverter;
use snapshot::SnapshotManager;

/// Convert Python enums, dataclasses and string constants into TypeScript
#[derive(Parser)]
#[command(name = "py-to-ts-interfaces")]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to the folder of python files to be converted
    input_folder: PathBuf,

    /// The path to the folder to output the typescript files to
    output_folder: PathBuf,
}

/// Load .env files from multiple locations with priority order:
/// 1. Current working directory (project-specific config)
/// 2. XDG config directory ~/.config/py-to-ts-interfaces/.env
///
/// Environment variables set directly in the shell always take highest priority.
fn load_env_files() {
    let cwd_env = std::env::current_dir().map(|p| p.join(".env")).ok();
    if let Some(path) = cwd_env {
        if path.exists() && dotenv::from_path(&path).is_ok() {
            tracing::debug!("Loaded .env from: {}", path.display());
            return;
        }
    }

    if let Some(config_dir) = get_xdg_config_dir() {
        let xdg_env = config_dir.join("py-to-ts-interfaces").join(".env");
        if xdg_env.exists() && dotenv::from_path(&xdg_env).is_ok() {
            tracing::debug!("Loaded .env from: {}", xdg_env.display());
            return;
        }
    }

    tracing::debug!("No .env file found, using environment variables only");
}

/// Get XDG config directory, fallback to ~/.config
fn get_xdg_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env files (multi-location support)
    load_env_files();

    // Logs go to stderr; RUST_LOG overrides the default level
    let env_filter = EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    let config = Config::from_env().context("Invalid configuration")?;

    let mut converter = FolderConverter::new(config.options, config.concurrency);
    if let Some(snapshot_path) = config.snapshot_path {
        tracing::debug!("Using snapshot at {}", snapshot_path.display());
        converter = converter.with_snapshot(Arc::new(SnapshotManager::new(snapshot_path)));
    }

    let summary = converter
        .convert_folder(&cli.input_folder, &cli.output_folder)
        .await
        .with_context(|| format!("Failed to convert {}", cli.input_folder.display()))?;

    tracing::info!(
        summary = %serde_json::to_string(&summary)?,
        "Converted {} files ({} unchanged), {} declarations",
        summary.converted,
        summary.skipped,
        summary.declarations
    );

    Ok(())
}
