//! Resolved runtime configuration.

use crate::app::ModeKind;
use crate::cli::Cli;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub export_dir: PathBuf,
    pub log_file: PathBuf,
    pub mode: ModeKind,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_path: cli.file.clone(),
            export_dir: cli.export_dir.clone(),
            log_file: cli.log_file.clone().unwrap_or_else(default_log_file),
            mode: cli.mode,
            seed: cli.seed,
        }
    }
}

fn default_log_file() -> PathBuf {
    // Use the local data directory, fall back to the current dir
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flashdeck")
        .join("flashdeck.log")
}
