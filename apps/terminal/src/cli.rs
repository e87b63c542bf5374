//! Command-line arguments.

use crate::app::ModeKind;
use clap::{Parser, Subcommand};
use flashdeck_core::DEFAULT_DATA_PATH;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "flashdeck", about = "Study a flashcard file in the terminal", version)]
pub struct Cli {
    /// Flashcard file: a title line followed by `Q:`/`A:` pairs, or an exported CSV
    #[arg(long, short = 'f', env = "FLASHDECK_FILE", default_value = DEFAULT_DATA_PATH, global = true)]
    pub file: PathBuf,

    /// Log file (defaults to the local data directory)
    #[arg(long, env = "FLASHDECK_LOG", global = true)]
    pub log_file: Option<PathBuf>,

    /// Study mode to open first
    #[arg(long, short = 'm', value_enum, default_value_t = ModeKind::Viewer)]
    pub mode: ModeKind,

    /// Seed for every shuffle, for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory that receives flashcards.csv when exporting from the viewer
    #[arg(long, env = "FLASHDECK_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Open the interactive study screen (default)
    Study,
    /// Write flashcards.csv and exit
    Export {
        /// Target directory
        #[arg(long, short = 'o', default_value = ".")]
        out: PathBuf,
    },
    /// Print the parsed flashcard set as JSON
    Show,
}
