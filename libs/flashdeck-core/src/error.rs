//! Error types for flashdeck-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, exporting or driving a study session.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no flashcards found in {}", path.display())]
    NoCards { path: PathBuf },

    #[error("a study session needs at least one card")]
    EmptyDeck,

    #[error("invalid CSV at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("answers are locked after submission")]
    Locked,
}
