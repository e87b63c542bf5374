//! Core flashcard library behind the flashdeck study app.
//!
//! Provides:
//! - Parser and loader for the `Q:`/`A:` flashcard text format
//! - CSV export (and re-import of exported files)
//! - Study modes as plain state machines: viewer, learn, match, test
//! - Keyword answer matching for free-response grading
//! - Injectable randomness so every shuffle can be made deterministic

pub mod error;
pub mod exam;
pub mod export;
pub mod learn;
pub mod match_game;
pub mod matching;
pub mod parser;
pub mod random;
pub mod types;
pub mod viewer;

pub use error::{Error, Result};
pub use exam::{Exam, ExamState};
pub use export::{parse_csv, to_csv, write_csv, EXPORT_FILE_NAME};
pub use learn::{LearnSession, LearnState};
pub use match_game::{BestTime, ClickOutcome, Clock, MatchGame, Tile};
pub use matching::{grade_answer, MatchResult};
pub use parser::{load, parse, DEFAULT_DATA_PATH};
pub use random::RandomSource;
pub use types::{Flashcard, FlashcardSet, Score, Side};
pub use viewer::{search, Face, Viewer, ViewerKey};
