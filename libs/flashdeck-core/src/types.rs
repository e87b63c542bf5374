//! Core types shared by every study mode.

use serde::{Deserialize, Serialize};

/// A single question/answer pair.
///
/// Ids are assigned sequentially at parse time and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: u32,
    pub question: String,
    pub answer: String,
}

/// A titled, ordered set of cards loaded once per process.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub title: String,
    pub cards: Vec<Flashcard>,
}

impl FlashcardSet {
    /// Number of cards in the set.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Look up a card by its id.
    pub fn card(&self, id: u32) -> Option<&Flashcard> {
        self.cards.iter().find(|card| card.id == id)
    }
}

/// Which side of a card a tile or view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Question,
    Answer,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Answer => "answer",
        }
    }
}

/// Running tally of right and wrong answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub incorrect: u32,
}

impl Score {
    /// Total number of answers recorded.
    pub fn answered(&self) -> u32 {
        self.correct + self.incorrect
    }

    /// Rounded share of correct answers, 0 when nothing was answered.
    pub fn percentage(&self) -> u32 {
        percentage(self.correct, self.answered())
    }
}

/// `round(part / whole * 100)`, or 0 for an empty whole.
pub fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
