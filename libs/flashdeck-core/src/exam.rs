//! Free-response test.
//!
//! Up to ten cards are drawn at random. The user types an answer for each,
//! then submits once; every answer is graded with
//! [`grade_answer`](crate::matching::grade_answer) and the inputs lock until
//! the test is retaken.

use crate::error::{Error, Result};
use crate::matching::{grade_answer, MatchResult};
use crate::random::{self, RandomSource};
use crate::types::{percentage, Flashcard, FlashcardSet};
use std::collections::HashMap;
use std::sync::Arc;

/// Questions per test.
pub const QUESTIONS_PER_TEST: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamState {
    Answering,
    Graded { results: HashMap<u32, MatchResult> },
}

#[derive(Debug)]
pub struct Exam {
    set: Arc<FlashcardSet>,
    cards: Vec<usize>,
    answers: HashMap<u32, String>,
    state: ExamState,
}

impl Exam {
    /// Draw a test from the set.
    pub fn new<R: RandomSource>(set: Arc<FlashcardSet>, rng: &mut R) -> Result<Self> {
        if set.is_empty() {
            return Err(Error::EmptyDeck);
        }
        let cards = random::sample(set.len(), QUESTIONS_PER_TEST, rng);
        Ok(Self {
            set,
            cards,
            answers: HashMap::new(),
            state: ExamState::Answering,
        })
    }

    /// The drawn cards, in display order.
    pub fn cards(&self) -> impl Iterator<Item = &Flashcard> + '_ {
        self.cards.iter().map(|&idx| &self.set.cards[idx])
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn card_at(&self, position: usize) -> Option<&Flashcard> {
        self.cards.get(position).map(|&idx| &self.set.cards[idx])
    }

    pub fn state(&self) -> &ExamState {
        &self.state
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, ExamState::Graded { .. })
    }

    /// The stored answer for a card, empty if none was typed.
    pub fn answer(&self, card_id: u32) -> &str {
        self.answers.get(&card_id).map_or("", String::as_str)
    }

    /// Store the answer for a card. Fails once the test has been submitted.
    pub fn set_answer(&mut self, card_id: u32, text: impl Into<String>) -> Result<()> {
        if self.is_submitted() {
            return Err(Error::Locked);
        }
        self.answers.insert(card_id, text.into());
        Ok(())
    }

    /// Grade every drawn card. Does nothing if already graded.
    pub fn submit(&mut self) {
        if self.is_submitted() {
            return;
        }
        let results: HashMap<u32, MatchResult> = self
            .cards()
            .map(|card| (card.id, grade_answer(self.answer(card.id), &card.answer)))
            .collect();
        self.state = ExamState::Graded { results };
        tracing::info!(
            score = self.score().unwrap_or(0),
            total = self.len(),
            "test submitted"
        );
    }

    /// Grading for one card, once submitted.
    pub fn result(&self, card_id: u32) -> Option<&MatchResult> {
        match &self.state {
            ExamState::Graded { results } => results.get(&card_id),
            ExamState::Answering => None,
        }
    }

    /// Number of correct answers, once submitted.
    pub fn score(&self) -> Option<usize> {
        match &self.state {
            ExamState::Graded { results } => {
                Some(results.values().filter(|r| r.is_correct).count())
            }
            ExamState::Answering => None,
        }
    }

    pub fn percentage(&self) -> Option<u32> {
        self.score()
            .map(|score| percentage(score as u32, self.len() as u32))
    }

    /// Clear answers and results, keeping the same cards.
    pub fn retake(&mut self) {
        self.answers.clear();
        self.state = ExamState::Answering;
    }
}
