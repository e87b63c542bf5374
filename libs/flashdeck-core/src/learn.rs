//! Multiple-choice learn session.
//!
//! The deck is shuffled once when the session starts. Each question offers
//! the correct answer plus up to three answers taken from other cards, in
//! random order. A question is scored the moment an option is picked.

use crate::error::{Error, Result};
use crate::random::{self, RandomSource};
use crate::types::{Flashcard, FlashcardSet, Score};
use std::sync::Arc;

/// Options shown per question, when the deck is large enough.
pub const MAX_OPTIONS: usize = 4;

/// Where the session is in the ask/answer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnState {
    /// Waiting for an option to be picked.
    Asking,
    /// An option was picked and the result is showing.
    Revealed { selected: usize },
    /// The last question was answered.
    Finished { selected: usize },
}

#[derive(Debug)]
pub struct LearnSession<R> {
    set: Arc<FlashcardSet>,
    rng: R,
    order: Vec<usize>,
    position: usize,
    options: Vec<String>,
    state: LearnState,
    score: Score,
}

impl<R: RandomSource> LearnSession<R> {
    pub fn new(set: Arc<FlashcardSet>, rng: R) -> Result<Self> {
        if set.is_empty() {
            return Err(Error::EmptyDeck);
        }
        let mut session = Self {
            set,
            rng,
            order: Vec::new(),
            position: 0,
            options: Vec::new(),
            state: LearnState::Asking,
            score: Score::default(),
        };
        session.restart();
        Ok(session)
    }

    /// Re-shuffle the deck and start over with a clean score.
    pub fn restart(&mut self) {
        self.order = random::sample(self.set.len(), self.set.len(), &mut self.rng);
        self.position = 0;
        self.score = Score::default();
        self.state = LearnState::Asking;
        self.build_options();
        tracing::debug!(cards = self.order.len(), "learn session started");
    }

    pub fn state(&self) -> LearnState {
        self.state
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Zero-based position in the shuffled order.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn current(&self) -> &Flashcard {
        &self.set.cards[self.order[self.position]]
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the option equal to the current card's answer.
    pub fn correct_option(&self) -> Option<usize> {
        let answer = &self.current().answer;
        self.options.iter().position(|option| option == answer)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, LearnState::Finished { .. })
    }

    /// Pick an option. Returns whether it was correct, or `None` if the pick
    /// was ignored because the current question is already answered.
    pub fn select(&mut self, option: usize) -> Option<bool> {
        if self.state != LearnState::Asking {
            return None;
        }
        let picked = self.options.get(option)?;
        let correct = *picked == self.current().answer;

        if correct {
            self.score.correct += 1;
        } else {
            self.score.incorrect += 1;
        }

        self.state = if self.position + 1 == self.order.len() {
            LearnState::Finished { selected: option }
        } else {
            LearnState::Revealed { selected: option }
        };
        Some(correct)
    }

    /// Continue to the next question. Only moves after a revealed result
    /// that is not the last one.
    pub fn advance(&mut self) -> bool {
        if !matches!(self.state, LearnState::Revealed { .. }) || self.position + 1 >= self.order.len()
        {
            return false;
        }
        self.position += 1;
        self.state = LearnState::Asking;
        self.build_options();
        true
    }

    fn build_options(&mut self) {
        let current = self.current().clone();
        let others: Vec<&Flashcard> = self
            .set
            .cards
            .iter()
            .filter(|card| card.id != current.id)
            .collect();

        let mut options = Vec::with_capacity(MAX_OPTIONS);
        options.push(current.answer);
        for idx in random::sample(others.len(), MAX_OPTIONS - 1, &mut self.rng) {
            options.push(others[idx].answer.clone());
        }
        random::shuffle(&mut options, &mut self.rng);
        self.options = options;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Identity;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn deck(n: u32) -> Arc<FlashcardSet> {
        Arc::new(FlashcardSet {
            title: "Deck".to_string(),
            cards: (0..n)
                .map(|id| Flashcard {
                    id,
                    question: format!("q{id}"),
                    answer: format!("a{id}"),
                })
                .collect(),
        })
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(
            LearnSession::new(deck(0), Identity),
            Err(Error::EmptyDeck)
        ));
    }

    #[test]
    fn options_hold_correct_answer_and_three_others() {
        let session = LearnSession::new(deck(6), Identity).unwrap();
        assert_eq!(session.current().id, 0);
        assert_eq!(session.options(), &["a0", "a1", "a2", "a3"]);
        assert_eq!(session.correct_option(), Some(0));
    }

    #[test]
    fn small_decks_get_fewer_options() {
        let session = LearnSession::new(deck(2), Identity).unwrap();
        assert_eq!(session.options().len(), 2);
        let single = LearnSession::new(deck(1), Identity).unwrap();
        assert_eq!(single.options(), &["a0"]);
    }

    #[test]
    fn options_are_distinct_cards() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let session = LearnSession::new(deck(8), &mut rng).unwrap();
            let mut options = session.options().to_vec();
            options.sort();
            options.dedup();
            assert_eq!(options.len(), MAX_OPTIONS);
            assert!(session.correct_option().is_some());
        }
    }

    #[test]
    fn select_scores_once_per_question() {
        let mut session = LearnSession::new(deck(3), Identity).unwrap();
        assert_eq!(session.select(1), Some(false));
        assert_eq!(session.select(0), None);
        assert_eq!(session.score(), Score { correct: 0, incorrect: 1 });
        assert_eq!(session.state(), LearnState::Revealed { selected: 1 });
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let mut session = LearnSession::new(deck(3), Identity).unwrap();
        assert_eq!(session.select(9), None);
        assert_eq!(session.state(), LearnState::Asking);
    }

    #[test]
    fn advance_requires_a_revealed_result() {
        let mut session = LearnSession::new(deck(3), Identity).unwrap();
        assert!(!session.advance());
        session.select(0);
        assert!(session.advance());
        assert_eq!(session.position(), 1);
        assert_eq!(session.state(), LearnState::Asking);
        assert_eq!(session.current().id, 1);
    }

    #[test]
    fn last_answer_finishes_the_session() {
        let mut session = LearnSession::new(deck(2), Identity).unwrap();
        session.select(0);
        session.advance();
        let correct = session.correct_option().unwrap();
        assert_eq!(session.select(correct), Some(true));
        assert!(session.is_finished());
        assert!(!session.advance());
        assert_eq!(session.score().percentage(), 100);
    }

    #[test]
    fn equal_answer_text_counts_as_correct() {
        let set = Arc::new(FlashcardSet {
            title: "Dupes".to_string(),
            cards: vec![
                Flashcard {
                    id: 0,
                    question: "2 + 2".to_string(),
                    answer: "four".to_string(),
                },
                Flashcard {
                    id: 1,
                    question: "sqrt 16".to_string(),
                    answer: "four".to_string(),
                },
            ],
        });
        let mut session = LearnSession::new(set, Identity).unwrap();
        assert_eq!(session.select(1), Some(true));
    }

    #[test]
    fn restart_zeroes_everything() {
        let mut session = LearnSession::new(deck(2), Identity).unwrap();
        session.select(1);
        session.advance();
        session.select(1);
        assert!(session.is_finished());
        session.restart();
        assert_eq!(session.score(), Score::default());
        assert_eq!(session.position(), 0);
        assert_eq!(session.state(), LearnState::Asking);
    }

    #[test]
    fn completed_sessions_account_for_every_card() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut picks = StdRng::seed_from_u64(12);
        for n in 1..15 {
            let mut session = LearnSession::new(deck(n), &mut rng).unwrap();
            while !session.is_finished() {
                let option = picks.below(session.options().len());
                assert!(session.select(option).is_some());
                session.advance();
            }
            let score = session.score();
            assert_eq!(score.answered(), n);
            assert!(score.percentage() <= 100);
        }
    }
}
