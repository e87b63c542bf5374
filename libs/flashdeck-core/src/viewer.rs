//! Flip-card viewer.
//!
//! Shows one card at a time, front or back. Navigation wraps around both
//! ends of the set. A search overlay can be opened on top of the card; while
//! it is open, keys go to the overlay.

use crate::error::{Error, Result};
use crate::random::RandomSource;
use crate::types::{Flashcard, FlashcardSet};
use std::sync::Arc;

/// Horizontal drag distance that counts as a swipe.
pub const SWIPE_THRESHOLD: i32 = 50;

/// Search never returns more than this many cards.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Which side of the current card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Face {
    #[default]
    Front,
    Back,
}

impl Face {
    fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKey {
    Space,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Escape,
    Backspace,
    Char(char),
}

/// Open search overlay: the query and the cards it currently matches.
#[derive(Debug, Clone, Default)]
pub struct SearchOverlay {
    query: String,
    results: Vec<usize>,
    highlighted: usize,
}

impl SearchOverlay {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Indices into the set, in card order.
    pub fn results(&self) -> &[usize] {
        &self.results
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }
}

/// Indices of cards whose question or answer contains `query`, ignoring case.
///
/// A blank query matches nothing. At most [`MAX_SEARCH_RESULTS`] are returned.
pub fn search(cards: &[Flashcard], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    cards
        .iter()
        .enumerate()
        .filter(|(_, card)| {
            card.question.to_lowercase().contains(&needle)
                || card.answer.to_lowercase().contains(&needle)
        })
        .map(|(idx, _)| idx)
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

/// Single-card review session.
#[derive(Debug)]
pub struct Viewer<R> {
    set: Arc<FlashcardSet>,
    rng: R,
    index: usize,
    face: Face,
    search: Option<SearchOverlay>,
}

impl<R: RandomSource> Viewer<R> {
    pub fn new(set: Arc<FlashcardSet>, rng: R) -> Result<Self> {
        if set.is_empty() {
            return Err(Error::EmptyDeck);
        }
        Ok(Self {
            set,
            rng,
            index: 0,
            face: Face::Front,
            search: None,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn current(&self) -> &Flashcard {
        &self.set.cards[self.index]
    }

    /// The set being reviewed.
    pub fn set(&self) -> &FlashcardSet {
        &self.set
    }

    pub fn search_overlay(&self) -> Option<&SearchOverlay> {
        self.search.as_ref()
    }

    pub fn flip(&mut self) {
        self.face = self.face.flipped();
    }

    pub fn next(&mut self) {
        self.show((self.index + 1) % self.len());
    }

    pub fn previous(&mut self) {
        let n = self.len();
        self.show((self.index + n - 1) % n);
    }

    /// Jump to a uniformly random card (possibly the current one).
    pub fn shuffle(&mut self) {
        let target = self.rng.below(self.len());
        self.show(target);
    }

    /// A click or tap on the card body.
    pub fn tap(&mut self) {
        self.flip();
    }

    /// A horizontal drag from `from_x` to `to_x`. Dragging left moves forward.
    pub fn swipe(&mut self, from_x: i32, to_x: i32) {
        let distance = from_x - to_x;
        if distance > SWIPE_THRESHOLD {
            self.next();
        } else if distance < -SWIPE_THRESHOLD {
            self.previous();
        }
    }

    /// Route a key press. Returns false when the key means nothing here.
    pub fn handle_key(&mut self, key: ViewerKey) -> bool {
        if self.search.is_some() {
            return self.handle_search_key(key);
        }

        match key {
            ViewerKey::Space | ViewerKey::Enter => self.flip(),
            ViewerKey::Right => self.next(),
            ViewerKey::Left => self.previous(),
            ViewerKey::Char('/') => self.open_search(),
            ViewerKey::Char('s') => self.shuffle(),
            _ => return false,
        }
        true
    }

    fn handle_search_key(&mut self, key: ViewerKey) -> bool {
        match key {
            ViewerKey::Escape => self.close_search(),
            ViewerKey::Enter => {
                self.select_highlighted();
            }
            ViewerKey::Down => self.move_highlight(1),
            ViewerKey::Up => self.move_highlight(-1),
            ViewerKey::Backspace => {
                let mut query = self.query().to_string();
                query.pop();
                self.set_query(&query);
            }
            ViewerKey::Space => self.push_query(' '),
            ViewerKey::Char(c) => self.push_query(c),
            ViewerKey::Left | ViewerKey::Right => return false,
        }
        true
    }

    pub fn open_search(&mut self) {
        self.search = Some(SearchOverlay::default());
    }

    /// Close the overlay, leaving the current card untouched.
    pub fn close_search(&mut self) {
        self.search = None;
    }

    /// Replace the query and recompute results. No-op when the overlay is closed.
    pub fn set_query(&mut self, query: &str) {
        let results = search(&self.set.cards, query);
        if let Some(overlay) = self.search.as_mut() {
            overlay.query = query.to_string();
            overlay.results = results;
            overlay.highlighted = 0;
        }
    }

    fn query(&self) -> &str {
        self.search.as_ref().map_or("", |overlay| overlay.query.as_str())
    }

    fn push_query(&mut self, c: char) {
        let mut query = self.query().to_string();
        query.push(c);
        self.set_query(&query);
    }

    fn move_highlight(&mut self, delta: isize) {
        if let Some(overlay) = self.search.as_mut() {
            if overlay.results.is_empty() {
                return;
            }
            let last = overlay.results.len() - 1;
            overlay.highlighted = overlay.highlighted.saturating_add_signed(delta).min(last);
        }
    }

    /// Jump to the `position`-th search result and close the overlay.
    ///
    /// Returns false (and keeps the overlay open) if there is no such result.
    pub fn select_result(&mut self, position: usize) -> bool {
        let Some(target) = self
            .search
            .as_ref()
            .and_then(|overlay| overlay.results.get(position).copied())
        else {
            return false;
        };
        self.search = None;
        self.show(target);
        true
    }

    fn select_highlighted(&mut self) -> bool {
        let position = self.search.as_ref().map_or(0, |overlay| overlay.highlighted);
        self.select_result(position)
    }

    fn show(&mut self, index: usize) {
        self.index = index;
        self.face = Face::Front;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Scripted;
    use pretty_assertions::assert_eq;

    fn deck(n: u32) -> Arc<FlashcardSet> {
        Arc::new(FlashcardSet {
            title: "Deck".to_string(),
            cards: (0..n)
                .map(|id| Flashcard {
                    id,
                    question: format!("Question {id}"),
                    answer: format!("Answer {id}"),
                })
                .collect(),
        })
    }

    fn viewer(n: u32) -> Viewer<Scripted> {
        Viewer::new(deck(n), Scripted::new(vec![2])).unwrap()
    }

    #[test]
    fn empty_set_is_rejected() {
        let result = Viewer::new(deck(0), Scripted::new(vec![]));
        assert!(matches!(result, Err(Error::EmptyDeck)));
    }

    #[test]
    fn flip_toggles_face() {
        let mut v = viewer(3);
        assert_eq!(v.face(), Face::Front);
        v.flip();
        assert_eq!(v.face(), Face::Back);
        v.tap();
        assert_eq!(v.face(), Face::Front);
    }

    #[test]
    fn next_wraps_to_first() {
        let mut v = viewer(3);
        v.next();
        v.next();
        assert_eq!(v.index(), 2);
        v.next();
        assert_eq!(v.index(), 0);
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut v = viewer(3);
        v.previous();
        assert_eq!(v.index(), 2);
        assert_eq!(v.current().id, 2);
    }

    #[test]
    fn navigation_shows_front() {
        let mut v = viewer(3);
        v.flip();
        v.next();
        assert_eq!(v.face(), Face::Front);
        v.flip();
        v.previous();
        assert_eq!(v.face(), Face::Front);
    }

    #[test]
    fn single_card_navigation_stays_put() {
        let mut v = viewer(1);
        v.next();
        assert_eq!(v.index(), 0);
        v.previous();
        assert_eq!(v.index(), 0);
    }

    #[test]
    fn shuffle_uses_random_source() {
        let mut v = viewer(5);
        v.flip();
        v.shuffle();
        assert_eq!(v.index(), 2);
        assert_eq!(v.face(), Face::Front);
    }

    #[test]
    fn swipe_needs_more_than_threshold() {
        let mut v = viewer(4);
        v.swipe(100, 50);
        assert_eq!(v.index(), 0);
        v.swipe(100, 49);
        assert_eq!(v.index(), 1);
        v.swipe(0, 51);
        assert_eq!(v.index(), 0);
        v.swipe(0, 50);
        assert_eq!(v.index(), 0);
    }

    #[test]
    fn keys_map_to_transitions() {
        let mut v = viewer(3);
        assert!(v.handle_key(ViewerKey::Space));
        assert_eq!(v.face(), Face::Back);
        assert!(v.handle_key(ViewerKey::Enter));
        assert_eq!(v.face(), Face::Front);
        assert!(v.handle_key(ViewerKey::Right));
        assert_eq!(v.index(), 1);
        assert!(v.handle_key(ViewerKey::Left));
        assert_eq!(v.index(), 0);
        assert!(!v.handle_key(ViewerKey::Char('x')));
    }

    #[test]
    fn search_is_case_insensitive_over_both_sides() {
        let set = FlashcardSet {
            title: "T".to_string(),
            cards: vec![
                Flashcard {
                    id: 0,
                    question: "Capital of FRANCE".to_string(),
                    answer: "Paris".to_string(),
                },
                Flashcard {
                    id: 1,
                    question: "Largest city".to_string(),
                    answer: "Tokyo".to_string(),
                },
                Flashcard {
                    id: 2,
                    question: "River through the city".to_string(),
                    answer: "Seine, in France".to_string(),
                },
            ],
        };
        assert_eq!(search(&set.cards, "france"), vec![0, 2]);
        assert_eq!(search(&set.cards, "TOKYO"), vec![1]);
        assert!(search(&set.cards, "berlin").is_empty());
        assert!(search(&set.cards, "   ").is_empty());
    }

    #[test]
    fn search_caps_results_in_card_order() {
        let set = deck(25);
        let results = search(&set.cards, "question");
        assert_eq!(results, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn selecting_a_result_jumps_and_closes() {
        let mut v = viewer(12);
        v.flip();
        v.handle_key(ViewerKey::Char('/'));
        for c in "answer 1".chars() {
            v.handle_key(ViewerKey::Char(c));
        }
        // "Answer 1", "Answer 10", "Answer 11"
        assert_eq!(v.search_overlay().unwrap().results(), &[1, 10, 11]);
        v.handle_key(ViewerKey::Down);
        v.handle_key(ViewerKey::Enter);
        assert!(v.search_overlay().is_none());
        assert_eq!(v.index(), 10);
        assert_eq!(v.face(), Face::Front);
    }

    #[test]
    fn escape_closes_without_side_effects() {
        let mut v = viewer(5);
        v.next();
        v.flip();
        v.open_search();
        v.set_query("Question 3");
        v.handle_key(ViewerKey::Escape);
        assert!(v.search_overlay().is_none());
        assert_eq!(v.index(), 1);
        assert_eq!(v.face(), Face::Back);
    }

    #[test]
    fn keys_go_to_overlay_while_open() {
        let mut v = viewer(5);
        v.open_search();
        v.handle_key(ViewerKey::Space);
        v.handle_key(ViewerKey::Char('s'));
        assert_eq!(v.search_overlay().unwrap().query(), " s");
        assert_eq!(v.index(), 0);
        assert_eq!(v.face(), Face::Front);
        v.handle_key(ViewerKey::Backspace);
        assert_eq!(v.search_overlay().unwrap().query(), " ");
    }

    #[test]
    fn selecting_missing_result_keeps_overlay() {
        let mut v = viewer(3);
        v.open_search();
        v.set_query("nothing matches");
        assert!(!v.select_result(0));
        assert!(v.search_overlay().is_some());
    }

    #[test]
    fn highlight_stays_in_bounds() {
        let mut v = viewer(3);
        v.open_search();
        v.set_query("question");
        v.handle_key(ViewerKey::Up);
        assert_eq!(v.search_overlay().unwrap().highlighted(), 0);
        for _ in 0..5 {
            v.handle_key(ViewerKey::Down);
        }
        assert_eq!(v.search_overlay().unwrap().highlighted(), 2);
    }
}
