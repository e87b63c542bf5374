//! Tile-matching game.
//!
//! A handful of cards is dealt as separate question and answer tiles. The
//! player clicks two tiles at a time; a question and the answer from the same
//! card form a pair. The clock runs from the first click until every pair is
//! found.

use crate::error::{Error, Result};
use crate::random::{self, RandomSource};
use crate::types::{FlashcardSet, Side};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Cards dealt per game.
pub const PAIRS_PER_GAME: usize = 6;

/// Longest tile text before truncation.
pub const MAX_TILE_CHARS: usize = 80;

/// Interval between clock ticks.
pub const TICK_MILLIS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub card_id: u32,
    pub side: Side,
    pub text: String,
    pub matched: bool,
}

impl Tile {
    fn pairs_with(&self, other: &Tile) -> bool {
        self.card_id == other.card_id && self.side != other.side
    }
}

/// Game clock in tenths of a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    Idle,
    Running { tenths: u32 },
    Stopped { tenths: u32 },
}

impl Clock {
    pub fn tenths(&self) -> u32 {
        match *self {
            Self::Idle => 0,
            Self::Running { tenths } | Self::Stopped { tenths } => tenths,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

/// Fastest finished run this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BestTime {
    pub tenths: u32,
    pub recorded_at: DateTime<Utc>,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Matched tile, the already-selected tile, or no such tile.
    Ignored,
    /// First tile of a pair chosen.
    Selected,
    /// Second tile did not pair with the first.
    Mismatch,
    /// A pair was found.
    Matched,
    /// The last pair was found and the clock stopped.
    Completed,
}

#[derive(Debug)]
pub struct MatchGame<R> {
    set: Arc<FlashcardSet>,
    rng: R,
    cards: Vec<usize>,
    tiles: Vec<Tile>,
    selected: Option<usize>,
    matched_pairs: usize,
    clock: Clock,
    best: Option<BestTime>,
}

impl<R: RandomSource> MatchGame<R> {
    /// Deal a new game from a random sample of the set.
    pub fn new(set: Arc<FlashcardSet>, mut rng: R) -> Result<Self> {
        if set.is_empty() {
            return Err(Error::EmptyDeck);
        }
        let cards = random::sample(set.len(), PAIRS_PER_GAME, &mut rng);
        let mut game = Self {
            set,
            rng,
            cards,
            tiles: Vec::new(),
            selected: None,
            matched_pairs: 0,
            clock: Clock::Idle,
            best: None,
        };
        game.reset();
        Ok(game)
    }

    /// Re-deal the same cards in a new order. The best time is kept.
    pub fn reset(&mut self) {
        let mut tiles = Vec::with_capacity(self.cards.len() * 2);
        for &idx in &self.cards {
            let card = &self.set.cards[idx];
            tiles.push(Tile {
                card_id: card.id,
                side: Side::Question,
                text: truncate(&card.question),
                matched: false,
            });
            tiles.push(Tile {
                card_id: card.id,
                side: Side::Answer,
                text: truncate(&card.answer),
                matched: false,
            });
        }
        random::shuffle(&mut tiles, &mut self.rng);

        self.tiles = tiles;
        self.selected = None;
        self.matched_pairs = 0;
        self.clock = Clock::Idle;
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn total_pairs(&self) -> usize {
        self.cards.len()
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn best(&self) -> Option<BestTime> {
        self.best
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.total_pairs()
    }

    /// Advance a running clock by one tick.
    pub fn tick(&mut self) {
        if let Clock::Running { tenths } = self.clock {
            self.clock = Clock::Running { tenths: tenths + 1 };
        }
    }

    /// Click the tile at `index`.
    pub fn click(&mut self, index: usize) -> ClickOutcome {
        let Some(tile) = self.tiles.get(index) else {
            return ClickOutcome::Ignored;
        };
        if tile.matched || self.selected == Some(index) {
            return ClickOutcome::Ignored;
        }

        if self.clock == Clock::Idle {
            self.clock = Clock::Running { tenths: 0 };
        }

        let Some(first) = self.selected.take() else {
            self.selected = Some(index);
            return ClickOutcome::Selected;
        };

        if !self.tiles[first].pairs_with(&self.tiles[index]) {
            return ClickOutcome::Mismatch;
        }

        self.tiles[first].matched = true;
        self.tiles[index].matched = true;
        self.matched_pairs += 1;

        if self.is_complete() {
            self.finish();
            ClickOutcome::Completed
        } else {
            ClickOutcome::Matched
        }
    }

    fn finish(&mut self) {
        let tenths = self.clock.tenths();
        self.clock = Clock::Stopped { tenths };

        let improved = self.best.map_or(true, |best| tenths < best.tenths);
        if improved {
            self.best = Some(BestTime {
                tenths,
                recorded_at: Utc::now(),
            });
        }
        tracing::info!(tenths, improved, "match game completed");
    }
}

/// Cut text longer than [`MAX_TILE_CHARS`] and mark the cut.
pub fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_TILE_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_TILE_CHARS).collect();
    cut.push_str("...");
    cut
}

/// Render tenths of a second as `12.3s`.
pub fn format_tenths(tenths: u32) -> String {
    format!("{}.{}s", tenths / 10, tenths % 10)
}
