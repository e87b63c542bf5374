//! Parser for flashcard text files.
//!
//! # Format
//! ```text
//! Rust Basics
//! Q: What is Rust?
//! A: A systems programming language.
//! Q: What does the borrow checker enforce?
//! A: Aliasing and lifetime rules for references.
//! ```
//!
//! The first line is the title. Every `Q:` line followed by an `A:` line
//! becomes a card. Anything else is skipped without complaint.

use crate::error::{Error, Result};
use crate::export;
use crate::types::{Flashcard, FlashcardSet};
use std::fs;
use std::path::Path;

/// Where the card file lives when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data/flashcards.txt";

/// Parse file content into a card set. Never fails; malformed lines are dropped.
pub fn parse(content: &str) -> FlashcardSet {
    let mut lines = content.split('\n');
    let title = lines.next().unwrap_or_default().trim().to_string();

    let mut parser = Parser::new();
    for (idx, line) in lines.enumerate() {
        // +2: one for the title, one for 1-based numbering
        parser.process_line(line, idx + 2);
    }

    FlashcardSet {
        title,
        cards: parser.cards,
    }
}

/// Read and parse a card file, rejecting files that yield no cards.
///
/// Files ending in `.csv` are read as an exported spreadsheet, titled after
/// the file stem.
pub fn load(path: impl AsRef<Path>) -> Result<FlashcardSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));

    let set = if is_csv {
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("flashcards")
            .to_string();
        from_pairs(title, export::parse_csv(&content)?)
    } else {
        parse(&content)
    };

    if set.is_empty() {
        return Err(Error::NoCards {
            path: path.to_path_buf(),
        });
    }

    tracing::info!(
        path = %path.display(),
        title = %set.title,
        cards = set.len(),
        "loaded flashcards"
    );
    Ok(set)
}

/// Build a set from question/answer pairs, numbering them in order.
///
/// Pairs with a blank question are dropped, as in [`parse`].
pub fn from_pairs(title: String, pairs: Vec<(String, String)>) -> FlashcardSet {
    let cards = pairs
        .into_iter()
        .map(|(question, answer)| (question.trim().to_string(), answer.trim().to_string()))
        .filter(|(question, _)| !question.is_empty())
        .zip(0..)
        .map(|((question, answer), id)| Flashcard {
            id,
            question,
            answer,
        })
        .collect();
    FlashcardSet { title, cards }
}

struct Parser {
    cards: Vec<Flashcard>,
    pending_question: Option<String>,
    next_id: u32,
}

impl Parser {
    fn new() -> Self {
        Self {
            cards: Vec::new(),
            pending_question: None,
            next_id: 0,
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) {
        match Self::parse_line(line) {
            LineType::Question(text) => self.handle_question(text, line_num),
            LineType::Answer(text) => self.handle_answer(text, line_num),
            LineType::Other => {}
        }
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("Q:") {
            LineType::Question(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            LineType::Answer(rest.trim())
        } else {
            LineType::Other
        }
    }

    fn handle_question(&mut self, text: &str, line_num: usize) {
        if self.pending_question.is_some() {
            tracing::trace!(line = line_num, "question without answer replaced");
        }
        // An empty question clears the pending one rather than opening a new card
        self.pending_question = (!text.is_empty()).then(|| text.to_string());
    }

    fn handle_answer(&mut self, text: &str, line_num: usize) {
        let Some(question) = self.pending_question.take() else {
            tracing::trace!(line = line_num, "answer without question ignored");
            return;
        };

        self.cards.push(Flashcard {
            id: self.next_id,
            question,
            answer: text.to_string(),
        });
        self.next_id += 1;
    }
}

enum LineType<'a> {
    Question(&'a str),
    Answer(&'a str),
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn card(id: u32, question: &str, answer: &str) -> Flashcard {
        Flashcard {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn parse_title_and_two_cards() {
        let set = parse("Title\nQ: a\nA: b\nQ: c\nA: d\n");
        assert_eq!(
            set,
            FlashcardSet {
                title: "Title".to_string(),
                cards: vec![card(0, "a", "b"), card(1, "c", "d")],
            }
        );
    }

    #[test]
    fn question_without_answer_is_dropped() {
        let set = parse("T\nQ: lost\nQ: kept\nA: yes");
        assert_eq!(set.cards, vec![card(0, "kept", "yes")]);
    }

    #[test]
    fn answer_without_question_is_ignored() {
        let set = parse("T\nA: orphan\nQ: q\nA: a\nA: second answer");
        assert_eq!(set.cards, vec![card(0, "q", "a")]);
    }

    #[test]
    fn whitespace_is_trimmed_everywhere() {
        let set = parse("  Spaced Title  \r\n   Q:   padded question  \r\n\tA:  padded answer \r\n");
        assert_eq!(set.title, "Spaced Title");
        assert_eq!(set.cards, vec![card(0, "padded question", "padded answer")]);
    }

    #[test]
    fn other_lines_are_ignored() {
        let set = parse("T\n# comment\n\nQ: q\nnoise\nA: a\nq: lowercase is not a prefix");
        assert_eq!(set.cards, vec![card(0, "q", "a")]);
    }

    #[test]
    fn empty_question_clears_pending() {
        let set = parse("T\nQ: first\nQ:\nA: dangling");
        assert!(set.cards.is_empty());
    }

    #[test]
    fn title_line_is_never_a_card() {
        let set = parse("Q: looks like a question\nA: but the first line is the title");
        assert_eq!(set.title, "Q: looks like a question");
        assert!(set.cards.is_empty());
    }

    #[test]
    fn title_only_yields_no_cards() {
        let set = parse("Just a title");
        assert_eq!(set.title, "Just a title");
        assert!(set.is_empty());
    }

    #[test]
    fn empty_content() {
        let set = parse("");
        assert_eq!(set.title, "");
        assert!(set.is_empty());
    }

    #[test]
    fn ids_follow_parse_order() {
        let set = parse("T\nQ: 1\nA: 1\nA: skip\nQ: 2\nA: 2\nQ: 3\nA: 3");
        let ids: Vec<u32> = set.cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn from_pairs_numbers_sequentially() {
        let set = from_pairs(
            "Deck".to_string(),
            vec![
                (" a ".to_string(), "b".to_string()),
                ("c".to_string(), " d".to_string()),
            ],
        );
        assert_eq!(set.cards, vec![card(0, "a", "b"), card(1, "c", "d")]);
    }

    #[test]
    fn from_pairs_skips_blank_questions() {
        let set = from_pairs(
            "Deck".to_string(),
            vec![
                ("   ".to_string(), "no question".to_string()),
                ("q".to_string(), "a".to_string()),
                (String::new(), "also dropped".to_string()),
                ("r".to_string(), "b".to_string()),
            ],
        );
        assert_eq!(set.cards, vec![card(0, "q", "a"), card(1, "r", "b")]);
    }
}
