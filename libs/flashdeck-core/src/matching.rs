//! Answer matching for free-response test sessions.
//!
//! A typed answer is accepted when it mentions at least half of the "key
//! words" of the correct answer. Key words are the whitespace-separated
//! tokens longer than three characters; a key word counts as mentioned when
//! it appears anywhere inside the typed answer, so `"processes"` matches the
//! key word `"process"` but not the other way round.

use serde::{Deserialize, Serialize};

/// Tokens must be longer than this many characters to count as key words.
pub const MIN_KEY_WORD_LEN: usize = 3;

/// Result of comparing a typed answer to the correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// Key words extracted from the correct answer, in order.
    pub key_words: Vec<String>,
    /// Key words found in the typed answer.
    pub matched_words: Vec<String>,
    /// How many key words had to be found.
    pub required: usize,
    /// Normalized typed answer (for display).
    pub typed_normalized: String,
    /// Normalized correct answer (for display).
    pub correct_normalized: String,
}

/// Grade a typed answer against the correct one.
pub fn grade_answer(typed: &str, correct: &str) -> MatchResult {
    let typed_normalized = normalize(typed);
    let correct_normalized = normalize(correct);

    let key_words = key_words(&correct_normalized);
    let matched_words: Vec<String> = key_words
        .iter()
        .filter(|word| typed_normalized.contains(word.as_str()))
        .cloned()
        .collect();
    let required = required_matches(key_words.len());

    MatchResult {
        is_correct: matched_words.len() >= required,
        key_words,
        matched_words,
        required,
        typed_normalized,
        correct_normalized,
    }
}

/// Lowercase and trim.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Tokens of an already normalized answer that are long enough to grade on.
pub fn key_words(normalized: &str) -> Vec<String> {
    normalized
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_KEY_WORD_LEN)
        .map(str::to_string)
        .collect()
}

/// `ceil(0.5 * count)`.
fn required_matches(count: usize) -> usize {
    count.div_ceil(2)
}
