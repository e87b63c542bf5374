//! CSV export of a card set, and the matching reader.
//!
//! Every field is wrapped in double quotes with inner quotes doubled. The
//! header row is always the bare `Question,Answer`.

use crate::error::{Error, Result};
use crate::types::{Flashcard, FlashcardSet};
use std::fs;
use std::path::{Path, PathBuf};

/// File name used for exports.
pub const EXPORT_FILE_NAME: &str = "flashcards.csv";

const HEADER: &str = "Question,Answer";

/// Render cards as CSV: a header row, then one row per card in set order.
///
/// Rows are separated by `\n` with no trailing newline.
pub fn to_csv(cards: &[Flashcard]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for card in cards {
        writer
            .write_record([card.question.as_str(), card.answer.as_str()])
            .map_err(csv_error)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv_error(e.into_error().into()))?;
    let body = String::from_utf8(bytes).map_err(|e| Error::Csv {
        line: 0,
        message: e.to_string(),
    })?;

    let mut out = String::from(HEADER);
    if let Some(rows) = body.strip_suffix('\n') {
        out.push('\n');
        out.push_str(rows);
    }
    Ok(out)
}

/// Write `flashcards.csv` into `dir` and return its path.
pub fn write_csv(set: &FlashcardSet, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    fs::write(&path, to_csv(&set.cards)?).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), cards = set.len(), "exported flashcards");
    Ok(path)
}

/// Parse CSV in the exported layout back into question/answer pairs.
///
/// The first row is the header and is skipped. Quoted fields may span lines.
pub fn parse_csv(content: &str) -> Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let mut pairs = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        if record.len() != 2 {
            return Err(Error::Csv {
                line: record.position().map_or(0, |pos| pos.line() as usize),
                message: format!("expected 2 fields, found {}", record.len()),
            });
        }
        pairs.push((record[0].to_string(), record[1].to_string()));
    }

    Ok(pairs)
}

fn csv_error(err: csv::Error) -> Error {
    let line = err.position().map_or(0, |pos| pos.line() as usize);
    Error::Csv {
        line,
        message: err.to_string(),
    }
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
    fn header_and_quoted_rows() {
        let csv = to_csv(&[card(0, "What?", "This"), card(1, "Say \"hi\"", "a, b")]).unwrap();
        assert_eq!(
            csv,
            "Question,Answer\n\"What?\",\"This\"\n\"Say \"\"hi\"\"\",\"a, b\""
        );
    }

    #[test]
    fn empty_set_is_header_only() {
        assert_eq!(to_csv(&[]).unwrap(), "Question,Answer");
    }

    #[test]
    fn parse_recovers_escaped_quotes_and_commas() {
        let cards = vec![
            card(0, "Quote \"this\"", "He said \"\"twice\"\""),
            card(1, "Commas, everywhere", ",leading and trailing,"),
            card(2, "", "empty question"),
        ];
        let pairs = parse_csv(&to_csv(&cards).unwrap()).unwrap();
        let expected: Vec<(String, String)> = cards
            .iter()
            .map(|c| (c.question.clone(), c.answer.clone()))
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn parse_accepts_unquoted_fields() {
        let pairs = parse_csv("Question,Answer\nplain,text\n").unwrap();
        assert_eq!(pairs, vec![("plain".to_string(), "text".to_string())]);
    }

    #[test]
    fn quoted_fields_may_span_lines() {
        let pairs = parse_csv("Question,Answer\n\"Line one\nline two\",\"b\"\n\"c\",\"d\"\n").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("Line one\nline two".to_string(), "b".to_string()),
                ("c".to_string(), "d".to_string()),
            ]
        );
    }

    #[test]
    fn multi_line_fields_round_trip() {
        let cards = vec![card(0, "Two\nlines", "and \"quotes\"\ntoo")];
        let csv = to_csv(&cards).unwrap();
        assert_eq!(csv, "Question,Answer\n\"Two\nlines\",\"and \"\"quotes\"\"\ntoo\"");
        let pairs = parse_csv(&csv).unwrap();
        assert_eq!(
            pairs,
            vec![("Two\nlines".to_string(), "and \"quotes\"\ntoo".to_string())]
        );
    }

    #[test]
    fn parse_rejects_missing_field() {
        let result = parse_csv("Question,Answer\n\"a\",\"b\"\n\"lonely\"\n");
        assert!(matches!(result, Err(Error::Csv { line: 3, .. })));
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        let result = parse_csv("Question,Answer\n\"a\",\"b\",\"c\"");
        assert!(matches!(result, Err(Error::Csv { line: 2, .. })));
    }

    #[test]
    fn write_csv_creates_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let set = FlashcardSet {
            title: "T".to_string(),
            cards: vec![card(0, "q", "a")],
        };
        let path = write_csv(&set, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "Question,Answer\n\"q\",\"a\""
        );
    }
}
