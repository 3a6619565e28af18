//! Delimited-text (CSV) input parsing.
//!
//! # Format
//! ```csv
//! Front,Back
//! What is ownership?,"A set of rules, checked at compile time."
//! ```
//!
//! The header row is required and must contain both a `Front` and a `Back`
//! column (exact, case-sensitive names). Extra columns are ignored.

use crate::error::{ParseError, Result};
use crate::types::CardPair;

pub(crate) fn parse(raw: &str) -> Result<Vec<CardPair>> {
    // flexible: short rows come back as records so they can be reported as
    // IncompleteRow with a line number instead of a reader error.
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(raw.trim().as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ParseError::MalformedTable(e.to_string()))?;
    let front_idx = headers.iter().position(|h| h == "Front");
    let back_idx = headers.iter().position(|h| h == "Back");
    let (Some(front_idx), Some(back_idx)) = (front_idx, back_idx) else {
        return Err(ParseError::MissingColumns);
    };

    let mut pairs = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ParseError::MalformedTable(e.to_string()))?;
        // header is line 1
        let line = idx + 2;
        let front = record
            .get(front_idx)
            .ok_or(ParseError::IncompleteRow { line })?;
        let back = record
            .get(back_idx)
            .ok_or(ParseError::IncompleteRow { line })?;
        pairs.push(CardPair::new(front, back));
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_rows_in_document_order() {
        let input = "Front,Back\nQ1,A1\nQ2,A2\nQ3,A3";
        let pairs = parse(input).unwrap();
        assert_eq!(
            pairs,
            vec![
                CardPair::new("Q1", "A1"),
                CardPair::new("Q2", "A2"),
                CardPair::new("Q3", "A3"),
            ]
        );
    }

    #[test]
    fn columns_may_appear_in_any_order() {
        let input = "Back,Front\nthe answer,the question";
        let pairs = parse(input).unwrap();
        assert_eq!(pairs, vec![CardPair::new("the question", "the answer")]);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let input = "Tag,Front,Back\nrust,Q,A";
        let pairs = parse(input).unwrap();
        assert_eq!(pairs, vec![CardPair::new("Q", "A")]);
    }

    #[test]
    fn quoted_fields_keep_embedded_commas_and_newlines() {
        let input = "Front,Back\n\"a, b\",\"line one\nline two\"";
        let pairs = parse(input).unwrap();
        assert_eq!(pairs, vec![CardPair::new("a, b", "line one\nline two")]);
    }

    #[test]
    fn empty_fields_are_permitted() {
        let input = "Front,Back\nQ,";
        let pairs = parse(input).unwrap();
        assert_eq!(pairs, vec![CardPair::new("Q", "")]);
    }

    #[test]
    fn header_names_are_case_sensitive() {
        let result = parse("front,back\nQ,A");
        assert!(matches!(result, Err(ParseError::MissingColumns)));
    }

    #[test]
    fn missing_back_column_is_rejected() {
        let result = parse("Front,Rear\nQ,A");
        assert!(matches!(result, Err(ParseError::MissingColumns)));
    }

    #[test]
    fn short_row_reports_its_line_number() {
        let result = parse("Front,Back\nQ1,A1\nonly-one-field");
        assert!(matches!(result, Err(ParseError::IncompleteRow { line: 3 })));
    }

    #[test]
    fn unterminated_quote_swallows_the_rest_of_the_row() {
        // The csv reader parses quotes leniently: an unterminated quote
        // consumes to end of input, leaving a one-field row.
        let result = parse("Front,Back\n\"unterminated,A");
        assert!(matches!(result, Err(ParseError::IncompleteRow { line: 2 })));
    }

    #[test]
    fn header_only_input_yields_no_pairs() {
        let pairs = parse("Front,Back\n").unwrap();
        assert!(pairs.is_empty());
    }
}
