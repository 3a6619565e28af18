//! Error types for deckforge-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while normalizing submitted input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input is empty")]
    EmptyInput,

    #[error("the header row must contain both a \"Front\" and a \"Back\" column")]
    MissingColumns,

    #[error("row at line {line} is missing a Front or Back value")]
    IncompleteRow { line: usize },

    #[error("malformed table: {0}")]
    MalformedTable(String),

    #[error("malformed literal: {0}")]
    MalformedLiteral(String),

    #[error("unsupported input shape: {0}")]
    InvalidShape(String),
}

/// Errors that can occur while packaging a deck.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("deck packaging failed: {0}")]
    Packaging(#[from] genanki_rs::Error),

    #[error("could not write deck artifact: {0}")]
    Io(#[from] std::io::Error),
}
