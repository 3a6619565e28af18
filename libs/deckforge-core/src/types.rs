//! Shared types for the conversion pipeline.

use serde::{Deserialize, Serialize};

/// Input syntax selected on the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Header-driven delimited text with Front/Back columns.
    Csv,
    /// Literal nested list/tuple of (front, back) pairs.
    Tuple,
}

impl InputFormat {
    /// Get the format name as used by the form selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tuple => "tuple",
        }
    }

    /// Parse from the form selector value.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "csv" => Some(Self::Csv),
            "tuple" => Some(Self::Tuple),
            _ => None,
        }
    }
}

/// One (front, back) unit of card content.
///
/// A deck is an ordered `Vec<CardPair>`; document order is preserved all the
/// way into the packaged artifact. Empty strings are valid faces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPair {
    pub front: String,
    pub back: String,
}

impl CardPair {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_round_trips_through_selector_values() {
        assert_eq!(InputFormat::from_str("csv"), Some(InputFormat::Csv));
        assert_eq!(InputFormat::from_str("tuple"), Some(InputFormat::Tuple));
        assert_eq!(InputFormat::Csv.as_str(), "csv");
        assert_eq!(InputFormat::Tuple.as_str(), "tuple");
    }

    #[test]
    fn unknown_selector_value_is_rejected() {
        assert_eq!(InputFormat::from_str("yaml"), None);
        assert_eq!(InputFormat::from_str(""), None);
    }
}
