//! Input normalization: raw submitted text to an ordered list of card pairs.

mod delimited;
mod literal;

use crate::error::{ParseError, Result};
use crate::types::{CardPair, InputFormat};

/// Parse raw submitted text into an ordered list of (front, back) pairs.
///
/// Blank input is rejected before any mode-specific parsing runs. Row and
/// pair order always matches document order; nothing is deduplicated.
pub fn normalize(raw: &str, format: InputFormat) -> Result<Vec<CardPair>> {
    if raw.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    match format {
        InputFormat::Csv => delimited::parse(raw),
        InputFormat::Tuple => literal::parse(raw),
    }
}
