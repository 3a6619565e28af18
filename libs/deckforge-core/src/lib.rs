//! Core conversion library for the deckforge web front-end.
//!
//! Provides:
//! - Input normalization for delimited-text and literal-list submissions
//! - Card face formatting (label-aware HTML fragments)
//! - Deck assembly through the genanki packaging collaborator
//! - Shared types (CardPair, InputFormat)

pub mod error;
pub mod format;
pub mod normalize;
pub mod package;
pub mod types;

pub use error::{PackageError, ParseError, Result};
pub use format::format_field;
pub use normalize::normalize;
pub use package::write_package;
pub use types::{CardPair, InputFormat};
