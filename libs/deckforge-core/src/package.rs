//! Deck assembly through the genanki packaging collaborator.
//!
//! The `.apkg` binary format is entirely genanki's concern; this module only
//! builds the deck structure (ids, note model, ordered notes) and asks for
//! serialization.

use std::ops::Range;
use std::path::Path;

use genanki_rs::{Deck, Field, Model, Note, Package, Template};
use rand::Rng;

use crate::error::PackageError;
use crate::types::CardPair;

/// Deck and model ids are drawn from the upper half of the 31-bit range so
/// generated decks do not collide with hand-made ones.
const ID_RANGE: Range<i64> = (1_i64 << 30)..(1_i64 << 31);

const QUESTION_FORMAT: &str = "{{Front}}";
const ANSWER_FORMAT: &str = "{{FrontSide}}<hr id=\"answer\">{{Back}}";

/// CSS applied by the note model to every card.
const MODEL_CSS: &str = ".card {\n\
 font-family: arial;\n\
 font-size: 20px;\n\
 text-align: center;\n\
 color: black;\n\
 background-color: white;\n\
}\n";

/// Build a deck from formatted pairs and serialize it to `path`.
///
/// One note per pair, in the order given.
pub fn write_package(deck_name: &str, pairs: &[CardPair], path: &Path) -> Result<(), PackageError> {
    let mut rng = rand::thread_rng();
    let deck_id = rng.gen_range(ID_RANGE);
    let model_id = rng.gen_range(ID_RANGE);

    let model = Model::new(
        model_id,
        "Simple Model",
        vec![Field::new("Front"), Field::new("Back")],
        vec![Template::new("Card 1")
            .qfmt(QUESTION_FORMAT)
            .afmt(ANSWER_FORMAT)],
    )
    .css(MODEL_CSS);

    let mut deck = Deck::new(deck_id, deck_name, "Generated by deckforge");
    for pair in pairs {
        deck.add_note(Note::new(
            model.clone(),
            vec![pair.front.as_str(), pair.back.as_str()],
        )?);
    }

    let mut package = Package::new(vec![deck], vec![])?;
    let file = path.to_str().ok_or_else(|| {
        PackageError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "artifact path is not valid UTF-8",
        ))
    })?;
    package.write_to_file(file)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_zip_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.apkg");
        let pairs = vec![
            CardPair::new("Hello", "World"),
            CardPair::new("Second", "Card"),
        ];

        write_package("Test Deck", &pairs, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > 4);
        // .apkg files are zip archives
        assert_eq!(&bytes[..2], &b"PK"[..]);
    }

    #[test]
    fn empty_deck_still_packages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.apkg");

        write_package("Empty", &[], &path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn empty_faces_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.apkg");
        let pairs = vec![CardPair::new("", "")];

        write_package("Blank", &pairs, &path).unwrap();

        assert!(path.exists());
    }
}
