//! Deck conversion endpoints.

use std::path::{Path, PathBuf};

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use rand::Rng;

use deckforge_core::{format_field, normalize, write_package, CardPair, InputFormat};

use crate::error::Result;
use crate::views::{render_form, FormValues};
use crate::AppState;

/// GET /
pub async fn form() -> Html<String> {
    Html(render_form(&FormValues::default(), None))
}

/// POST /
/// Convert the submitted input into a downloadable .apkg package.
pub async fn convert(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let submission = read_submission(&mut multipart).await?;

    let raw = match submission.input_source() {
        Ok(raw) => raw,
        Err(message) => return Ok(rejected(&submission.values, &message)),
    };

    let format = match InputFormat::from_str(&submission.values.input_format) {
        Some(format) => format,
        None => return Ok(rejected(&submission.values, "Unknown input format.")),
    };

    let pairs = match normalize(&raw, format) {
        Ok(pairs) => pairs,
        Err(e) => return Ok(rejected(&submission.values, &e.to_string())),
    };

    let formatted: Vec<CardPair> = pairs
        .iter()
        .map(|pair| CardPair::new(format_field(&pair.front), format_field(&pair.back)))
        .collect();

    let deck_name = effective_deck_name(&submission.values.deck_name);
    let filename = artifact_filename(&deck_name);
    // Guard owns the file for the rest of the request; dropped on every exit
    // path, deleting the artifact once the response body has been read.
    let artifact = Artifact::new(state.config.output_dir.join(&filename));

    if let Err(e) = write_package(&deck_name, &formatted, artifact.path()) {
        tracing::error!("packaging failed: {}", e);
        return Ok(rejected(
            &submission.values,
            &format!("An error occurred while packaging the deck: {e}"),
        ));
    }

    let bytes = tokio::fs::read(artifact.path()).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/apkg".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

/// Collected multipart form fields.
struct Submission {
    values: FormValues,
    file_bytes: Option<Vec<u8>>,
}

impl Submission {
    /// Pick the effective raw input: a non-empty upload wins over the
    /// textarea. Upload bytes must decode as UTF-8.
    fn input_source(&self) -> std::result::Result<String, String> {
        match &self.file_bytes {
            Some(bytes) => String::from_utf8(bytes.clone()).map_err(|_| {
                "Error decoding the uploaded file. Please ensure it is encoded in UTF-8."
                    .to_string()
            }),
            None => Ok(self.values.input_text.clone()),
        }
    }
}

async fn read_submission(multipart: &mut Multipart) -> Result<Submission> {
    let mut values = FormValues::default();
    let mut file_bytes = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("deck_name") => values.deck_name = field.text().await?,
            Some("input_format") => values.input_format = field.text().await?,
            Some("input_text") => values.input_text = field.text().await?,
            Some("input_file") => {
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    file_bytes = Some(bytes.to_vec());
                }
            }
            _ => {}
        }
    }

    Ok(Submission { values, file_bytes })
}

/// Re-render the form with the user's input preserved and a message.
fn rejected(values: &FormValues, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(render_form(values, Some(message))),
    )
        .into_response()
}

/// Fall back to a timestamp-derived name when the field is blank.
fn effective_deck_name(submitted: &str) -> String {
    let trimmed = submitted.trim();
    if trimmed.is_empty() {
        format!("Deck_{}", Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        trimmed.to_string()
    }
}

/// Collision-resistant artifact name: sanitized deck name plus a random
/// suffix, since concurrent requests share the output directory.
fn artifact_filename(deck_name: &str) -> String {
    let suffix = rand::thread_rng().gen_range(1..=100_000);
    format!("{}_{suffix}.apkg", sanitize_name(deck_name))
}

/// Keep the filename header-safe: printable ASCII only, whitespace and path
/// separators replaced with underscores.
fn sanitize_name(deck_name: &str) -> String {
    let sanitized: String = deck_name
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control() && *c != '"')
        .map(|c| {
            if c.is_whitespace() || matches!(c, '/' | '\\') {
                '_'
            } else {
                c
            }
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "deck".to_string()
    } else {
        sanitized
    }
}

/// Deletes the written artifact when dropped. Deletion failures are logged,
/// never surfaced to the client.
struct Artifact {
    path: PathBuf,
}

impl Artifact {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Artifact {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "could not remove deck artifact {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitize_replaces_spaces_and_separators() {
        assert_eq!(sanitize_name("Test Deck"), "Test_Deck");
        assert_eq!(sanitize_name("a/b\\c d"), "a_b_c_d");
    }

    #[test]
    fn sanitize_strips_quotes_and_non_ascii() {
        assert_eq!(sanitize_name("\"quoted\" déck"), "quoted_dck");
    }

    #[test]
    fn sanitize_falls_back_when_nothing_survives() {
        assert_eq!(sanitize_name("日本語"), "deck");
        assert_eq!(sanitize_name("   "), "deck");
    }

    #[test]
    fn artifact_filename_has_name_suffix_and_extension() {
        let filename = artifact_filename("Test Deck");
        let rest = filename.strip_prefix("Test_Deck_").unwrap();
        let digits = rest.strip_suffix(".apkg").unwrap();
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn blank_deck_name_falls_back_to_a_timestamp() {
        let name = effective_deck_name("   ");
        assert!(name.starts_with("Deck_"));
    }

    #[test]
    fn non_blank_deck_name_is_trimmed_and_kept() {
        assert_eq!(effective_deck_name("  My Deck "), "My Deck");
    }

    #[test]
    fn artifact_guard_removes_the_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guarded.apkg");
        std::fs::write(&path, b"content").unwrap();
        {
            let _artifact = Artifact::new(path.clone());
        }
        assert!(!path.exists());
    }

    #[test]
    fn artifact_guard_tolerates_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let _artifact = Artifact::new(dir.path().join("never-written.apkg"));
        // drop must not panic
    }
}
