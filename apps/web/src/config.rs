//! Application configuration.

use std::path::PathBuf;

/// Maximum accepted request body size (16 MiB). Larger payloads are rejected
/// before any parsing begins.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Immutable configuration resolved once at startup and shared through
/// `AppState`. No process-wide mutable state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: String,
    /// Directory deck artifacts are written to before download. Shared
    /// between concurrent requests, so artifact names carry a random suffix.
    pub output_dir: PathBuf,
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Read configuration from environment variables, with defaults.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let output_dir = std::env::var("DECKFORGE_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir());

        Self {
            host,
            port,
            output_dir,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: "3000".to_string(),
            output_dir: std::env::temp_dir(),
            max_body_bytes: MAX_BODY_BYTES,
        }
    }
}
