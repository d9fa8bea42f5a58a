//! Error type shared by the card rendering pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for card rendering operations.
pub type Result<T> = std::result::Result<T, CardError>;

/// Errors that can occur while loading inputs or rendering a card.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("Failed to fetch image: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Image request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported or corrupt image data: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Invalid event data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Font family '{0}' is not installed")]
    FontUnavailable(String),

    #[error("Cairo surface error: {0}")]
    Surface(String),

    #[error("Failed to encode card: {0}")]
    Encode(String),

    #[error("Invalid card size '{0}' (expected WIDTHxHEIGHT)")]
    InvalidSize(String),
}

impl CardError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<cairo::Error> for CardError {
    fn from(err: cairo::Error) -> Self {
        Self::Surface(err.to_string())
    }
}

impl From<cairo::BorrowError> for CardError {
    fn from(err: cairo::BorrowError) -> Self {
        Self::Surface(err.to_string())
    }
}
