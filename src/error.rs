//! Crate-wide error type shared by the dataset and prediction helpers.

use std::path::PathBuf;

/// Failure categories for dataset fetching and prediction.
///
/// Callers branch on the variant, never on message text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-supplied argument failed validation before any I/O.
    #[error("Invalid argument: {0}")]
    Validation(String),
    /// The HTTP transfer failed at the transport level.
    #[error("Download failed for {url}: {message}")]
    Transfer { url: String, message: String },
    /// The downloaded archive could not be read as a zip file.
    #[error("Failed to extract {archive}: {message}")]
    Extraction { archive: PathBuf, message: String },
    /// Tokenization or model inference failed.
    #[error("Inference failed: {0}")]
    Inference(String),
    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
