//! Error types for webtoon_reader

use thiserror::Error;

/// Unified error type for network, storage and I/O operations
#[derive(Debug, Error)]
pub enum ReaderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code from the banners endpoint
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Failed to parse or serialize JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Key-value store operation failed
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
    /// Endpoint answered with an empty array, or with a body that is not a JSON array
    #[error("No images found")]
    NoImagesFound,
    /// Banner title cannot be turned into a file inside the cache directory
    #[error("Invalid banner title: {0:?}")]
    InvalidTitle(String),
    /// Failed to download an image
    #[error("Failed to fetch image from {url}: {status}")]
    ImageFetchFailed {
        url: String,
        status: reqwest::StatusCode,
    },
    /// A download task panicked or was cancelled by the runtime
    #[error("Download task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for ReaderError {
    fn from(err: tokio::task::JoinError) -> Self {
        ReaderError::Task(err.to_string())
    }
}

/// Errors surfaced by the image cache to the presentation layer.
///
/// Both kinds render the same way (message plus retry); the wrapped
/// [`ReaderError`] is only used for diagnostics.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or decoding the cache record failed
    #[error("Error loading images")]
    Load(#[source] ReaderError),
    /// Fetching the banner list or downloading an image failed
    #[error("Error fetching images")]
    Fetch(#[source] ReaderError),
}

impl CacheError {
    /// Message shown to the reader in the error state
    pub fn user_message(&self) -> String {
        match self {
            CacheError::Fetch(ReaderError::NoImagesFound) => {
                ReaderError::NoImagesFound.to_string()
            }
            other => other.to_string(),
        }
    }

    /// The underlying cause
    pub fn cause(&self) -> &ReaderError {
        match self {
            CacheError::Load(e) | CacheError::Fetch(e) => e,
        }
    }
}

/// Result alias for webtoon_reader operations
pub type Result<T> = std::result::Result<T, ReaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let parse = serde_json::from_str::<u8>("x").unwrap_err();
        let load = CacheError::Load(ReaderError::Parse(parse));
        assert_eq!(load.user_message(), "Error loading images");

        let fetch = CacheError::Fetch(ReaderError::Task("boom".to_string()));
        assert_eq!(fetch.user_message(), "Error fetching images");

        let empty = CacheError::Fetch(ReaderError::NoImagesFound);
        assert_eq!(empty.user_message(), "No images found");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error as _;

        let err = CacheError::Fetch(ReaderError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY));
        let source = err.source().expect("fetch error carries a source");
        assert!(source.to_string().contains("502"));
        assert!(matches!(err.cause(), ReaderError::HttpStatus(_)));
    }
}
