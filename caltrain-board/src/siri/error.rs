//! SIRI feed source error types.

use std::path::PathBuf;

/// Errors from fetching, capturing, or replaying the feed documents.
#[derive(Debug, thiserror::Error)]
pub enum SiriError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check TRANSIT_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by the 511 API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// A response body failed schema validation
    #[error("JSON parse error in {document} document: {message}")]
    Json {
        document: &'static str,
        message: String,
        body: Option<String>,
    },

    /// Capture or replay file I/O failed
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
