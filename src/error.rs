//! Error types for street-explorer

use thiserror::Error;

/// Main error type for street-explorer operations
#[derive(Error, Debug)]
pub enum Error {
    /// Network failure or a non-success HTTP status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered, but not with a JSON array
    #[error("API response was not valid JSON ({reason}): {preview}")]
    MalformedResponse { reason: String, preview: String },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    /// The panorama engine could not be initialized
    #[error("Viewer error: {0}")]
    Viewer(String),

    #[error("Geolocation unavailable: {0}")]
    Geolocation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a `MalformedResponse` keeping only the leading part of the body
    pub fn malformed(reason: impl Into<String>, body: &str) -> Self {
        Error::MalformedResponse {
            reason: reason.into(),
            preview: body
                .chars()
                .take(crate::constants::api::RESPONSE_PREVIEW_CHARS)
                .collect(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

/// Result type alias for street-explorer operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_truncates_preview() {
        let body = "x".repeat(2_000);
        match Error::malformed("expected value", &body) {
            Error::MalformedResponse { preview, reason } => {
                assert_eq!(preview.len(), 500);
                assert_eq!(reason, "expected value");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_display_includes_body_head() {
        let err = Error::malformed("not an array", "<html>ngrok error</html>");
        assert!(err.to_string().contains("<html>ngrok error"));
    }
}
