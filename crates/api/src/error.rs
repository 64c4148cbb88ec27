//! Error types for API operations.
//!
//! The taxonomy distinguishes transport failures, non-200 statuses,
//! undecodable bodies, and well-formed responses with an unexpected shape.
//! Callers rely on these distinctions: a 404 is retryable during event
//! lookback, a malformed response never is.

/// Errors that can occur during API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be performed (connection failure or timeout).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-200 status; the body is not parsed.
    #[error("API request failed with status: {status} {reason}")]
    RequestFailed {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical status text, e.g. `Not Found`.
        reason: String,
    },

    /// The response body was not valid JSON of the expected kind.
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A 200 response decoded fine but a required field is missing or has
    /// the wrong type.
    #[error("malformed API response: {context}")]
    MalformedResponse {
        /// What was being extracted when the mismatch was found.
        context: String,
    },

    /// Failed to write response bytes to the output stream.
    #[error("I/O error writing response: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds a [`Error::MalformedResponse`] with the given context.
    #[must_use]
    pub fn malformed(context: impl Into<String>) -> Self {
        Self::MalformedResponse {
            context: context.into(),
        }
    }

    /// Returns whether this error is an HTTP 404.
    ///
    /// Event lookback retries on this and nothing else.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RequestFailed { status: 404, .. })
    }
}

/// A specialized Result type for API operations.
pub type Result<T> = std::result::Result<T, Error>;
