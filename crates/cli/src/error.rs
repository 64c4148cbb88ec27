//! Error types for the command-line surface.
//!
//! Usage errors are kept distinct from everything else: the binary prints
//! usage text for them instead of a bare error message.

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The resource argument could not be classified, or a required
    /// argument is missing. Shown together with usage help.
    #[error("{0}")]
    Usage(String),

    /// A command that talks to the API was run without a configured token.
    #[error("missing authentication token: run \"sntr login\" to set one up")]
    MissingToken,

    /// A freshly-entered token failed verification and was discarded.
    #[error("token {token} could not be verified: {source}")]
    TokenRejected {
        /// Obfuscated form of the rejected token.
        token: String,
        /// The verification failure.
        #[source]
        source: sntr_api::Error,
    },

    /// A configuration error.
    #[error(transparent)]
    Config(#[from] sntr_config::ConfigError),

    /// An API error.
    #[error(transparent)]
    Api(#[from] sntr_api::Error),

    /// A terminal I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns whether this error should be shown with usage help.
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

/// A specialized Result type for command execution.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_displays_its_message_verbatim() {
        let err = CliError::Usage("unknown resource: ???".to_string());
        assert_eq!(err.to_string(), "unknown resource: ???");
        assert!(err.is_usage());
    }

    #[test]
    fn missing_token_points_at_login() {
        let err = CliError::MissingToken;
        assert!(err.to_string().contains("sntr login"));
        assert!(!err.is_usage());
    }

    #[test]
    fn token_rejected_shows_obfuscated_token_and_cause() {
        let err = CliError::TokenRejected {
            token: "abcd***ijkl".to_string(),
            source: sntr_api::Error::RequestFailed {
                status: 401,
                reason: "Unauthorized".to_string(),
            },
        };
        let message = err.to_string();
        assert!(message.contains("abcd***ijkl"));
        assert!(message.contains("401"));
    }
}
