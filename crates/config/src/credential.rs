//! Auth token storage and `Authorization` header derivation.
//!
//! The credential store keeps the token and its derived header in lockstep:
//! the header is recomputed synchronously on every token assignment, so no
//! stale-header window is ever observable. The full token is never printed;
//! display always goes through [`Credential::obfuscated`].

/// Tokens shorter than this are fully masked when displayed.
const OBFUSCATION_MIN_LEN: usize = 16;

/// An authentication token and its derived `Authorization` header value.
///
/// # Examples
///
/// ```
/// use sntr_config::Credential;
///
/// let credential = Credential::new("abcd1234efgh5678ijkl");
/// assert_eq!(credential.header(), "Bearer abcd1234efgh5678ijkl");
/// assert_eq!(credential.obfuscated(), "abcd***ijkl");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    header: String,
}

impl Credential {
    /// Creates a credential from a token, deriving the header immediately.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        let mut credential = Self {
            token: String::new(),
            header: String::new(),
        };
        credential.set_token(token);
        credential
    }

    /// Replaces the stored token and recomputes the header.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
        self.header = format!("Bearer {}", self.token);
    }

    /// Returns the raw token.
    ///
    /// Callers must not log or print this; use [`Self::obfuscated`] for
    /// display.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the `Authorization` header value (`Bearer <token>`).
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Returns whether a non-empty token is stored.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.token.is_empty()
    }

    /// Returns a display-safe form of the token.
    ///
    /// Tokens shorter than 16 bytes render as the literal mask `***`;
    /// longer tokens keep their first and last four characters around the
    /// mask.
    #[must_use]
    pub fn obfuscated(&self) -> String {
        let token = &self.token;
        if token.len() < OBFUSCATION_MIN_LEN {
            return "***".to_string();
        }
        match (token.get(..4), token.get(token.len() - 4..)) {
            (Some(head), Some(tail)) => format!("{head}***{tail}"),
            // Multi-byte boundary; mask everything rather than split a char.
            _ => "***".to_string(),
        }
    }
}
