//! Token verification against the identity endpoint.
//!
//! Verification fetches the bare API root, extracts the authenticated
//! user's email, and records which of the required read scopes the token
//! is missing. Missing scopes do not fail verification; callers print
//! them as a warning.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::warn;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::schema;

/// Scopes the tool needs for all read operations.
pub const REQUIRED_SCOPES: [&str; 3] = ["org:read", "project:read", "event:read"];

/// The outcome of a successful token verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Email of the authenticated user.
    pub user: String,
    /// Scopes granted to the token.
    pub scopes: HashSet<String>,
}

impl VerificationResult {
    /// Returns the required scopes the token does not have, in the fixed
    /// order of [`REQUIRED_SCOPES`].
    #[must_use]
    pub fn missing_scopes(&self) -> Vec<String> {
        REQUIRED_SCOPES
            .iter()
            .filter(|scope| !self.scopes.contains(**scope))
            .map(ToString::to_string)
            .collect()
    }
}

/// Verifies the client's token against the identity endpoint.
///
/// # Errors
///
/// A failed HTTP call (e.g. a rejected token) propagates as is;
/// [`Error::MalformedResponse`] if `user.email` or `auth.scopes` is
/// absent or of the wrong shape.
pub async fn verify(client: &Client) -> Result<VerificationResult> {
    let Some(identity) = client.get_single("").await? else {
        // Raw-JSON mode streams the body instead of decoding it; there is
        // nothing to verify against.
        return Err(Error::malformed("identity response was not decoded"));
    };
    let result = parse_identity(&identity)?;
    if !result.missing_scopes().is_empty() {
        warn!(missing = ?result.missing_scopes(), "token is missing required scopes");
    }
    Ok(result)
}

/// Extracts user and scopes from a decoded identity response.
fn parse_identity(identity: &Map<String, Value>) -> Result<VerificationResult> {
    let user = schema::object(schema::field(identity, "user", "identity response")?, "user")?;
    let email = schema::string_field(user, "email", "user.email")?;

    let auth = schema::object(schema::field(identity, "auth", "identity response")?, "auth")?;
    let scope_values = schema::array(schema::field(auth, "scopes", "auth")?, "auth.scopes")?;
    let mut scopes = HashSet::with_capacity(scope_values.len());
    for scope in scope_values {
        scopes.insert(schema::string(scope, "auth.scopes entry")?.to_string());
    }

    Ok(VerificationResult {
        user: email.to_string(),
        scopes,
    })
}
