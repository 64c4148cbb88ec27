//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct: the on-disk settings
//! (`auth_token`, `sentry_url`) plus the fields the tool manages itself
//! (`user`, `organizations`, `active_organization`).

use serde::{Deserialize, Serialize};

use crate::credential::Credential;
use crate::error::Result;
use crate::persistence::{default_config_path, read_config_file, write_config_file};

/// Default API target for hosted Sentry.
pub const DEFAULT_SENTRY_URL: &str = "https://sentry.io";

/// The main configuration for the sntr tool.
///
/// # Examples
///
/// ```
/// use sntr_config::Config;
///
/// let config = Config {
///     auth_token: "d0a9f1e3c5b7a9d1f3e5c7b9d1f3e5c7".to_string(),
///     ..Default::default()
/// };
/// assert!(config.has_auth_token());
/// assert_eq!(config.api_root(), "https://sentry.io/api/0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Authentication token, see
    /// <https://sentry.io/settings/account/api/auth-tokens/>.
    #[serde(default)]
    pub auth_token: String,

    /// `https://sentry.io` or an alternative target for API calls.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sentry_url: String,

    /// Email of the authenticated user; set by token verification.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,

    /// Organizations known from previous sessions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<Organization>,

    /// Slug of the organization used when none is given explicitly.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub active_organization: String,
}

impl Config {
    /// Loads configuration from the default file location.
    ///
    /// A missing file is not an error: it loads as the default (empty)
    /// configuration so that `login` can create it.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or
    /// if a config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = default_config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        read_config_file(path)
    }

    /// Saves the configuration to the default file location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(default_config_path()?)
    }

    /// Saves the configuration to a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Returns the configured Sentry URL, falling back to the default.
    #[must_use]
    pub fn sentry_url(&self) -> &str {
        if self.sentry_url.is_empty() {
            DEFAULT_SENTRY_URL
        } else {
            &self.sentry_url
        }
    }

    /// Returns the API root (`<sentry-url>/api/0`).
    #[must_use]
    pub fn api_root(&self) -> String {
        format!("{}/api/0", self.sentry_url())
    }

    /// Returns whether a non-empty auth token is configured.
    #[must_use]
    pub fn has_auth_token(&self) -> bool {
        !self.auth_token.is_empty()
    }

    /// Builds the credential store for this configuration.
    #[must_use]
    pub fn credential(&self) -> Credential {
        Credential::new(self.auth_token.clone())
    }
}

/// An organization known to the authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Short human-readable identifier.
    pub slug: String,
    /// Projects under this organization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
}

/// A project within an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Short human-readable identifier.
    pub slug: String,
}
