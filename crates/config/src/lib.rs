//! Configuration management for the sntr command-line tool.
//!
//! This crate handles loading, validating, and persisting configuration,
//! and owns the credential store that derives the `Authorization` header
//! from the configured token.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`credential`]: Auth token storage, header derivation, and obfuscation
//! - [`persistence`]: Config file location, reading, and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Config File
//!
//! Configuration lives at `<user-config-dir>/sntr/config.json` (typically
//! `~/.config/sntr/config.json` on Linux). It is a JSON object with at
//! least `auth_token`, and optionally `sentry_url` for self-hosted
//! installations:
//!
//! ```json
//! {
//!   "auth_token": "d0a9f1e3c5...",
//!   "sentry_url": "https://sentry.example.com"
//! }
//! ```
//!
//! A missing file loads as an empty configuration so that `sntr login`
//! can create it; commands that talk to the API fail fast when no token
//! is configured.
//!
//! # Examples
//!
//! ```no_run
//! use sntr_config::Config;
//!
//! # fn example() -> sntr_config::Result<()> {
//! let config = Config::load()?;
//! println!("API root: {}", config.api_root());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod credential;
pub mod error;
pub mod persistence;

// Re-export primary types at crate root for convenience
pub use config::{Config, Organization, Project};
pub use credential::Credential;
pub use error::{ConfigError, Result};
