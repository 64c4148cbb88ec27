//! Sentry API gateway for the sntr command-line tool.
//!
//! This crate performs authenticated, timeout-bounded GET requests against
//! a Sentry API root and decodes the results. It knows nothing about the
//! command line; callers construct a [`Client`] from an API root and an
//! authorization header and choose between decoded JSON values and raw
//! byte passthrough.
//!
//! # Overview
//!
//! - [`Client`]: endpoint building and authenticated GET with a 5-second
//!   timeout, optional wire tracing to stderr, and raw-JSON passthrough
//! - [`verify`]: token verification against the API root, with required
//!   scope checking
//! - [`wait_for_event`]: bounded retry with exponential backoff for
//!   reading back a freshly-sent event
//! - [`schema`]: checked field extraction over decoded JSON values
//! - [`Error`]: the error taxonomy for all of the above
//!
//! # Examples
//!
//! ```no_run
//! use sntr_api::{Client, Options};
//!
//! # async fn example() -> sntr_api::Result<()> {
//! let client = Client::new(
//!     "https://sentry.io/api/0",
//!     "Bearer d0a9f1e3c5...",
//!     Options::default(),
//! )?;
//!
//! if let Some(organizations) = client.get_multiple("organizations").await? {
//!     println!("{} organizations", organizations.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod lookback;
pub mod schema;
pub mod verify;

// Re-export primary types at crate root for convenience
pub use client::{Client, Options};
pub use error::{Error, Result};
pub use lookback::wait_for_event;
pub use verify::{REQUIRED_SCOPES, VerificationResult, verify};
