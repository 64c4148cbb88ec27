//! The `send` subcommand: DSN resolution and event lookback.
//!
//! Capturing events is a write operation and stays with the SDKs; this
//! command resolves the project's public DSN so one can be sent, and can
//! wait for a given event id to become readable using the bounded
//! lookback retry.

use serde_json::{Map, Value};
use sntr_api::{Error, Options, schema, wait_for_event};
use sntr_config::Config;

use crate::api_client;
use crate::error::Result;
use crate::get::show_organization_event;

/// Runs the `send` subcommand.
///
/// # Errors
///
/// [`crate::CliError::MissingToken`] without a configured token; gateway
/// errors from the keys endpoint; and, when waiting, the lookback's final
/// error if the event never becomes readable.
pub async fn run(
    config: &Config,
    organization: &str,
    project: &str,
    wait: Option<&str>,
    options: Options,
) -> Result<()> {
    let client = api_client(config, options)?;

    let path = format!("projects/{organization}/{project}/keys");
    let Some(keys) = client.get_multiple(&path).await? else {
        return Ok(());
    };
    let dsn = public_dsn(&keys)?;
    println!("{dsn}");
    eprintln!("Capturing events is not supported here; send one with an SDK using this DSN.");

    if let Some(event) = wait {
        eprintln!("Waiting for event {event} to become readable...");
        wait_for_event(|| show_organization_event(&client, organization, event)).await?;
    }
    Ok(())
}

/// Extracts the public DSN from the first client key.
fn public_dsn(keys: &[Map<String, Value>]) -> sntr_api::Result<String> {
    let first = keys
        .first()
        .ok_or_else(|| Error::malformed("project has no client keys"))?;
    let dsn = schema::object(schema::field(first, "dsn", "client key")?, "client key dsn")?;
    Ok(schema::string_field(dsn, "public", "dsn.public")?.to_string())
}
