//! The `login` subcommand.
//!
//! Prompts for an authentication token, verifies it against the identity
//! endpoint, and persists it on success. A token that fails verification
//! is discarded. Verification may report missing read scopes; that is a
//! warning on stderr, not a failure.
//!
//! Terminal I/O is injected so the prompt loop is testable.

use std::io::{BufRead, Write};

use sntr_api::{Client, Options, VerificationResult, verify};
use sntr_config::{Config, Credential};

use crate::error::{CliError, Result};

/// Runs the `login` subcommand against stdin/stdout.
///
/// # Errors
///
/// Returns an error if verification of a newly-entered token fails, or if
/// the configuration cannot be persisted.
pub async fn run(config: &mut Config, force: bool) -> Result<()> {
    run_with_io(config, force, std::io::stdin().lock(), std::io::stdout().lock()).await
}

/// [`run`] with explicit input and output streams.
///
/// # Errors
///
/// See [`run`].
pub async fn run_with_io(
    config: &mut Config,
    force: bool,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    let mut credential = config.credential();
    if credential.is_present() {
        print_info(config, &credential, &mut output).await?;
        if !force {
            return Ok(());
        }
    }

    writeln!(output, "You'll need an authentication token with read permissions.")?;
    writeln!(output, "Tokens are managed in https://sentry.io/settings/account/api/auth-tokens/.")?;
    let Some(token) = prompt_token(&mut input, &mut output)? else {
        // EOF before a token was entered; abort quietly.
        return Ok(());
    };
    credential.set_token(token);

    let client = Client::new(config.api_root(), credential.header(), Options::default())?;
    match verify(&client).await {
        Ok(result) => {
            if let Some(warning) = missing_scopes_warning(&credential, &result) {
                eprintln!("{warning}");
            }
            config.auth_token = credential.token().to_string();
            config.user = result.user;
            config.save()?;
            writeln!(
                output,
                "Logged in with token {} ({})",
                credential.obfuscated(),
                config.user
            )?;
            Ok(())
        }
        Err(source) => Err(CliError::TokenRejected {
            token: credential.obfuscated(),
            source,
        }),
    }
}

/// Prints the current login state. An already-configured token with no
/// known user is verified on the fly; a verification failure here only
/// means the state stays "not verified".
async fn print_info(config: &Config, credential: &Credential, output: &mut impl Write) -> Result<()> {
    let mut user = config.user.clone();
    if user.is_empty() {
        if let Ok(client) = Client::new(config.api_root(), credential.header(), Options::default())
        {
            if let Ok(result) = verify(&client).await {
                user = result.user;
            }
        }
    }
    if user.is_empty() {
        writeln!(output, "Logged in with token {} (not verified)", credential.obfuscated())?;
    } else {
        writeln!(output, "Logged in with token {} ({user})", credential.obfuscated())?;
    }
    Ok(())
}

/// Prompts until a non-empty token line is read. Returns `None` on EOF.
fn prompt_token(input: &mut impl BufRead, output: &mut impl Write) -> Result<Option<String>> {
    loop {
        write!(output, "Paste your token here: ")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let token = line.trim().to_string();
        if !token.is_empty() {
            return Ok(Some(token));
        }
    }
}

/// Formats the non-fatal warning for required scopes the token lacks.
fn missing_scopes_warning(
    credential: &Credential,
    result: &VerificationResult,
) -> Option<String> {
    let missing = result.missing_scopes();
    if missing.is_empty() {
        return None;
    }
    Some(format!(
        "Warning: authentication token {} missing required permissions: {}",
        credential.obfuscated(),
        missing.join(", ")
    ))
}
