//! Command-line surface for the sntr tool.
//!
//! This crate defines the clap command tree and the command
//! implementations on top of [`sntr_api`] and [`sntr_config`].
//!
//! # Overview
//!
//! - [`Cli`] / [`Command`]: the argument grammar
//! - [`resolve`]: classification of free-form resource identifiers
//! - [`get`]: resource fetching and rendering
//! - [`login`]: token entry, verification, and persistence
//! - [`send`]: DSN resolution and event lookback
//! - [`error`]: the command-level error taxonomy
//!
//! # Resource grammar
//!
//! The `get` subcommand takes a single loosely-structured identifier:
//!
//! ```text
//! sntr get orgs                        list organizations
//! sntr get projects                    list projects
//! sntr get orgs/acme/projects          list acme's projects
//! sntr get acme/backend                list backend's issues
//! sntr get acme/<32-hex id>            fetch one event
//! sntr get acme/backend/<32-hex id>    fetch one event via its project
//! sntr get -q "is:unresolved" acme     search events like in Discover
//! ```

use clap::{Parser, Subcommand};

use sntr_api::{Client, Options};
use sntr_config::Config;

pub mod error;
pub mod get;
pub mod login;
pub mod resolve;
pub mod send;

// Re-export primary types at crate root for convenience
pub use error::{CliError, Result};
pub use resolve::Resource;

/// The sntr tool gives you quick access to your data in Sentry.
#[derive(Debug, Parser)]
#[command(name = "sntr", version, about = "Sentry command-line tool")]
pub struct Cli {
    /// Write wire-level request and response headers to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print raw JSON responses instead of formatted text.
    #[arg(long, global = true)]
    pub json: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Get a resource: organizations, projects, issues, or events.
    Get {
        /// Resource identifier, e.g. `orgs`, `acme/backend`, or
        /// `acme/<event id>`.
        resource: Option<String>,

        /// Search events like in Discover; the resource argument is the
        /// organization slug.
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Login to Sentry with an authentication token.
    Login {
        /// Force a new login even if a token is already configured.
        #[arg(short, long)]
        force: bool,
    },

    /// Resolve a project's DSN for sending test events.
    Send {
        /// Organization slug.
        organization: String,

        /// Project slug.
        project: String,

        /// After printing the DSN, wait for this event id to become
        /// readable.
        #[arg(long, value_name = "EVENT_ID")]
        wait: Option<String>,
    },

    /// Manage configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// `sntr config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the full path to the configuration file.
    Path,
}

/// Loads the configuration and runs the parsed command.
///
/// # Errors
///
/// Any [`CliError`]; the binary maps these to a non-zero exit code and
/// prints usage text for usage errors.
pub async fn run(cli: Cli) -> Result<()> {
    let options = Options {
        debug: cli.debug,
        raw_json: cli.json,
    };
    let mut config = Config::load()?;

    match cli.command {
        Command::Get { resource, query } => {
            get::run(&config, resource.as_deref(), query.as_deref(), options).await
        }
        Command::Login { force } => login::run(&mut config, force).await,
        Command::Send {
            organization,
            project,
            wait,
        } => send::run(&config, &organization, &project, wait.as_deref(), options).await,
        Command::Config(ConfigCommand::Path) => {
            println!("{}", sntr_config::persistence::default_config_path()?.display());
            Ok(())
        }
    }
}

/// Builds an API client, failing fast when no token is configured.
pub(crate) fn api_client(config: &Config, options: Options) -> Result<Client> {
    let credential = config.credential();
    if !credential.is_present() {
        return Err(CliError::MissingToken);
    }
    Ok(Client::new(config.api_root(), credential.header(), options)?)
}
