//! sntr - quick command-line access to your data in Sentry.
//!
//! This is the main binary. It parses the command line, dispatches into
//! [`sntr_cli`], and maps errors to the process exit code. Usage errors
//! additionally print the usage text for the `get` subcommand.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use sntr_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match sntr_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            if err.is_usage() {
                let mut command = Cli::command();
                if let Some(get) = command.find_subcommand_mut("get") {
                    eprintln!("{}", get.render_usage());
                }
            }
            ExitCode::FAILURE
        }
    }
}
