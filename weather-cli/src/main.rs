//! Binary crate for the `waybar-weather` status bar module.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Building the JSON logger (stderr, so stdout stays clean for the bar)
//! - Mapping failures to a non-zero exit status

use clap::Parser;
use std::process::ExitCode;
use tracing::instrument::WithSubscriber;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();

    // The logger is scoped to this run; nothing is installed globally.
    match cmd.run().with_subscriber(cli::logger(std::io::stderr)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
