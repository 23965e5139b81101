#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;

use std::process;

use anyhow::Context;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "swasthya_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "swasthya_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "swasthya_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        let error = format!("{error:#}");
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            error = %error,
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing()?;
    cli.log();

    cli.validate()?;
    let client = cli.create_client().context("failed to create API client")?;

    cli.command.execute(&client, cli.summary).await
}
