//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── api: ApiConfig        # Base URL, timeout, user agent
//! ├── session_file: PathBuf # Where the token and user profile persist
//! ├── summary: bool         # Condense diagnosis output
//! └── command: Command      # The operation to run
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use swasthya_core::{FileStore, SessionStorage};
use swasthya_reqwest::{ApiClient, ApiConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::command::Command;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Default location of the persisted session.
pub const DEFAULT_SESSION_FILE: &str = ".swasthya/session.json";

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "swasthya")]
#[command(about = "Command-line client for the Swasthya health platform")]
#[command(version)]
pub struct Cli {
    /// Backend connection configuration.
    #[clap(flatten)]
    pub api: ApiConfig,

    /// File holding the persisted session
    #[arg(
        long,
        env = "SWASTHYA_SESSION_FILE",
        default_value = DEFAULT_SESSION_FILE,
        global = true
    )]
    pub session_file: PathBuf,

    /// Print a condensed summary instead of the raw diagnosis response
    #[arg(long, global = true)]
    pub summary: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments so its values can
    /// serve as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs are written to stderr so stdout carries only command output.
    pub fn init_tracing() -> anyhow::Result<()> {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.api.validate().context("invalid API configuration")?;
        Ok(())
    }

    /// Creates the API client bound to the file-backed session.
    pub fn create_client(&self) -> swasthya_core::Result<ApiClient> {
        let session = SessionStorage::new(FileStore::new(self.session_file.clone()));
        ApiClient::with_session(self.api.clone(), session)
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            api_url = %self.api.base_url(),
            http_timeout_secs = ?self.api.http_timeout,
            user_agent = %self.api.effective_user_agent(),
            session_file = %self.session_file.display(),
            "Client configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
