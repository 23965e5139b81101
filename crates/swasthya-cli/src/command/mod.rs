//! Subcommands and their handlers.
//!
//! Each handler calls one client operation and prints the result as pretty
//! JSON to stdout.

mod ai;
mod auth;
mod records;

use clap::Subcommand;
use serde::Serialize;
use swasthya_reqwest::ApiClient;

use self::ai::{ImageArgs, SymptomsArgs};
use self::auth::{LoginArgs, RegisterArgs};
use self::records::{RecordsArgs, UploadArgs, VerifyArgs};

/// Operations exposed by the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in and persist the session
    Login(LoginArgs),
    /// Create an account and persist the session
    Register(RegisterArgs),
    /// Sign out, clearing the local session
    Logout,
    /// Show the signed-in user's profile from the server
    Me,
    /// Show the locally stored session
    Session,
    /// Request a diagnosis for a list of symptoms
    Diagnose(SymptomsArgs),
    /// Request a free-text analysis of symptoms
    AnalyzeSymptoms(SymptomsArgs),
    /// Upload an image for analysis
    AnalyzeImage(ImageArgs),
    /// Upload a medical record file
    UploadRecord(UploadArgs),
    /// List the stored records of a patient
    Records(RecordsArgs),
    /// Verify the integrity of a stored record
    Verify(VerifyArgs),
}

impl Command {
    /// Runs the command against the client.
    pub async fn execute(self, client: &ApiClient, summary: bool) -> anyhow::Result<()> {
        match self {
            Self::Login(args) => auth::login(client, args).await,
            Self::Register(args) => auth::register(client, args).await,
            Self::Logout => auth::logout(client).await,
            Self::Me => auth::me(client).await,
            Self::Session => auth::session(client).await,
            Self::Diagnose(args) => ai::diagnose(client, args, summary).await,
            Self::AnalyzeSymptoms(args) => ai::analyze_symptoms(client, args, summary).await,
            Self::AnalyzeImage(args) => ai::analyze_image(client, args, summary).await,
            Self::UploadRecord(args) => records::upload(client, args).await,
            Self::Records(args) => records::list(client, args).await,
            Self::Verify(args) => records::verify(client, args).await,
        }
    }
}

/// Prints a value as pretty JSON to stdout.
fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
