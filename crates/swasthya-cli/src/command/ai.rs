//! AI diagnosis commands.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use serde::Serialize;
use swasthya_core::types::{DiagnosisSummary, FileAttachment, SymptomsRequest};
use swasthya_reqwest::ApiClient;

use super::print_json;

#[derive(Debug, Clone, Args)]
pub struct SymptomsArgs {
    /// Symptom; repeat or separate with commas
    #[arg(short, long = "symptom", value_delimiter = ',')]
    pub symptoms: Vec<String>,

    /// Free-text description; used as the symptom when none is given
    #[arg(short, long)]
    pub description: Option<String>,
}

impl SymptomsArgs {
    fn into_request(self) -> anyhow::Result<SymptomsRequest> {
        let request = SymptomsRequest::from_input(&self.symptoms, self.description.as_deref());
        if request.is_empty() {
            bail!("at least one symptom or a description is required");
        }
        Ok(request)
    }
}

#[derive(Debug, Clone, Args)]
pub struct ImageArgs {
    /// Image file to analyze
    pub path: PathBuf,

    /// MIME type; guessed from the extension when omitted
    #[arg(long)]
    pub mime_type: Option<String>,
}

pub async fn diagnose(
    client: &ApiClient,
    args: SymptomsArgs,
    summary: bool,
) -> anyhow::Result<()> {
    let request = args.into_request()?;
    let response = client
        .diagnose(&request.symptoms, request.description.as_deref())
        .await
        .context("diagnosis failed")?;
    print_result(&response, summary.then(|| DiagnosisSummary::from(&response)))
}

pub async fn analyze_symptoms(
    client: &ApiClient,
    args: SymptomsArgs,
    summary: bool,
) -> anyhow::Result<()> {
    let request = args.into_request()?;
    let response = client
        .analyze_symptoms(&request.symptoms, request.description.as_deref())
        .await
        .context("symptom analysis failed")?;
    print_result(&response, summary.then(|| DiagnosisSummary::from(&response)))
}

pub async fn analyze_image(
    client: &ApiClient,
    args: ImageArgs,
    summary: bool,
) -> anyhow::Result<()> {
    let attachment = FileAttachment::from_path(&args.path, args.mime_type.as_deref()).await?;
    let response = client
        .analyze_image(attachment)
        .await
        .context("image analysis failed")?;
    print_result(&response, summary.then(|| DiagnosisSummary::from(&response)))
}

fn print_result<T: Serialize>(response: &T, summary: Option<DiagnosisSummary>) -> anyhow::Result<()> {
    match summary {
        Some(summary) => print_json(&summary),
        None => print_json(response),
    }
}
