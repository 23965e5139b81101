//! Medical record commands.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use serde_json::{Map, Value};
use swasthya_core::types::{FileAttachment, MedicalRecordUpload};
use swasthya_reqwest::ApiClient;

use super::print_json;

#[derive(Debug, Clone, Args)]
pub struct UploadArgs {
    /// Record file to upload
    pub path: PathBuf,

    /// Patient the record belongs to
    #[arg(long)]
    pub patient_id: Option<String>,

    /// Metadata as a JSON object, e.g. '{"kind":"lab"}'
    #[arg(long)]
    pub metadata: Option<String>,

    /// MIME type; guessed from the extension when omitted
    #[arg(long)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct RecordsArgs {
    /// Patient whose records to list
    pub patient_id: String,
}

#[derive(Debug, Clone, Args)]
pub struct VerifyArgs {
    /// Identifier of the stored file
    pub file_id: String,
}

pub async fn upload(client: &ApiClient, args: UploadArgs) -> anyhow::Result<()> {
    let metadata = parse_metadata(args.metadata.as_deref())?;
    let file = FileAttachment::from_path(&args.path, args.mime_type.as_deref()).await?;

    let mut upload = MedicalRecordUpload::new(file).with_metadata(metadata);
    if let Some(patient_id) = args.patient_id {
        upload = upload.with_patient_id(patient_id);
    }

    let response = client
        .upload_medical_record(upload)
        .await
        .context("record upload failed")?;
    print_json(&response)
}

pub async fn list(client: &ApiClient, args: RecordsArgs) -> anyhow::Result<()> {
    let response = client
        .patient_records(&args.patient_id)
        .await
        .context("failed to list records")?;
    print_json(&response)
}

pub async fn verify(client: &ApiClient, args: VerifyArgs) -> anyhow::Result<()> {
    let response = client
        .verify_medical_record(&args.file_id)
        .await
        .context("record verification failed")?;
    print_json(&response)
}

fn parse_metadata(raw: Option<&str>) -> anyhow::Result<Map<String, Value>> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };

    match serde_json::from_str(raw).context("metadata is not valid JSON")? {
        Value::Object(map) => Ok(map),
        _ => bail!("metadata must be a JSON object"),
    }
}
