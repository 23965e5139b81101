//! Medical record storage and verification endpoints.

use reqwest::multipart::Form;
use swasthya_core::types::{MedicalRecordUpload, RECORD_LABELS, RECORD_TAGS};
use swasthya_core::{ApiEnvelope, Result};
use url::form_urlencoded;

use super::TRACING_TARGET;
use super::ai::file_part;
use crate::connect::ApiClient;
use crate::error::TransportError;

pub const STORE_RECORD_PATH: &str = "/api/blockchain/store";
pub const PATIENT_RECORDS_PATH: &str = "/api/blockchain/records";
pub const VERIFY_RECORD_PATH: &str = "/api/blockchain/verify";

impl ApiClient {
    /// Uploads a medical record file with its metadata.
    ///
    /// The form carries the `file` part, the effective `patientId` when one
    /// is known, and `labels`, `tags` and `metadata` as JSON strings.
    pub async fn upload_medical_record(&self, upload: MedicalRecordUpload) -> Result<ApiEnvelope> {
        let patient_id = upload.effective_patient_id().map(str::to_owned);
        let labels = serde_json::to_string(RECORD_LABELS).map_err(TransportError::from)?;
        let tags = serde_json::to_string(RECORD_TAGS).map_err(TransportError::from)?;
        let metadata = serde_json::to_string(&upload.metadata).map_err(TransportError::from)?;

        tracing::debug!(
            target: TRACING_TARGET,
            file_name = %upload.file.file_name,
            size_bytes = upload.file.len(),
            has_patient_id = patient_id.is_some(),
            "Uploading medical record"
        );

        let mut form = Form::new().part("file", file_part(upload.file)?);
        if let Some(patient_id) = patient_id {
            form = form.text("patientId", patient_id);
        }
        let form = form
            .text("labels", labels)
            .text("tags", tags)
            .text("metadata", metadata);

        self.post_multipart(STORE_RECORD_PATH, form).await
    }

    /// Lists the stored records of a patient.
    pub async fn patient_records(&self, patient_id: &str) -> Result<ApiEnvelope> {
        let endpoint = with_query(PATIENT_RECORDS_PATH, "patientId", patient_id);
        self.get(&endpoint).await
    }

    /// Checks the integrity of a stored record.
    pub async fn verify_medical_record(&self, file_id: &str) -> Result<ApiEnvelope> {
        let endpoint = with_query(VERIFY_RECORD_PATH, "fileId", file_id);
        self.get(&endpoint).await
    }
}

fn with_query(path: &str, key: &str, value: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("{path}?{query}")
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::{Map, json};
    use swasthya_core::types::FileAttachment;
    use swasthya_test::{MockBackend, MockResponse};

    use super::*;
    use crate::ApiConfig;

    fn client_for(backend: &MockBackend) -> ApiClient {
        ApiClient::new(ApiConfig::new(backend.url())).unwrap()
    }

    fn lab_report() -> FileAttachment {
        FileAttachment::new(b"%PDF-1.7 lab".to_vec(), "lab.pdf", "application/pdf")
    }

    #[test]
    fn test_with_query_encodes_value() {
        assert_eq!(
            with_query(PATIENT_RECORDS_PATH, "patientId", "a b&c"),
            "/api/blockchain/records?patientId=a+b%26c"
        );
    }

    #[tokio::test]
    async fn test_upload_medical_record_form() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                STORE_RECORD_PATH,
                MockResponse::ok(json!({ "success": true, "fileId": "f-1" })),
            )
            .await;

        let client = client_for(&backend);
        client.session().set_token("tok123").await.unwrap();

        let mut metadata = Map::new();
        metadata.insert("patientId".into(), json!("p-42"));
        metadata.insert("kind".into(), json!("lab"));
        let upload = MedicalRecordUpload::new(lab_report()).with_metadata(metadata);

        let envelope = client.upload_medical_record(upload).await.unwrap();
        assert_eq!(envelope.field("fileId"), Some(&json!("f-1")));

        let request = backend.last_request().await.unwrap();
        assert!(request.is_multipart());
        assert_eq!(request.authorization(), Some("Bearer tok123"));

        let body = request.text();
        assert!(body.contains("name=\"file\"; filename=\"lab.pdf\""));
        assert!(body.contains("name=\"patientId\"\r\n\r\np-42\r\n"));
        assert!(body.contains("name=\"labels\"\r\n\r\n[\"healthcare\"]\r\n"));
        assert!(body.contains("name=\"tags\"\r\n\r\n[\"medical_record\"]\r\n"));
        assert!(body.contains("\"kind\":\"lab\""));
    }

    #[tokio::test]
    async fn test_upload_without_patient_id() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(Method::POST, STORE_RECORD_PATH, MockResponse::ok(json!({ "success": true })))
            .await;

        let client = client_for(&backend);
        client
            .upload_medical_record(MedicalRecordUpload::new(lab_report()))
            .await
            .unwrap();

        let body = backend.last_request().await.unwrap().text();
        assert!(!body.contains("name=\"patientId\""));
        assert!(body.contains("name=\"metadata\"\r\n\r\n{}\r\n"));
    }

    #[tokio::test]
    async fn test_patient_records_query() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::GET,
                PATIENT_RECORDS_PATH,
                MockResponse::ok(json!({ "records": [{ "fileId": "f-1" }] })),
            )
            .await;

        let client = client_for(&backend);
        let envelope = client.patient_records("p 42").await.unwrap();

        assert_eq!(envelope.field("records"), Some(&json!([{ "fileId": "f-1" }])));
        let request = backend.last_request().await.unwrap();
        assert_eq!(request.path, PATIENT_RECORDS_PATH);
        assert_eq!(request.query.as_deref(), Some("patientId=p+42"));
    }

    #[tokio::test]
    async fn test_verify_missing_record() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::GET,
                VERIFY_RECORD_PATH,
                MockResponse::json(404, json!({ "error": "Record not found" })),
            )
            .await;

        let client = client_for(&backend);
        let error = client.verify_medical_record("f-404").await.unwrap_err();

        assert_eq!(error.message(), "Record not found");
        assert_eq!(error.status_code, 404);
        let request = backend.last_request().await.unwrap();
        assert_eq!(request.query.as_deref(), Some("fileId=f-404"));
    }
}
