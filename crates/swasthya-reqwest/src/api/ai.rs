//! AI diagnosis endpoints.

use reqwest::multipart::{Form, Part};
use swasthya_core::types::{
    DiagnosisResponse, FileAttachment, ImageAnalysisResponse, SymptomsAnalysisResponse,
    SymptomsRequest,
};
use swasthya_core::{Error, ErrorKind, Result};

use super::TRACING_TARGET;
use crate::connect::ApiClient;

pub const DIAGNOSE_PATH: &str = "/api/ai/diagnose";
pub const ANALYZE_SYMPTOMS_PATH: &str = "/api/ai/analyze-symptoms";
pub const ANALYZE_IMAGE_PATH: &str = "/api/ai/analyze-image";

impl ApiClient {
    /// Requests a diagnosis for a list of symptoms.
    ///
    /// Symptoms are sent as given; use [`SymptomsRequest::from_input`] to
    /// normalize free-form input first.
    pub async fn diagnose<S>(
        &self,
        symptoms: &[S],
        description: Option<&str>,
    ) -> Result<DiagnosisResponse>
    where
        S: AsRef<str>,
    {
        let request = symptoms_request(symptoms, description);
        tracing::debug!(
            target: TRACING_TARGET,
            symptom_count = request.symptoms.len(),
            "Requesting diagnosis"
        );
        self.post(DIAGNOSE_PATH, &request).await
    }

    /// Requests a free-text analysis for a list of symptoms.
    pub async fn analyze_symptoms<S>(
        &self,
        symptoms: &[S],
        description: Option<&str>,
    ) -> Result<SymptomsAnalysisResponse>
    where
        S: AsRef<str>,
    {
        let request = symptoms_request(symptoms, description);
        tracing::debug!(
            target: TRACING_TARGET,
            symptom_count = request.symptoms.len(),
            "Requesting symptom analysis"
        );
        self.post(ANALYZE_SYMPTOMS_PATH, &request).await
    }

    /// Uploads an image for analysis as the `image` multipart part.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when the attachment's MIME type is
    /// not a valid media type.
    pub async fn analyze_image(&self, attachment: FileAttachment) -> Result<ImageAnalysisResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            file_name = %attachment.file_name,
            mime_type = %attachment.mime_type,
            size_bytes = attachment.len(),
            "Uploading image for analysis"
        );

        let form = Form::new().part("image", file_part(attachment)?);
        self.post_multipart(ANALYZE_IMAGE_PATH, form).await
    }
}

fn symptoms_request<S: AsRef<str>>(symptoms: &[S], description: Option<&str>) -> SymptomsRequest {
    SymptomsRequest::new(
        symptoms.iter().map(|s| s.as_ref().to_owned()).collect(),
        description.map(str::to_owned),
    )
}

/// Converts an attachment into a multipart file part.
pub(crate) fn file_part(attachment: FileAttachment) -> Result<Part> {
    let FileAttachment {
        bytes,
        file_name,
        mime_type,
    } = attachment;

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(&mime_type)
        .map_err(|err| {
            Error::from_source(ErrorKind::InvalidInput, err)
                .with_status_code(400)
                .with_message(format!("invalid MIME type {mime_type:?}"))
        })
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;
    use swasthya_core::types::{DiagnosisSummary, Severity};
    use swasthya_test::{MockBackend, MockResponse, fixtures};

    use super::*;
    use crate::ApiConfig;

    fn client_for(backend: &MockBackend) -> ApiClient {
        ApiClient::new(ApiConfig::new(backend.url())).unwrap()
    }

    #[tokio::test]
    async fn test_diagnose_decodes_response() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                DIAGNOSE_PATH,
                MockResponse::ok(fixtures::diagnosis("Migraine", 0.82)),
            )
            .await;

        let client = client_for(&backend);
        client.session().set_token("tok123").await.unwrap();
        let response = client.diagnose(&["headache", "fever"], None).await.unwrap();

        assert!(response.success);
        let summary = DiagnosisSummary::from(&response);
        assert_eq!(summary.condition, "Migraine");
        assert_eq!(summary.severity, Severity::Low);

        let request = backend.last_request().await.unwrap();
        assert_eq!(request.json(), Some(json!({ "symptoms": ["headache", "fever"] })));
        assert_eq!(request.authorization(), Some("Bearer tok123"));
    }

    #[tokio::test]
    async fn test_diagnose_tolerates_null_fields() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                DIAGNOSE_PATH,
                MockResponse::ok(json!({
                    "diagnosis": {
                        "suggestions": [{ "condition": "Migraine", "probability": null }]
                    }
                })),
            )
            .await;
        backend
            .mock(
                Method::POST,
                ANALYZE_SYMPTOMS_PATH,
                MockResponse::ok(json!({ "success": false, "analysis": null })),
            )
            .await;

        let client = client_for(&backend);
        let response = client.diagnose(&["headache"], None).await.unwrap();
        assert_eq!(response.diagnosis.suggestions[0].condition, "Migraine");
        assert_eq!(response.diagnosis.suggestions[0].probability, 0.0);

        let response = client.analyze_symptoms(&["headache"], None).await.unwrap();
        assert!(!response.success);
        assert!(response.analysis.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_diagnose_rejected_symptoms() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                DIAGNOSE_PATH,
                MockResponse::json(400, fixtures::error_envelope("invalid symptoms")),
            )
            .await;

        let client = client_for(&backend);
        let error = client.diagnose(&["headache", "fever"], None).await.unwrap_err();

        assert_eq!(error.message(), "invalid symptoms");
        assert_eq!(error.status_code, 400);
        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert_eq!(error.payload, Some(json!({ "error": "invalid symptoms" })));
    }

    #[tokio::test]
    async fn test_analyze_symptoms_sends_description() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                ANALYZE_SYMPTOMS_PATH,
                MockResponse::ok(json!({
                    "success": true,
                    "analysis": { "suggestions": [], "analysis": "Unclear." },
                    "disclaimer": "Not medical advice."
                })),
            )
            .await;

        let client = client_for(&backend);
        let response = client
            .analyze_symptoms(&["cough"], Some("three days"))
            .await
            .unwrap();

        assert_eq!(response.disclaimer.as_deref(), Some("Not medical advice."));
        assert_eq!(DiagnosisSummary::from(&response), DiagnosisSummary::inconclusive());

        let request = backend.last_request().await.unwrap();
        assert_eq!(
            request.json(),
            Some(json!({ "symptoms": ["cough"], "description": "three days" }))
        );
    }

    #[tokio::test]
    async fn test_analyze_image_uploads_multipart() {
        let backend = MockBackend::start().await.unwrap();
        backend
            .mock(
                Method::POST,
                ANALYZE_IMAGE_PATH,
                MockResponse::ok(fixtures::image_analysis("Eczema", 0.55)),
            )
            .await;

        let client = client_for(&backend);
        client.session().set_token("tok123").await.unwrap();
        let attachment = FileAttachment::new(b"\x89PNG-bytes".to_vec(), "rash.png", "image/png");
        let response = client.analyze_image(attachment).await.unwrap();

        assert_eq!(response.analysis.diagnosis, "Eczema");

        let request = backend.last_request().await.unwrap();
        assert!(request.is_multipart());
        assert_eq!(request.content_type_count(), 1);
        assert_eq!(request.authorization(), Some("Bearer tok123"));

        let body = request.text();
        assert!(body.contains("name=\"image\""));
        assert!(body.contains("filename=\"rash.png\""));
        assert!(body.contains("Content-Type: image/png"));
    }

    #[tokio::test]
    async fn test_analyze_image_rejects_invalid_mime() {
        let backend = MockBackend::start().await.unwrap();
        let client = client_for(&backend);

        let attachment = FileAttachment::new(vec![1, 2, 3], "x.bin", "not a mime");
        let error = client.analyze_image(attachment).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert_eq!(error.status_code, 400);
        assert!(backend.requests().await.is_empty());
    }
}
