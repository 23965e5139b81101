//! Request and response types of the backend endpoints.

mod ai;
mod attachment;
mod auth;
mod records;

pub use ai::{
    DiagnosisResponse, DiagnosisSummary, ImageAnalysis, ImageAnalysisResponse, Severity,
    Suggestion, SuggestionSet, SymptomsAnalysisResponse, SymptomsRequest,
};
pub use attachment::{DEFAULT_IMAGE_NAME, DEFAULT_MIME_TYPE, FileAttachment, guess_mime_type};
pub use auth::{DEFAULT_ROLE, LoginRequest, MIN_PASSWORD_LEN, RegisterRequest};
pub use records::{MedicalRecordUpload, RECORD_LABELS, RECORD_TAGS};
