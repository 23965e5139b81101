//! Medical record upload types.

use serde_json::{Map, Value};

use super::FileAttachment;

/// Labels attached to every uploaded record.
pub const RECORD_LABELS: &[&str] = &["healthcare"];

/// Tags attached to every uploaded record.
pub const RECORD_TAGS: &[&str] = &["medical_record"];

/// Input of `POST /api/blockchain/store`.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalRecordUpload {
    pub file: FileAttachment,
    pub metadata: Map<String, Value>,
    pub patient_id: Option<String>,
}

impl MedicalRecordUpload {
    pub fn new(file: FileAttachment) -> Self {
        Self {
            file,
            metadata: Map::new(),
            patient_id: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn with_patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    /// Explicit patient id, else the metadata's `patientId` string.
    ///
    /// Empty strings count as missing at both levels.
    pub fn effective_patient_id(&self) -> Option<&str> {
        self.patient_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| {
                self.metadata
                    .get("patientId")
                    .and_then(Value::as_str)
                    .filter(|id| !id.is_empty())
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn upload() -> MedicalRecordUpload {
        MedicalRecordUpload::new(FileAttachment::new(b"%PDF".to_vec(), "lab.pdf", "application/pdf"))
    }

    #[test]
    fn test_explicit_patient_id_wins() {
        let mut metadata = Map::new();
        metadata.insert("patientId".into(), json!("from-metadata"));

        let upload = upload().with_metadata(metadata).with_patient_id("explicit");
        assert_eq!(upload.effective_patient_id(), Some("explicit"));
    }

    #[test]
    fn test_patient_id_from_metadata() {
        let mut metadata = Map::new();
        metadata.insert("patientId".into(), json!("p-42"));

        let upload = upload().with_metadata(metadata);
        assert_eq!(upload.effective_patient_id(), Some("p-42"));
    }

    #[test]
    fn test_empty_explicit_id_falls_back_to_metadata() {
        let mut metadata = Map::new();
        metadata.insert("patientId".into(), json!("p-42"));

        let upload = upload().with_metadata(metadata).with_patient_id("");
        assert_eq!(upload.effective_patient_id(), Some("p-42"));
    }

    #[test]
    fn test_empty_metadata_id_is_ignored() {
        let mut metadata = Map::new();
        metadata.insert("patientId".into(), json!(""));

        assert!(upload().with_metadata(metadata).effective_patient_id().is_none());
    }

    #[test]
    fn test_no_patient_id() {
        assert!(upload().effective_patient_id().is_none());
    }
}
