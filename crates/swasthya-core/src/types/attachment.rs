//! Files sent through the multipart endpoints.

use std::fmt;
use std::path::Path;

use crate::{Error, ErrorKind, Result};

/// MIME type used when nothing better is known.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// File name used for image uploads without a usable name.
pub const DEFAULT_IMAGE_NAME: &str = "image.jpg";

/// In-memory file part of a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl fmt::Debug for FileAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileAttachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

impl FileAttachment {
    pub fn new(
        bytes: impl Into<Vec<u8>>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Reads a file from disk.
    ///
    /// Without an explicit `mime_type` one is guessed from the extension.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when the file cannot be read.
    pub async fn from_path(path: impl AsRef<Path>, mime_type: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            Error::from_source(ErrorKind::InvalidInput, err)
                .with_status_code(400)
                .with_message(format!("cannot read {}", path.display()))
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_IMAGE_NAME)
            .to_owned();
        let mime_type = mime_type
            .map(str::to_owned)
            .unwrap_or_else(|| guess_mime_type(path).to_owned());

        Ok(Self {
            bytes,
            file_name,
            mime_type,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Guesses a MIME type from common medical upload extensions.
pub fn guess_mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("pdf") => "application/pdf",
        Some("dcm") => "application/dicom",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        _ => DEFAULT_MIME_TYPE,
    }
}
