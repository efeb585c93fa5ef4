//! Document text extraction.
//!
//! Two formats are supported, selected by file extension: PDF (`pdf-extract`) and
//! DOCX (`zip` + `quick-xml`). Uploaded bytes are staged in a `NamedTempFile` that
//! carries the format's extension; the file is removed when the guard drops, on
//! success and error paths alike.
//!
//! Both parsers are CPU-bound and synchronous. Callers in async context must run
//! `extract_upload` inside `tokio::task::spawn_blocking`.

pub mod docx;
pub mod pdf;

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file extension '{0}'")]
    UnsupportedFormat(String),

    #[error("failed to stage upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF could not be parsed: {0}")]
    Pdf(String),

    #[error("DOCX could not be parsed: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Picks the format from the lowercase extension of an uploaded file name.
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractionError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(ExtractionError::UnsupportedFormat(ext)),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

/// Writes the uploaded bytes to a temp file named `resume-*.{ext}`.
///
/// The returned guard owns the file; dropping it deletes the file.
pub fn stage_upload(bytes: &[u8], format: DocumentFormat) -> Result<NamedTempFile, ExtractionError> {
    let mut staged = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(&format!(".{}", format.extension()))
        .tempfile()?;
    staged.write_all(bytes)?;
    staged.flush()?;
    debug!(path = %staged.path().display(), bytes = bytes.len(), "Staged upload");
    Ok(staged)
}

/// Extracts the text of a document already on disk.
pub fn extract_text(path: &Path, format: DocumentFormat) -> Result<String, ExtractionError> {
    match format {
        DocumentFormat::Pdf => pdf::extract_text_from_pdf(path),
        DocumentFormat::Docx => docx::extract_text_from_docx(path),
    }
}

/// Stages the upload, extracts its text and releases the temp file before returning.
pub fn extract_upload(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractionError> {
    let staged = stage_upload(bytes, format)?;
    let text = extract_text(staged.path(), format);
    drop(staged);
    text
}
