use std::panic;
use std::path::Path;

use tracing::{debug, warn};

use super::ExtractionError;

/// Concatenates the extractable text of every page, in document order.
///
/// Pages without a text layer (scans, images) contribute nothing. `pdf-extract` panics on
/// some malformed inputs, so the call is isolated and a panic is reported as a parse failure.
pub fn extract_text_from_pdf(path: &Path) -> Result<String, ExtractionError> {
    let outcome = panic::catch_unwind(|| pdf_extract::extract_text(path));

    match outcome {
        Ok(Ok(text)) => {
            debug!(chars = text.len(), "Extracted PDF text");
            Ok(text)
        }
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(_) => {
            warn!(path = %path.display(), "pdf-extract panicked while parsing upload");
            Err(ExtractionError::Pdf(
                "the PDF structure could not be decoded".to_string(),
            ))
        }
    }
}
