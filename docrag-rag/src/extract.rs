//! PDF text extraction.

use std::path::Path;

use crate::error::{RagError, Result};

/// Extract the text content of a PDF file.
///
/// # Errors
///
/// Returns [`RagError::ExtractionError`] if the file cannot be opened or
/// parsed. Callers on the ingestion path treat this as "skip the file".
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    pdf_extract::extract_text(path).map_err(|e| RagError::ExtractionError {
        source_file: path.display().to_string(),
        message: e.to_string(),
    })
}
