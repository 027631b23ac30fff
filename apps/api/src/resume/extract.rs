//! Text extraction from uploaded resume documents.

use tracing::warn;

use crate::errors::AppError;

/// Extracts plain text from an uploaded resume.
///
/// PDF payloads go through the PDF text extractor. Plain-text formats are
/// decoded as UTF-8 with invalid sequences dropped, which also covers uploads
/// with no extension. Word documents are rejected outright: decoding their
/// zip container as text would silently produce garbage downstream.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, AppError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let text = match extension.as_str() {
        "pdf" => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            warn!("PDF extraction failed for {}: {}", filename, e);
            AppError::Validation(format!("could not extract text from {filename}"))
        })?,
        "doc" | "docx" => {
            return Err(AppError::Validation(
                "Word documents are not supported, upload a PDF or plain text".to_string(),
            ))
        }
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation(
            "resume contains no extractable text".to_string(),
        ));
    }

    Ok(text)
}
