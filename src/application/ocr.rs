// SPDX-License-Identifier: MPL-2.0
//! OCR use case: image file in, compact text out.

use crate::application::port::{TextAnnotation, TextDetector};
use crate::error::{Error, Result};
use std::path::Path;

/// Removes every whitespace character.
///
/// Odometer digits are often split by the backend (`"54 21 km"`), and the
/// mileage grammar expects one token.
#[must_use]
pub fn normalize_annotation(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Picks the first annotation and normalizes it.
///
/// # Errors
///
/// Returns [`Error::NoTextDetected`] when the list is empty or the first
/// annotation holds only whitespace.
pub fn first_text(annotations: &[TextAnnotation]) -> Result<String> {
    let first = annotations.first().ok_or(Error::NoTextDetected)?;
    let text = normalize_annotation(&first.description);
    if text.is_empty() {
        return Err(Error::NoTextDetected);
    }
    Ok(text)
}

/// Reads `path`, sends it to `detector` and returns the normalized first
/// annotation.
///
/// # Errors
///
/// - [`Error::ImageIo`] if the file cannot be read
/// - whatever the detector reports, typically [`Error::ServiceUnavailable`]
/// - [`Error::NoTextDetected`] if nothing was recognised
pub async fn read_text<D: TextDetector>(detector: &D, path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::ImageIo(format!("cannot read {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "sending image to OCR");

    let annotations = detector.detect_text(bytes).await?;
    let text = first_text(&annotations)?;
    tracing::info!(path = %path.display(), %text, "OCR text");
    Ok(text)
}
