// SPDX-License-Identifier: MPL-2.0
//! Text detection port.
//!
//! The adapter behind this trait talks to an OCR backend. It reports
//! transport problems as [`Error::ServiceUnavailable`] so the polling loop
//! can retry them, and bad input as [`Error::ImageIo`].
//!
//! [`Error::ServiceUnavailable`]: crate::error::Error::ServiceUnavailable
//! [`Error::ImageIo`]: crate::error::Error::ImageIo

use crate::error::Result;
use std::future::Future;

/// One block of text found in an image, in the order the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextAnnotation {
    /// Recognised text, possibly spanning several lines.
    pub description: String,

    /// BCP-47 language code, when the backend detected one.
    pub locale: Option<String>,
}

impl TextAnnotation {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            locale: None,
        }
    }
}

/// Port for OCR backends.
///
/// # Example
///
/// ```ignore
/// use odo_lens::application::port::{TextAnnotation, TextDetector};
///
/// struct Fixed;
///
/// impl TextDetector for Fixed {
///     async fn detect_text(&self, _image: Vec<u8>) -> odo_lens::error::Result<Vec<TextAnnotation>> {
///         Ok(vec![TextAnnotation::new("5421 km")])
///     }
/// }
/// ```
pub trait TextDetector: Send + Sync {
    /// Runs text detection on encoded image bytes.
    ///
    /// An empty list means the backend found no text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::ServiceUnavailable`] when the backend
    /// cannot be reached or refuses the request.
    fn detect_text(&self, image: Vec<u8>)
        -> impl Future<Output = Result<Vec<TextAnnotation>>> + Send;
}
