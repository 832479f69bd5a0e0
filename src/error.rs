// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Errors fall into two families that callers must tell apart:
//! transient ones (the OCR backend may recover, a new photo may arrive) and
//! persistent ones (retrying the same artifact can never succeed). See
//! [`Error::is_transient`] and [`Error::status`].

use crate::domain::mileage::MileageParseError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Error {
    /// The image carries no EXIF container, or lacks a required tag.
    MetadataMissing {
        path: PathBuf,
        tag: &'static str,
    },

    /// A capture timestamp was present but not in a recognised format.
    UnparseableTimestamp(String),

    /// The OCR backend could not be reached, timed out, or refused the request.
    ServiceUnavailable(String),

    /// The OCR backend answered with an empty annotation list.
    NoTextDetected,

    /// The OCR text could not be read as `<digits><unit>`.
    UnparseableMileage {
        text: String,
        reason: MileageParseError,
    },

    /// The watched inbox directory holds no files yet.
    EmptyInbox(PathBuf),

    /// Reading, decoding, encoding or writing an image failed.
    ImageIo(String),

    /// Configuration is missing or invalid.
    Config(String),

    /// The record sink failed to store a reading.
    Sink(String),

    /// A polling loop gave up after its configured number of attempts.
    RetriesExhausted { attempts: u32, last: Box<Error> },

    /// A polling loop was cancelled before it produced a result.
    Cancelled,
}

/// Coarse status for reporting built on top of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    /// Still waiting for input or for the OCR backend to recover.
    Waiting,
    /// A failure that will not heal by retrying the same artifact.
    Failed,
}

impl Error {
    /// Returns `true` for errors that may clear up on their own.
    ///
    /// Only [`Error::ServiceUnavailable`] and [`Error::EmptyInbox`] qualify.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::ServiceUnavailable(_) | Error::EmptyInbox(_))
    }

    /// Maps the error to a user-facing status.
    #[must_use]
    pub fn status(&self) -> PipelineStatus {
        if self.is_transient() {
            PipelineStatus::Waiting
        } else {
            PipelineStatus::Failed
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MetadataMissing { path, tag } => {
                write!(f, "Metadata missing: {} has no {}", path.display(), tag)
            }
            Error::UnparseableTimestamp(raw) => write!(f, "Unparseable timestamp: {raw:?}"),
            Error::ServiceUnavailable(e) => write!(f, "OCR service unavailable: {}", e),
            Error::NoTextDetected => write!(f, "No text detected in image"),
            Error::UnparseableMileage { text, reason } => {
                write!(f, "Unparseable mileage {text:?}: {reason}")
            }
            Error::EmptyInbox(dir) => write!(f, "Inbox is empty: {}", dir.display()),
            Error::ImageIo(e) => write!(f, "Image I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Sink(e) => write!(f, "Record sink Error: {}", e),
            Error::RetriesExhausted { attempts, last } => {
                write!(f, "Gave up after {attempts} attempts: {last}")
            }
            Error::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ImageIo(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::ImageIo(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_image_io_error() {
        let err = Error::ImageIo("disk failure".to_string());
        assert_eq!(format!("{}", err), "Image I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_image_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::ImageIo(message) => assert!(message.contains("boom")),
            _ => panic!("expected ImageIo variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn only_service_and_inbox_errors_are_transient() {
        assert!(Error::ServiceUnavailable("timeout".into()).is_transient());
        assert!(Error::EmptyInbox(PathBuf::from("/inbox")).is_transient());

        assert!(!Error::NoTextDetected.is_transient());
        assert!(!Error::ImageIo("corrupt".into()).is_transient());
        assert!(!Error::UnparseableMileage {
            text: "abc".into(),
            reason: MileageParseError::MissingDigits,
        }
        .is_transient());
        assert!(!Error::Cancelled.is_transient());
    }

    #[test]
    fn status_separates_waiting_from_failed() {
        assert_eq!(
            Error::EmptyInbox(PathBuf::from("/inbox")).status(),
            PipelineStatus::Waiting
        );
        assert_eq!(Error::NoTextDetected.status(), PipelineStatus::Failed);
    }

    #[test]
    fn metadata_missing_names_path_and_tag() {
        let err = Error::MetadataMissing {
            path: PathBuf::from("shot.png"),
            tag: "GPSLatitude",
        };
        let display = format!("{err}");
        assert!(display.contains("shot.png"));
        assert!(display.contains("GPSLatitude"));
    }

    #[test]
    fn retries_exhausted_includes_last_error() {
        let err = Error::RetriesExhausted {
            attempts: 3,
            last: Box::new(Error::EmptyInbox(PathBuf::from("/inbox"))),
        };
        let display = format!("{err}");
        assert!(display.contains("3 attempts"));
        assert!(display.contains("/inbox"));
    }
}
