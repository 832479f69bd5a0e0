// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`vision`]: Google Cloud Vision OCR (implements [`TextDetector`])
//! - [`log_sink`]: Flat-file mileage log (implements [`RecordSink`])
//! - [`clock`]: Tokio timer (implements [`Sleeper`])
//!
//! [`TextDetector`]: crate::application::port::TextDetector
//! [`RecordSink`]: crate::application::port::RecordSink
//! [`Sleeper`]: crate::application::port::Sleeper

pub mod clock;
pub mod log_sink;
pub mod vision;

pub use clock::TokioSleeper;
pub use log_sink::LogFileSink;
pub use vision::GoogleVisionDetector;
