// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! Infrastructure adapters implement these; the pipeline only sees the
//! traits.
//!
//! # Available Ports
//!
//! - [`ocr`]: Text detection ([`TextDetector`])
//! - [`sink`]: Mileage record storage ([`RecordSink`])
//! - [`clock`]: Waiting between polls ([`Sleeper`])
//!
//! # Design Notes
//!
//! - Async methods are declared as `impl Future + Send` so the pipeline can
//!   run on a multi-threaded runtime without boxing
//! - All ports are `Send + Sync`
//! - Methods return the crate [`Result`](crate::error::Result)

pub mod clock;
pub mod ocr;
pub mod sink;

pub use clock::Sleeper;
pub use ocr::{TextAnnotation, TextDetector};
pub use sink::{MileageRecord, RecordSink};
