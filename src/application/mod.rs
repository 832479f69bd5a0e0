// SPDX-License-Identifier: MPL-2.0
//! Application layer - use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`ocr`]: Image file to compact OCR text
//! - [`polling`]: Bounded, cancellable retry loop
//! - [`pipeline`]: The end-to-end mileage pipeline
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The binary wires concrete adapters into [`pipeline::Pipeline`]
//!
//! # Example
//!
//! ```ignore
//! use odo_lens::application::pipeline::Pipeline;
//! use odo_lens::infrastructure::{GoogleVisionDetector, LogFileSink};
//!
//! let detector = GoogleVisionDetector::from_config(&config.ocr)?;
//! let sink = LogFileSink::new(&config.paths.record_log);
//! let pipeline = Pipeline::new(&config, detector, sink)?;
//! let record = pipeline.process_latest().await?;
//! ```

pub mod ocr;
pub mod pipeline;
pub mod polling;
pub mod port;
