// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! - [`GpsCoordinates`]: coordinates held at 5-decimal resolution
//! - [`CaptureTime`]: camera clock timestamp
//! - [`ImageMetadata`]: the pair of both, extracted from one photo

mod types;

pub use types::{CaptureTime, GpsCoordinates, ImageMetadata, COORDINATE_DECIMALS};
