// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects and pure business rules.
//!
//! Nothing here touches the filesystem or the network.
//!
//! # Modules
//!
//! - [`metadata`]: Photo metadata ([`GpsCoordinates`](metadata::GpsCoordinates),
//!   [`CaptureTime`](metadata::CaptureTime), [`ImageMetadata`](metadata::ImageMetadata))
//! - [`mileage`]: Mileage parsing and unit conversion
//!   ([`MileageReading`](mileage::MileageReading), [`DualMileage`](mileage::DualMileage))
//! - [`region`]: Crop rectangle ([`CropRegion`](region::CropRegion))

pub mod metadata;
pub mod mileage;
pub mod region;
