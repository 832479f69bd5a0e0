// SPDX-License-Identifier: MPL-2.0
//! Image file handling: EXIF metadata, pair validation and cropping.
//!
//! Everything here is synchronous and works on paths. Callers on an async
//! runtime should move the work to a blocking thread.

pub mod crop;
pub mod metadata;
pub mod validation;

pub use crop::{crop, crop_to_processing_dir};
pub use metadata::extract_image_metadata;
pub use validation::{is_same_event, valid_photo, Tolerances};
