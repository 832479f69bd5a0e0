// SPDX-License-Identifier: MPL-2.0
//! `odo_lens` reads a vehicle's mileage from odometer photos.
//!
//! Photos arrive in an inbox directory. The newest one is cropped to the
//! odometer, sent to a text detector, and the recognised `<digits><unit>`
//! reading is stored in both miles and kilometres. A companion check
//! compares the EXIF time and GPS position of two photos to make sure they
//! were taken on the same occasion.

#![doc(html_root_url = "https://docs.rs/odo_lens/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod inbox;
pub mod infrastructure;
pub mod media;
