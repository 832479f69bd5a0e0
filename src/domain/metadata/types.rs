// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! Pure value objects describing when and where a photo was taken.

use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use std::fmt;

// =============================================================================
// GpsCoordinates
// =============================================================================

/// Number of fractional digits kept for latitude and longitude.
pub const COORDINATE_DECIMALS: usize = 5;

/// Fixed-point scale matching [`COORDINATE_DECIMALS`].
const COORDINATE_SCALE: f64 = 100_000.0;

/// GPS coordinates in decimal degrees, held at 5-decimal resolution.
///
/// Values are stored as integer multiples of 1e-5 degrees so that every
/// comparison happens exactly at the resolution the coordinates are reported
/// with. `Display` always renders exactly five fractional digits.
///
/// # Example
///
/// ```ignore
/// let coords = GpsCoordinates::new(48.856614, 2.3522219);
/// assert_eq!(coords.to_string(), "48.85661, 2.35222");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GpsCoordinates {
    /// Latitude in units of 1e-5 degrees (-9_000_000 to 9_000_000)
    latitude_e5: i64,
    /// Longitude in units of 1e-5 degrees (-18_000_000 to 18_000_000)
    longitude_e5: i64,
}

impl GpsCoordinates {
    /// Creates new GPS coordinates, rounding to 5 decimals.
    ///
    /// Values outside valid ranges are clamped:
    /// - Latitude: -90.0 to 90.0
    /// - Longitude: -180.0 to 180.0
    ///
    /// Non-finite input maps to 0.0; use [`GpsCoordinates::from_degrees`] to
    /// reject it instead.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude_e5: to_fixed(latitude.clamp(-90.0, 90.0)),
            longitude_e5: to_fixed(longitude.clamp(-180.0, 180.0)),
        }
    }

    /// Creates coordinates from decimal degrees, returning `None` when either
    /// value is NaN or infinite.
    #[must_use]
    pub fn from_degrees(latitude: f64, longitude: f64) -> Option<Self> {
        if latitude.is_finite() && longitude.is_finite() {
            Some(Self::new(latitude, longitude))
        } else {
            None
        }
    }

    /// Returns the latitude in decimal degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude_e5 as f64 / COORDINATE_SCALE
    }

    /// Returns the longitude in decimal degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude_e5 as f64 / COORDINATE_SCALE
    }

    /// Absolute latitude difference, in units of 1e-5 degrees.
    #[must_use]
    pub fn latitude_delta_e5(&self, other: &Self) -> u64 {
        self.latitude_e5.abs_diff(other.latitude_e5)
    }

    /// Absolute longitude difference, in units of 1e-5 degrees.
    #[must_use]
    pub fn longitude_delta_e5(&self, other: &Self) -> u64 {
        self.longitude_e5.abs_diff(other.longitude_e5)
    }

    /// Latitude as a string with exactly 5 fractional digits.
    #[must_use]
    pub fn latitude_string(&self) -> String {
        format_fixed(self.latitude_e5)
    }

    /// Longitude as a string with exactly 5 fractional digits.
    #[must_use]
    pub fn longitude_string(&self) -> String {
        format_fixed(self.longitude_e5)
    }

    /// Formats the coordinates with hemisphere letters.
    ///
    /// Format: "48.85660° N, 2.35220° E"
    #[must_use]
    pub fn format(&self) -> String {
        let lat_dir = if self.latitude_e5 >= 0 { "N" } else { "S" };
        let lon_dir = if self.longitude_e5 >= 0 { "E" } else { "W" };
        format!(
            "{}° {}, {}° {}",
            format_fixed(self.latitude_e5.abs()),
            lat_dir,
            format_fixed(self.longitude_e5.abs()),
            lon_dir
        )
    }
}

impl fmt::Display for GpsCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}",
            format_fixed(self.latitude_e5),
            format_fixed(self.longitude_e5)
        )
    }
}

// The clamp in `new` keeps the product far inside i64 range.
#[allow(clippy::cast_possible_truncation)]
fn to_fixed(degrees: f64) -> i64 {
    (degrees * COORDINATE_SCALE).round() as i64
}

fn format_fixed(value_e5: i64) -> String {
    let sign = if value_e5 < 0 { "-" } else { "" };
    let magnitude = value_e5.unsigned_abs();
    format!(
        "{sign}{}.{:0width$}",
        magnitude / 100_000,
        magnitude % 100_000,
        width = COORDINATE_DECIMALS
    )
}

// =============================================================================
// CaptureTime
// =============================================================================

/// Accepted capture-time layouts. EXIF first, then ISO-style variants.
const CAPTURE_TIME_FORMATS: &[&str] = &[
    "%Y:%m:%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// The moment a photo was taken, as recorded by the camera clock.
///
/// EXIF timestamps carry no time zone, so this is a naive local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CaptureTime(NaiveDateTime);

impl CaptureTime {
    /// Parses `"YYYY:MM:DD HH:MM:SS"` (or an ISO-style equivalent).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnparseableTimestamp`] for any other layout.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim().trim_matches('"').trim_end_matches('\0');
        CAPTURE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(Self)
            .ok_or_else(|| Error::UnparseableTimestamp(raw.to_string()))
    }

    /// Absolute elapsed time between two captures, in whole seconds.
    #[must_use]
    pub fn seconds_between(&self, other: &Self) -> u64 {
        (self.0 - other.0).num_seconds().unsigned_abs()
    }
}

impl fmt::Display for CaptureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y:%m:%d %H:%M:%S"))
    }
}

// =============================================================================
// ImageMetadata
// =============================================================================

/// When and where a photo was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub capture_time: CaptureTime,
    pub coordinates: GpsCoordinates,
}

// =============================================================================
// Tests
// =============================================================================
