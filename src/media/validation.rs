// SPDX-License-Identifier: MPL-2.0
//! Photo pair consistency check.
//!
//! Two photos belong to the same event when they were taken close together
//! in time and in space. The reference photo proves where the vehicle was;
//! the mileage photo shows the odometer.

use crate::config::{DEFAULT_MAX_COORDINATE_DELTA, DEFAULT_MAX_TIME_DELTA_SECS};
use crate::domain::metadata::ImageMetadata;
use crate::error::Result;
use crate::media::metadata::extract_image_metadata;
use std::path::Path;

/// Scale between decimal degrees and the fixed-point coordinate unit.
const E5_PER_DEGREE: f64 = 100_000.0;

/// Upper bounds (exclusive) for two photos to count as one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tolerances {
    max_time_delta_secs: u64,
    /// Coordinate bound in units of 1e-5 degrees.
    max_coordinate_delta_e5: u64,
}

impl Tolerances {
    /// Creates tolerances from a time bound in seconds and a coordinate bound
    /// in decimal degrees. The coordinate bound is rounded to 5 decimals.
    #[must_use]
    pub fn new(max_time_delta_secs: u64, max_coordinate_delta: f64) -> Self {
        // Negative or NaN collapses to 0, which rejects every pair.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let max_coordinate_delta_e5 = (max_coordinate_delta * E5_PER_DEGREE).round().max(0.0) as u64;
        Self {
            max_time_delta_secs,
            max_coordinate_delta_e5,
        }
    }

    #[must_use]
    pub fn max_time_delta_secs(&self) -> u64 {
        self.max_time_delta_secs
    }

    /// Coordinate bound in decimal degrees.
    #[must_use]
    pub fn max_coordinate_delta(&self) -> f64 {
        self.max_coordinate_delta_e5 as f64 / E5_PER_DEGREE
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TIME_DELTA_SECS, DEFAULT_MAX_COORDINATE_DELTA)
    }
}

/// Returns `true` when both photos were taken within the tolerances.
///
/// Symmetric in its two photo arguments.
#[must_use]
pub fn is_same_event(a: &ImageMetadata, b: &ImageMetadata, tolerances: &Tolerances) -> bool {
    let elapsed = a.capture_time.seconds_between(&b.capture_time);
    if elapsed >= tolerances.max_time_delta_secs {
        tracing::debug!(elapsed, "photos too far apart in time");
        return false;
    }

    let lat_delta = a.coordinates.latitude_delta_e5(&b.coordinates);
    let lon_delta = a.coordinates.longitude_delta_e5(&b.coordinates);
    if lat_delta >= tolerances.max_coordinate_delta_e5
        || lon_delta >= tolerances.max_coordinate_delta_e5
    {
        tracing::debug!(lat_delta, lon_delta, "photos too far apart in space");
        return false;
    }

    true
}

/// Checks that a mileage photo was taken at the same time and place as a
/// reference photo.
///
/// A mismatch is `Ok(false)`.
///
/// # Errors
///
/// Propagates metadata extraction errors for either photo.
pub fn valid_photo(reference: &Path, mileage: &Path, tolerances: &Tolerances) -> Result<bool> {
    let reference_meta = extract_image_metadata(reference)?;
    let mileage_meta = extract_image_metadata(mileage)?;

    let valid = is_same_event(&reference_meta, &mileage_meta, tolerances);
    tracing::info!(
        reference = %reference.display(),
        mileage = %mileage.display(),
        valid,
        "photo pair checked"
    );
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metadata::{CaptureTime, GpsCoordinates};

    fn meta(time: &str, lat: f64, lon: f64) -> ImageMetadata {
        ImageMetadata {
            capture_time: CaptureTime::parse(time).expect("valid time"),
            coordinates: GpsCoordinates::new(lat, lon),
        }
    }

    #[test]
    fn identical_photos_match() {
        let a = meta("2019:07:14 09:30:05", 43.65321, -79.38318);
        assert!(is_same_event(&a, &a, &Tolerances::default()));
    }

    #[test]
    fn time_boundary_is_exclusive() {
        let t = Tolerances::default();
        let a = meta("2019:07:14 09:30:00", 43.65321, -79.38318);
        let just_inside = meta("2019:07:14 09:31:59", 43.65321, -79.38318);
        let on_boundary = meta("2019:07:14 09:32:00", 43.65321, -79.38318);

        assert!(is_same_event(&a, &just_inside, &t));
        assert!(!is_same_event(&a, &on_boundary, &t));
    }

    #[test]
    fn time_check_spans_hours_and_days() {
        let t = Tolerances::default();
        let a = meta("2019:07:14 09:30:00", 43.65321, -79.38318);
        // Same minute field, one hour later.
        let b = meta("2019:07:14 10:30:00", 43.65321, -79.38318);
        let c = meta("2019:07:15 09:30:30", 43.65321, -79.38318);

        assert!(!is_same_event(&a, &b, &t));
        assert!(!is_same_event(&a, &c, &t));
    }

    #[test]
    fn coordinate_boundary_is_exclusive() {
        let t = Tolerances::default();
        let a = meta("2019:07:14 09:30:00", 43.65321, -79.38318);
        let lat_inside = meta("2019:07:14 09:30:00", 43.65820, -79.38318);
        let lat_boundary = meta("2019:07:14 09:30:00", 43.65821, -79.38318);
        let lon_boundary = meta("2019:07:14 09:30:00", 43.65321, -79.38818);

        assert!(is_same_event(&a, &lat_inside, &t));
        assert!(!is_same_event(&a, &lat_boundary, &t));
        assert!(!is_same_event(&a, &lon_boundary, &t));
    }

    #[test]
    fn check_is_symmetric() {
        let t = Tolerances::default();
        let photos = [
            meta("2019:07:14 09:30:00", 43.65321, -79.38318),
            meta("2019:07:14 09:31:30", 43.65400, -79.38300),
            meta("2019:07:14 09:33:00", 43.65321, -79.38318),
            meta("2019:07:14 09:30:10", 43.70000, -79.38318),
        ];
        for a in &photos {
            for b in &photos {
                assert_eq!(is_same_event(a, b, &t), is_same_event(b, a, &t));
            }
        }
    }

    #[test]
    fn tolerances_round_trip_degrees() {
        let t = Tolerances::new(60, 0.01);
        assert_eq!(t.max_time_delta_secs(), 60);
        assert!((t.max_coordinate_delta() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn negative_tolerance_rejects_everything() {
        let t = Tolerances::new(120, -1.0);
        let a = meta("2019:07:14 09:30:00", 43.65321, -79.38318);
        assert!(!is_same_event(&a, &a, &t));
    }

    #[test]
    fn valid_photo_propagates_extraction_errors() {
        let result = valid_photo(
            Path::new("/nonexistent/ref.jpg"),
            Path::new("/nonexistent/odo.jpg"),
            &Tolerances::default(),
        );
        assert!(result.is_err());
    }
}
