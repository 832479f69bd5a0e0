// SPDX-License-Identifier: MPL-2.0
//! Capture time and GPS position extraction from EXIF.
//!
//! Works on any container kamadak-exif understands (JPEG, PNG, WebP, TIFF,
//! HEIF). Both the capture time and the position are required; a photo
//! missing either cannot take part in a consistency check.

use crate::domain::metadata::{CaptureTime, GpsCoordinates, ImageMetadata};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Capture-time tags, most specific first.
const CAPTURE_TIME_TAGS: [exif::Tag; 3] = [
    exif::Tag::DateTimeOriginal,
    exif::Tag::DateTimeDigitized,
    exif::Tag::DateTime,
];

/// Extract capture time and GPS coordinates from an image file.
///
/// # Errors
///
/// - [`Error::ImageIo`] if the file cannot be opened or read
/// - [`Error::MetadataMissing`] if there is no EXIF container, no capture
///   time tag, or an incomplete GPS position
/// - [`Error::UnparseableTimestamp`] if the capture time is malformed
pub fn extract_image_metadata<P: AsRef<Path>>(path: P) -> Result<ImageMetadata> {
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| Error::ImageIo(format!("cannot open {}: {e}", path.display())))?;
    let mut reader = BufReader::new(file);

    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(exif::Error::Io(e)) => {
            return Err(Error::ImageIo(format!(
                "cannot read {}: {e}",
                path.display()
            )));
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no EXIF container");
            return Err(missing(path, "EXIF"));
        }
    };

    let capture_time = read_capture_time(&exif, path)?;
    let coordinates = read_coordinates(&exif, path)?;

    tracing::debug!(
        path = %path.display(),
        %capture_time,
        %coordinates,
        "extracted photo metadata"
    );

    Ok(ImageMetadata {
        capture_time,
        coordinates,
    })
}

fn missing(path: &Path, tag: &'static str) -> Error {
    Error::MetadataMissing {
        path: path.to_path_buf(),
        tag,
    }
}

fn read_capture_time(exif: &exif::Exif, path: &Path) -> Result<CaptureTime> {
    let raw = CAPTURE_TIME_TAGS
        .iter()
        .find_map(|tag| exif.get_field(*tag, exif::In::PRIMARY))
        .map(|field| ascii_value(&field.value).unwrap_or_else(|| field.display_value().to_string()))
        .ok_or_else(|| missing(path, "DateTimeOriginal"))?;

    CaptureTime::parse(&raw)
}

fn read_coordinates(exif: &exif::Exif, path: &Path) -> Result<GpsCoordinates> {
    let latitude = read_signed_degrees(
        exif,
        path,
        (exif::Tag::GPSLatitude, "GPSLatitude"),
        (exif::Tag::GPSLatitudeRef, "GPSLatitudeRef"),
        'S',
    )?;
    let longitude = read_signed_degrees(
        exif,
        path,
        (exif::Tag::GPSLongitude, "GPSLongitude"),
        (exif::Tag::GPSLongitudeRef, "GPSLongitudeRef"),
        'W',
    )?;

    GpsCoordinates::from_degrees(latitude, longitude).ok_or_else(|| missing(path, "GPSLatitude"))
}

/// Reads one axis and applies the hemisphere sign.
fn read_signed_degrees(
    exif: &exif::Exif,
    path: &Path,
    (value_tag, value_name): (exif::Tag, &'static str),
    (ref_tag, ref_name): (exif::Tag, &'static str),
    negative_ref: char,
) -> Result<f64> {
    let degrees = exif
        .get_field(value_tag, exif::In::PRIMARY)
        .and_then(|field| parse_gps_coordinate(&field.value))
        .ok_or_else(|| missing(path, value_name))?;

    let hemisphere = exif
        .get_field(ref_tag, exif::In::PRIMARY)
        .and_then(|field| ascii_value(&field.value))
        .ok_or_else(|| missing(path, ref_name))?;

    if hemisphere.trim().eq_ignore_ascii_case(&negative_ref.to_string()) {
        Ok(-degrees)
    } else {
        Ok(degrees)
    }
}

/// Parse a GPS coordinate from EXIF rationals (degrees, minutes, seconds).
fn parse_gps_coordinate(value: &exif::Value) -> Option<f64> {
    match value {
        exif::Value::Rational(rationals) if rationals.len() >= 3 => {
            let degrees = rationals[0].to_f64();
            let minutes = rationals[1].to_f64();
            let seconds = rationals[2].to_f64();
            let total = degrees + minutes / 60.0 + seconds / 3600.0;
            total.is_finite().then_some(total)
        }
        _ => None,
    }
}

/// First string of an ASCII value, without trailing NULs.
fn ascii_value(value: &exif::Value) -> Option<String> {
    match value {
        exif::Value::Ascii(strings) => strings.first().map(|bytes| {
            String::from_utf8_lossy(bytes)
                .trim_end_matches('\0')
                .to_string()
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exif::Rational;
    use std::io::Write;

    fn dms(degrees: u32, minutes: u32, seconds_x100: u32) -> exif::Value {
        exif::Value::Rational(vec![
            Rational { num: degrees, denom: 1 },
            Rational { num: minutes, denom: 1 },
            Rational {
                num: seconds_x100,
                denom: 100,
            },
        ])
    }

    #[test]
    fn parse_gps_coordinate_combines_dms() {
        // 43° 39' 11.56" = 43.653211...
        let degrees = parse_gps_coordinate(&dms(43, 39, 1156)).expect("coordinate");
        assert!((degrees - 43.653_211).abs() < 1e-6);
    }

    #[test]
    fn parse_gps_coordinate_rejects_short_or_zero_denominator() {
        let short = exif::Value::Rational(vec![Rational { num: 43, denom: 1 }]);
        assert!(parse_gps_coordinate(&short).is_none());

        let broken = exif::Value::Rational(vec![
            Rational { num: 43, denom: 0 },
            Rational { num: 0, denom: 1 },
            Rational { num: 0, denom: 1 },
        ]);
        assert!(parse_gps_coordinate(&broken).is_none());
    }

    #[test]
    fn ascii_value_strips_nul_terminator() {
        let value = exif::Value::Ascii(vec![b"S\0".to_vec()]);
        assert_eq!(ascii_value(&value).as_deref(), Some("S"));
        assert!(ascii_value(&exif::Value::Byte(vec![1])).is_none());
    }

    #[test]
    fn extract_image_metadata_handles_missing_file() {
        let result = extract_image_metadata("/nonexistent/path/image.jpg");
        assert!(matches!(result, Err(Error::ImageIo(_))));
    }

    #[test]
    fn extract_image_metadata_reports_missing_exif() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("test.txt");
        let mut file = File::create(&path).expect("create file");
        writeln!(file, "not an image").expect("write");

        match extract_image_metadata(&path) {
            Err(Error::MetadataMissing { path: reported, tag }) => {
                assert_eq!(reported, path);
                assert_eq!(tag, "EXIF");
            }
            other => panic!("expected MetadataMissing, got {other:?}"),
        }
    }

    #[test]
    fn extract_image_metadata_reports_missing_exif_in_plain_png() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("plain.png");
        image_rs::RgbImage::from_pixel(4, 4, image_rs::Rgb([10, 20, 30]))
            .save(&path)
            .expect("save png");

        assert!(matches!(
            extract_image_metadata(&path),
            Err(Error::MetadataMissing { tag: "EXIF", .. })
        ));
    }
}
