// SPDX-License-Identifier: MPL-2.0
//! Mileage readings and unit conversion.
//!
//! Conversions use the factor 1 mile = 1.609 km and truncate toward zero,
//! computed in integer arithmetic so results are exact floors:
//!
//! - `miles_to_kms(mi) = floor(mi * 1.609)`
//! - `kms_to_miles(km) = floor(km / 1.609)`
//!
//! Converting there and back may lose one unit; the round trip is bounded,
//! not exact.

mod parser;

pub use parser::{parse, MileageParseError};

use crate::error::{Error, Result};
use std::fmt;

/// Kilometres per mile, scaled by 1000.
const KM_PER_MILE_MILLI: u128 = 1609;

/// Distance unit shown on the odometer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
    Miles,
    Kilometers,
}

impl DistanceUnit {
    /// Short suffix used in logs and records.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Kilometers => "km",
        }
    }

    /// Parses a user-supplied unit name (`mi`, `miles`, `km`, `kms`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mi" | "mile" | "miles" => Some(DistanceUnit::Miles),
            "k" | "km" | "kms" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Some(DistanceUnit::Kilometers)
            }
            _ => None,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A mileage value recovered from OCR text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MileageReading {
    /// The text the value was parsed from.
    pub raw_text: String,
    pub value: u64,
    pub unit: DistanceUnit,
}

impl MileageReading {
    /// Expresses the reading in both units.
    #[must_use]
    pub fn to_dual(&self) -> DualMileage {
        DualMileage::from_value(self.value, self.unit)
    }
}

/// The same distance in miles and in kilometres. Always produced together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualMileage {
    pub miles: u64,
    pub kms: u64,
}

impl DualMileage {
    /// Builds the pair from a value in `unit`, converting the other side.
    #[must_use]
    pub fn from_value(value: u64, unit: DistanceUnit) -> Self {
        match unit {
            DistanceUnit::Miles => Self {
                miles: value,
                kms: miles_to_kms(value),
            },
            DistanceUnit::Kilometers => Self {
                miles: kms_to_miles(value),
                kms: value,
            },
        }
    }
}

impl fmt::Display for DualMileage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mi {}km", self.miles, self.kms)
    }
}

/// `floor(miles * 1.609)`, saturating at `u64::MAX`.
#[must_use]
pub fn miles_to_kms(miles: u64) -> u64 {
    let kms = u128::from(miles) * KM_PER_MILE_MILLI / 1000;
    u64::try_from(kms).unwrap_or(u64::MAX)
}

/// `floor(kms / 1.609)`.
#[must_use]
pub fn kms_to_miles(kms: u64) -> u64 {
    let miles = u128::from(kms) * 1000 / KM_PER_MILE_MILLI;
    // Division by 1.609 only shrinks the value.
    u64::try_from(miles).unwrap_or(u64::MAX)
}

/// Parses OCR text and returns the distance in both units.
///
/// # Errors
///
/// Returns [`Error::UnparseableMileage`] when the text is not of the shape
/// `<digits><unit>`.
pub fn normalize(text: &str) -> Result<DualMileage> {
    parse_reading(text).map(|reading| reading.to_dual())
}

/// Parses OCR text into a [`MileageReading`], wrapping failures in the crate
/// error type.
///
/// # Errors
///
/// Returns [`Error::UnparseableMileage`] carrying the text and the reason.
pub fn parse_reading(text: &str) -> Result<MileageReading> {
    parse(text).map_err(|reason| Error::UnparseableMileage {
        text: text.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_kilometres() {
        assert_eq!(
            normalize("5421km").unwrap(),
            DualMileage {
                miles: 3369,
                kms: 5421
            }
        );
    }

    #[test]
    fn normalize_miles() {
        // 3369 * 1.609 = 5420.721
        assert_eq!(
            normalize("3369mi").unwrap(),
            DualMileage {
                miles: 3369,
                kms: 5420
            }
        );
    }

    #[test]
    fn normalize_empty_fails() {
        let err = normalize("").unwrap_err();
        assert!(matches!(
            err,
            Error::UnparseableMileage {
                reason: MileageParseError::Empty,
                ..
            }
        ));
    }

    #[test]
    fn normalize_never_coerces_garbage_to_zero() {
        for text in ["abc", "km", "mi", "--", "0x10km"] {
            assert!(normalize(text).is_err(), "{text:?} should not parse");
        }
        assert_eq!(normalize("0km").unwrap(), DualMileage { miles: 0, kms: 0 });
    }

    #[test]
    fn conversions_truncate() {
        assert_eq!(miles_to_kms(1), 1);
        assert_eq!(miles_to_kms(1000), 1609);
        assert_eq!(kms_to_miles(1609), 1000);
        assert_eq!(kms_to_miles(1), 0);
        assert_eq!(kms_to_miles(5421), 3369);
    }

    #[test]
    fn round_trip_drifts_by_at_most_one() {
        let mut drifted = false;
        for miles in 0..20_000u64 {
            let back = kms_to_miles(miles_to_kms(miles));
            assert!(miles.abs_diff(back) <= 1, "{miles} came back as {back}");
            drifted |= back != miles;
        }
        assert!(drifted, "truncation should lose a unit for some inputs");
        assert_eq!(kms_to_miles(miles_to_kms(3369)), 3368);
    }

    #[test]
    fn miles_to_kms_saturates() {
        assert_eq!(miles_to_kms(u64::MAX), u64::MAX);
    }

    #[test]
    fn unit_names_are_recognised() {
        assert_eq!(DistanceUnit::from_name("Miles"), Some(DistanceUnit::Miles));
        assert_eq!(DistanceUnit::from_name("KM"), Some(DistanceUnit::Kilometers));
        assert_eq!(DistanceUnit::from_name("furlongs"), None);
    }

    #[test]
    fn dual_mileage_display() {
        let dual = DualMileage::from_value(5421, DistanceUnit::Kilometers);
        assert_eq!(dual.to_string(), "3369mi 5421km");
    }
}
