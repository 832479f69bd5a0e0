// SPDX-License-Identifier: MPL-2.0
//! Tokenizer for odometer OCR text.
//!
//! Accepted shape, after whitespace removal and case folding:
//!
//! ```text
//! reading := digits separator* unit trailing*
//! digits  := [0-9]+ ( [,.] [0-9]{3} )*
//! separator := "," | "."
//! unit    := "mi" ... | "k" ...
//! ```
//!
//! A unit starting with `mi` selects miles, one starting with `k` selects
//! kilometres. Separators between the number and the unit are skipped only
//! when a unit marker follows them. Whatever follows the unit marker is ignored: OCR regularly
//! appends stray glyphs after the suffix (`kms`, `km.`, `miles`).

use super::{DistanceUnit, MileageReading};
use std::fmt;

/// Why a piece of OCR text is not a mileage reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MileageParseError {
    /// Nothing left after whitespace removal.
    Empty,
    /// The text holds no digits at all.
    MissingDigits,
    /// Something other than a digit precedes the number.
    LeadingCharacters(String),
    /// Digits were found but no unit suffix follows them.
    MissingUnit,
    /// The suffix after the digits is neither a miles nor a kilometre marker.
    UnknownUnit(String),
    /// The number does not fit in 64 bits.
    Overflow,
}

impl fmt::Display for MileageParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MileageParseError::Empty => write!(f, "empty text"),
            MileageParseError::MissingDigits => write!(f, "no digits found"),
            MileageParseError::LeadingCharacters(prefix) => {
                write!(f, "unexpected characters before the number: {prefix:?}")
            }
            MileageParseError::MissingUnit => write!(f, "no unit after the number"),
            MileageParseError::UnknownUnit(suffix) => write!(f, "unknown unit {suffix:?}"),
            MileageParseError::Overflow => write!(f, "number too large"),
        }
    }
}

impl std::error::Error for MileageParseError {}

/// Parses OCR text into a [`MileageReading`].
///
/// Whitespace anywhere in the input is ignored, so both the raw annotation
/// and its compacted form are accepted.
///
/// # Errors
///
/// Returns a [`MileageParseError`] describing the first violation of the
/// `<digits><unit>` shape. Malformed input never yields zero.
pub fn parse(text: &str) -> Result<MileageReading, MileageParseError> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    if compact.is_empty() {
        return Err(MileageParseError::Empty);
    }

    let digits_start = compact
        .find(|c: char| c.is_ascii_digit())
        .ok_or(MileageParseError::MissingDigits)?;
    if digits_start > 0 {
        return Err(MileageParseError::LeadingCharacters(
            compact[..digits_start].to_string(),
        ));
    }

    let (digits, rest) = take_number(&compact);
    let value = digits
        .parse::<u64>()
        .map_err(|_| MileageParseError::Overflow)?;
    let unit = parse_unit(rest)?;

    Ok(MileageReading {
        raw_text: text.to_string(),
        value,
        unit,
    })
}

/// Splits the leading number off `input`, dropping thousands separators.
///
/// A `,` or `.` only counts as a separator when exactly three digits follow
/// it; otherwise it ends the number and becomes part of the suffix.
fn take_number(input: &str) -> (String, &str) {
    let bytes = input.as_bytes();
    let mut digits = String::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_digit() {
            digits.push(char::from(b));
            i += 1;
        } else if (b == b',' || b == b'.') && is_digit_group(&bytes[i + 1..]) {
            i += 1;
        } else {
            break;
        }
    }

    (digits, &input[i..])
}

fn is_digit_group(bytes: &[u8]) -> bool {
    bytes.len() >= 3
        && bytes[..3].iter().all(u8::is_ascii_digit)
        && bytes.get(3).is_none_or(|b| !b.is_ascii_digit())
}

fn parse_unit(suffix: &str) -> Result<DistanceUnit, MileageParseError> {
    if suffix.is_empty() {
        return Err(MileageParseError::MissingUnit);
    }
    let marker = suffix.trim_start_matches([',', '.']);
    if marker.starts_with("mi") {
        Ok(DistanceUnit::Miles)
    } else if marker.starts_with('k') {
        Ok(DistanceUnit::Kilometers)
    } else {
        Err(MileageParseError::UnknownUnit(suffix.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kilometres() {
        let reading = parse("5421km").expect("parse");
        assert_eq!(reading.value, 5421);
        assert_eq!(reading.unit, DistanceUnit::Kilometers);
        assert_eq!(reading.raw_text, "5421km");
    }

    #[test]
    fn parses_miles() {
        let reading = parse("3369mi").expect("parse");
        assert_eq!(reading.value, 3369);
        assert_eq!(reading.unit, DistanceUnit::Miles);
    }

    #[test]
    fn accepts_long_unit_suffixes_and_case() {
        assert_eq!(parse("120KMS").unwrap().unit, DistanceUnit::Kilometers);
        assert_eq!(parse("120Miles").unwrap().unit, DistanceUnit::Miles);
        assert_eq!(parse("120k").unwrap().unit, DistanceUnit::Kilometers);
    }

    #[test]
    fn ignores_whitespace_inside_raw_text() {
        let reading = parse("  5421 km\n").expect("parse");
        assert_eq!(reading.value, 5421);
        assert_eq!(reading.unit, DistanceUnit::Kilometers);
    }

    #[test]
    fn drops_thousands_separators() {
        assert_eq!(parse("12,345km").unwrap().value, 12_345);
        assert_eq!(parse("1.234.567mi").unwrap().value, 1_234_567);
    }

    #[test]
    fn decimal_fraction_is_not_a_separator() {
        assert_eq!(
            parse("123.4km"),
            Err(MileageParseError::UnknownUnit(".4km".to_string()))
        );
    }

    #[test]
    fn skips_separators_before_the_unit() {
        let reading = parse("5421.km").expect("parse");
        assert_eq!((reading.value, reading.unit), (5421, DistanceUnit::Kilometers));

        let reading = parse("3369,mi").expect("parse");
        assert_eq!((reading.value, reading.unit), (3369, DistanceUnit::Miles));

        assert_eq!(parse("12,345.,km").unwrap().value, 12_345);
    }

    #[test]
    fn trailing_separator_without_unit_fails() {
        assert_eq!(
            parse("5421."),
            Err(MileageParseError::UnknownUnit(".".to_string()))
        );
    }

    #[test]
    fn empty_text_fails() {
        assert_eq!(parse(""), Err(MileageParseError::Empty));
        assert_eq!(parse(" \n\t"), Err(MileageParseError::Empty));
    }

    #[test]
    fn text_without_digits_fails() {
        assert_eq!(parse("km"), Err(MileageParseError::MissingDigits));
    }

    #[test]
    fn letters_before_digits_fail() {
        assert_eq!(
            parse("odo5421km"),
            Err(MileageParseError::LeadingCharacters("odo".to_string()))
        );
    }

    #[test]
    fn missing_unit_fails() {
        assert_eq!(parse("5421"), Err(MileageParseError::MissingUnit));
    }

    #[test]
    fn bare_m_is_not_miles() {
        assert_eq!(
            parse("5421m"),
            Err(MileageParseError::UnknownUnit("m".to_string()))
        );
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            parse("99999999999999999999999km"),
            Err(MileageParseError::Overflow)
        );
    }
}
