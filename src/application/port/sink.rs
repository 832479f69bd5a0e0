// SPDX-License-Identifier: MPL-2.0
//! Record sink port.

use crate::domain::mileage::DualMileage;
use crate::error::Result;
use chrono::{DateTime, Local};
use std::fmt;

/// A mileage reading ready to be stored. Miles and kilometres always travel
/// together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MileageRecord {
    pub date: DateTime<Local>,
    pub miles: u64,
    pub kms: u64,
}

impl MileageRecord {
    #[must_use]
    pub fn new(date: DateTime<Local>, mileage: DualMileage) -> Self {
        Self {
            date,
            miles: mileage.miles,
            kms: mileage.kms,
        }
    }

    #[must_use]
    pub fn mileage(&self) -> DualMileage {
        DualMileage {
            miles: self.miles,
            kms: self.kms,
        }
    }
}

impl fmt::Display for MileageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}mi {}km",
            self.date.format("%Y-%m-%d %H:%M:%S"),
            self.miles,
            self.kms
        )
    }
}

/// Port for durable storage of mileage records.
pub trait RecordSink: Send + Sync {
    /// Stores one record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Sink`] if the record was not stored.
    fn record(&self, record: &MileageRecord) -> Result<()>;
}
