// SPDX-License-Identifier: MPL-2.0
//! Flat-file record sink.
//!
//! Appends one line per reading to a log file and writes a one-record backup
//! file per reading into a `BACKUP/` directory next to the log:
//!
//! ```text
//! LOGS/mileage_log.txt              2024-03-09 14:05:00 3369mi 5421km
//! LOGS/BACKUP/2024-03-09_14-05-00.123456.txt
//! ```

use crate::application::port::{MileageRecord, RecordSink};
use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const BACKUP_DIR: &str = "BACKUP";

#[derive(Debug, Clone)]
pub struct LogFileSink {
    log_path: PathBuf,
    backup_dir: PathBuf,
}

impl LogFileSink {
    #[must_use]
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        let log_path = log_path.into();
        let backup_dir = log_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(BACKUP_DIR);
        Self {
            log_path,
            backup_dir,
        }
    }

    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    #[must_use]
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    fn append_line(&self, record: &MileageRecord) -> std::io::Result<()> {
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{record}")
    }

    fn write_backup(&self, record: &MileageRecord) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.backup_dir)?;
        let name = format!("{}.txt", record.date.format("%Y-%m-%d_%H-%M-%S%.6f"));
        let path = self.backup_dir.join(name);
        let contents = format!(
            "{}\n{}mi\n{}km",
            record.date.format("%Y-%m-%d %H:%M:%S"),
            record.miles,
            record.kms
        );
        fs::write(&path, contents)?;
        Ok(path)
    }
}

impl RecordSink for LogFileSink {
    fn record(&self, record: &MileageRecord) -> Result<()> {
        self.append_line(record).map_err(|e| {
            Error::Sink(format!("cannot append to {}: {e}", self.log_path.display()))
        })?;
        let backup = self.write_backup(record).map_err(|e| {
            Error::Sink(format!("cannot write backup in {}: {e}", self.backup_dir.display()))
        })?;
        tracing::debug!(
            log = %self.log_path.display(),
            backup = %backup.display(),
            "mileage record written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mileage::DualMileage;
    use chrono::{Local, TimeZone};
    use tempfile::tempdir;

    fn record(hour: u32, miles: u64, kms: u64) -> MileageRecord {
        let date = Local.with_ymd_and_hms(2024, 3, 9, hour, 5, 0).unwrap();
        MileageRecord::new(date, DualMileage { miles, kms })
    }

    #[test]
    fn appends_one_line_per_record() {
        let temp_dir = tempdir().expect("temp dir");
        let sink = LogFileSink::new(temp_dir.path().join("LOGS").join("mileage_log.txt"));

        sink.record(&record(14, 3369, 5421)).unwrap();
        sink.record(&record(15, 3370, 5422)).unwrap();

        let log = fs::read_to_string(sink.log_path()).unwrap();
        assert_eq!(
            log,
            "2024-03-09 14:05:00 3369mi 5421km\n2024-03-09 15:05:00 3370mi 5422km\n"
        );
    }

    #[test]
    fn writes_backup_beside_log() {
        let temp_dir = tempdir().expect("temp dir");
        let sink = LogFileSink::new(temp_dir.path().join("LOGS").join("mileage_log.txt"));
        assert_eq!(sink.backup_dir(), temp_dir.path().join("LOGS").join("BACKUP"));

        sink.record(&record(14, 3369, 5421)).unwrap();

        let backups: Vec<_> = fs::read_dir(sink.backup_dir())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            fs::read_to_string(&backups[0]).unwrap(),
            "2024-03-09 14:05:00\n3369mi\n5421km"
        );
    }

    #[test]
    fn unwritable_log_is_sink_error() {
        let temp_dir = tempdir().expect("temp dir");
        // A directory where the log file should be.
        let log_path = temp_dir.path().join("mileage_log.txt");
        fs::create_dir(&log_path).unwrap();

        let err = LogFileSink::new(&log_path)
            .record(&record(14, 1, 1))
            .unwrap_err();
        assert!(matches!(err, Error::Sink(_)));
    }
}
