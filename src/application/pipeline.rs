// SPDX-License-Identifier: MPL-2.0
//! The mileage pipeline: inbox → crop → OCR → normalize → sink.
//!
//! Photo pair validation is a separate path over the same configuration and
//! does not feed the sink.

use crate::application::ocr::read_text;
use crate::application::polling::{poll_until_ready, Cancellation, RetryPolicy};
use crate::application::port::{MileageRecord, RecordSink, Sleeper, TextDetector};
use crate::config::Config;
use crate::domain::mileage::{parse_reading, MileageReading};
use crate::domain::region::CropRegion;
use crate::error::{Error, Result};
use crate::inbox::latest_artifact;
use crate::media::{crop_to_processing_dir, valid_photo, Tolerances};
use chrono::Local;
use std::path::{Path, PathBuf};

/// Runs the pipeline stages against a text detector and a record sink.
#[derive(Debug)]
pub struct Pipeline<D, S> {
    detector: D,
    sink: S,
    inbox_dir: PathBuf,
    processed_dir: PathBuf,
    region: CropRegion,
    tolerances: Tolerances,
    retry: RetryPolicy,
}

impl<D: TextDetector, S: RecordSink> Pipeline<D, S> {
    /// Builds a pipeline from a configuration, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn new(config: &Config, detector: D, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            detector,
            sink,
            inbox_dir: config.paths.inbox_dir.clone(),
            processed_dir: config.paths.processed_dir.clone(),
            region: config.crop.region()?,
            tolerances: config.validation.tolerances(),
            retry: config.polling.retry_policy(),
        })
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Crops one image, runs OCR on the crop and parses the mileage.
    ///
    /// # Errors
    ///
    /// Any crop, OCR or parse error.
    pub async fn read_mileage(&self, image: &Path) -> Result<MileageReading> {
        let source = image.to_path_buf();
        let region = self.region;
        let processed_dir = self.processed_dir.clone();
        let cropped = tokio::task::spawn_blocking(move || {
            crop_to_processing_dir(&source, &region, &processed_dir)
        })
        .await
        .map_err(|e| Error::ImageIo(format!("crop task failed: {e}")))??;

        let text = read_text(&self.detector, &cropped).await?;
        let reading = parse_reading(&text)?;
        tracing::info!(
            image = %image.display(),
            value = reading.value,
            unit = %reading.unit,
            "parsed mileage"
        );
        Ok(reading)
    }

    /// Processes the newest inbox file once and stores the result.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInbox`] when nothing has arrived yet, otherwise any
    /// stage or sink error.
    pub async fn process_latest(&self) -> Result<MileageRecord> {
        let artifact = latest_artifact(&self.inbox_dir)?;
        tracing::info!(artifact = %artifact.display(), "processing inbox artifact");

        let reading = self.read_mileage(&artifact).await?;
        let record = MileageRecord::new(Local::now(), reading.to_dual());
        self.sink.record(&record)?;

        tracing::info!(miles = record.miles, kms = record.kms, "mileage recorded");
        Ok(record)
    }

    /// Polls the inbox until a reading has been recorded.
    ///
    /// Empty inbox and OCR outages are retried per the configured policy.
    ///
    /// # Errors
    ///
    /// See [`poll_until_ready`].
    pub async fn run_until_recorded<Z: Sleeper>(
        &self,
        sleeper: &Z,
        cancellation: &mut Cancellation,
    ) -> Result<MileageRecord> {
        poll_until_ready(&self.retry, sleeper, cancellation, || self.process_latest()).await
    }

    /// Checks that a mileage photo matches its reference photo.
    ///
    /// # Errors
    ///
    /// Metadata extraction errors for either photo.
    pub async fn validate_pair(&self, reference: &Path, mileage: &Path) -> Result<bool> {
        check_photo_pair(reference, mileage, self.tolerances).await
    }
}

/// Runs [`valid_photo`] on the blocking pool.
///
/// Needs no OCR credentials, so callers without a [`Pipeline`] use it
/// directly.
///
/// # Errors
///
/// Metadata extraction errors for either photo, or [`Error::ImageIo`] if the
/// blocking task dies.
pub async fn check_photo_pair(
    reference: &Path,
    mileage: &Path,
    tolerances: Tolerances,
) -> Result<bool> {
    let reference = reference.to_path_buf();
    let mileage = mileage.to_path_buf();
    tokio::task::spawn_blocking(move || valid_photo(&reference, &mileage, &tolerances))
        .await
        .map_err(|e| Error::ImageIo(format!("validation task failed: {e}")))?
}
