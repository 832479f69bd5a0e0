// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Paths**: Inbox, processing and record log locations
//! - **OCR**: Text detection endpoint and request timeout
//! - **Validation**: Photo pair tolerances
//! - **Polling**: Inbox polling cadence

// ==========================================================================
// Path Defaults
// ==========================================================================

/// Directory the inbound receiver drops photos into.
pub const DEFAULT_INBOX_DIR: &str = "./images";

/// Directory cropped images are written to before OCR.
pub const DEFAULT_PROCESSED_DIR: &str = "./PROCESSED";

/// Flat-file mileage log. Backups go to a `BACKUP/` directory beside it.
pub const DEFAULT_RECORD_LOG: &str = "./LOGS/mileage_log.txt";

// ==========================================================================
// OCR Defaults
// ==========================================================================

/// Base URL of the Google Cloud Vision REST API.
pub const DEFAULT_OCR_ENDPOINT: &str = "https://vision.googleapis.com";

/// Timeout for a single text detection request (in seconds).
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 30;

/// Maximum request timeout (in seconds).
pub const MAX_OCR_TIMEOUT_SECS: u64 = 600;

// ==========================================================================
// Validation Defaults
// ==========================================================================

/// Largest capture-time difference between two photos of one session
/// (exclusive, in seconds).
pub const DEFAULT_MAX_TIME_DELTA_SECS: u64 = 120;

/// Largest latitude or longitude difference between two photos of one
/// session (exclusive, in decimal degrees). Roughly 500 m at mid-latitudes.
pub const DEFAULT_MAX_COORDINATE_DELTA: f64 = 0.005;

/// Smallest usable coordinate bound. Coordinates are compared at 5 decimals,
/// so anything finer rounds to zero.
pub const MIN_COORDINATE_DELTA: f64 = 0.00001;

// ==========================================================================
// Polling Defaults
// ==========================================================================

/// Wait between two inbox polls (in seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_OCR_TIMEOUT_SECS > 0);
    assert!(DEFAULT_OCR_TIMEOUT_SECS <= MAX_OCR_TIMEOUT_SECS);
    assert!(DEFAULT_MAX_TIME_DELTA_SECS > 0);
    assert!(DEFAULT_MAX_COORDINATE_DELTA >= MIN_COORDINATE_DELTA);
    assert!(DEFAULT_POLL_INTERVAL_SECS > 0);
};
