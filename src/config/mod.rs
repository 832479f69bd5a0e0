// SPDX-License-Identifier: MPL-2.0
//! This module handles the pipeline configuration, loaded from an
//! `odo_lens.toml` file.
//!
//! # Configuration Sections
//!
//! - `[paths]` - Inbox, processing directory and record log
//! - `[ocr]` - Text detection endpoint, credentials and timeout
//! - `[crop]` - Odometer crop rectangle
//! - `[validation]` - Photo pair tolerances
//! - `[polling]` - Inbox polling cadence and attempt limit
//! - `[logging]` - Log filter
//!
//! # Path Resolution
//!
//! 1. Explicit path passed to [`load`] (the `--config` flag)
//! 2. `ODO_LENS_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/OdoLens/odo_lens.toml`)
//!
//! When no file is found the defaults apply. OCR credentials may also come
//! from `ODO_LENS_OCR_API_KEY` / `ODO_LENS_OCR_ACCESS_TOKEN`, which win over
//! the file.
//!
//! Loading never validates; call [`Config::validate`] before running any
//! pipeline stage.
//!
//! # Examples
//!
//! ```no_run
//! use odo_lens::config;
//!
//! let config = config::load(None).expect("failed to load config");
//! config.validate().expect("invalid config");
//! println!("watching {}", config.paths.inbox_dir.display());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::application::polling::RetryPolicy;
use crate::domain::region::{default_region, CropRegion};
use crate::error::{Error, Result};
use crate::media::validation::Tolerances;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "odo_lens.toml";
const APP_NAME: &str = "OdoLens";

/// Environment variable pointing at the config file.
pub const ENV_CONFIG_PATH: &str = "ODO_LENS_CONFIG";

/// Environment variable holding the OCR API key.
pub const ENV_OCR_API_KEY: &str = "ODO_LENS_OCR_API_KEY";

/// Environment variable holding an OCR OAuth access token.
pub const ENV_OCR_ACCESS_TOKEN: &str = "ODO_LENS_OCR_ACCESS_TOKEN";

// =============================================================================
// Section Structs
// =============================================================================

/// Filesystem locations.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory new photos arrive in.
    pub inbox_dir: PathBuf,

    /// Directory cropped images are written to.
    pub processed_dir: PathBuf,

    /// Flat-file mileage log.
    pub record_log: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            inbox_dir: PathBuf::from(DEFAULT_INBOX_DIR),
            processed_dir: PathBuf::from(DEFAULT_PROCESSED_DIR),
            record_log: PathBuf::from(DEFAULT_RECORD_LOG),
        }
    }
}

/// Text detection service settings.
#[derive(Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OcrConfig {
    /// Base URL of the Vision API.
    pub endpoint: String,

    /// API key, sent as the `key` query parameter.
    pub api_key: Option<String>,

    /// OAuth access token, sent as a bearer token. Used when no API key is set.
    pub access_token: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl OcrConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.api_key) || present(&self.access_token)
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OCR_ENDPOINT.to_string(),
            api_key: None,
            access_token: None,
            timeout_secs: DEFAULT_OCR_TIMEOUT_SECS,
        }
    }
}

// Credentials stay out of logs.
impl fmt::Debug for OcrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("OcrConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &redact(&self.api_key))
            .field("access_token", &redact(&self.access_token))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Odometer crop rectangle, in source image pixels.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CropConfig {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropConfig {
    /// Converts to a validated [`CropRegion`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the rectangle is empty.
    pub fn region(&self) -> Result<CropRegion> {
        CropRegion::new(self.left, self.top, self.right, self.bottom)
    }
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            left: default_region::LEFT,
            top: default_region::TOP,
            right: default_region::RIGHT,
            bottom: default_region::BOTTOM,
        }
    }
}

/// Photo pair tolerances.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Capture times must differ by less than this many seconds.
    pub max_time_delta_secs: u64,

    /// Latitude and longitude must each differ by less than this many degrees.
    pub max_coordinate_delta: f64,
}

impl ValidationConfig {
    #[must_use]
    pub fn tolerances(&self) -> Tolerances {
        Tolerances::new(self.max_time_delta_secs, self.max_coordinate_delta)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_time_delta_secs: DEFAULT_MAX_TIME_DELTA_SECS,
            max_coordinate_delta: DEFAULT_MAX_COORDINATE_DELTA,
        }
    }
}

/// Inbox polling settings.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds to wait between two attempts.
    pub interval_secs: u64,

    /// Give up after this many attempts. Unbounded when absent.
    pub max_attempts: Option<u32>,
}

impl PollingConfig {
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_secs(self.interval_secs),
            max_attempts: self.max_attempts,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            max_attempts: None,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

// =============================================================================
// Config
// =============================================================================

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub ocr: OcrConfig,
    pub crop: CropConfig,
    pub validation: ValidationConfig,
    pub polling: PollingConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Overrides OCR credentials from the environment.
    ///
    /// `lookup` is `std::env::var` in production and a map in tests.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_OCR_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.ocr.api_key = Some(key);
        }
        if let Some(token) = lookup(ENV_OCR_ACCESS_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.ocr.access_token = Some(token);
        }
    }

    /// Checks everything the pipeline needs before any stage runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.paths.inbox_dir.as_os_str().is_empty() {
            return Err(Error::Config("paths.inbox_dir is empty".into()));
        }
        if self.paths.processed_dir.as_os_str().is_empty() {
            return Err(Error::Config("paths.processed_dir is empty".into()));
        }
        if self.paths.record_log.as_os_str().is_empty() {
            return Err(Error::Config("paths.record_log is empty".into()));
        }
        if self.paths.inbox_dir == self.paths.processed_dir {
            return Err(Error::Config(
                "paths.processed_dir must differ from paths.inbox_dir".into(),
            ));
        }

        if self.ocr.endpoint.trim().is_empty() {
            return Err(Error::Config("ocr.endpoint is empty".into()));
        }
        if !self.ocr.has_credentials() {
            return Err(Error::Config(format!(
                "no OCR credentials: set ocr.api_key, ocr.access_token, {ENV_OCR_API_KEY} or {ENV_OCR_ACCESS_TOKEN}"
            )));
        }
        if self.ocr.timeout_secs == 0 || self.ocr.timeout_secs > MAX_OCR_TIMEOUT_SECS {
            return Err(Error::Config(format!(
                "ocr.timeout_secs must be between 1 and {MAX_OCR_TIMEOUT_SECS}"
            )));
        }

        self.crop.region()?;

        if self.validation.max_time_delta_secs == 0 {
            return Err(Error::Config(
                "validation.max_time_delta_secs must be positive".into(),
            ));
        }
        let delta = self.validation.max_coordinate_delta;
        if !delta.is_finite() || delta < MIN_COORDINATE_DELTA {
            return Err(Error::Config(format!(
                "validation.max_coordinate_delta must be at least {MIN_COORDINATE_DELTA} \
                 (coordinates are compared at 5 decimal places)"
            )));
        }

        if self.polling.interval_secs == 0 {
            return Err(Error::Config("polling.interval_secs must be positive".into()));
        }
        if self.polling.max_attempts == Some(0) {
            return Err(Error::Config("polling.max_attempts must be positive".into()));
        }

        Ok(())
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Returns the config file location from the environment or platform dirs.
fn get_default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(ENV_CONFIG_PATH) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration and applies environment overrides.
///
/// An explicit path must exist. Without one, a missing default file falls
/// back to [`Config::default`].
///
/// # Errors
///
/// Returns [`Error::Config`] if a file exists but cannot be read or parsed.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => load_from_path(path)?,
        None => match get_default_config_path() {
            Some(path) if path.exists() => load_from_path(&path)?,
            _ => Config::default(),
        },
    };
    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

/// Loads a configuration file without applying environment overrides.
///
/// # Errors
///
/// Returns [`Error::Config`] if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
    Ok(toml::from_str(&content)?)
}
