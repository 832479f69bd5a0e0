// SPDX-License-Identifier: MPL-2.0
//! Google Cloud Vision text detection adapter.
//!
//! Calls the `images:annotate` REST method with a single `TEXT_DETECTION`
//! request and maps the answer onto [`TextAnnotation`]s.

use crate::application::port::{TextAnnotation, TextDetector};
use crate::config::OcrConfig;
use crate::error::{Error, Result};
use base64::prelude::{Engine as _, BASE64_STANDARD};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// gRPC status code for a rejected argument, e.g. undecodable image bytes.
const INVALID_ARGUMENT: i32 = 3;

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    requests: [ImageRequest<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    image: ImageContent<'a>,
    features: [Feature; 1],
}

#[derive(Debug, Serialize)]
struct ImageContent<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> AnnotateRequest<'a> {
    fn text_detection(content: &'a str) -> Self {
        Self {
            requests: [ImageRequest {
                image: ImageContent { content },
                features: [Feature {
                    kind: "TEXT_DETECTION",
                }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    text_annotations: Vec<RawAnnotation>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct RawAnnotation {
    #[serde(default)]
    description: String,
    locale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Status,
}

// =============================================================================
// Response Mapping
// =============================================================================

/// Maps a successful `images:annotate` body to annotations.
///
/// A per-image `error` object wins over any annotations.
fn annotations_from_response(body: &str) -> Result<Vec<TextAnnotation>> {
    let response: AnnotateResponse = serde_json::from_str(body)
        .map_err(|e| Error::ServiceUnavailable(format!("malformed OCR response: {e}")))?;

    let Some(first) = response.responses.into_iter().next() else {
        return Ok(Vec::new());
    };

    if let Some(status) = first.error {
        return Err(if status.code == INVALID_ARGUMENT {
            Error::ImageIo(format!("OCR rejected image: {}", status.message))
        } else {
            Error::ServiceUnavailable(format!(
                "OCR error {}: {}",
                status.code, status.message
            ))
        });
    }

    Ok(first
        .text_annotations
        .into_iter()
        .map(|raw| TextAnnotation {
            description: raw.description,
            locale: raw.locale,
        })
        .collect())
}

/// Maps a non-success HTTP status to an error.
///
/// Only 400 is treated as a problem with the image itself; every other
/// failure is assumed to clear up (credentials rotated, quota refilled,
/// backend recovered).
fn error_for_status(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());

    if status == StatusCode::BAD_REQUEST {
        Error::ImageIo(format!("OCR rejected image: {message}"))
    } else {
        Error::ServiceUnavailable(format!("HTTP {status}: {message}"))
    }
}

// =============================================================================
// GoogleVisionDetector
// =============================================================================

#[derive(Clone)]
enum Auth {
    ApiKey(String),
    Bearer(String),
}

/// [`TextDetector`] backed by the Cloud Vision REST API.
#[derive(Clone)]
pub struct GoogleVisionDetector {
    client: reqwest::Client,
    url: String,
    auth: Auth,
}

impl std::fmt::Debug for GoogleVisionDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let auth = match self.auth {
            Auth::ApiKey(_) => "api-key",
            Auth::Bearer(_) => "bearer",
        };
        f.debug_struct("GoogleVisionDetector")
            .field("url", &self.url)
            .field("auth", &auth)
            .finish_non_exhaustive()
    }
}

impl GoogleVisionDetector {
    /// Builds a detector from the `[ocr]` section. An API key is preferred
    /// over an access token when both are set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] without credentials or if the HTTP client
    /// cannot be built.
    pub fn from_config(config: &OcrConfig) -> Result<Self> {
        let non_blank = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        let auth = match (non_blank(&config.api_key), non_blank(&config.access_token)) {
            (Some(key), _) => Auth::ApiKey(key),
            (None, Some(token)) => Auth::Bearer(token),
            (None, None) => return Err(Error::Config("no OCR credentials configured".into())),
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("OdoLens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!("{}/v1/images:annotate", config.endpoint.trim_end_matches('/')),
            auth,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TextDetector for GoogleVisionDetector {
    async fn detect_text(&self, image: Vec<u8>) -> Result<Vec<TextAnnotation>> {
        let content = BASE64_STANDARD.encode(&image);
        let request = self
            .client
            .post(&self.url)
            .json(&AnnotateRequest::text_detection(&content));
        let request = match &self.auth {
            Auth::ApiKey(key) => request.query(&[("key", key)]),
            Auth::Bearer(token) => request.bearer_auth(token),
        };

        let response = request.send().await.map_err(|e| {
            let kind = if e.is_timeout() { "timed out" } else { "request failed" };
            Error::ServiceUnavailable(format!("OCR {kind}: {e}"))
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::ServiceUnavailable(format!("cannot read OCR response: {e}")))?;

        if !status.is_success() {
            tracing::warn!(%status, "OCR request failed");
            return Err(error_for_status(status, &body));
        }

        let annotations = annotations_from_response(&body)?;
        tracing::debug!(count = annotations.len(), "OCR annotations received");
        Ok(annotations)
    }
}
