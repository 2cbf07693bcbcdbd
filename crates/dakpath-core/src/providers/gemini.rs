//! Gemini `generateContent` REST client.
//!
//! This is the only place that knows the wire format. Status codes and the
//! response envelope are interpreted here; the prediction layer only sees
//! [`GenerateResponse`] or a [`TrackError`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{GenerateRequest, GenerateResponse, GenerativeModel, ResponseFormat};
use crate::config::PredictorConfig;
use crate::error::{TrackError, TrackResult};
use crate::types::GroundingSource;

pub const USER_AGENT_VALUE: &str = concat!("dakpath/", env!("CARGO_PKG_VERSION"));

const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_SOURCE_TITLE: &str = "Map Location Source";
const MAX_ERROR_BODY: usize = 300;

/// Live client for the Gemini API.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(config: &PredictorConfig) -> TrackResult<Self> {
        config.validate()?;
        let api_key = config.api_key.clone().unwrap_or_default();

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| TrackError::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> TrackResult<GenerateResponse> {
        let url = self.endpoint(&request.model);
        let body = request_body(request);
        debug!(url = %url, grounded = request.grounding.is_some(), "calling generateContent");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(MAX_ERROR_BODY).collect();
            warn!(status = status.as_u16(), "generateContent returned an error status");
            let message = match status.as_u16() {
                401 | 403 => format!("HTTP {}: API key rejected: {}", status.as_u16(), snippet),
                429 => format!("HTTP 429: quota exhausted: {}", snippet),
                code => format!("HTTP {}: {}", code, snippet),
            };
            return Err(TrackError::upstream(message));
        }

        let envelope: Value = response.json().await.map_err(|e| {
            TrackError::upstream(format!("failed to read generateContent response: {}", e))
        })?;

        parse_response(&envelope)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

/// Build the JSON body for `generateContent`.
pub(crate) fn request_body(request: &GenerateRequest) -> Value {
    let mut body = json!({
        "contents": [
            { "role": "user", "parts": [ { "text": request.prompt } ] }
        ]
    });

    if let ResponseFormat::Json { schema } = &request.response_format {
        body["generationConfig"] = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
    }

    if let Some(grounding) = &request.grounding {
        body["tools"] = json!([{ "googleMaps": {} }]);
        if let Some(p) = grounding.lat_lng {
            body["toolConfig"] = json!({
                "retrievalConfig": {
                    "latLng": { "latitude": p.lat, "longitude": p.lng }
                }
            });
        }
    }

    body
}

/// Read text and maps citations from a `generateContent` envelope.
pub(crate) fn parse_response(envelope: &Value) -> TrackResult<GenerateResponse> {
    let candidate = match envelope.pointer("/candidates/0") {
        Some(c) => c,
        None => {
            let reason = envelope
                .pointer("/promptFeedback/blockReason")
                .and_then(Value::as_str);
            return Err(match reason {
                Some(r) => TrackError::upstream(format!("prompt blocked: {}", r)),
                None => TrackError::upstream("response has no candidates"),
            });
        }
    };

    let text: String = candidate
        .pointer("/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    let grounding_sources = candidate
        .pointer("/groundingMetadata/groundingChunks")
        .and_then(Value::as_array)
        .map(|chunks| chunks.iter().filter_map(maps_source).collect())
        .unwrap_or_default();

    Ok(GenerateResponse {
        text,
        grounding_sources,
    })
}

fn maps_source(chunk: &Value) -> Option<GroundingSource> {
    let maps = chunk.get("maps")?;
    let uri = maps.get("uri").and_then(Value::as_str)?;
    let title = maps
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_SOURCE_TITLE);
    Some(GroundingSource {
        uri: uri.to_string(),
        title: title.to_string(),
    })
}
