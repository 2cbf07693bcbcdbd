//! Prediction client configuration.
//!
//! The credential travels inside [`PredictorConfig`]; the client itself never
//! reads the environment. `from_env` is a convenience for binaries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TrackError, TrackResult};
use crate::types::TransportMode;

/// Configuration for [`crate::PredictionClient`] and [`crate::GeminiClient`].
#[derive(Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// API key for the generative API.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the API (without trailing slash).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for road predictions (strict JSON schema).
    #[serde(default = "default_road_model")]
    pub road_model: String,

    /// Model used for rail predictions (maps grounding).
    #[serde(default = "default_rail_model")]
    pub rail_model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_road_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_rail_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            road_model: default_road_model(),
            rail_model: default_rail_model(),
            timeout_secs: default_timeout(),
        }
    }
}

// Keeps the key out of logs and panics.
impl fmt::Debug for PredictorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("road_model", &self.road_model)
            .field("rail_model", &self.rail_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl PredictorConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `DAKPATH_API_KEY` | API key (falls back to `GEMINI_API_KEY`) |
    /// | `DAKPATH_API_URL` | API base URL |
    /// | `DAKPATH_ROAD_MODEL` | Road model id |
    /// | `DAKPATH_RAIL_MODEL` | Rail model id |
    /// | `DAKPATH_TIMEOUT` | Request timeout in seconds |
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("DAKPATH_API_KEY").or_else(|| non_empty("GEMINI_API_KEY")),
            base_url: non_empty("DAKPATH_API_URL").unwrap_or_else(default_base_url),
            road_model: non_empty("DAKPATH_ROAD_MODEL").unwrap_or_else(default_road_model),
            rail_model: non_empty("DAKPATH_RAIL_MODEL").unwrap_or_else(default_rail_model),
            timeout_secs: non_empty("DAKPATH_TIMEOUT")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Model id for a transport mode.
    pub fn model_for(&self, mode: TransportMode) -> &str {
        match mode {
            TransportMode::Road => &self.road_model,
            TransportMode::Rail => &self.rail_model,
        }
    }

    /// Check that the config can reach the live API.
    pub fn validate(&self) -> TrackResult<()> {
        if self.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(TrackError::config(
                "missing API key (set DAKPATH_API_KEY or pass --api-key)",
            ));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(TrackError::config(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(TrackError::config("timeout must be at least 1 second"));
        }
        Ok(())
    }
}
