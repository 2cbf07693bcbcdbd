//! Error types for validation and prediction.

use crate::validate::FieldErrors;

/// Tracking errors.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// One or more form fields failed validation. Never reaches the network.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The generative API call failed outright (network, timeout, quota, non-2xx).
    #[error("upstream error: {message}")]
    Upstream { message: String },

    /// The call succeeded but the text could not be read as a tracking record.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Configuration error (missing credential, bad URL, ...).
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A submission is already in flight.
    #[error("a tracking request is already in flight")]
    Busy,
}

impl TrackError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 1,
            Self::Config { .. } => 2,
            Self::Upstream { .. } | Self::Parse { .. } => 3,
            Self::Busy => 4,
        }
    }

    /// Whether the error collapses into the generic "tracking failed" panel.
    ///
    /// Upstream and parse failures look the same to the user; only the logs
    /// tell them apart.
    pub fn is_tracking_failure(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::Parse { .. })
    }

    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Upstream { .. } => "upstream",
            Self::Parse { .. } => "parse",
            Self::Config { .. } => "config",
            Self::Busy => "busy",
        }
    }
}

impl From<reqwest::Error> for TrackError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        Self::Upstream { message }
    }
}

impl From<FieldErrors> for TrackError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Result type for tracking operations.
pub type TrackResult<T> = Result<T, TrackError>;
