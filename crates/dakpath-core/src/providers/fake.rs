use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{GenerateRequest, GenerateResponse, GenerativeModel};
use crate::error::{TrackError, TrackResult};
use crate::types::GroundingSource;

/// Canned model for tests and offline demos.
#[derive(Debug, Default)]
pub struct FakeModel {
    fixed_response: Option<String>,
    grounding_sources: Vec<GroundingSource>,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl FakeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    pub fn with_grounding(mut self, sources: Vec<GroundingSource>) -> Self {
        self.grounding_sources = sources;
        self
    }

    /// Fail every call with an upstream error.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Hold each call open for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn generate(&self, request: &GenerateRequest) -> TrackResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = &self.failure {
            return Err(TrackError::upstream(message.clone()));
        }

        Ok(GenerateResponse {
            text: self.fixed_response.clone().unwrap_or_else(|| "{}".to_string()),
            grounding_sources: self.grounding_sources.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
