//! Generative model seam.
//!
//! [`crate::PredictionClient`] talks to a [`GenerativeModel`]; the live
//! implementation is [`gemini::GeminiClient`], tests and offline demos use
//! [`fake::FakeModel`].

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TrackResult;
use crate::types::{GeoPoint, GroundingSource};

pub mod fake;
pub mod gemini;

/// How the model is asked to shape its output.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// `application/json` constrained by a response schema.
    Json { schema: Value },
    /// Unconstrained text (required when tools are enabled).
    FreeText,
}

/// Maps grounding tool configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapsGrounding {
    /// Retrieval seed, usually the user's position.
    pub lat_lng: Option<GeoPoint>,
}

/// A single generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub response_format: ResponseFormat,
    pub grounding: Option<MapsGrounding>,
}

/// Model output: the concatenated text plus any grounding citations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateResponse {
    pub text: String,
    pub grounding_sources: Vec<GroundingSource>,
}

#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> TrackResult<GenerateResponse>;

    fn provider_name(&self) -> &'static str;
}
