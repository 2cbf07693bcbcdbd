//! Prediction client: validated order in, fabricated tracking record out.
//!
//! The transport mode on the [`OrderInput`] is authoritative. Road requests
//! use a strict response schema; rail requests enable maps grounding and dig
//! the JSON out of free text. Both paths end in the same schema check.
//!
//! One call to [`PredictionClient::predict`] is one outbound request. There
//! is no retry, cache or deduplication, and the model is generative: repeated
//! calls with the same input are expected to return different records.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info_span, warn, Instrument};

use crate::config::PredictorConfig;
use crate::error::{TrackError, TrackResult};
use crate::extract::extract_json;
use crate::i18n::Language;
use crate::prompt::build_prompt;
use crate::providers::{GenerateRequest, GenerativeModel, MapsGrounding, ResponseFormat};
use crate::schema::{parse_json, response_schema, tracking_data_from_value};
use crate::types::{GeoPoint, OrderInput, TrackingData, TransportMode};

/// Turns a validated order into a [`TrackingData`] via a generative model.
#[derive(Clone)]
pub struct PredictionClient {
    model: Arc<dyn GenerativeModel>,
    config: PredictorConfig,
}

impl PredictionClient {
    pub fn new(model: Arc<dyn GenerativeModel>, config: PredictorConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &'static str {
        self.model.provider_name()
    }

    /// Build the request for `input` without sending it.
    pub fn build_request(
        &self,
        input: &OrderInput,
        hint: Option<GeoPoint>,
        lang: Language,
    ) -> GenerateRequest {
        let mode = input.transport_mode();
        let prompt = build_prompt(input, lang, Utc::now());

        let (response_format, grounding) = match mode {
            TransportMode::Rail => (
                ResponseFormat::FreeText,
                Some(MapsGrounding { lat_lng: hint }),
            ),
            TransportMode::Road => (
                ResponseFormat::Json {
                    schema: response_schema(),
                },
                None,
            ),
        };

        GenerateRequest {
            model: self.config.model_for(mode).to_string(),
            prompt,
            response_format,
            grounding,
        }
    }

    /// Run one prediction.
    pub async fn predict(
        &self,
        input: &OrderInput,
        hint: Option<GeoPoint>,
        lang: Language,
    ) -> TrackResult<TrackingData> {
        let mode = input.transport_mode();
        let request = self.build_request(input, hint, lang);

        let span = info_span!(
            "dakpath.predict",
            "dakpath.mode" = mode.as_str(),
            "dakpath.provider" = self.model.provider_name(),
            "gen_ai.request.model" = request.model.as_str(),
            "dakpath.lang" = lang.code(),
            "error.kind" = tracing::field::Empty,
        );

        async move {
            let result = self.run(&request, mode).await;
            if let Err(e) = &result {
                tracing::Span::current().record("error.kind", e.kind());
                warn!(error = %e, kind = e.kind(), "tracking prediction failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, request: &GenerateRequest, mode: TransportMode) -> TrackResult<TrackingData> {
        let response = self.model.generate(request).await?;
        debug!(
            chars = response.text.len(),
            sources = response.grounding_sources.len(),
            "model responded"
        );

        let text = match mode {
            TransportMode::Road => response.text.trim(),
            TransportMode::Rail => extract_json(&response.text).ok_or_else(|| {
                TrackError::parse("no JSON object found in grounded response text")
            })?,
        };

        let mut value = parse_json(text)?;
        stamp_transport_mode(&mut value, mode);
        let mut data = tracking_data_from_value(value)?;

        if mode == TransportMode::Rail {
            data.grounding_sources = Some(response.grounding_sources);
        }

        Ok(data)
    }
}

/// Replace whatever mode the model echoed with the requested one.
fn stamp_transport_mode(value: &mut Value, mode: TransportMode) {
    let Some(record) = value.as_object_mut() else {
        return;
    };
    let echoed = record.get("transportMode").and_then(Value::as_str);
    if echoed != Some(mode.as_str()) {
        warn!(
            requested = mode.as_str(),
            echoed = echoed.unwrap_or("<none>"),
            "model echoed a different transport mode; keeping the requested one"
        );
    }
    record.insert("transportMode".to_string(), Value::from(mode.as_str()));
}
