//! The tracking record contract.
//!
//! One JSON Schema (`schemas/tracking_data_v1.schema.json`) is the source of
//! truth for what a model response must look like. Every response is checked
//! against it after parsing, in both invocation modes. The Gemini
//! `responseSchema` sent for road requests is a narrower projection of the
//! same shape in the API's OpenAPI subset.

use std::sync::OnceLock;

use jsonschema::Draft;
use serde_json::{json, Value};

use crate::error::{TrackError, TrackResult};
use crate::types::TrackingData;

/// Embedded schema for tracking_data_v1.
///
/// NOTE: Use CARGO_MANIFEST_DIR to avoid fragile relative paths from src/.
const TRACKING_DATA_V1_SCHEMA_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/tracking_data_v1.schema.json"
));

static VALIDATOR: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

fn compiled_validator() -> TrackResult<&'static jsonschema::Validator> {
    VALIDATOR
        .get_or_init(|| {
            let schema: Value = serde_json::from_str(TRACKING_DATA_V1_SCHEMA_JSON).map_err(|e| {
                format!("failed to parse embedded tracking_data_v1 schema JSON: {e}")
            })?;

            jsonschema::options()
                .with_draft(Draft::Draft202012)
                .build(&schema)
                .map_err(|e| format!("failed to compile tracking_data_v1 schema: {e}"))
        })
        .as_ref()
        .map_err(|e| TrackError::config(e.clone()))
}

/// Validate a parsed payload against tracking_data_v1.
///
/// The error message lists the first few violations (bounded for logs).
pub fn validate_tracking_value(instance: &Value) -> TrackResult<()> {
    let v = compiled_validator()?;

    if v.is_valid(instance) {
        return Ok(());
    }

    const MAX_ERRORS: usize = 5;
    let lines: Vec<String> = v
        .iter_errors(instance)
        .take(MAX_ERRORS)
        .map(|e| e.to_string())
        .collect();

    Err(TrackError::parse(format!(
        "response does not match tracking_data_v1: {}",
        lines.join("; ")
    )))
}

/// Parse a JSON document into a [`TrackingData`], enforcing the schema.
///
/// Either the whole record is returned or an error; there is no partial result.
pub fn parse_tracking_data(json_text: &str) -> TrackResult<TrackingData> {
    tracking_data_from_value(parse_json(json_text)?)
}

/// Parse model text as JSON without checking its shape.
pub fn parse_json(json_text: &str) -> TrackResult<Value> {
    serde_json::from_str(json_text)
        .map_err(|e| TrackError::parse(format!("response is not valid JSON: {e}")))
}

/// Schema-check an already parsed payload and convert it.
pub fn tracking_data_from_value(value: Value) -> TrackResult<TrackingData> {
    validate_tracking_value(&value)?;

    serde_json::from_value(value)
        .map_err(|e| TrackError::parse(format!("response does not fit TrackingData: {e}")))
}

/// `responseSchema` for strict-JSON (road) requests.
///
/// `groundingSources` is absent: only grounded calls produce citations, and
/// the client attaches those itself.
pub fn response_schema() -> Value {
    let string = json!({ "type": "STRING" });
    let number = json!({ "type": "NUMBER" });

    json!({
        "type": "OBJECT",
        "properties": {
            "orderId": string,
            "productName": string,
            "transportMode": { "type": "STRING", "format": "enum", "enum": ["road", "rail"] },
            "currentLocation": {
                "type": "OBJECT",
                "properties": { "lat": number, "lng": number, "address": string },
                "required": ["lat", "lng", "address"]
            },
            "destinationLocation": {
                "type": "OBJECT",
                "properties": { "lat": number, "lng": number },
                "required": ["lat", "lng"]
            },
            "driver": {
                "type": "OBJECT",
                "properties": {
                    "name": string,
                    "vehicle": string,
                    "phone": string,
                    "rating": number,
                    "speed": string
                },
                "required": ["name", "vehicle", "phone", "rating", "speed"]
            },
            "trafficInfo": {
                "type": "OBJECT",
                "properties": { "density": string, "delayMinutes": number, "status": string },
                "required": ["density", "delayMinutes", "status"]
            },
            "route": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "points": {
                            "type": "ARRAY",
                            "items": { "type": "ARRAY", "items": number }
                        },
                        "trafficDensity": {
                            "type": "STRING",
                            "format": "enum",
                            "enum": ["low", "moderate", "heavy"]
                        }
                    },
                    "required": ["points", "trafficDensity"]
                }
            },
            "eta": string,
            "carrier": string,
            "predictionConfidence": number,
            "steps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "status": string,
                        "location": string,
                        "timestamp": string,
                        "description": string,
                        "icon": string
                    },
                    "required": ["status", "location", "timestamp", "description", "icon"]
                }
            }
        },
        "required": [
            "orderId", "productName", "transportMode", "currentLocation",
            "destinationLocation", "driver", "trafficInfo", "route", "eta",
            "steps", "carrier", "predictionConfidence"
        ]
    })
}
