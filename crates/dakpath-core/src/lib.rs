//! Order validation and generative tracking prediction.
//!
//! This crate is the engine behind the "Track N Trace" demo:
//!
//! - Input validation of submitted order forms (pincode, phone, order id)
//! - Prompt construction for a generative-language model
//! - Invocation of the model (strict JSON schema for road, maps grounding for rail)
//! - Extraction and schema validation of the fabricated tracking record
//! - A submission session that allows one request in flight at a time
//!
//! The tracking data is fabricated by the model. The same input can produce a
//! different [`TrackingData`] on every call; nothing here retries, caches or
//! otherwise tries to make that deterministic.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use dakpath_core::{
//!     validate, GeminiClient, Language, OrderForm, PredictionClient, PredictorConfig,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PredictorConfig::from_env();
//! let model = Arc::new(GeminiClient::new(&config)?);
//! let client = PredictionClient::new(model, config);
//!
//! let form = OrderForm {
//!     transport_mode: "road".into(),
//!     phone_number: "9876543210".into(),
//!     user_order_id: "ip123456789in".into(),
//!     origin_state: "Delhi".into(),
//!     origin_city: "New Delhi".into(),
//!     origin_pincode: "110001".into(),
//!     dest_state: "Maharashtra".into(),
//!     dest_city: "Mumbai".into(),
//!     dest_pincode: "400001".into(),
//!     tracking_id: None,
//! };
//! let input = validate(&form, Language::En)?;
//! let data = client.predict(&input, None, Language::En).await?;
//! println!("ETA: {}", data.eta);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `DAKPATH_API_KEY` | API key for the generative API (falls back to `GEMINI_API_KEY`) |
//! | `DAKPATH_API_URL` | API base URL (default: `https://generativelanguage.googleapis.com/v1beta`) |
//! | `DAKPATH_ROAD_MODEL` | Model used for road predictions |
//! | `DAKPATH_RAIL_MODEL` | Model used for rail predictions (maps grounding) |
//! | `DAKPATH_TIMEOUT` | Request timeout in seconds (default: 60) |

pub mod config;
pub mod error;
pub mod extract;
pub mod i18n;
pub mod predict;
pub mod prompt;
pub mod providers;
pub mod schema;
pub mod session;
pub mod types;
pub mod validate;

pub use config::PredictorConfig;
pub use error::{TrackError, TrackResult};
pub use extract::extract_json;
pub use i18n::Language;
pub use predict::PredictionClient;
pub use providers::fake::FakeModel;
pub use providers::gemini::{GeminiClient, USER_AGENT_VALUE};
pub use providers::{GenerateRequest, GenerateResponse, GenerativeModel, ResponseFormat};
pub use session::{SessionState, SubmitOutcome, TrackingSession};
pub use types::{
    CurrentLocation, DestinationLocation, Driver, GeoPoint, GroundingSource, OrderForm,
    OrderInput, RouteSegment, TrackingData, TrackingStep, TrafficDensity, TrafficInfo,
    TransportMode,
};
pub use validate::{validate, Field, FieldError, FieldErrors, ValidationErrorKind};
