use std::sync::Arc;

use dakpath_core::{
    validate, GeminiClient, GeoPoint, PredictionClient, PredictorConfig, SubmitOutcome,
    TrackingSession,
};
use serde_json::json;

use super::validate::print_field_errors;
use crate::cli::args::{OutputFormat, TrackArgs};
use crate::exit_codes::{SUCCESS, TRACKING_FAILED, VALIDATION_FAILED};
use crate::render::render_text;

pub async fn run(args: TrackArgs) -> anyhow::Result<i32> {
    let form = args.order.to_form();
    let lang = args.order.lang;

    // Fail fast on the form before touching config.
    if let Err(errors) = validate(&form, lang) {
        match args.format {
            OutputFormat::Json => {
                let doc = json!({ "valid": false, "errors": errors });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            }
            OutputFormat::Text => print_field_errors(&errors),
        }
        return Ok(VALIDATION_FAILED);
    }

    let config = build_config(&args);
    let model = match GeminiClient::new(&config) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("✖ {e}");
            return Ok(e.exit_code());
        }
    };

    let hint = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };

    let session = TrackingSession::new(PredictionClient::new(Arc::new(model), config), lang);
    let outcome = match session.submit(&form, hint).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("✖ {e}");
            return Ok(e.exit_code());
        }
    };
    match outcome {
        SubmitOutcome::Tracked(data) => {
            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
                OutputFormat::Text => print!("{}", render_text(&data)),
            }
            Ok(SUCCESS)
        }
        SubmitOutcome::Failed { message } => {
            eprintln!("✖ {message}");
            Ok(TRACKING_FAILED)
        }
        // Already validated above; kept for completeness.
        SubmitOutcome::Invalid(errors) => {
            print_field_errors(&errors);
            Ok(VALIDATION_FAILED)
        }
    }
}

/// Environment first, then explicit flags on top.
fn build_config(args: &TrackArgs) -> PredictorConfig {
    let mut config = PredictorConfig::from_env();
    if let Some(key) = args.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        config = config.with_api_key(key);
    }
    if let Some(url) = &args.api_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(secs) = args.timeout {
        config = config.with_timeout_secs(secs);
    }
    config
}
