//! Prompt construction.
//!
//! The prompt carries every validated field, the wall-clock time and an
//! informal copy of the output shape. The formal contract lives in
//! [`crate::schema`]; this text only steers the model towards it.

use chrono::{DateTime, Utc};

use crate::i18n::Language;
use crate::types::{OrderInput, TransportMode};

const OUTPUT_SHAPE: &str = r#"{
  "orderId": string,
  "productName": string,
  "transportMode": "road" | "rail",
  "currentLocation": { "lat": number, "lng": number, "address": string },
  "destinationLocation": { "lat": number, "lng": number },
  "driver": { "name": string, "vehicle": string, "phone": string, "rating": number, "speed": string },
  "trafficInfo": { "density": string, "delayMinutes": number, "status": string },
  "route": [ { "points": [[lat, lng], ...], "trafficDensity": "low" | "moderate" | "heavy" } ],
  "eta": string,
  "carrier": string,
  "predictionConfidence": number between 0 and 1,
  "steps": [ { "status": string, "location": string, "timestamp": string, "description": string, "icon": string } ]
}"#;

/// Build the instruction text for one prediction.
pub fn build_prompt(input: &OrderInput, lang: Language, now: DateTime<Utc>) -> String {
    let mode = input.transport_mode();
    let (id_label, path_rule) = match mode {
        TransportMode::Rail => (
            "Train Number",
            "Follow real railway lines and stations only; every route point must lie on track.",
        ),
        TransportMode::Road => (
            "Vehicle / Tracking ID",
            "Follow real highways and city roads; reflect current road traffic and terrain.",
        ),
    };

    let mut prompt = format!(
        "You are a multi-modal logistics telemetry engine for a national postal service.\n\
         Simulate a live {mode_upper} tracking session for the consignment below.\n\
         \n\
         CONSIGNMENT\n\
         - Transport mode: {mode}\n\
         - {id_label}: {tracking_id}\n\
         - Order ID: {order_id}\n\
         - Origin: {origin_city}, {origin_state} (pincode {origin_pin})\n\
         - Destination: {dest_city}, {dest_state} (pincode {dest_pin})\n\
         - Consignee mobile: {phone}\n\
         - Current time: {now}\n\
         \n\
         TASK\n\
         1. {path_rule}\n\
         2. Place the consignment at plausible GPS coordinates on its route from {origin_pin} to {dest_pin}, consistent with the current time.\n\
         3. Describe traffic or capacity conditions along the path.\n\
         4. Estimate a productName for order {order_id}.\n\
         5. Split the route into segments tagged low, moderate or heavy traffic.\n\
         6. List tracking steps most recent first.\n\
         7. Set transportMode to exactly \"{mode}\".\n\
         8. Write addresses, statuses and descriptions in {language}; keep JSON keys in English.\n\
         \n\
         Return one JSON object with this structure:\n\
         {shape}\n",
        mode_upper = mode.as_str().to_uppercase(),
        mode = mode,
        id_label = id_label,
        tracking_id = input.tracking_id().unwrap_or("not provided"),
        order_id = input.user_order_id(),
        origin_city = input.origin_city(),
        origin_state = input.origin_state(),
        origin_pin = input.origin_pincode(),
        dest_city = input.dest_city(),
        dest_state = input.dest_state(),
        dest_pin = input.dest_pincode(),
        phone = input.phone_number(),
        now = now.format("%Y-%m-%d %H:%M UTC"),
        path_rule = path_rule,
        language = lang.english_name(),
        shape = OUTPUT_SHAPE,
    );

    if mode == TransportMode::Rail {
        prompt.push_str(
            "\nIMPORTANT: the maps tool is enabled, so put the JSON object inside a ```json fenced block in your text reply.\n",
        );
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderForm;
    use crate::validate::validate;
    use chrono::TimeZone;

    fn input(mode: &str) -> OrderInput {
        let form = OrderForm {
            transport_mode: mode.to_string(),
            phone_number: "9876543210".to_string(),
            user_order_id: "ip123456789in".to_string(),
            origin_state: "Delhi".to_string(),
            origin_city: "New Delhi".to_string(),
            origin_pincode: "110001".to_string(),
            dest_state: "Telangana".to_string(),
            dest_city: "Hyderabad".to_string(),
            dest_pincode: "500001".to_string(),
            tracking_id: Some("12723".to_string()),
        };
        validate(&form, Language::En).unwrap()
    }

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 30, 0).unwrap()
    }

    #[test]
    fn embeds_every_field_and_the_time() {
        let prompt = build_prompt(&input("road"), Language::En, at_noon());
        for needle in [
            "IP123456789IN",
            "9876543210",
            "New Delhi",
            "Delhi",
            "110001",
            "Hyderabad",
            "Telangana",
            "500001",
            "12723",
            "2026-03-14 12:30 UTC",
            "\"predictionConfidence\"",
        ] {
            assert!(prompt.contains(needle), "prompt missing {needle:?}");
        }
        assert!(!prompt.contains("```json"));
    }

    #[test]
    fn rail_asks_for_fenced_json() {
        let prompt = build_prompt(&input("rail"), Language::En, at_noon());
        assert!(prompt.contains("Train Number"));
        assert!(prompt.contains("```json"));
        assert!(prompt.contains("exactly \"rail\""));
    }

    #[test]
    fn language_is_named() {
        let prompt = build_prompt(&input("road"), Language::Te, at_noon());
        assert!(prompt.contains("in Telugu"));
    }
}
