#![allow(deprecated)]
//! Exit-code contract for the `dakpath` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VALID_ORDER: &[&str] = &[
    "--phone",
    "98765 43210",
    "--order-id",
    "ip123456789in",
    "--origin-state",
    "Maharashtra",
    "--origin-city",
    "Mumbai",
    "--origin-pincode",
    "400001",
    "--dest-state",
    "Karnataka",
    "--dest-city",
    "Bengaluru",
    "--dest-pincode",
    "560001",
];

fn dakpath() -> Command {
    let mut cmd = Command::cargo_bin("dakpath").unwrap();
    for var in [
        "DAKPATH_API_KEY",
        "GEMINI_API_KEY",
        "DAKPATH_API_URL",
        "DAKPATH_ROAD_MODEL",
        "DAKPATH_RAIL_MODEL",
        "DAKPATH_TIMEOUT",
        "DAKPATH_LANG",
        "DAKPATH_LOG_JSON",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "off");
    cmd
}

fn tracking_json() -> Value {
    json!({
        "orderId": "IP123456789IN",
        "productName": "Spare parts",
        "transportMode": "road",
        "currentLocation": { "lat": 15.85, "lng": 74.5, "address": "NH48, Belagavi bypass" },
        "destinationLocation": { "lat": 12.9716, "lng": 77.5946 },
        "driver": { "name": "S. Gowda", "vehicle": "KA-01-MX-2040", "phone": "9845000000", "rating": 4.8, "speed": "58 km/h" },
        "trafficInfo": { "density": "moderate", "delayMinutes": 10, "status": "Steady flow" },
        "route": [
            { "points": [[18.9388, 72.8354], [15.85, 74.5], [12.9716, 77.5946]], "trafficDensity": "moderate" }
        ],
        "eta": "Today, 9:30 PM",
        "carrier": "India Post Parcel",
        "predictionConfidence": 0.66,
        "steps": [
            { "status": "In Transit", "location": "Belagavi", "timestamp": "14:20", "description": "On schedule", "icon": "truck" }
        ]
    })
}

#[test]
fn version_prints_package_version() {
    dakpath()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn validate_accepts_a_good_form() {
    dakpath()
        .arg("validate")
        .args(VALID_ORDER)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("IP123456789IN"));
}

#[test]
fn validate_reports_every_bad_field_as_json() {
    let output = dakpath()
        .args(["validate", "--format", "json", "--mode", "bus"])
        .args(["--phone", "12345", "--order-id", "IP1", "--origin-pincode", "012345"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let doc: Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(doc["valid"], json!(false));
    let errors = doc["errors"].as_object().unwrap();
    for field in [
        "transportMode",
        "phoneNumber",
        "userOrderId",
        "originPincode",
        "destPincode",
        "originCity",
    ] {
        assert!(errors.contains_key(field), "missing {field}");
    }
    assert_eq!(doc["errors"]["originPincode"]["kind"], json!("invalid_format"));
}

#[test]
fn validate_messages_follow_the_language() {
    dakpath()
        .args(["validate", "--lang", "hi", "--phone", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("phoneNumber"));
}

#[test]
fn track_with_invalid_form_exits_before_config() {
    // No API key either: validation wins.
    dakpath()
        .args(["track", "--phone", "123"])
        .assert()
        .code(1);
}

#[test]
fn track_without_api_key_is_a_config_error() {
    dakpath()
        .arg("track")
        .args(VALID_ORDER)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("API key"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn track_against_mock_api_prints_json() {
    let mock_server = MockServer::start().await;
    let envelope = json!({
        "candidates": [ { "content": { "parts": [ { "text": tracking_json().to_string() } ] } } ]
    });
    Mock::given(method("POST"))
        .and(path("/models/gemini-3-flash-preview:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let output = tokio::task::spawn_blocking(move || {
        dakpath()
            .env("DAKPATH_API_KEY", "test-key")
            .env("DAKPATH_API_URL", uri)
            .args(["track", "--format", "json"])
            .args(VALID_ORDER)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let doc: Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(doc["orderId"], json!("IP123456789IN"));
    assert_eq!(doc["transportMode"], json!("road"));
    assert!(doc.get("groundingSources").is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upstream_failure_shows_the_generic_banner() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let output = tokio::task::spawn_blocking(move || {
        dakpath()
            .env("DAKPATH_API_KEY", "test-key")
            .args(["track", "--api-url", &uri])
            .args(VALID_ORDER)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unable to track consignment"), "{stderr}");
    assert!(!stderr.contains("boom"));
}
