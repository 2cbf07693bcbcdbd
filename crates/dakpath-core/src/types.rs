//! Order and tracking record types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// How the consignment travels. Selects the model invocation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Road,
    Rail,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Road => "road",
            Self::Rail => "rail",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "road" => Ok(Self::Road),
            "rail" => Ok(Self::Rail),
            other => Err(format!("unknown transport mode: {other:?}")),
        }
    }
}

/// Reads a model-echoed mode. Case is ignored; missing or unrecognised
/// values fall back to the default.
fn lenient_transport_mode<'de, D>(deserializer: D) -> Result<TransportMode, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
}

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Raw form submission. Every field is untrusted free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderForm {
    pub transport_mode: String,
    pub phone_number: String,
    pub user_order_id: String,
    pub origin_state: String,
    pub origin_city: String,
    pub origin_pincode: String,
    pub dest_state: String,
    pub dest_city: String,
    pub dest_pincode: String,
    /// Vehicle registration or train number, if the user knows it.
    #[serde(default)]
    pub tracking_id: Option<String>,
}

/// A validated order. Only [`crate::validate::validate`] builds one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderInput {
    transport_mode: TransportMode,
    phone_number: String,
    user_order_id: String,
    origin_state: String,
    origin_city: String,
    origin_pincode: String,
    dest_state: String,
    dest_city: String,
    dest_pincode: String,
    tracking_id: Option<String>,
}

impl OrderInput {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        transport_mode: TransportMode,
        phone_number: String,
        user_order_id: String,
        origin_state: String,
        origin_city: String,
        origin_pincode: String,
        dest_state: String,
        dest_city: String,
        dest_pincode: String,
        tracking_id: Option<String>,
    ) -> Self {
        Self {
            transport_mode,
            phone_number,
            user_order_id,
            origin_state,
            origin_city,
            origin_pincode,
            dest_state,
            dest_city,
            dest_pincode,
            tracking_id,
        }
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Upper-cased, 13 characters.
    pub fn user_order_id(&self) -> &str {
        &self.user_order_id
    }

    pub fn origin_state(&self) -> &str {
        &self.origin_state
    }

    pub fn origin_city(&self) -> &str {
        &self.origin_city
    }

    pub fn origin_pincode(&self) -> &str {
        &self.origin_pincode
    }

    pub fn dest_state(&self) -> &str {
        &self.dest_state
    }

    pub fn dest_city(&self) -> &str {
        &self.dest_city
    }

    pub fn dest_pincode(&self) -> &str {
        &self.dest_pincode
    }

    pub fn tracking_id(&self) -> Option<&str> {
        self.tracking_id.as_deref()
    }

    /// The record as a form again, e.g. to re-validate it.
    pub fn to_form(&self) -> OrderForm {
        OrderForm {
            transport_mode: self.transport_mode.to_string(),
            phone_number: self.phone_number.clone(),
            user_order_id: self.user_order_id.clone(),
            origin_state: self.origin_state.clone(),
            origin_city: self.origin_city.clone(),
            origin_pincode: self.origin_pincode.clone(),
            dest_state: self.dest_state.clone(),
            dest_city: self.dest_city.clone(),
            dest_pincode: self.dest_pincode.clone(),
            tracking_id: self.tracking_id.clone(),
        }
    }
}

/// Current position of the consignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentLocation {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Synthetic driver identity. Has no real-world counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    pub vehicle: String,
    pub phone: String,
    pub rating: f64,
    pub speed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficInfo {
    pub density: String,
    pub delay_minutes: f64,
    pub status: String,
}

/// Congestion level of a route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficDensity {
    Low,
    Moderate,
    Heavy,
}

/// One polyline of the rendered path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    /// `(lat, lng)` pairs.
    pub points: Vec<(f64, f64)>,
    pub traffic_density: TrafficDensity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingStep {
    pub status: String,
    pub location: String,
    pub timestamp: String,
    pub description: String,
    pub icon: String,
}

/// Citation attached when the model used maps grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

/// Fabricated prediction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingData {
    pub order_id: String,
    pub product_name: String,
    #[serde(default, deserialize_with = "lenient_transport_mode")]
    pub transport_mode: TransportMode,
    pub current_location: CurrentLocation,
    pub destination_location: DestinationLocation,
    pub driver: Driver,
    pub traffic_info: TrafficInfo,
    pub route: Vec<RouteSegment>,
    /// Display string, not a parsed timestamp.
    pub eta: String,
    pub carrier: String,
    /// Self-reported by the model, in `[0, 1]`.
    pub prediction_confidence: f64,
    /// Most recent first.
    pub steps: Vec<TrackingStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_sources: Option<Vec<GroundingSource>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_mode_parses_case_insensitively() {
        assert_eq!("RAIL".parse::<TransportMode>(), Ok(TransportMode::Rail));
        assert_eq!(" road ".parse::<TransportMode>(), Ok(TransportMode::Road));
        assert!("air".parse::<TransportMode>().is_err());
    }

    #[test]
    fn echoed_mode_is_read_leniently() {
        let read = |mode: Option<&str>| {
            let mut raw = crate::schema::tests::sample_value();
            match mode {
                Some(m) => raw["transportMode"] = serde_json::json!(m),
                None => {
                    raw.as_object_mut().unwrap().remove("transportMode");
                }
            }
            serde_json::from_value::<TrackingData>(raw).unwrap().transport_mode
        };
        assert_eq!(read(Some("RAIL")), TransportMode::Rail);
        assert_eq!(read(Some("Road")), TransportMode::Road);
        assert_eq!(read(Some("train")), TransportMode::default());
        assert_eq!(read(None), TransportMode::default());
    }

    #[test]
    fn tracking_data_reads_camel_case_wire_form() {
        let raw = serde_json::json!({
            "orderId": "IP123456789IN",
            "productName": "Books",
            "transportMode": "road",
            "currentLocation": { "lat": 28.6, "lng": 77.2, "address": "Sorting Hub, Delhi" },
            "destinationLocation": { "lat": 19.0, "lng": 72.8 },
            "driver": { "name": "R. Kumar", "vehicle": "DL-01-AB-1234", "phone": "9000000000", "rating": 4.6, "speed": "54 km/h" },
            "trafficInfo": { "density": "moderate", "delayMinutes": 15, "status": "Slow near toll" },
            "route": [ { "points": [[28.6, 77.2], [27.1, 75.8]], "trafficDensity": "moderate" } ],
            "eta": "Tomorrow, 6 PM",
            "carrier": "Speed Post",
            "predictionConfidence": 0.82,
            "steps": [ { "status": "In Transit", "location": "Jaipur", "timestamp": "10:00", "description": "Departed hub", "icon": "truck" } ]
        });

        let data: TrackingData = serde_json::from_value(raw).unwrap();
        assert_eq!(data.route[0].points[1], (27.1, 75.8));
        assert_eq!(data.route[0].traffic_density, TrafficDensity::Moderate);
        assert_eq!(data.traffic_info.delay_minutes, 15.0);
        assert!(data.grounding_sources.is_none());

        let back = serde_json::to_value(&data).unwrap();
        assert!(back.get("groundingSources").is_none());
        assert_eq!(back["predictionConfidence"], 0.82);
    }
}
