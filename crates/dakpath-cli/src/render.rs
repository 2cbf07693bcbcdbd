//! Plain-text rendering of a tracking record for the terminal.

use std::fmt::Write;

use dakpath_core::{RouteSegment, TrackingData, TrafficDensity};

const EARTH_RADIUS_KM: f64 = 6371.0;

fn density_label(density: TrafficDensity) -> &'static str {
    match density {
        TrafficDensity::Low => "low",
        TrafficDensity::Moderate => "moderate",
        TrafficDensity::Heavy => "heavy",
    }
}

/// Great-circle distance between two `(lat, lng)` points in kilometres.
pub fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lng1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lng2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Summed polyline length of all segments.
pub fn route_length_km(route: &[RouteSegment]) -> f64 {
    route
        .iter()
        .flat_map(|seg| seg.points.windows(2))
        .map(|pair| haversine_km(pair[0], pair[1]))
        .sum()
}

pub fn render_text(data: &TrackingData) -> String {
    let mut out = String::new();
    write_text(&mut out, data).expect("writing to a String cannot fail");
    out
}

fn write_text(out: &mut String, data: &TrackingData) -> std::fmt::Result {
    writeln!(
        out,
        "{} · {} · {} ({})",
        data.order_id, data.product_name, data.carrier, data.transport_mode
    )?;
    writeln!(
        out,
        "Now at: {} [{:.4}, {:.4}]",
        data.current_location.address, data.current_location.lat, data.current_location.lng
    )?;
    writeln!(
        out,
        "Destination: [{:.4}, {:.4}]",
        data.destination_location.lat, data.destination_location.lng
    )?;
    writeln!(
        out,
        "ETA: {} (confidence {:.0}%)",
        data.eta,
        data.prediction_confidence * 100.0
    )?;
    writeln!(
        out,
        "Driver: {} · {} · {} · rating {:.1} · {}",
        data.driver.name, data.driver.vehicle, data.driver.phone, data.driver.rating, data.driver.speed
    )?;
    writeln!(
        out,
        "Traffic: {} (+{:.0} min) {}",
        data.traffic_info.density, data.traffic_info.delay_minutes, data.traffic_info.status
    )?;
    writeln!(
        out,
        "Route: {} segment(s), ~{:.0} km",
        data.route.len(),
        route_length_km(&data.route)
    )?;
    for (i, seg) in data.route.iter().enumerate() {
        writeln!(
            out,
            "  {}. {} points, {} traffic",
            i + 1,
            seg.points.len(),
            density_label(seg.traffic_density)
        )?;
    }

    writeln!(out, "Timeline:")?;
    for step in &data.steps {
        writeln!(
            out,
            "  [{}] {} @ {}: {}",
            step.timestamp, step.status, step.location, step.description
        )?;
    }

    if let Some(sources) = &data.grounding_sources {
        if !sources.is_empty() {
            writeln!(out, "Sources:")?;
            for src in sources {
                writeln!(out, "  {} <{}>", src.title, src.uri)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dakpath_core::{
        CurrentLocation, DestinationLocation, Driver, GroundingSource, TrackingStep, TrafficInfo,
        TransportMode,
    };

    fn data() -> TrackingData {
        TrackingData {
            order_id: "IP123456789IN".to_string(),
            product_name: "Textbooks".to_string(),
            transport_mode: TransportMode::Rail,
            current_location: CurrentLocation {
                lat: 21.1458,
                lng: 79.0882,
                address: "Nagpur Junction".to_string(),
            },
            destination_location: DestinationLocation {
                lat: 17.385,
                lng: 78.4867,
            },
            driver: Driver {
                name: "R. Kumar".to_string(),
                vehicle: "12723 Telangana Express".to_string(),
                phone: "9000000000".to_string(),
                rating: 4.6,
                speed: "92 km/h".to_string(),
            },
            traffic_info: TrafficInfo {
                density: "moderate".to_string(),
                delay_minutes: 12.0,
                status: "Running slightly late".to_string(),
            },
            route: vec![RouteSegment {
                points: vec![(28.6139, 77.209), (21.1458, 79.0882)],
                traffic_density: TrafficDensity::Moderate,
            }],
            eta: "Tomorrow, 06:15 AM".to_string(),
            carrier: "India Post".to_string(),
            prediction_confidence: 0.82,
            steps: vec![TrackingStep {
                status: "In Transit".to_string(),
                location: "Nagpur".to_string(),
                timestamp: "10:05".to_string(),
                description: "Departed platform 3".to_string(),
                icon: "train".to_string(),
            }],
            grounding_sources: Some(vec![GroundingSource {
                uri: "https://maps.google.com/?cid=7".to_string(),
                title: "Nagpur Junction".to_string(),
            }]),
        }
    }

    #[test]
    fn haversine_matches_known_distance() {
        // Delhi to Mumbai is roughly 1150 km as the crow flies.
        let d = haversine_km((28.6139, 77.209), (19.076, 72.8777));
        assert!((1100.0..1200.0).contains(&d), "got {d}");
        assert_eq!(haversine_km((10.0, 10.0), (10.0, 10.0)), 0.0);
    }

    #[test]
    fn route_length_skips_single_point_segments() {
        let route = vec![RouteSegment {
            points: vec![(12.0, 77.0)],
            traffic_density: TrafficDensity::Low,
        }];
        assert_eq!(route_length_km(&route), 0.0);
    }

    #[test]
    fn text_summary_lists_key_facts() {
        let text = render_text(&data());
        assert!(text.contains("IP123456789IN"));
        assert!(text.contains("(rail)"));
        assert!(text.contains("confidence 82%"));
        assert!(text.contains("moderate traffic"));
        assert!(text.contains("Departed platform 3"));
        assert!(text.contains("<https://maps.google.com/?cid=7>"));
    }

    #[test]
    fn road_summary_has_no_sources_block() {
        let mut d = data();
        d.transport_mode = TransportMode::Road;
        d.grounding_sources = None;
        let text = render_text(&d);
        assert!(!text.contains("Sources:"));
    }
}
