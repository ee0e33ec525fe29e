/// Utility functions
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Extract number from JSON value
///
/// Upstream APIs are inconsistent about numeric fields; launch pad
/// coordinates in particular arrive as strings.
pub fn num(v: &Value) -> Option<f64> {
    if let Some(x) = v.as_f64() {
        return Some(x);
    }
    if let Some(s) = v.as_str() {
        return s.parse::<f64>().ok();
    }
    None
}

/// Calculate distance between two coordinates using Haversine formula
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let rlat1 = lat1.to_radians();
    let rlat2 = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + rlat1.cos() * rlat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    6371.0 * c
}

/// Parse an ISO-8601 timestamp ("Z" suffix included) into UTC
pub fn parse_iso(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Convert an ISO-8601 timestamp to a human-readable form,
/// e.g. "November 06, 2025 at 08:56 PM UTC".
///
/// Absent input renders as "N/A"; unparseable input is passed through
/// unchanged so the caller still has something to display.
pub fn format_datetime(iso: Option<&str>) -> String {
    let Some(raw) = iso else {
        return "N/A".to_string();
    };
    match parse_iso(raw) {
        Some(dt) => dt.format("%B %d, %Y at %I:%M %p UTC").to_string(),
        None => raw.to_string(),
    }
}

/// Round to one decimal place
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Round to two decimal places
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Format a monetary amount with thousands separators, e.g. "$356,000,000 USD"
pub fn format_money(amount: i64, currency: &str) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("${}{} {}", sign, grouped, currency)
}

/// Uppercase the first letter of each whitespace-separated word
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_km_zero_distance() {
        let distance = haversine_km(28.39, -80.61, 28.39, -80.61);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_haversine_km_symmetric() {
        let forward = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
        let backward = haversine_km(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_km_known_distance() {
        // London (51.5074°N, 0.1278°W) to Paris (48.8566°N, 2.3522°E)
        // Approximate distance: ~343 km
        let distance = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
        assert!((distance - 343.0).abs() < 5.0);
    }

    #[test]
    fn test_num_from_float() {
        let json = serde_json::json!(28.5833);
        assert_eq!(num(&json), Some(28.5833));
    }

    #[test]
    fn test_num_from_string() {
        let json = serde_json::json!("28.5833");
        assert_eq!(num(&json), Some(28.5833));
    }

    #[test]
    fn test_num_from_invalid() {
        let json = serde_json::json!("unknown");
        assert_eq!(num(&json), None);
    }

    #[test]
    fn test_format_datetime_iso() {
        let formatted = format_datetime(Some("2025-11-06T20:56:00Z"));
        assert_eq!(formatted, "November 06, 2025 at 08:56 PM UTC");
    }

    #[test]
    fn test_format_datetime_absent() {
        assert_eq!(format_datetime(None), "N/A");
    }

    #[test]
    fn test_format_datetime_garbage_passes_through() {
        assert_eq!(format_datetime(Some("soon-ish")), "soon-ish");
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(21.2499), 21.2);
        assert_eq!(round1(21.25), 21.3);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.34567), 12.35);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(356_000_000, "USD"), "$356,000,000 USD");
        assert_eq!(format_money(950, "USD"), "$950 USD");
        assert_eq!(format_money(1_000, "EUR"), "$1,000 EUR");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("rain"), "Rain");
        assert_eq!(title_case("light rain"), "Light Rain");
    }
}
