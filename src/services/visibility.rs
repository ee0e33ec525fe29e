/// Launch visibility classification from a day's forecast
use crate::domain::{DailyForecast, LaunchWeather, Visibility, VisibilityStatus};
use crate::utils::title_case;

/// Dominant conditions that obscure a launch from the ground
const BAD_CONDITIONS: [&str; 7] = [
    "clouds",
    "rain",
    "thunderstorm",
    "snow",
    "drizzle",
    "mist",
    "fog",
];

const HIGH_CLOUDS_PCT: f64 = 30.0;
const HIGH_HUMIDITY_PCT: f64 = 80.0;
const HEAVY_PRECIPITATION_MM: f64 = 5.0;
const HEAVY_SNOW_MM: f64 = 5.0;

/// Judge observability for the day described by `forecast`.
pub fn assess(forecast: &DailyForecast) -> Visibility {
    let main_lower = forecast
        .weather
        .main
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    let bad_weather = BAD_CONDITIONS.contains(&main_lower.as_str());
    let high_clouds = forecast.clouds > HIGH_CLOUDS_PCT;
    let high_humidity = forecast.humidity > HIGH_HUMIDITY_PCT;
    let high_precipitation = forecast.precipitation > HEAVY_PRECIPITATION_MM;
    let high_snow = forecast.snow > HEAVY_SNOW_MM;

    let mut reasons = Vec::new();
    if bad_weather {
        reasons.push(format!("Poor weather: {}", title_case(&main_lower)));
    }
    if high_clouds {
        reasons.push(format!("High cloud cover: {}%", forecast.clouds));
    }
    if high_humidity {
        reasons.push(format!("High humidity: {}%", forecast.humidity));
    }
    if high_precipitation {
        reasons.push(format!("Heavy precipitation: {}mm", forecast.precipitation));
    }
    if high_snow {
        reasons.push(format!("Heavy snow: {}mm", forecast.snow));
    }

    // The (bad weather && high clouds) disjunct overlaps the reason-count
    // rule; upstream treats them as independent branches, so both stay.
    let status = if reasons.len() >= 3 || high_snow || (bad_weather && high_clouds) {
        VisibilityStatus::NotVisible
    } else if !reasons.is_empty() {
        VisibilityStatus::LowVisibility
    } else {
        VisibilityStatus::Good
    };

    Visibility::new(status, reasons)
}

/// Visibility when no forecast can be matched to the launch day.
pub fn unknown(reason: String) -> Visibility {
    Visibility::new(VisibilityStatus::Unknown, vec![reason])
}

/// The weather snapshot carried on each launch alongside its assessment.
pub fn snapshot(forecast: &DailyForecast) -> LaunchWeather {
    LaunchWeather {
        main: forecast.weather.main.clone(),
        description: forecast.weather.description.clone(),
        clouds: forecast.clouds,
        humidity: forecast.humidity,
        precipitation: forecast.precipitation,
        snow: forecast.snow,
        temperature: forecast.temperature.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConditionSummary, FeelsLikeSummary, TemperatureSummary};

    fn forecast(main: &str, clouds: f64, humidity: f64, precipitation: f64, snow: f64) -> DailyForecast {
        DailyForecast {
            date: "June 01, 2025 at 12:00 PM UTC".to_string(),
            date_raw: 1748736000,
            temperature: TemperatureSummary {
                day: 15.0,
                min: 10.0,
                max: 20.0,
                morning: 11.0,
                night: 12.0,
            },
            feels_like: FeelsLikeSummary {
                day: 14.0,
                morning: 10.0,
                night: 11.0,
            },
            pressure: 1012.0,
            humidity,
            weather: ConditionSummary {
                main: Some(main.to_string()),
                description: Some(main.to_lowercase()),
                icon: None,
            },
            clouds,
            wind_speed: 3.0,
            wind_direction: 180.0,
            precipitation,
            snow,
        }
    }

    #[test]
    fn test_three_reasons_is_not_visible() {
        let visibility = assess(&forecast("Rain", 50.0, 85.0, 0.0, 0.0));
        assert_eq!(visibility.status, VisibilityStatus::NotVisible);
        assert!(!visibility.can_be_seen);
        assert_eq!(visibility.reasons.len(), 3);
    }

    #[test]
    fn test_clear_day_is_good() {
        let visibility = assess(&forecast("Clear", 10.0, 40.0, 0.0, 0.0));
        assert_eq!(visibility.status, VisibilityStatus::Good);
        assert!(visibility.can_be_seen);
        assert_eq!(visibility.reasons, vec!["Clear conditions expected"]);
    }

    #[test]
    fn test_single_reason_is_low_visibility() {
        let visibility = assess(&forecast("Clear", 40.0, 40.0, 0.0, 0.0));
        assert_eq!(visibility.status, VisibilityStatus::LowVisibility);
        assert!(visibility.can_be_seen);
        assert_eq!(visibility.reasons, vec!["High cloud cover: 40%"]);
    }

    #[test]
    fn test_heavy_snow_alone_is_not_visible() {
        let visibility = assess(&forecast("Clear", 10.0, 40.0, 0.0, 6.0));
        assert_eq!(visibility.status, VisibilityStatus::NotVisible);
        assert_eq!(visibility.reasons, vec!["Heavy snow: 6mm"]);
    }

    #[test]
    fn test_bad_weather_with_high_clouds_is_not_visible() {
        // only two reasons, but the combined disjunct fires
        let visibility = assess(&forecast("Clouds", 35.0, 40.0, 0.0, 0.0));
        assert_eq!(visibility.status, VisibilityStatus::NotVisible);
        assert_eq!(visibility.reasons.len(), 2);
    }

    #[test]
    fn test_condition_match_is_case_insensitive() {
        let visibility = assess(&forecast("DRIZZLE", 10.0, 40.0, 0.0, 0.0));
        assert_eq!(visibility.status, VisibilityStatus::LowVisibility);
        assert_eq!(visibility.reasons, vec!["Poor weather: Drizzle"]);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // exactly at each threshold triggers nothing
        let visibility = assess(&forecast("Clear", 30.0, 80.0, 5.0, 5.0));
        assert_eq!(visibility.status, VisibilityStatus::Good);
    }

    #[test]
    fn test_unknown_carries_reason() {
        let visibility = unknown("No weather forecast available for launch date".to_string());
        assert_eq!(visibility.status, VisibilityStatus::Unknown);
        assert!(!visibility.can_be_seen);
        assert_eq!(
            visibility.reasons,
            vec!["No weather forecast available for launch date"]
        );
    }

    #[test]
    fn test_snapshot_copies_the_matched_day() {
        let day = forecast("Rain", 50.0, 85.0, 2.0, 0.0);
        let snap = snapshot(&day);
        assert_eq!(snap.main.as_deref(), Some("Rain"));
        assert_eq!(snap.clouds, 50.0);
        assert_eq!(snap.temperature.min, 10.0);
    }
}
