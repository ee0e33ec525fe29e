/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A place resolved from free text by the geocoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    pub name: Option<String>,
    pub local_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// An upcoming launch, fully detailed.
///
/// Timestamps are carried twice: human-readable (`net`) and the raw
/// ISO-8601 form (`net_raw`) so downstream consumers can still do
/// arithmetic. `distance_km`, `weather_forecast` and `visibility` are
/// attached only by the nearby-launch pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: String,
    pub status_abbrev: Option<String>,
    pub status_description: Option<String>,
    pub net: String,
    pub net_raw: Option<String>,
    pub window_start: String,
    pub window_start_raw: Option<String>,
    pub window_end: String,
    pub window_end_raw: Option<String>,
    pub probability: Option<i64>,
    pub launch_service_provider: String,
    pub provider_type: Option<String>,
    pub rocket: Option<String>,
    pub mission_name: Option<String>,
    pub mission_description: Option<String>,
    pub mission_type: Option<String>,
    pub orbit: Option<String>,
    pub pad_name: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country_code: Option<String>,
    pub image: Option<String>,
    pub webcast_live: Option<bool>,
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_forecast: Option<LaunchWeather>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

/// Reduced field set for the unfiltered upcoming-launches listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub status_abbrev: Option<String>,
    pub net: String,
    pub net_raw: Option<String>,
    pub launch_service_provider: Option<String>,
    pub rocket: Option<String>,
    pub mission_name: Option<String>,
    pub location: Option<String>,
}

/// Multi-day forecast for one coordinate pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: ForecastLocation,
    pub forecasts: Vec<DailyForecast>,
    pub days_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_for_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// One calendar day aggregated from 3-hour samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: String,
    /// Midnight UTC of the forecast day, as a unix timestamp
    pub date_raw: i64,
    pub temperature: TemperatureSummary,
    pub feels_like: FeelsLikeSummary,
    pub pressure: f64,
    pub humidity: f64,
    pub weather: ConditionSummary,
    pub clouds: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub precipitation: f64,
    pub snow: f64,
}

/// `morning` and `night` are the day's first and last samples in feed
/// order, not clock-time morning and night.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub day: f64,
    pub min: f64,
    pub max: f64,
    pub morning: f64,
    pub night: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeelsLikeSummary {
    pub day: f64,
    pub morning: f64,
    pub night: f64,
}

/// Dominant condition taken from the day's representative sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub main: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Weather snapshot attached to a launch for its forecast day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchWeather {
    pub main: Option<String>,
    pub description: Option<String>,
    pub clouds: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub snow: f64,
    pub temperature: TemperatureSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibilityStatus {
    Good,
    #[serde(rename = "Low Visibility")]
    LowVisibility,
    #[serde(rename = "Not Visible")]
    NotVisible,
    Unknown,
}

impl VisibilityStatus {
    pub fn can_be_seen(self) -> bool {
        matches!(self, VisibilityStatus::Good | VisibilityStatus::LowVisibility)
    }
}

/// Qualitative judgment of whether a launch is observable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visibility {
    pub status: VisibilityStatus,
    pub can_be_seen: bool,
    pub reasons: Vec<String>,
}

impl Visibility {
    pub fn new(status: VisibilityStatus, reasons: Vec<String>) -> Self {
        let reasons = if reasons.is_empty() {
            vec!["Clear conditions expected".to_string()]
        } else {
            reasons
        };
        Self {
            status,
            can_be_seen: status.can_be_seen(),
            reasons,
        }
    }
}

/// Echo of the nearby-launch search parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub max_distance_km: f64,
    pub days_ahead: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_filter_active: Option<bool>,
}

/// Result of the location-fusion pipeline.
///
/// The standalone `weather` block is present only when no launches
/// survived filtering; otherwise each launch carries its own snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyLaunches {
    pub location: GeoLocation,
    pub search_params: SearchParams,
    pub launches_found: usize,
    pub launches: Vec<LaunchRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Search/discover result row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    pub title: Option<String>,
    pub year: Option<i64>,
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<i64>,
    pub rank: Option<i64>,
    pub actors: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub genre: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Full detail record for a single title
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieDetails {
    pub imdb_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub genre: Vec<String>,
    pub content_rating: Option<String>,
    pub date_published: Option<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<i64>,
    pub release_year: Option<i64>,
    pub runtime: Option<String>,
    pub certificate: Option<String>,
    pub plot: Option<String>,
    pub budget: Option<String>,
    pub worldwide_gross: Option<String>,
    pub countries: Vec<String>,
    pub keywords: Vec<String>,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
