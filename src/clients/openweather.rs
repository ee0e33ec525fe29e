/// OpenWeatherMap client: geocoding and 3-hourly forecast endpoints.
///
/// Both endpoints share the same host and API key, so they live on one
/// client. Payloads are deserialized into wire structs here; aggregation
/// into daily forecasts happens in the weather service.
use crate::clients::{FetchError, HttpClient};
use crate::domain::GeoLocation;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

pub struct OpenWeatherClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

/// One entry from `/geo/1.0/direct`
#[derive(Debug, Deserialize)]
pub struct GeoMatch {
    pub name: Option<String>,
    #[serde(default)]
    pub local_names: HashMap<String, String>,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
    pub state: Option<String>,
}

/// Payload of `/data/2.5/forecast`
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastSample>,
    pub city: Option<CityInfo>,
}

#[derive(Debug, Deserialize)]
pub struct CityInfo {
    pub name: Option<String>,
    pub country: Option<String>,
}

/// One 3-hour forecast sample
#[derive(Debug, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    pub main: SampleMain,
    #[serde(default)]
    pub weather: Vec<SampleCondition>,
    #[serde(default)]
    pub clouds: SampleClouds,
    #[serde(default)]
    pub wind: SampleWind,
    #[serde(default)]
    pub rain: SampleVolume,
    #[serde(default)]
    pub snow: SampleVolume,
}

#[derive(Debug, Deserialize)]
pub struct SampleMain {
    pub temp: f64,
    pub feels_like: f64,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub humidity: f64,
}

#[derive(Debug, Deserialize)]
pub struct SampleCondition {
    pub main: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SampleClouds {
    #[serde(default)]
    pub all: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct SampleWind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

/// Rain/snow volume over the sample's 3-hour window
#[derive(Debug, Default, Deserialize)]
pub struct SampleVolume {
    #[serde(rename = "3h", default)]
    pub three_hour: f64,
}

impl OpenWeatherClient {
    pub fn new(http: HttpClient, base_url: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// Resolve a free-text place name to coordinates.
    ///
    /// Takes the single best match; a fetch failure and an empty match
    /// list both resolve to `None`.
    pub async fn resolve(&self, place: &str) -> Option<GeoLocation> {
        let matches = match self.geocode(place).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Failed to geocode '{}': {}", place, e);
                return None;
            }
        };

        matches.into_iter().next().map(|m| GeoLocation {
            local_name: m.local_names.get("en").cloned().or_else(|| m.name.clone()),
            name: m.name,
            latitude: m.lat,
            longitude: m.lon,
            country: m.country,
            state: m.state,
        })
    }

    async fn geocode(&self, place: &str) -> Result<Vec<GeoMatch>, FetchError> {
        let url = format!("{}/geo/1.0/direct", self.base_url);
        let response = self
            .http
            .get_with_retry(
                &url,
                &[
                    ("q", place.to_string()),
                    ("limit", "1".to_string()),
                    ("appid", self.api_key.clone()),
                ],
            )
            .await?;
        Ok(response.json().await?)
    }

    /// Fetch the raw 3-hour-interval forecast for a coordinate pair.
    /// The free tier covers roughly 5 days regardless of how many the
    /// caller wants.
    pub async fn forecast(&self, latitude: f64, longitude: f64) -> Result<ForecastResponse, FetchError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);
        let response = self
            .http
            .get_with_retry(
                &url,
                &[
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                    ("appid", self.api_key.clone()),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;
        Ok(response.json().await?)
    }
}
