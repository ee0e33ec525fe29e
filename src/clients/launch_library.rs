/// Launch Library 2 client (thespacedevs.com).
///
/// Only the upcoming-launches collection is consumed. The wire structs
/// mirror the nested upstream shape; every field the upstream may omit
/// or null out is optional, and pad coordinates stay raw JSON because
/// the API serves them as strings.
use crate::clients::{FetchError, HttpClient};
use serde::Deserialize;
use serde_json::Value;

pub struct LaunchLibraryClient {
    http: HttpClient,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpcomingLaunches {
    #[serde(default)]
    pub results: Vec<ApiLaunch>,
}

#[derive(Debug, Deserialize)]
pub struct ApiLaunch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<ApiStatus>,
    pub net: Option<String>,
    pub window_start: Option<String>,
    pub window_end: Option<String>,
    pub probability: Option<i64>,
    pub launch_service_provider: Option<ApiProvider>,
    pub rocket: Option<ApiRocket>,
    pub mission: Option<ApiMission>,
    pub pad: Option<ApiPad>,
    pub image: Option<String>,
    pub webcast_live: Option<bool>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiStatus {
    pub name: Option<String>,
    pub abbrev: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiProvider {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub provider_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiRocket {
    pub configuration: Option<ApiRocketConfiguration>,
}

#[derive(Debug, Deserialize)]
pub struct ApiRocketConfiguration {
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiMission {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub mission_type: Option<String>,
    pub orbit: Option<ApiOrbit>,
}

#[derive(Debug, Deserialize)]
pub struct ApiOrbit {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPad {
    pub name: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub location: Option<ApiPadLocation>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPadLocation {
    pub name: Option<String>,
    pub country_code: Option<String>,
}

impl LaunchLibraryClient {
    pub fn new(http: HttpClient, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Fetch the upcoming-launches collection in upstream order.
    pub async fn upcoming(&self) -> Result<UpcomingLaunches, FetchError> {
        let url = format!("{}/launch/upcoming", self.base_url);
        let response = self.http.get_with_retry(&url, &[]).await?;
        Ok(response.json().await?)
    }
}
