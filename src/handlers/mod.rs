/// HTTP request handlers: the agent-facing tool surface
use crate::domain::{Health, MovieDetails, NearbyLaunches, WeatherReport};
use crate::errors::ApiError;
use crate::services::{
    DiscoverParams, LaunchService, MovieService, NearbyParams, NearbyService, WeatherService,
};
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub launch_service: Arc<LaunchService>,
    pub weather_service: Arc<WeatherService>,
    pub nearby_service: Arc<NearbyService>,
    pub movie_service: Arc<MovieService>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

fn default_limit() -> usize {
    10
}

fn default_status() -> Option<String> {
    Some("Go".to_string())
}

fn default_max_distance_km() -> f64 {
    1000.0
}

fn default_days_ahead() -> i64 {
    7
}

fn default_forecast_days() -> usize {
    7
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

#[derive(Deserialize)]
pub struct NextLaunchesQuery {
    /// Status-name substring; defaults to "Go" (as in "Go for Launch").
    /// An explicitly empty value disables the filter.
    #[serde(default = "default_status")]
    pub status: Option<String>,
    pub provider: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// List upcoming launches filtered by status and/or provider
pub async fn next_launches(
    State(state): State<AppState>,
    Query(query): Query<NextLaunchesQuery>,
) -> Json<Value> {
    let launches = state
        .launch_service
        .upcoming(query.status.as_deref(), query.provider.as_deref(), query.limit)
        .await;

    Json(serde_json::json!(SuccessResponse::new(serde_json::json!({
        "count": launches.len(),
        "launches": launches
    }))))
}

#[derive(Deserialize)]
pub struct UpcomingLaunchesQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// List all upcoming launches, unfiltered, reduced field set
pub async fn upcoming_launches(
    State(state): State<AppState>,
    Query(query): Query<UpcomingLaunchesQuery>,
) -> Json<Value> {
    let launches = state.launch_service.all_upcoming(query.limit).await;

    Json(serde_json::json!(SuccessResponse::new(serde_json::json!({
        "count": launches.len(),
        "launches": launches
    }))))
}

#[derive(Deserialize)]
pub struct NearbyLaunchesQuery {
    pub location: String,
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default = "default_days_ahead")]
    pub days_ahead: i64,
    #[serde(default = "default_limit")]
    pub max_results: usize,
    /// Optional calendar day, e.g. "Nov 10" or "2025-11-10"
    pub date: Option<String>,
}

/// Launches near a location with a weather-based visibility verdict
pub async fn nearby_launches(
    State(state): State<AppState>,
    Query(query): Query<NearbyLaunchesQuery>,
) -> Result<Json<SuccessResponse<NearbyLaunches>>, ApiError> {
    let result = state
        .nearby_service
        .launches_near(NearbyParams {
            location: query.location,
            max_distance_km: query.max_distance_km,
            days_ahead: query.days_ahead,
            max_results: query.max_results,
            specific_date: query.date,
        })
        .await?;

    Ok(Json(SuccessResponse::new(result)))
}

#[derive(Deserialize)]
pub struct ForecastQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_forecast_days")]
    pub days: usize,
}

/// Daily weather forecast for a coordinate pair
pub async fn weather_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<SuccessResponse<WeatherReport>>, ApiError> {
    let report = state
        .weather_service
        .forecast(query.lat, query.lon, query.days)
        .await?;

    Ok(Json(SuccessResponse::new(report)))
}

#[derive(Deserialize)]
pub struct DiscoverQuery {
    pub q: String,
    pub year: Option<i64>,
    pub year_start: Option<i64>,
    pub year_end: Option<i64>,
    pub min_rating: Option<f64>,
    pub genre: Option<String>,
    #[serde(default)]
    pub details: bool,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Discover movies by title keywords with year/rating/genre filters
pub async fn discover_movies(
    State(state): State<AppState>,
    Query(query): Query<DiscoverQuery>,
) -> Json<Value> {
    let movies = state
        .movie_service
        .discover(&DiscoverParams {
            query: query.q,
            year: query.year,
            year_start: query.year_start,
            year_end: query.year_end,
            min_rating: query.min_rating,
            genre_filter: query.genre,
            fetch_details: query.details,
            max_results: query.limit,
        })
        .await;

    Json(serde_json::json!(SuccessResponse::new(serde_json::json!({
        "count": movies.len(),
        "movies": movies
    }))))
}

#[derive(Deserialize)]
pub struct MovieInfoQuery {
    /// IMDB id ("tt0848228") or a title to resolve
    pub q: String,
}

/// Detailed information for a single movie
pub async fn movie_info(
    State(state): State<AppState>,
    Query(query): Query<MovieInfoQuery>,
) -> Result<Json<SuccessResponse<MovieDetails>>, ApiError> {
    let details = state.movie_service.movie_info(&query.q).await?;
    Ok(Json(SuccessResponse::new(details)))
}
