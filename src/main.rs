/// Main application entry point with clean architecture
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod routes;
mod services;
mod utils;

use crate::clients::{
    HttpClient, LaunchLibraryClient, MovieApiClient, OpenWeatherClient, RetryPolicy,
};
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::routes::build_router;
use crate::services::{LaunchService, MovieService, NearbyService, WeatherService};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    let timeout = Duration::from_secs(config.http.timeout_seconds);
    let policy = RetryPolicy::new(config.http.max_retries, config.http.backoff_factor);

    // Initialize clients
    let openweather = Arc::new(OpenWeatherClient::new(
        HttpClient::new(timeout, policy.clone())?,
        config.openweather_base_url.clone(),
        config.openweather_api_key.clone(),
    ));
    let launch_client = LaunchLibraryClient::new(
        HttpClient::new(timeout, policy.clone())?,
        config.launch_library_base_url.clone(),
    );
    let movie_client = MovieApiClient::new(
        HttpClient::new(timeout, policy)?,
        config.movie_api_base_url.clone(),
    );

    // Initialize services
    let launch_service = Arc::new(LaunchService::new(launch_client));
    let weather_service = Arc::new(WeatherService::new(openweather.clone()));
    let nearby_service = Arc::new(NearbyService::new(
        openweather,
        launch_service.clone(),
        weather_service.clone(),
    ));
    let movie_service = Arc::new(MovieService::new(movie_client));

    // Initialize application state
    let state = AppState {
        launch_service,
        weather_service,
        nearby_service,
        movie_service,
    };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("skywatch service listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
