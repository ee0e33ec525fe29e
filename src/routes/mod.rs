/// Application routes configuration
use crate::handlers::{
    discover_movies, health, movie_info, nearby_launches, next_launches, upcoming_launches,
    weather_forecast, AppState,
};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Launch endpoints
        .route("/launches/next", get(next_launches))
        .route("/launches/upcoming", get(upcoming_launches))
        .route("/launches/near", get(nearby_launches))
        // Weather endpoint
        .route("/weather/forecast", get(weather_forecast))
        // Movie endpoints
        .route("/movies/discover", get(discover_movies))
        .route("/movies/info", get(movie_info))
        .with_state(state)
}
