/// Application configuration module
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub openweather_api_key: String,
    pub openweather_base_url: String,
    pub launch_library_base_url: String,
    pub movie_api_base_url: String,
    pub http: HttpSettings,
}

#[derive(Clone, Debug)]
pub struct HttpSettings {
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub backoff_factor: f64,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let openweather_api_key =
            env::var("OPENWEATHER_API_KEY").expect("OPENWEATHER_API_KEY is required");

        let openweather_base_url = env::var("OPENWEATHER_BASE_URL")
            .unwrap_or_else(|_| "http://api.openweathermap.org".to_string());

        let launch_library_base_url = env::var("LAUNCH_LIBRARY_BASE_URL")
            .unwrap_or_else(|_| "https://ll.thespacedevs.com/2.2.0".to_string());

        let movie_api_base_url = env::var("MOVIE_API_BASE_URL")
            .unwrap_or_else(|_| "https://imdb.iamidiotareyoutoo.com".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let http = HttpSettings {
            timeout_seconds: env_u64("HTTP_TIMEOUT_SECONDS", 10),
            max_retries: env_u64("HTTP_MAX_RETRIES", 3) as u32,
            backoff_factor: env_f64("HTTP_BACKOFF_FACTOR", 2.0),
        };

        Ok(Self {
            bind_addr,
            openweather_api_key,
            openweather_base_url,
            launch_library_base_url,
            movie_api_base_url,
            http,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
