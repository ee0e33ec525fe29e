/// External API clients module
pub mod imdb;
pub mod launch_library;
pub mod openweather;
pub mod retry;

pub use imdb::MovieApiClient;
pub use launch_library::LaunchLibraryClient;
pub use openweather::OpenWeatherClient;
pub use retry::{FetchError, RetryPolicy};

use reqwest::{Client, Response};
use std::time::Duration;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
    policy: RetryPolicy,
}

impl HttpClient {
    pub fn new(timeout: Duration, policy: RetryPolicy) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("skywatch-service/1.0")
            .build()?;
        Ok(Self { client, policy })
    }

    /// GET `url` with the retry/backoff policy applied.
    pub async fn get_with_retry(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Response, FetchError> {
        retry::fetch_with_retry(&self.policy, || self.client.get(url).query(query).send()).await
    }
}
