/// Movie metadata client.
///
/// The upstream search endpoint doubles as the detail endpoint: `?q=`
/// searches by title keywords, `?tt=` fetches one title. The `short`
/// section is stable enough to type; `top` is a large, loosely-shaped
/// tree and stays raw JSON for pointer reads in the movie service.
use crate::clients::{FetchError, HttpClient};
use serde::Deserialize;
use serde_json::Value;

pub struct MovieApiClient {
    http: HttpClient,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub description: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "#TITLE")]
    pub title: Option<String>,
    #[serde(rename = "#YEAR")]
    pub year: Option<i64>,
    #[serde(rename = "#IMDB_ID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "#RANK")]
    pub rank: Option<i64>,
    #[serde(rename = "#ACTORS")]
    pub actors: Option<String>,
    #[serde(rename = "#IMDB_URL")]
    pub imdb_url: Option<String>,
    #[serde(rename = "#IMG_POSTER")]
    pub poster: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailResponse {
    #[serde(default)]
    pub ok: bool,
    pub short: Option<ShortInfo>,
    pub top: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShortInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(rename = "contentRating")]
    pub content_rating: Option<String>,
    #[serde(rename = "datePublished")]
    pub date_published: Option<String>,
    #[serde(rename = "aggregateRating")]
    pub aggregate_rating: Option<AggregateRating>,
}

#[derive(Debug, Deserialize)]
pub struct AggregateRating {
    #[serde(rename = "ratingValue")]
    pub rating_value: Option<f64>,
    #[serde(rename = "ratingCount")]
    pub rating_count: Option<i64>,
}

impl MovieApiClient {
    pub fn new(http: HttpClient, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Search titles by keyword.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, FetchError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get_with_retry(&url, &[("q", query.to_string())])
            .await?;
        Ok(response.json().await?)
    }

    /// Fetch one title by IMDB id.
    pub async fn detail(&self, imdb_id: &str) -> Result<DetailResponse, FetchError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get_with_retry(&url, &[("tt", imdb_id.to_string())])
            .await?;
        Ok(response.json().await?)
    }
}
