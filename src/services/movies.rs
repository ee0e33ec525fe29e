/// Movie lookup service
use crate::clients::imdb::{DetailResponse, MovieApiClient, SearchHit};
use crate::domain::{MovieDetails, MovieSummary};
use crate::errors::{ApiError, ApiResult};
use crate::utils::format_money;
use serde_json::Value;
use tracing::warn;

/// Raw search hits scanned before filters; filtering can discard most
/// of a page, so more are examined than returned.
const SEARCH_SCAN_LIMIT: usize = 30;

#[derive(Debug, Clone)]
pub struct DiscoverParams {
    pub query: String,
    pub year: Option<i64>,
    pub year_start: Option<i64>,
    pub year_end: Option<i64>,
    pub min_rating: Option<f64>,
    pub genre_filter: Option<String>,
    pub fetch_details: bool,
    pub max_results: usize,
}

pub struct MovieService {
    client: MovieApiClient,
}

impl MovieService {
    pub fn new(client: MovieApiClient) -> Self {
        Self { client }
    }

    /// Search by title keywords and filter by year, rating and genre.
    ///
    /// Rating and genre live only in the per-title detail payload, so
    /// those filters (and `fetch_details`) trigger one detail fetch per
    /// candidate. Failures degrade to skipping the candidate.
    pub async fn discover(&self, params: &DiscoverParams) -> Vec<MovieSummary> {
        let search = match self.client.search(&params.query).await {
            Ok(search) => search,
            Err(e) => {
                warn!("Movie search '{}' failed: {}", params.query, e);
                return Vec::new();
            }
        };
        if !search.ok || search.description.is_empty() {
            return Vec::new();
        }

        let needs_details =
            params.min_rating.is_some() || params.genre_filter.is_some() || params.fetch_details;
        let mut results = Vec::new();

        for hit in search.description.iter().take(SEARCH_SCAN_LIMIT) {
            if !passes_year_filters(hit, params) {
                continue;
            }

            match (&hit.imdb_id, needs_details) {
                (Some(imdb_id), true) => {
                    let Ok(detail) = self.client.detail(imdb_id).await else {
                        continue;
                    };
                    let Some(summary) = detailed_summary(hit, imdb_id, detail, params) else {
                        continue;
                    };
                    results.push(summary);
                }
                _ => results.push(plain_summary(hit)),
            }

            if results.len() >= params.max_results {
                break;
            }
        }

        results
    }

    /// Full detail for one title, by IMDB id or by title text.
    pub async fn movie_info(&self, input: &str) -> ApiResult<MovieDetails> {
        let imdb_id = if is_imdb_id(input) {
            input.to_string()
        } else {
            self.resolve_title(input).await.ok_or_else(|| {
                ApiError::NotFound(format!("Movie not found with title: {}", input))
            })?
        };

        let detail = self.client.detail(&imdb_id).await?;
        if !detail.ok {
            return Err(ApiError::NotFound(format!("Movie not found: {}", imdb_id)));
        }

        Ok(build_details(imdb_id, detail))
    }

    async fn resolve_title(&self, title: &str) -> Option<String> {
        let search = match self.client.search(title).await {
            Ok(search) => search,
            Err(e) => {
                warn!("Movie search '{}' failed: {}", title, e);
                return None;
            }
        };
        if !search.ok {
            return None;
        }
        search.description.into_iter().next().and_then(|h| h.imdb_id)
    }
}

fn is_imdb_id(input: &str) -> bool {
    input.len() > 2 && input.starts_with("tt") && input[2..].chars().all(|c| c.is_ascii_digit())
}

fn passes_year_filters(hit: &SearchHit, params: &DiscoverParams) -> bool {
    let filtering_by_year =
        params.year.is_some() || params.year_start.is_some() || params.year_end.is_some();
    let Some(year) = hit.year else {
        // no year data: only passes when no year filter is active
        return !filtering_by_year;
    };

    if let Some(want) = params.year {
        if year != want {
            return false;
        }
    }
    if let (Some(start), Some(end)) = (params.year_start, params.year_end) {
        if year < start || year > end {
            return false;
        }
    }
    true
}

/// Apply rating/genre filters against the detail payload and build the
/// enriched row; `None` means the candidate is filtered out.
fn detailed_summary(
    hit: &SearchHit,
    imdb_id: &str,
    detail: DetailResponse,
    params: &DiscoverParams,
) -> Option<MovieSummary> {
    if !detail.ok {
        return None;
    }
    let short = detail.short?;

    let rating = short.aggregate_rating.as_ref().and_then(|r| r.rating_value);
    if let Some(min_rating) = params.min_rating {
        match rating {
            Some(r) if r >= min_rating => {}
            _ => return None,
        }
    }

    if let Some(genre_filter) = &params.genre_filter {
        let wanted = genre_filter.to_lowercase();
        if !short.genre.iter().any(|g| g.to_lowercase().contains(&wanted)) {
            return None;
        }
    }

    Some(MovieSummary {
        title: short.name.or_else(|| hit.title.clone()),
        year: hit.year,
        imdb_id: Some(imdb_id.to_string()),
        rating,
        rating_count: short.aggregate_rating.as_ref().and_then(|r| r.rating_count),
        rank: hit.rank,
        actors: hit.actors.clone(),
        url: short.url.or_else(|| hit.imdb_url.clone()),
        image: short.image.or_else(|| hit.poster.clone()),
        genre: short.genre,
        description: short.description,
    })
}

fn plain_summary(hit: &SearchHit) -> MovieSummary {
    MovieSummary {
        title: hit.title.clone(),
        year: hit.year,
        imdb_id: hit.imdb_id.clone(),
        rating: None,
        rating_count: None,
        rank: hit.rank,
        actors: hit.actors.clone(),
        url: hit.imdb_url.clone(),
        image: hit.poster.clone(),
        genre: Vec::new(),
        description: None,
    }
}

fn build_details(imdb_id: String, detail: DetailResponse) -> MovieDetails {
    let mut details = MovieDetails {
        imdb_id,
        ..MovieDetails::default()
    };

    if let Some(short) = detail.short {
        details.title = short.name;
        details.description = short.description;
        details.image = short.image;
        details.url = short.url;
        details.genre = short.genre;
        details.content_rating = short.content_rating;
        details.date_published = short.date_published;
        if let Some(rating) = short.aggregate_rating {
            details.rating = rating.rating_value;
            details.rating_count = rating.rating_count;
        }
    }

    if let Some(top) = detail.top {
        if let Some(id) = top.get("id").and_then(Value::as_str) {
            details.imdb_id = id.to_string();
        }
        if let Some(title) = top.pointer("/titleText/text").and_then(Value::as_str) {
            details.title = Some(title.to_string());
        }
        if let Some(year) = top.pointer("/releaseYear/year").and_then(Value::as_i64) {
            details.release_year = Some(year);
        }
        if let Some(runtime) = top
            .pointer("/runtime/displayableProperty/value/plainText")
            .and_then(Value::as_str)
        {
            details.runtime = Some(runtime.to_string());
        }
        if let Some(certificate) = top.pointer("/certificate/rating").and_then(Value::as_str) {
            details.certificate = Some(certificate.to_string());
        }
        if let Some(plot) = top.pointer("/plot/plotText/plainText").and_then(Value::as_str) {
            details.plot = Some(plot.to_string());
        }
        if let Some(budget) = top.pointer("/productionBudget/budget") {
            details.budget = Some(money_string(budget));
        }
        if let Some(gross) = top.pointer("/worldwideGross/total") {
            details.worldwide_gross = Some(money_string(gross));
        }
        if let Some(countries) = top
            .pointer("/countriesDetails/countries")
            .and_then(Value::as_array)
        {
            details.countries = countries
                .iter()
                .filter_map(|c| c.get("text").and_then(Value::as_str))
                .map(str::to_string)
                .collect();
        }
        if let Some(edges) = top.pointer("/keywords/edges").and_then(Value::as_array) {
            details.keywords = edges
                .iter()
                .filter_map(|e| e.pointer("/node/text").and_then(Value::as_str))
                .map(str::to_string)
                .collect();
        }
    }

    details
}

fn money_string(value: &Value) -> String {
    let amount = value.get("amount").and_then(Value::as_i64).unwrap_or(0);
    let currency = value.get("currency").and_then(Value::as_str).unwrap_or("USD");
    format_money(amount, currency)
}
