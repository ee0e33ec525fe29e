/// Location-fusion pipeline: launches near a place, with weather
use crate::clients::OpenWeatherClient;
use crate::domain::{GeoLocation, LaunchRecord, NearbyLaunches, SearchParams, WeatherReport};
use crate::errors::{ApiError, ApiResult};
use crate::services::visibility;
use crate::services::{LaunchService, WeatherService};
use crate::utils::{haversine_km, parse_iso, round2};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::warn;

/// Forecast horizon requested when a specific date is active, to make
/// sure the target day is covered if the upstream can reach it at all.
const WIDE_FORECAST_DAYS: usize = 16;

#[derive(Debug, Clone)]
pub struct NearbyParams {
    pub location: String,
    pub max_distance_km: f64,
    pub days_ahead: i64,
    pub max_results: usize,
    pub specific_date: Option<String>,
}

/// A single calendar day expressed as a UTC window
#[derive(Debug, Clone)]
struct DateWindow {
    day: NaiveDate,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    label: String,
}

pub struct NearbyService {
    geocoder: Arc<OpenWeatherClient>,
    launches: Arc<LaunchService>,
    weather: Arc<WeatherService>,
}

impl NearbyService {
    pub fn new(
        geocoder: Arc<OpenWeatherClient>,
        launches: Arc<LaunchService>,
        weather: Arc<WeatherService>,
    ) -> Self {
        Self {
            geocoder,
            launches,
            weather,
        }
    }

    /// Find upcoming "Go for Launch" launches within reach of a place
    /// and judge whether the weather will let them be seen.
    pub async fn launches_near(&self, params: NearbyParams) -> ApiResult<NearbyLaunches> {
        let Some(location) = self.geocoder.resolve(&params.location).await else {
            return Err(ApiError::NotFound(format!(
                "Location not found: {}",
                params.location
            )));
        };

        let now = Utc::now();
        let window = match params.specific_date.as_deref() {
            Some(raw) => Some(parse_specific_date(raw, now).ok_or_else(|| {
                ApiError::InvalidInput(format!(
                    "Invalid date format: {}. Try \"Nov 10\" or \"2025-11-10\"",
                    raw
                ))
            })?),
            None => None,
        };

        let forecast_days = if window.is_some() {
            WIDE_FORECAST_DAYS
        } else {
            params.days_ahead.max(0) as usize
        };
        let mut weather = match self
            .weather
            .forecast(location.latitude, location.longitude, forecast_days)
            .await
        {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("Weather lookup failed for '{}': {}", params.location, e);
                None
            }
        };
        if let (Some(report), Some(window)) = (weather.as_mut(), window.as_ref()) {
            restrict_to_day(report, window);
        }

        let search_params = build_search_params(&params, window.as_ref());

        let launches = self
            .launches
            .upcoming(Some("Go"), None, params.max_results)
            .await;
        if launches.is_empty() {
            return Ok(NearbyLaunches {
                location,
                search_params,
                launches_found: 0,
                launches: Vec::new(),
                weather,
                message: Some("No upcoming launches found".to_string()),
            });
        }

        let (window_start, window_end) = match &window {
            Some(w) => (w.start, w.end),
            None => (now, now + Duration::days(params.days_ahead)),
        };

        let mut nearby = select_nearby(
            launches,
            &location,
            params.max_distance_km,
            window_start,
            window_end,
        );
        for launch in &mut nearby {
            attach_visibility(launch, weather.as_ref());
        }

        let launches_found = nearby.len();
        Ok(NearbyLaunches {
            location,
            search_params,
            launches_found,
            launches: nearby,
            // each retained launch carries its own forecast snapshot
            weather: if launches_found == 0 { weather } else { None },
            message: None,
        })
    }
}

/// Keep launches with a parseable timestamp inside the window and valid
/// pad coordinates within range, distance attached, nearest first.
fn select_nearby(
    launches: Vec<LaunchRecord>,
    origin: &GeoLocation,
    max_distance_km: f64,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<LaunchRecord> {
    let mut retained = Vec::new();

    for mut launch in launches {
        let Some(net) = launch.net_raw.as_deref().and_then(parse_iso) else {
            continue;
        };
        if net < window_start || net > window_end {
            continue;
        }
        let (Some(lat), Some(lon)) = (launch.latitude, launch.longitude) else {
            continue;
        };

        let distance = haversine_km(origin.latitude, origin.longitude, lat, lon);
        if distance > max_distance_km {
            continue;
        }

        launch.distance_km = Some(round2(distance));
        retained.push(launch);
    }

    retained.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    retained
}

/// Match the launch day against the forecast and attach the verdict.
fn attach_visibility(launch: &mut LaunchRecord, weather: Option<&WeatherReport>) {
    let Some(net) = launch.net_raw.as_deref().and_then(parse_iso) else {
        launch.visibility = Some(visibility::unknown(
            "Error checking weather: launch time unavailable".to_string(),
        ));
        return;
    };
    let launch_day = net.date_naive();

    let matching = weather.and_then(|report| {
        report
            .forecasts
            .iter()
            .find(|f| forecast_day(f) == Some(launch_day))
    });

    match matching {
        Some(forecast) => {
            launch.weather_forecast = Some(visibility::snapshot(forecast));
            launch.visibility = Some(visibility::assess(forecast));
        }
        None => {
            launch.visibility = Some(visibility::unknown(
                "No weather forecast available for launch date".to_string(),
            ));
        }
    }
}

fn forecast_day(forecast: &crate::domain::DailyForecast) -> Option<NaiveDate> {
    Utc.timestamp_opt(forecast.date_raw, 0)
        .single()
        .map(|dt| dt.date_naive())
}

fn restrict_to_day(report: &mut WeatherReport, window: &DateWindow) {
    report
        .forecasts
        .retain(|f| forecast_day(f) == Some(window.day));
    report.days_count = report.forecasts.len();
    report.filtered_for_date = Some(window.label.clone());
}

fn build_search_params(params: &NearbyParams, window: Option<&DateWindow>) -> SearchParams {
    SearchParams {
        max_distance_km: params.max_distance_km,
        days_ahead: params.days_ahead,
        specific_date: window.map(|w| w.label.clone()),
        date_filter_active: window.is_some().then_some(true),
    }
}

/// Parse a user-supplied date ("Nov 10", "2025-11-10",
/// "November 10, 2025", ...) into a UTC day window.
///
/// A date in the current year that already passed is taken to mean its
/// next occurrence and rolls forward one year; midnight of today counts
/// as passed.
fn parse_specific_date(raw: &str, now: DateTime<Utc>) -> Option<DateWindow> {
    let mut day = parse_flexible_date(raw.trim(), now.year())?;

    if day.year() == now.year() && day.and_time(NaiveTime::MIN).and_utc() < now {
        day = day.with_year(day.year() + 1)?;
    }

    Some(DateWindow {
        day,
        start: day.and_time(NaiveTime::MIN).and_utc(),
        end: day.and_hms_micro_opt(23, 59, 59, 999_999)?.and_utc(),
        label: day.format("%B %d, %Y").to_string(),
    })
}

fn parse_flexible_date(raw: &str, current_year: i32) -> Option<NaiveDate> {
    const WITH_YEAR: [&str; 5] = ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%m/%d/%Y"];
    for fmt in WITH_YEAR {
        if let Ok(day) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(day);
        }
    }

    // year-less inputs get the current year appended before parsing
    const NO_YEAR: [&str; 3] = ["%B %d %Y", "%b %d %Y", "%d %B %Y"];
    let with_year = format!("{} {}", raw, current_year);
    for fmt in NO_YEAR {
        if let Ok(day) = NaiveDate::parse_from_str(&with_year, fmt) {
            return Some(day);
        }
    }

    None
}
