/// Weather forecast service
use crate::clients::openweather::{ForecastSample, OpenWeatherClient};
use crate::domain::{
    ConditionSummary, DailyForecast, FeelsLikeSummary, ForecastLocation, TemperatureSummary,
    WeatherReport,
};
use crate::errors::{ApiError, ApiResult};
use crate::utils::{format_datetime, round1};
use chrono::{NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct WeatherService {
    client: Arc<OpenWeatherClient>,
}

impl WeatherService {
    pub fn new(client: Arc<OpenWeatherClient>) -> Self {
        Self { client }
    }

    /// Daily forecast for a coordinate pair, up to `days` calendar days.
    ///
    /// The upstream free tier serves 3-hour samples covering roughly 5
    /// days no matter how many were asked for.
    pub async fn forecast(&self, latitude: f64, longitude: f64, days: usize) -> ApiResult<WeatherReport> {
        let payload = self.client.forecast(latitude, longitude).await?;

        if payload.list.is_empty() {
            return Err(ApiError::NotFound(format!(
                "No weather data available for {}, {}",
                latitude, longitude
            )));
        }

        let forecasts = aggregate_daily(&payload.list, days);
        let city = payload.city.as_ref();

        Ok(WeatherReport {
            location: ForecastLocation {
                latitude,
                longitude,
                city: city.and_then(|c| c.name.clone()),
                country: city.and_then(|c| c.country.clone()),
            },
            days_count: forecasts.len(),
            forecasts,
            filtered_for_date: None,
        })
    }
}

/// Group 3-hour samples into per-day aggregates, dates ascending,
/// at most `days` of them.
pub(crate) fn aggregate_daily(samples: &[ForecastSample], days: usize) -> Vec<DailyForecast> {
    let mut by_day: BTreeMap<NaiveDate, Vec<&ForecastSample>> = BTreeMap::new();
    for sample in samples {
        let Some(dt) = Utc.timestamp_opt(sample.dt, 0).single() else {
            continue;
        };
        by_day.entry(dt.date_naive()).or_default().push(sample);
    }

    by_day
        .into_iter()
        .take(days)
        .map(|(day, items)| aggregate_day(day, &items))
        .collect()
}

fn aggregate_day(day: NaiveDate, items: &[&ForecastSample]) -> DailyForecast {
    let temps: Vec<f64> = items.iter().map(|s| s.main.temp).collect();
    let feels: Vec<f64> = items.iter().map(|s| s.main.feels_like).collect();

    let min_temp = temps.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_temp = temps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg_temp = temps.iter().sum::<f64>() / temps.len() as f64;
    let avg_feels = feels.iter().sum::<f64>() / feels.len() as f64;

    // Representative conditions come from the first midday sample
    // (11:00-14:00 UTC), or the day's first sample when none qualifies.
    let representative = items
        .iter()
        .find(|s| {
            Utc.timestamp_opt(s.dt, 0)
                .single()
                .is_some_and(|dt| (11..=14).contains(&dt.hour()))
        })
        .unwrap_or(&items[0]);
    let condition = representative.weather.first();

    DailyForecast {
        date: format_datetime(Some(&format!("{}T12:00:00Z", day.format("%Y-%m-%d")))),
        date_raw: day.and_time(NaiveTime::MIN).and_utc().timestamp(),
        temperature: TemperatureSummary {
            day: round1(avg_temp),
            min: round1(min_temp),
            max: round1(max_temp),
            // first/last sample in feed order, not clock-time morning/night
            morning: temps[0],
            night: temps[temps.len() - 1],
        },
        feels_like: FeelsLikeSummary {
            day: round1(avg_feels),
            morning: feels[0],
            night: feels[feels.len() - 1],
        },
        pressure: representative.main.pressure,
        humidity: representative.main.humidity,
        weather: ConditionSummary {
            main: condition.and_then(|c| c.main.clone()),
            description: condition.and_then(|c| c.description.clone()),
            icon: condition.and_then(|c| c.icon.clone()),
        },
        clouds: representative.clouds.all,
        wind_speed: representative.wind.speed,
        wind_direction: representative.wind.deg,
        precipitation: items.iter().map(|s| s.rain.three_hour).sum(),
        snow: items.iter().map(|s| s.snow.three_hour).sum(),
    }
}
