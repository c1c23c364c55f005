use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, TemperatureSample},
};

use super::ForecastSource;

const CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Forecast source backed by the OpenWeather free-tier API.
#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    api_key: String,
    http: Client,
}

impl OpenWeatherSource {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn get_body(&self, url: &str, city: &str, what: &str) -> Result<String, WeatherError> {
        tracing::debug!(city, what, "calling OpenWeather");

        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| {
                WeatherError::upstream(format!("Failed to send {what} request to OpenWeather: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::upstream(format!("Failed to read OpenWeather {what} response body: {e}"))
        })?;

        // 404 is the provider's answer for an unknown city name. Any other
        // non-success status is an operational failure, not a bad city.
        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound);
        }
        if !status.is_success() {
            return Err(WeatherError::upstream(format!(
                "OpenWeather {what} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl ForecastSource for OpenWeatherSource {
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let body = self.get_body(CURRENT_URL, city, "current weather").await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::upstream(format!("Failed to parse OpenWeather current JSON: {e}"))
        })?;

        let report_instant = unix_to_utc(parsed.dt).unwrap_or_else(Utc::now);

        Ok(CurrentConditions {
            temperature: parsed.main.temp,
            utc_offset_seconds: parsed.timezone,
            report_instant,
        })
    }

    async fn fetch_forecast_samples(
        &self,
        city: &str,
    ) -> Result<Vec<TemperatureSample>, WeatherError> {
        let body = self.get_body(FORECAST_URL, city, "forecast").await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::upstream(format!("Failed to parse OpenWeather forecast JSON: {e}"))
        })?;

        let offset = parsed.city.timezone;
        let samples = parsed
            .list
            .iter()
            .filter_map(|entry| {
                unix_to_local_naive(entry.dt, offset).map(|timestamp| TemperatureSample {
                    timestamp,
                    temperature: entry.main.temp,
                })
            })
            .collect();

        Ok(samples)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: i64,
    /// UTC offset of the city, in seconds.
    timezone: i32,
    main: OwMain,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

/// Shift a unix timestamp by the city's UTC offset and drop the zone,
/// yielding the city-local wall-clock time.
fn unix_to_local_naive(ts: i64, offset_seconds: i32) -> Option<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp(ts + i64::from(offset_seconds), 0).map(|dt| dt.naive_utc())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Error bodies are arbitrary text; back off to a char boundary so the
    // slice never splits a multi-byte character.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn local_naive_shifts_by_offset() {
        // 2026-09-01 23:30 UTC at +7200s is 2026-09-02 01:30 local.
        let utc = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap()
            .and_utc()
            .timestamp();

        let local = unix_to_local_naive(utc, 7200).unwrap();
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2026, 9, 2).unwrap());
        assert_eq!(local.time().hour(), 1);
        assert_eq!(local.time().minute(), 30);
    }

    #[test]
    fn forecast_payload_parses_into_samples() {
        let body = r#"{
            "city": {"name": "Oslo", "timezone": 3600},
            "list": [
                {"dt": 1767225600, "main": {"temp": 2.5}},
                {"dt": 1767236400, "main": {"temp": -1.0}}
            ]
        }"#;

        let parsed: OwForecastResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.city.timezone, 3600);
        assert_eq!(parsed.list.len(), 2);
        assert_eq!(parsed.list[1].main.temp, -1.0);
    }

    #[test]
    fn current_payload_parses() {
        let body = r#"{"dt": 1767225600, "timezone": -18000, "main": {"temp": 21.3}, "name": "Lima"}"#;
        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.timezone, -18000);
        assert_eq!(parsed.main.temp, 21.3);
    }

    #[test]
    fn truncate_body_caps_long_payloads() {
        let long = "x".repeat(500);
        let cut = truncate_body(&long);
        assert!(cut.len() < long.len());
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // 'é' is two bytes and straddles the 200-byte cut point.
        let body = format!("{}é and more", "x".repeat(199));
        let cut = truncate_body(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut, format!("{}...", "x".repeat(199)));

        // Entirely multi-byte input must not panic either.
        let cyrillic = "ж".repeat(300);
        assert!(truncate_body(&cyrillic).ends_with("..."));
    }
}
