//! Forecast resolution: override precedence, live-source fallback, and
//! current-weather passthrough.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use crate::{
    error::WeatherError,
    model::{CurrentWeather, ForecastOverride, ForecastQuery, ForecastResult},
    source::ForecastSource,
    store::OverrideStore,
    validate,
};

/// The resolution engine. Holds the forecast source and the override store;
/// each call performs at most one store read and, when no override matches,
/// one outbound source call.
pub struct WeatherService {
    source: Box<dyn ForecastSource>,
    store: Arc<dyn OverrideStore>,
}

impl WeatherService {
    pub fn new(source: Box<dyn ForecastSource>, store: Arc<dyn OverrideStore>) -> Self {
        Self { source, store }
    }

    /// Resolve the min/max forecast for a (city, date) query.
    ///
    /// A stored override is authoritative: when one matches, the live source
    /// is never contacted. `today` anchors the acceptance window and is
    /// passed in explicitly so callers control the clock.
    pub async fn resolve_forecast(
        &self,
        query: &ForecastQuery,
        today: NaiveDate,
    ) -> Result<ForecastResult, WeatherError> {
        validate::validate_date_window(query.date, today)?;

        match self.store.get(&query.city, query.date) {
            Some(pinned) => {
                tracing::debug!(city = %query.city, date = %query.date, "serving pinned override");
                Ok(ForecastResult {
                    min_temperature: pinned.min_temperature,
                    max_temperature: pinned.max_temperature,
                })
            }
            None => self.live_forecast(query).await,
        }
    }

    async fn live_forecast(&self, query: &ForecastQuery) -> Result<ForecastResult, WeatherError> {
        let samples = self.source.fetch_forecast_samples(&query.city).await?;

        // Samples carry city-local timestamps; only the calendar date matters.
        let temps: Vec<f64> = samples
            .iter()
            .filter(|s| s.timestamp.date() == query.date)
            .map(|s| s.temperature)
            .collect();

        let (Some(min), Some(max)) = (
            temps.iter().copied().reduce(f64::min),
            temps.iter().copied().reduce(f64::max),
        ) else {
            return Err(WeatherError::NoDataForDate);
        };

        Ok(ForecastResult {
            min_temperature: min,
            max_temperature: max,
        })
    }

    /// Validate and persist an operator override. Resubmitting the same key
    /// replaces the stored values wholesale.
    pub fn save_override(
        &self,
        city: &str,
        date: NaiveDate,
        min_temperature: f64,
        max_temperature: f64,
        today: NaiveDate,
    ) -> Result<(), WeatherError> {
        validate::validate_override(city, date, min_temperature, max_temperature, today)?;

        self.store.upsert(ForecastOverride {
            city: city.to_string(),
            date,
            min_temperature,
            max_temperature,
        });
        tracing::info!(city, %date, "forecast override saved");
        Ok(())
    }

    /// Current conditions for a city, with the report time shifted into the
    /// city's local wall clock using the offset the source reports.
    pub async fn resolve_current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let conditions = self.source.fetch_current(city).await?;

        let local =
            conditions.report_instant + Duration::seconds(i64::from(conditions.utc_offset_seconds));

        Ok(CurrentWeather {
            temperature: conditions.temperature,
            local_time: local.format("%H:%M").to_string(),
        })
    }
}
