use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    Config,
    error::WeatherError,
    model::{CurrentConditions, TemperatureSample},
    source::openweather::OpenWeatherSource,
};

pub mod openweather;

/// Abstraction over the external forecast provider.
///
/// Implementations translate provider failures into the shared taxonomy:
/// an unknown city is `CityNotFound`, everything else that goes wrong on
/// the wire is `Upstream`.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    /// Current conditions for a city, including the report instant and the
    /// city's UTC offset as the provider states it.
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    /// All forecast samples the provider has for a city, timestamps already
    /// shifted to city-local time. Callers filter by date themselves.
    async fn fetch_forecast_samples(
        &self,
        city: &str,
    ) -> Result<Vec<TemperatureSample>, WeatherError>;
}

/// Construct the OpenWeather-backed source from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastSource>> {
    let api_key = config.openweather_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
             Hint: set `api_key` in the config file or export OPENWEATHER_API_KEY."
        )
    })?;

    Ok(Box::new(OpenWeatherSource::new(api_key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        if cfg.openweather_api_key().is_some() {
            // OPENWEATHER_API_KEY is set in this environment; nothing to assert.
            return;
        }
        let err = source_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn source_from_config_works_when_key_present() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        assert!(source_from_config(&cfg).is_ok());
    }
}
