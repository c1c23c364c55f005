use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Wire format for dates: `dd.MM.yyyy`.
pub const WIRE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse a date in the fixed wire format. Anything else is a client error,
/// never a system error.
pub fn parse_wire_date(s: &str) -> Result<NaiveDate, WeatherError> {
    NaiveDate::parse_from_str(s, WIRE_DATE_FORMAT)
        .map_err(|_| WeatherError::invalid_input("Invalid date format. Expected dd.MM.yyyy"))
}

/// A single forecast lookup, constructed per request.
#[derive(Debug, Clone)]
pub struct ForecastQuery {
    pub city: String,
    pub date: NaiveDate,
}

/// Operator-pinned min/max for a (city, date) pair. At most one exists per
/// case-insensitive city and date; a new submission replaces the old record
/// wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOverride {
    pub city: String,
    pub date: NaiveDate,
    pub min_temperature: f64,
    pub max_temperature: f64,
}

/// One temperature reading from the forecast source. The timestamp is
/// city-local so date comparisons work on the calendar date alone.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureSample {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
}

/// Uniform forecast answer. Callers cannot tell from the shape whether it
/// came from an override or from the live source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub min_temperature: f64,
    pub max_temperature: f64,
}

/// Raw current-conditions report from the forecast source.
#[derive(Debug, Clone, Copy)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub utc_offset_seconds: i32,
    pub report_instant: DateTime<Utc>,
}

/// Shaped current-weather answer: temperature plus the city-local wall
/// clock at report time, formatted `HH:MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub local_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_date_parses_zero_padded() {
        let date = parse_wire_date("05.03.2026").expect("valid wire date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
    }

    #[test]
    fn iso_date_is_rejected() {
        let err = parse_wire_date("2026-03-05").unwrap_err();
        assert!(matches!(err, WeatherError::InvalidInput(_)));
        assert!(err.to_string().contains("dd.MM.yyyy"));
    }

    #[test]
    fn garbage_date_is_rejected() {
        assert!(parse_wire_date("tomorrow").is_err());
        assert!(parse_wire_date("32.01.2026").is_err());
        assert!(parse_wire_date("").is_err());
    }
}
