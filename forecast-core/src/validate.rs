//! Domain validation for forecast queries and override submissions.
//!
//! `today` is always passed in explicitly so the rules stay deterministic
//! under test; callers anchor it to wall-clock time at resolution time.

use chrono::{Duration, NaiveDate};

use crate::error::WeatherError;

/// Forecasts and overrides are accepted from today through this many days
/// ahead, inclusive.
pub const MAX_FORECAST_DAYS: i64 = 10;

/// Check that `date` falls inside the inclusive window `[today, today + 10]`.
pub fn validate_date_window(date: NaiveDate, today: NaiveDate) -> Result<(), WeatherError> {
    if date < today || date > today + Duration::days(MAX_FORECAST_DAYS) {
        return Err(WeatherError::invalid_input(
            "Date must be from today up to 10 days ahead",
        ));
    }
    Ok(())
}

/// Full validation for an override submission. Rules are checked in a fixed
/// order and the first violation is reported:
/// non-empty city, min <= max, date not in the past, date not too far ahead.
pub fn validate_override(
    city: &str,
    date: NaiveDate,
    min_temperature: f64,
    max_temperature: f64,
    today: NaiveDate,
) -> Result<(), WeatherError> {
    if city.trim().is_empty() {
        return Err(WeatherError::invalid_input("City must not be empty"));
    }
    if min_temperature > max_temperature {
        return Err(WeatherError::invalid_input(
            "min_temperature cannot be greater than max_temperature",
        ));
    }
    if date < today {
        return Err(WeatherError::invalid_input("Date cannot be in the past"));
    }
    if date > today + Duration::days(MAX_FORECAST_DAYS) {
        return Err(WeatherError::invalid_input(
            "Date cannot be more than 10 days in the future",
        ));
    }
    Ok(())
}
