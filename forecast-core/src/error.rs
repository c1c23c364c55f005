use thiserror::Error;

/// Failure taxonomy for weather resolution.
///
/// Every resolution ends in exactly one of these; there are no partial
/// results. `Upstream` is kept separate from `CityNotFound` so that an
/// unreachable or misbehaving source is never reported as a bad city name.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Client-supplied input failed validation (bad date format,
    /// out-of-window date, missing field, min > max). Never retried.
    #[error("{0}")]
    InvalidInput(String),

    /// The forecast source does not know the requested city.
    #[error("City not found")]
    CityNotFound,

    /// The city resolved, but the source has no sample on the requested date.
    #[error("No forecast data for this date")]
    NoDataForDate,

    /// The forecast source is unreachable, returned an unexpected status,
    /// or produced a payload we could not parse.
    #[error("Weather source error: {message}")]
    Upstream { message: String },
}

impl WeatherError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_carries_reason() {
        let err = WeatherError::invalid_input("Date cannot be in the past");
        assert_eq!(err.to_string(), "Date cannot be in the past");
    }

    #[test]
    fn not_found_variants_are_distinct_from_upstream() {
        let down = WeatherError::upstream("connect timeout");
        assert!(!matches!(down, WeatherError::CityNotFound));
        assert!(down.to_string().contains("connect timeout"));
    }
}
