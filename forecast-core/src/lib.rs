//! Core library for the forecast service.
//!
//! This crate defines:
//! - Domain models and the shared error taxonomy
//! - Validation rules for queries and override submissions
//! - The override store and the forecast-source abstraction
//! - The resolver that ties them together (override precedence, live
//!   fallback, min/max aggregation)
//!
//! It is used by `forecast-server`, but can also be reused by other
//! binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod resolver;
pub mod source;
pub mod store;
pub mod validate;

pub use config::Config;
pub use error::WeatherError;
pub use model::{
    CurrentConditions, CurrentWeather, ForecastOverride, ForecastQuery, ForecastResult,
    TemperatureSample, parse_wire_date,
};
pub use resolver::WeatherService;
pub use source::{ForecastSource, source_from_config};
pub use store::{MemoryOverrideStore, OverrideStore};
