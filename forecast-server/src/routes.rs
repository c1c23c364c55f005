//! Thin HTTP layer: query/body unpacking, clock anchoring, and the mapping
//! from the error taxonomy to status codes. All decisions live in
//! `forecast_core`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use forecast_core::{ForecastQuery, WeatherError, WeatherService, parse_wire_date};

pub type AppState = Arc<WeatherService>;

pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/api/weather/current", get(get_current))
        .route(
            "/api/weather/forecast",
            get(get_forecast).post(post_forecast),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct CurrentParams {
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastParams {
    city: Option<String>,
    date: Option<String>,
}

/// Override submission body. The date arrives in wire format and is parsed
/// here; everything else is validated by the core.
#[derive(Debug, Deserialize)]
struct OverrideRequest {
    city: String,
    date: String,
    min_temperature: f64,
    max_temperature: f64,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn get_current(
    State(service): State<AppState>,
    Query(params): Query<CurrentParams>,
) -> Response {
    let Some(city) = present(params.city) else {
        return bad_request("Missing 'city' parameter");
    };

    match service.resolve_current(&city).await {
        Ok(current) => Json(current).into_response(),
        Err(err) => error_response(err),
    }
}

async fn get_forecast(
    State(service): State<AppState>,
    Query(params): Query<ForecastParams>,
) -> Response {
    let (Some(city), Some(date_str)) = (present(params.city), present(params.date)) else {
        return bad_request("Missing 'city' or 'date' parameter");
    };

    let date = match parse_wire_date(&date_str) {
        Ok(date) => date,
        Err(err) => return error_response(err),
    };

    let query = ForecastQuery { city, date };
    match service
        .resolve_forecast(&query, Utc::now().date_naive())
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(err) => error_response(err),
    }
}

async fn post_forecast(
    State(service): State<AppState>,
    payload: Result<Json<OverrideRequest>, JsonRejection>,
) -> Response {
    // A missing field or unparseable body is a validation failure and uses
    // the same error shape as every other one.
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };

    let date = match parse_wire_date(&req.date) {
        Ok(date) => date,
        Err(err) => return error_response(err),
    };

    match service.save_override(
        &req.city,
        date,
        req.min_temperature,
        req.max_temperature,
        Utc::now().date_naive(),
    ) {
        Ok(()) => Json(json!({"status": "forecast saved"})).into_response(),
        Err(err) => error_response(err),
    }
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({"error": message}))).into_response()
}

fn error_response(err: WeatherError) -> Response {
    let status = match &err {
        WeatherError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        WeatherError::CityNotFound | WeatherError::NoDataForDate => StatusCode::NOT_FOUND,
        WeatherError::Upstream { .. } => {
            tracing::error!(error = %err, "forecast source failure");
            StatusCode::BAD_GATEWAY
        }
    };

    (status, Json(json!({"error": err.to_string()}))).into_response()
}
