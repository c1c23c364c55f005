//! Binary crate for the forecast HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and loading configuration
//! - Wiring the resolver to the OpenWeather source and the override store
//! - Serving the HTTP boundary

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use forecast_core::{Config, MemoryOverrideStore, WeatherService, source_from_config};

mod cli;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = cli::Cli::parse();

    let mut config = Config::load()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(api_key) = args.api_key {
        config.set_api_key(api_key);
    }

    let source = source_from_config(&config)?;
    let store = Arc::new(MemoryOverrideStore::new());
    let service = Arc::new(WeatherService::new(source, store));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(service).layer(cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("forecast server listening on http://{addr}");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
