// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vincere bridge API server
//!
//! Serves CRM contacts and candidates to the telephony bridge and writes
//! call comments back to the CRM.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vincere_bridge::{
    config::Config,
    services::{Bridge, TokenStore},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment; missing values are fatal
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        api_url = %config.api_url,
        enrichment_concurrency = config.enrichment_concurrency,
        "Starting Vincere bridge"
    );

    // Shared across all requests in this process
    let token_store = TokenStore::new();
    tracing::info!("Token store initialized");

    let bridge = Bridge::from_config(&config, token_store);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        bridge,
    });

    // Build router
    let app = vincere_bridge::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vincere_bridge=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
