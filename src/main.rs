// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FlashMinds API Server

use flashminds::{config::Config, db::FirestoreDb, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting FlashMinds API");

    let db = match &config.gcp_project_id {
        Some(project_id) => FirestoreDb::new(project_id).await?,
        None => {
            tracing::warn!("GCP_PROJECT_ID not set, using in-memory store (data is not persisted)");
            FirestoreDb::new_in_memory()
        }
    };

    if config.generation_api_url.is_none() {
        tracing::warn!("GENERATION_API_URL not set, flashcard generation disabled");
    }
    if config.stripe_secret_key.is_none() {
        tracing::warn!("STRIPE_SECRET_KEY not set, checkout disabled");
    }
    if config.pexels_api_key.is_none() {
        tracing::info!("PEXELS_API_KEY not set, set thumbnails disabled");
    }

    let state = Arc::new(AppState::new(config.clone(), db));

    // Build router
    let app = flashminds::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flashminds=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}
