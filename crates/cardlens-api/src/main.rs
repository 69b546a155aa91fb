use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cardlens_api::{build_router, AppState};
use cardlens_core::Config;
use cardlens_processing::QrCodeDetector;
use cardlens_services::{ContactScanner, OpenAiVisionService};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let vision = match &config.openai_api_base {
        Some(base) => OpenAiVisionService::with_api_base(
            config.openai_api_key.clone(),
            config.vision_model.clone(),
            base.clone(),
        ),
        None => OpenAiVisionService::new(
            config.openai_api_key.clone(),
            config.vision_model.clone(),
        ),
    };
    let scanner = ContactScanner::new(Arc::new(QrCodeDetector::new()), Arc::new(vision));
    let state = AppState::new(scanner);

    // Base64 overhead: allow twice the raw image limit on the wire.
    let router = build_router(state, config.max_image_size_bytes * 2);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %addr, environment = %config.environment, "Starting server");

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
