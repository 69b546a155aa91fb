//! Cardlens API: HTTP surface for the contact scanning pipeline.

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ErrorResponse;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const SERVICE_NAME: &str = "Cardlens OCR Service";

/// Assembles the application router.
///
/// `max_body_bytes` bounds the request body; base64 inflates images by
/// about a third, so callers should pass the image limit with headroom.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/scan", post(handlers::scan::scan))
        .route("/scan/qr", post(handlers::scan::scan_qr))
        .route(
            "/scan/business-card",
            post(handlers::scan::scan_business_card),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
