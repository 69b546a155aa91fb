//! Scan endpoints.
//!
//! All three endpoints take the same body shape; the path only pins the
//! scan type. A scan that finds nothing is still a 200 with
//! `success: false`, so clients can distinguish "bad request" from
//! "clean image".

use axum::extract::State;
use axum::Json;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;

use cardlens_core::{ContactResponse, ScanType};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub image: Option<String>,
    pub scan_type: Option<String>,
}

pub async fn scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    let scan_type = match request.scan_type.as_deref() {
        Some(raw) => raw
            .parse::<ScanType>()
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?,
        None => ScanType::Auto,
    };
    run_scan(&state, request.image, scan_type).await
}

pub async fn scan_qr(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    run_scan(&state, request.image, ScanType::Qr).await
}

pub async fn scan_business_card(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    run_scan(&state, request.image, ScanType::BusinessCard).await
}

async fn run_scan(
    state: &AppState,
    image: Option<String>,
    scan_type: ScanType,
) -> Result<Json<ContactResponse>, ApiError> {
    let encoded = image.filter(|s| !s.trim().is_empty()).ok_or_else(|| {
        ApiError::InvalidInput("Missing 'image' field in request body".to_string())
    })?;

    let image = STANDARD
        .decode(encoded.trim())
        .map_err(|_| ApiError::InvalidInput("Field 'image' is not valid base64".to_string()))?;

    let response = state
        .scanner
        .create_contact_from_scan(&image, scan_type)
        .await;
    Ok(Json(response))
}
