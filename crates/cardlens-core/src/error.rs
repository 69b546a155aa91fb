//! Domain error types.

use thiserror::Error;

/// Errors surfaced by the scanning core and mapped to transport errors by
/// the serving layer.
///
/// Negative recognizer results (no code in the image, no card fields) are
/// not errors; they are absorbed into the detection flags of
/// [`crate::models::ScanResult`].
#[derive(Debug, Error)]
pub enum ScanError {
    /// The request carried data the pipeline cannot work with.
    #[error("{0}")]
    InvalidInput(String),
    /// An unexpected failure inside the pipeline.
    #[error("{0}")]
    Internal(String),
}

impl ScanError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            ScanError::InvalidInput(_) => 400,
            ScanError::Internal(_) => 500,
        }
    }
}
