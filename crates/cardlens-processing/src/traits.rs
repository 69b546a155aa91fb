//! Detection seam the scanning pipeline depends on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    /// The bytes could not be decoded as an image at all.
    #[error("Failed to decode image: {0}")]
    InvalidImage(String),
}

/// Finds a machine-readable code in an image and returns its decoded
/// payload.
///
/// `Ok(None)` means the image decoded fine but carried no readable code.
/// That is a normal outcome, not an error.
pub trait CodeDetector: Send + Sync {
    fn detect(&self, image: &[u8]) -> Result<Option<String>, DetectError>;
}
