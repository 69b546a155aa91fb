//! QR code detection backed by rqrr.

use image::imageops::FilterType;
use image::GenericImageView;

use crate::traits::{CodeDetector, DetectError};

/// Images larger than this on either axis are downsampled before grid
/// detection; rqrr gets slow on high-resolution photos and finder
/// patterns survive nearest-neighbor shrinking.
const MAX_DETECT_DIM: u32 = 1600;

#[derive(Debug, Default)]
pub struct QrCodeDetector;

impl QrCodeDetector {
    pub fn new() -> Self {
        QrCodeDetector
    }
}

impl CodeDetector for QrCodeDetector {
    fn detect(&self, image: &[u8]) -> Result<Option<String>, DetectError> {
        let mut img = image::load_from_memory(image)
            .map_err(|e| DetectError::InvalidImage(e.to_string()))?;

        let (width, height) = img.dimensions();
        if width > MAX_DETECT_DIM || height > MAX_DETECT_DIM {
            img = img.resize(MAX_DETECT_DIM, MAX_DETECT_DIM, FilterType::Nearest);
        }

        let luma = img.to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare(luma);
        for grid in prepared.detect_grids() {
            match grid.decode() {
                Ok((_, content)) => return Ok(Some(content)),
                Err(e) => {
                    tracing::debug!(error = ?e, "Detected grid failed to decode");
                }
            }
        }

        Ok(None)
    }
}
