//! Vision extraction seam.

use anyhow::Result;
use async_trait::async_trait;

use cardlens_core::OcrExtraction;

/// Extracts contact fields from a photographed business card.
///
/// An extraction with no fields means the image carried no recognizable
/// card text; that is a normal outcome, not an error. `Err` is reserved
/// for transport or provider failures.
#[async_trait]
pub trait ContactVisionProvider: Send + Sync {
    async fn extract_contact(&self, image: &[u8]) -> Result<OcrExtraction>;
}
