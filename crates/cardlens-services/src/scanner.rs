//! Scan orchestration across the code and OCR pipelines.

use std::sync::Arc;

use anyhow::{Context, Result};

use cardlens_core::{
    build_contact, consolidate, merge_field_maps, ContactResponse, FieldMap, FormatVariant,
    OcrExtraction, QrCapture, RawScanData, ScanResult, ScanType, NO_DETECTION_ERROR,
};
use cardlens_processing::CodeDetector;

use crate::vision::ContactVisionProvider;

/// Runs the selected recognizer pipelines over an image and consolidates
/// their output into one scan result.
pub struct ContactScanner {
    detector: Arc<dyn CodeDetector>,
    vision: Arc<dyn ContactVisionProvider>,
}

impl ContactScanner {
    pub fn new(detector: Arc<dyn CodeDetector>, vision: Arc<dyn ContactVisionProvider>) -> Self {
        Self { detector, vision }
    }

    /// Scans an image. Never fails: pipeline errors are folded into a
    /// failed result so one bad recognizer cannot take the request down.
    pub async fn scan_image(&self, image: &[u8], scan_type: ScanType) -> ScanResult {
        match self.scan_inner(image, scan_type).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, scan_type = scan_type.as_str(), "Scan aborted");
                ScanResult::failed(scan_type, format!("Scanning failed: {e}"))
            }
        }
    }

    /// Scans an image and shapes the result for address-book clients.
    pub async fn create_contact_from_scan(
        &self,
        image: &[u8],
        scan_type: ScanType,
    ) -> ContactResponse {
        let scan = self.scan_image(image, scan_type).await;
        build_contact(&scan)
    }

    async fn scan_inner(&self, image: &[u8], scan_type: ScanType) -> Result<ScanResult> {
        let mut qr_detected = false;
        let mut business_card_detected = false;
        let mut raw_data = RawScanData::default();
        let mut code_fields = FieldMap::new();
        let mut ocr_fields = FieldMap::new();
        let mut company_analysis = None;

        if scan_type.runs_code_pipeline() {
            // Grid detection is CPU-bound; keep it off the async workers.
            let detector = Arc::clone(&self.detector);
            let bytes = image.to_vec();
            let detected = tokio::task::spawn_blocking(move || detector.detect(&bytes))
                .await
                .context("Code detection task panicked")?;
            match detected {
                Ok(Some(payload)) => {
                    let variant = FormatVariant::classify(&payload);
                    let format = variant.type_tag().to_string();
                    code_fields = variant.into_fields(&payload);
                    qr_detected = true;
                    raw_data.qr = Some(QrCapture {
                        payload,
                        format,
                        fields: code_fields.clone(),
                    });
                }
                Ok(None) => {
                    tracing::debug!("No code found in image");
                }
                Err(e) => {
                    // A code pipeline failure must not block the OCR path.
                    tracing::warn!(error = %e, "Code detection failed");
                }
            }
        }

        if scan_type.runs_ocr_pipeline() {
            match self.vision.extract_contact(image).await {
                Ok(extraction) => {
                    if extraction.error.is_none() && !extraction.fields.is_empty() {
                        business_card_detected = true;
                        ocr_fields = extraction.fields.clone();
                        company_analysis = extraction.company_analysis.clone();
                    } else {
                        tracing::debug!("No card fields extracted from image");
                    }
                    raw_data.ocr = Some(extraction);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Contact extraction failed");
                    raw_data.ocr = Some(OcrExtraction {
                        fields: FieldMap::new(),
                        company_analysis: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let merged = merge_field_maps(&code_fields, &ocr_fields);
        let contact_info = consolidate(&merged, company_analysis);

        let success = qr_detected || business_card_detected;
        Ok(ScanResult {
            scan_type,
            qr_detected,
            business_card_detected,
            contact_info,
            raw_data,
            success,
            error: (!success).then(|| NO_DETECTION_ERROR.to_string()),
        })
    }
}
