//! Scan request modes and the pipeline result envelope.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;
use crate::models::contact::{CompanyAnalysis, ContactRecord, FieldMap};

/// Error reported when a scan finds neither a code nor card text.
pub const NO_DETECTION_ERROR: &str = "No QR code or business card detected in image.";

/// Which recognizer pipelines a scan runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanType {
    /// Run both pipelines and merge their output.
    #[default]
    Auto,
    /// Code detection only.
    Qr,
    /// Vision OCR only.
    BusinessCard,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Auto => "auto",
            ScanType::Qr => "qr",
            ScanType::BusinessCard => "business_card",
        }
    }

    pub fn runs_code_pipeline(&self) -> bool {
        matches!(self, ScanType::Auto | ScanType::Qr)
    }

    pub fn runs_ocr_pipeline(&self) -> bool {
        matches!(self, ScanType::Auto | ScanType::BusinessCard)
    }
}

impl FromStr for ScanType {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ScanType::Auto),
            "qr" => Ok(ScanType::Qr),
            "business_card" => Ok(ScanType::BusinessCard),
            other => Err(ScanError::InvalidInput(format!(
                "Invalid scan_type '{other}'. Must be one of: auto, qr, business_card"
            ))),
        }
    }
}

/// Raw output of the vision OCR pipeline before consolidation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrExtraction {
    /// Extracted contact fields, non-empty values only.
    #[serde(flatten)]
    pub fields: FieldMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_analysis: Option<CompanyAnalysis>,
    /// Set when the extraction attempt itself failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Raw output of the code pipeline: the decoded payload plus the fields
/// extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCapture {
    pub payload: String,
    pub format: String,
    pub fields: FieldMap,
}

/// Per-pipeline raw results preserved alongside the consolidated record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawScanData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr: Option<QrCapture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr: Option<OcrExtraction>,
}

/// Complete result of one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub scan_type: ScanType,
    pub qr_detected: bool,
    pub business_card_detected: bool,
    pub contact_info: ContactRecord,
    pub raw_data: RawScanData,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResult {
    /// Result for a scan that aborted before either pipeline could report.
    pub fn failed(scan_type: ScanType, error: String) -> Self {
        ScanResult {
            scan_type,
            qr_detected: false,
            business_card_detected: false,
            contact_info: ContactRecord::default(),
            raw_data: RawScanData::default(),
            success: false,
            error: Some(error),
        }
    }
}
