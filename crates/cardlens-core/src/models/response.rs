//! Client-facing contact response shape.

use serde::{Deserialize, Serialize};

use crate::models::contact::CompanyAnalysis;
use crate::models::scan::ScanType;

/// Response envelope returned to API clients for a contact scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ContactData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ScanMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Contact payload in the shape downstream address-book integrations expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Human-readable provenance summary, one line per note.
    pub notes: String,
    /// "qr_code" or "business_card", whichever pipeline detected first.
    pub source: String,
    pub platform_info: PlatformInfo,
}

/// Messaging-platform identifiers grouped away from the plain fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// Scan provenance surfaced alongside the contact data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    pub scan_type: ScanType,
    pub qr_detected: bool,
    pub business_card_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_analysis: Option<CompanyAnalysis>,
}
