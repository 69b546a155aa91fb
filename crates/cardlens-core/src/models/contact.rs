//! Canonical contact record and per-pipeline field maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat partial output of one recognizer pipeline, keyed by field name.
///
/// Both pipelines (code payload extraction, vision OCR) produce one of
/// these; the maps are merged and then narrowed to [`ContactRecord`] by
/// the consolidator. Values are always non-empty once inserted.
pub type FieldMap = BTreeMap<String, String>;

/// Normalized contact record produced by consolidation.
///
/// Populated fields are always non-empty; absent fields are omitted from
/// serialization rather than present as empty or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wechat_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Format type tag, e.g. "vcard" or "whatsapp".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
    /// Enrichment carried under its own reserved key, never flattened
    /// into the flat fields above.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_analysis: Option<CompanyAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Optional company enrichment derived from the OCR pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}
