//! Field map merging and consolidation into the canonical record.

use crate::models::{CompanyAnalysis, ContactRecord, FieldMap};

/// Fields eligible for promotion into [`ContactRecord`]. Anything else in
/// a merged map (pipeline-internal keys like "raw_data", "message" or
/// "username") is dropped by consolidation.
pub const STANDARD_FIELDS: [&str; 12] = [
    "name",
    "title",
    "company",
    "email",
    "phone",
    "address",
    "website",
    "wechat_id",
    "telegram_link",
    "whatsapp_link",
    "platform",
    "type",
];

/// Merges the two pipeline field maps, OCR winning on conflicts.
///
/// An OCR value that is empty after trimming never overwrites a code-path
/// value.
pub fn merge_field_maps(code_path: &FieldMap, ocr_path: &FieldMap) -> FieldMap {
    let mut merged = code_path.clone();
    for (key, value) in ocr_path {
        if !value.trim().is_empty() {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Narrows a merged field map to the canonical contact record.
///
/// Promotion is driven by [`STANDARD_FIELDS`]; the advisory keys
/// `action` and `instructions` ride alongside the allow-list, with
/// `action` renamed to `suggested_action` on output.
pub fn consolidate(merged: &FieldMap, company_analysis: Option<CompanyAnalysis>) -> ContactRecord {
    let mut record = ContactRecord::default();

    for field in STANDARD_FIELDS {
        if let Some(value) = truthy(merged, field) {
            *field_slot(&mut record, field) = Some(value);
        }
    }

    record.suggested_action = truthy(merged, "action");
    record.instructions = truthy(merged, "instructions");
    record.company_analysis = company_analysis;
    record
}

fn truthy(merged: &FieldMap, key: &str) -> Option<String> {
    merged.get(key).filter(|v| !v.trim().is_empty()).cloned()
}

/// Record slot a standard field name promotes into. Total over
/// [`STANDARD_FIELDS`]; the unreachable arm guards against the list and
/// this mapping drifting apart.
fn field_slot<'a>(record: &'a mut ContactRecord, field: &str) -> &'a mut Option<String> {
    match field {
        "name" => &mut record.name,
        "title" => &mut record.title,
        "company" => &mut record.company,
        "email" => &mut record.email,
        "phone" => &mut record.phone,
        "address" => &mut record.address,
        "website" => &mut record.website,
        "wechat_id" => &mut record.wechat_id,
        "telegram_link" => &mut record.telegram_link,
        "whatsapp_link" => &mut record.whatsapp_link,
        "platform" => &mut record.platform,
        "type" => &mut record.contact_type,
        other => unreachable!("'{other}' is not a standard field"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_ocr_wins_on_conflict() {
        let code = map(&[("name", "J. Doe"), ("phone", "+1-202-555-0101")]);
        let ocr = map(&[("name", "Jane Doe"), ("company", "Acme Corp")]);
        let merged = merge_field_maps(&code, &ocr);
        assert_eq!(merged.get("name").map(String::as_str), Some("Jane Doe"));
        assert_eq!(
            merged.get("phone").map(String::as_str),
            Some("+1-202-555-0101")
        );
        assert_eq!(merged.get("company").map(String::as_str), Some("Acme Corp"));
    }

    #[test]
    fn test_empty_ocr_value_never_overwrites() {
        let code = map(&[("email", "jane@acme.example")]);
        let ocr = map(&[("email", "   ")]);
        let merged = merge_field_maps(&code, &ocr);
        assert_eq!(
            merged.get("email").map(String::as_str),
            Some("jane@acme.example")
        );
    }

    #[test]
    fn test_consolidate_drops_internal_keys() {
        let merged = map(&[
            ("message", "Hi"),
            ("username", "jane_doe"),
            ("url", "https://x.co"),
            ("raw_data", "https://t.me/jane_doe"),
        ]);
        let record = consolidate(&merged, None);
        assert_eq!(record, ContactRecord::default());
    }

    #[test]
    fn test_consolidate_maps_action_and_instructions() {
        let merged = map(&[
            ("action", "scan_in_wechat_app"),
            ("instructions", "Open WeChat and scan this QR code to add contact"),
            ("wechat_id", "a1b2c3"),
        ]);
        let record = consolidate(&merged, None);
        assert_eq!(
            record.suggested_action.as_deref(),
            Some("scan_in_wechat_app")
        );
        assert_eq!(record.wechat_id.as_deref(), Some("a1b2c3"));
        assert!(record.instructions.is_some());
    }

    #[test]
    fn test_every_standard_field_is_promoted() {
        for field in STANDARD_FIELDS {
            let merged = map(&[(field, "x")]);
            let record = consolidate(&merged, None);
            assert_ne!(
                record,
                ContactRecord::default(),
                "'{field}' was not promoted"
            );
        }
    }

    #[test]
    fn test_consolidate_sets_company_analysis() {
        let analysis = CompanyAnalysis {
            industry: Some("Technology".to_string()),
            analysis: Some("A software company".to_string()),
        };
        let record = consolidate(&FieldMap::new(), Some(analysis.clone()));
        assert_eq!(record.company_analysis, Some(analysis));
    }

    #[test]
    fn test_consolidate_maps_type_and_platform() {
        let merged = map(&[("type", "vcard"), ("platform", "Standard vCard")]);
        let record = consolidate(&merged, None);
        assert_eq!(record.contact_type.as_deref(), Some("vcard"));
        assert_eq!(record.platform.as_deref(), Some("Standard vCard"));
    }
}
