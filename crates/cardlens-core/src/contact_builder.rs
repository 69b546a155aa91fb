//! Builds the client-facing contact response from a scan result.

use crate::models::{
    ContactData, ContactResponse, PlatformInfo, ScanMetadata, ScanResult,
};

/// Converts a scan result into the response shape address-book clients
/// consume. A failed scan yields an error envelope with no data.
pub fn build_contact(scan: &ScanResult) -> ContactResponse {
    if !scan.success {
        return ContactResponse {
            success: false,
            data: None,
            metadata: None,
            error: Some(
                scan.error
                    .clone()
                    .unwrap_or_else(|| "Scan failed".to_string()),
            ),
        };
    }

    let info = &scan.contact_info;
    let data = ContactData {
        name: info
            .name
            .clone()
            .unwrap_or_else(|| "Unknown Contact".to_string()),
        company: info.company.clone(),
        title: info.title.clone(),
        email: info.email.clone(),
        phone: info.phone.clone(),
        address: info.address.clone(),
        website: info.website.clone(),
        notes: generate_notes(scan),
        source: if scan.qr_detected {
            "qr_code".to_string()
        } else {
            "business_card".to_string()
        },
        platform_info: PlatformInfo {
            wechat_id: info.wechat_id.clone(),
            telegram_link: info.telegram_link.clone(),
            whatsapp_link: info.whatsapp_link.clone(),
            platform: info.platform.clone(),
        },
    };

    ContactResponse {
        success: true,
        data: Some(data),
        metadata: Some(ScanMetadata {
            scan_type: scan.scan_type,
            qr_detected: scan.qr_detected,
            business_card_detected: scan.business_card_detected,
            company_analysis: info.company_analysis.clone(),
        }),
        error: None,
    }
}

fn generate_notes(scan: &ScanResult) -> String {
    let info = &scan.contact_info;
    let mut notes = Vec::new();

    if scan.qr_detected {
        notes.push("Added via QR code scan".to_string());
        if let Some(platform) = &info.platform {
            notes.push(format!("Platform: {platform}"));
        }
    }
    if scan.business_card_detected {
        notes.push("Added via business card scan".to_string());
    }
    if let Some(analysis) = &info.company_analysis {
        if let Some(industry) = &analysis.industry {
            notes.push(format!("Industry: {industry}"));
        }
        if let Some(summary) = &analysis.analysis {
            notes.push(format!("Company Info: {summary}"));
        }
    }
    if let Some(instructions) = &info.instructions {
        notes.push(instructions.clone());
    }

    notes.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CompanyAnalysis, ContactRecord, RawScanData, ScanType, NO_DETECTION_ERROR,
    };

    fn successful_scan() -> ScanResult {
        ScanResult {
            scan_type: ScanType::Auto,
            qr_detected: true,
            business_card_detected: true,
            contact_info: ContactRecord {
                name: Some("Jane Doe".to_string()),
                company: Some("Acme Corp".to_string()),
                platform: Some("Standard vCard".to_string()),
                company_analysis: Some(CompanyAnalysis {
                    industry: Some("Technology".to_string()),
                    analysis: Some("A software company".to_string()),
                }),
                ..Default::default()
            },
            raw_data: RawScanData::default(),
            success: true,
            error: None,
        }
    }

    #[test]
    fn test_failed_scan_yields_error_envelope() {
        let scan = ScanResult::failed(ScanType::Auto, NO_DETECTION_ERROR.to_string());
        let response = build_contact(&scan);
        assert!(!response.success);
        assert!(response.data.is_none());
        assert!(response.metadata.is_none());
        assert_eq!(response.error.as_deref(), Some(NO_DETECTION_ERROR));
    }

    #[test]
    fn test_notes_ordering() {
        let scan = successful_scan();
        let response = build_contact(&scan);
        let data = response.data.expect("data");
        assert_eq!(
            data.notes,
            "Added via QR code scan\nPlatform: Standard vCard\nAdded via business card scan\nIndustry: Technology\nCompany Info: A software company"
        );
    }

    #[test]
    fn test_source_prefers_qr() {
        let scan = successful_scan();
        assert_eq!(build_contact(&scan).data.expect("data").source, "qr_code");

        let mut scan = successful_scan();
        scan.qr_detected = false;
        assert_eq!(
            build_contact(&scan).data.expect("data").source,
            "business_card"
        );
    }

    #[test]
    fn test_missing_name_defaults() {
        let mut scan = successful_scan();
        scan.contact_info.name = None;
        let data = build_contact(&scan).data.expect("data");
        assert_eq!(data.name, "Unknown Contact");
    }

    #[test]
    fn test_absent_fields_omitted_from_json() {
        let mut scan = successful_scan();
        scan.contact_info.company_analysis = None;
        scan.contact_info.company = None;
        let response = build_contact(&scan);
        let json = serde_json::to_value(&response).expect("serialize");
        let data = json.get("data").expect("data");
        assert!(data.get("company").is_none());
        assert!(data.get("email").is_none());
        assert!(json.get("error").is_none());
        let metadata = json.get("metadata").expect("metadata");
        assert!(metadata.get("company_analysis").is_none());
    }
}
