//! Decoded payload classification and field extraction.
//!
//! A decoded code payload is classified into exactly one format variant by
//! ordered first-match probing, then converted into a flat field map. The
//! probe order matters: platform markers win over the generic URL check so
//! a WeChat deep link never degrades to a plain web link.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::FieldMap;

static WECHAT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"wxid[_=]([a-zA-Z0-9_-]+)").unwrap());
static WHATSAPP_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"wa\.me/(\+?\d+)").unwrap());
static QUERY_MESSAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"text=([^&]+)").unwrap());
static TELEGRAM_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"t\.me/([a-zA-Z0-9_]+)").unwrap());

static VCARD_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"FN:(.+)").unwrap());
static VCARD_ORG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ORG:(.+)").unwrap());
static VCARD_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"TITLE:(.+)").unwrap());
static VCARD_PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"TEL[^:]*:(.+)").unwrap());
static VCARD_EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"EMAIL[^:]*:(.+)").unwrap());
static VCARD_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"URL:(.+)").unwrap());
static VCARD_ADDRESS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ADR[^:]*:(.+)").unwrap());

static MAILTO_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)mailto:([^?]+)").unwrap());
static TEL_PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)tel:(.+)").unwrap());

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+?\d[\d\s\-()]{8,}").unwrap());
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// One recognized payload format with its extracted fields.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatVariant {
    WeChat {
        wechat_id: Option<String>,
    },
    WhatsApp {
        phone: Option<String>,
        message: Option<String>,
    },
    Telegram {
        username: Option<String>,
        link: Option<String>,
    },
    VCard {
        name: Option<String>,
        company: Option<String>,
        title: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        website: Option<String>,
        address: Option<String>,
    },
    Mailto {
        email: Option<String>,
    },
    Tel {
        phone: Option<String>,
    },
    Url {
        url: String,
        email: Option<String>,
    },
    PlainText {
        email: Option<String>,
        phone: Option<String>,
        url: Option<String>,
    },
}

fn capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn find(re: &Regex, haystack: &str) -> Option<String> {
    re.find(haystack)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

impl FormatVariant {
    /// Classifies a decoded payload by ordered first-match probing.
    pub fn classify(payload: &str) -> FormatVariant {
        let probe = payload.to_lowercase();

        if probe.contains("weixin://") || probe.contains("wxid") {
            FormatVariant::WeChat {
                wechat_id: capture(&WECHAT_ID, payload),
            }
        } else if probe.contains("wa.me") || probe.contains("whatsapp") {
            FormatVariant::WhatsApp {
                phone: capture(&WHATSAPP_PHONE, payload),
                message: capture(&QUERY_MESSAGE, payload),
            }
        } else if probe.contains("t.me") || probe.contains("telegram") {
            let username = capture(&TELEGRAM_USERNAME, payload);
            // Link is only meaningful when a concrete username resolved.
            let link = username
                .is_some()
                .then(|| payload.trim().to_string());
            FormatVariant::Telegram { username, link }
        } else if probe.starts_with("begin:vcard") {
            FormatVariant::VCard {
                name: capture(&VCARD_NAME, payload),
                company: capture(&VCARD_ORG, payload),
                title: capture(&VCARD_TITLE, payload),
                phone: capture(&VCARD_PHONE, payload),
                email: capture(&VCARD_EMAIL, payload),
                website: capture(&VCARD_URL, payload),
                address: capture(&VCARD_ADDRESS, payload),
            }
        } else if probe.starts_with("mailto:") {
            FormatVariant::Mailto {
                email: capture(&MAILTO_EMAIL, payload),
            }
        } else if probe.starts_with("tel:") {
            FormatVariant::Tel {
                phone: capture(&TEL_PHONE, payload),
            }
        } else if probe.starts_with("http://") || probe.starts_with("https://") {
            FormatVariant::Url {
                url: payload.trim().to_string(),
                email: find(&EMAIL, payload),
            }
        } else {
            FormatVariant::PlainText {
                email: find(&EMAIL, payload),
                phone: find(&PHONE, payload),
                url: find(&URL, payload),
            }
        }
    }

    /// Machine-readable format tag, stored under the "type" key.
    pub fn type_tag(&self) -> &'static str {
        match self {
            FormatVariant::WeChat { .. } => "wechat",
            FormatVariant::WhatsApp { .. } => "whatsapp",
            FormatVariant::Telegram { .. } => "telegram",
            FormatVariant::VCard { .. } => "vcard",
            FormatVariant::Mailto { .. } => "email",
            FormatVariant::Tel { .. } => "phone",
            FormatVariant::Url { .. } => "url",
            FormatVariant::PlainText { .. } => "text",
        }
    }

    /// Display name of the platform the payload belongs to.
    pub fn platform(&self) -> &'static str {
        match self {
            FormatVariant::WeChat { .. } => "WeChat",
            FormatVariant::WhatsApp { .. } => "WhatsApp",
            FormatVariant::Telegram { .. } => "Telegram",
            FormatVariant::VCard { .. } => "Standard vCard",
            FormatVariant::Mailto { .. } => "Email",
            FormatVariant::Tel { .. } => "Phone",
            FormatVariant::Url { .. } => "Web Link",
            FormatVariant::PlainText { .. } => "Plain Text",
        }
    }

    /// Client hint for what to do with the contact next, if anything.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            FormatVariant::WeChat { .. } => Some("scan_in_wechat_app"),
            FormatVariant::WhatsApp { .. } => Some("open_whatsapp_chat"),
            FormatVariant::Telegram { .. } => Some("open_telegram_chat"),
            _ => None,
        }
    }

    pub fn instructions(&self) -> Option<&'static str> {
        match self {
            FormatVariant::WeChat { .. } => {
                Some("Open WeChat and scan this QR code to add contact")
            }
            _ => None,
        }
    }

    /// Flattens the variant into the field map the consolidator consumes.
    ///
    /// Always carries "type", "platform" and "raw_data"; per-variant keys
    /// only when the corresponding value was extracted.
    pub fn into_fields(self, payload: &str) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("type".to_string(), self.type_tag().to_string());
        fields.insert("platform".to_string(), self.platform().to_string());
        fields.insert("raw_data".to_string(), payload.to_string());
        if let Some(action) = self.suggested_action() {
            fields.insert("action".to_string(), action.to_string());
        }
        if let Some(instructions) = self.instructions() {
            fields.insert("instructions".to_string(), instructions.to_string());
        }

        let mut put = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                fields.insert(key.to_string(), value);
            }
        };

        match self {
            FormatVariant::WeChat { wechat_id } => {
                put("wechat_id", wechat_id);
            }
            FormatVariant::WhatsApp { phone, message } => {
                put("phone", phone);
                put("message", message);
                put("whatsapp_link", Some(payload.trim().to_string()));
            }
            FormatVariant::Telegram { username, link } => {
                put("username", username);
                put("telegram_link", link);
            }
            FormatVariant::VCard {
                name,
                company,
                title,
                phone,
                email,
                website,
                address,
            } => {
                put("name", name);
                put("company", company);
                put("title", title);
                put("phone", phone);
                put("email", email);
                put("website", website);
                put("address", address);
            }
            FormatVariant::Mailto { email } => {
                put("email", email);
            }
            FormatVariant::Tel { phone } => {
                put("phone", phone);
            }
            FormatVariant::Url { url, email } => {
                put("url", Some(url));
                put("email", email);
            }
            FormatVariant::PlainText { email, phone, url } => {
                put("email", email);
                put("phone", phone);
                put("url", url);
            }
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VCARD: &str = "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nORG:Acme Corp\nTITLE:Engineer\nTEL;TYPE=WORK:+1-202-555-0101\nEMAIL;TYPE=INTERNET:jane@acme.example\nURL:https://acme.example\nADR;TYPE=WORK:;;1 Main St;Springfield;;12345;USA\nEND:VCARD";

    #[test]
    fn test_vcard_extraction() {
        let variant = FormatVariant::classify(VCARD);
        assert_eq!(variant.type_tag(), "vcard");
        assert_eq!(variant.platform(), "Standard vCard");

        let fields = variant.into_fields(VCARD);
        assert_eq!(fields.get("name").map(String::as_str), Some("Jane Doe"));
        assert_eq!(fields.get("company").map(String::as_str), Some("Acme Corp"));
        assert_eq!(fields.get("title").map(String::as_str), Some("Engineer"));
        assert_eq!(
            fields.get("phone").map(String::as_str),
            Some("+1-202-555-0101")
        );
        assert_eq!(
            fields.get("email").map(String::as_str),
            Some("jane@acme.example")
        );
        assert_eq!(
            fields.get("website").map(String::as_str),
            Some("https://acme.example")
        );
        assert_eq!(
            fields.get("address").map(String::as_str),
            Some(";;1 Main St;Springfield;;12345;USA")
        );
        assert_eq!(fields.get("raw_data").map(String::as_str), Some(VCARD));
        assert!(!fields.contains_key("action"));
    }

    #[test]
    fn test_vcard_minimal() {
        let payload = "BEGIN:VCARD\nFN:Bob\nEMAIL:bob@example.com\nEND:VCARD";
        let fields = FormatVariant::classify(payload).into_fields(payload);
        assert_eq!(fields.len(), 5);
        assert_eq!(fields.get("type").map(String::as_str), Some("vcard"));
        assert_eq!(
            fields.get("platform").map(String::as_str),
            Some("Standard vCard")
        );
        assert_eq!(fields.get("name").map(String::as_str), Some("Bob"));
        assert_eq!(
            fields.get("email").map(String::as_str),
            Some("bob@example.com")
        );
    }

    #[test]
    fn test_whatsapp_with_message() {
        let payload = "https://wa.me/15551234567?text=Hi";
        let variant = FormatVariant::classify(payload);
        assert_eq!(variant.type_tag(), "whatsapp");
        assert_eq!(variant.suggested_action(), Some("open_whatsapp_chat"));

        let fields = variant.into_fields(payload);
        assert_eq!(fields.get("phone").map(String::as_str), Some("15551234567"));
        assert_eq!(fields.get("message").map(String::as_str), Some("Hi"));
        assert_eq!(
            fields.get("whatsapp_link").map(String::as_str),
            Some(payload)
        );
    }

    #[test]
    fn test_whatsapp_without_message() {
        let payload = "https://wa.me/12025551234";
        let fields = FormatVariant::classify(payload).into_fields(payload);
        assert_eq!(fields.get("phone").map(String::as_str), Some("12025551234"));
        assert!(!fields.contains_key("message"));
    }

    #[test]
    fn test_wechat() {
        let payload = "weixin://contacts/profile/wxid_a1b2c3";
        let variant = FormatVariant::classify(payload);
        assert_eq!(variant.type_tag(), "wechat");
        assert_eq!(variant.suggested_action(), Some("scan_in_wechat_app"));
        assert_eq!(
            variant.instructions(),
            Some("Open WeChat and scan this QR code to add contact")
        );

        let fields = variant.into_fields(payload);
        assert_eq!(fields.get("wechat_id").map(String::as_str), Some("a1b2c3"));
        assert_eq!(
            fields.get("instructions").map(String::as_str),
            Some("Open WeChat and scan this QR code to add contact")
        );
    }

    #[test]
    fn test_wechat_marker_beats_url() {
        let payload = "https://example.com/wxid=abc";
        let variant = FormatVariant::classify(payload);
        assert_eq!(variant.type_tag(), "wechat");
    }

    #[test]
    fn test_telegram() {
        let payload = "https://t.me/jane_doe";
        let fields = FormatVariant::classify(payload).into_fields(payload);
        assert_eq!(fields.get("type").map(String::as_str), Some("telegram"));
        assert_eq!(fields.get("username").map(String::as_str), Some("jane_doe"));
        assert_eq!(
            fields.get("telegram_link").map(String::as_str),
            Some(payload)
        );
        assert_eq!(
            fields.get("action").map(String::as_str),
            Some("open_telegram_chat")
        );
    }

    #[test]
    fn test_telegram_without_username_has_no_link() {
        let payload = "telegram contact";
        let fields = FormatVariant::classify(payload).into_fields(payload);
        assert_eq!(fields.get("type").map(String::as_str), Some("telegram"));
        assert!(!fields.contains_key("username"));
        assert!(!fields.contains_key("telegram_link"));
    }

    #[test]
    fn test_mailto_strips_query() {
        let payload = "mailto:jane@acme.example?subject=Hello";
        let fields = FormatVariant::classify(payload).into_fields(payload);
        assert_eq!(fields.get("type").map(String::as_str), Some("email"));
        assert_eq!(
            fields.get("email").map(String::as_str),
            Some("jane@acme.example")
        );
    }

    #[test]
    fn test_tel() {
        let payload = "tel:+12025550123";
        let fields = FormatVariant::classify(payload).into_fields(payload);
        assert_eq!(fields.get("type").map(String::as_str), Some("phone"));
        assert_eq!(fields.get("phone").map(String::as_str), Some("+12025550123"));
    }

    #[test]
    fn test_url_with_embedded_email() {
        let payload = "https://acme.example/contact?email=jane@acme.example";
        let fields = FormatVariant::classify(payload).into_fields(payload);
        assert_eq!(fields.get("type").map(String::as_str), Some("url"));
        assert_eq!(fields.get("url").map(String::as_str), Some(payload));
        assert_eq!(
            fields.get("email").map(String::as_str),
            Some("jane@acme.example")
        );
    }

    #[test]
    fn test_plain_text() {
        let payload = "Call me at +1 212-555-0100 or visit http://x.co";
        let variant = FormatVariant::classify(payload);
        assert_eq!(variant.type_tag(), "text");
        assert_eq!(variant.platform(), "Plain Text");

        let fields = variant.into_fields(payload);
        assert_eq!(
            fields.get("phone").map(String::as_str),
            Some("+1 212-555-0100")
        );
        assert_eq!(fields.get("url").map(String::as_str), Some("http://x.co"));
        assert!(!fields.contains_key("email"));
    }

    #[test]
    fn test_classification_is_deterministic() {
        for payload in ["https://t.me/bob", VCARD, "hello", "mailto:a@b.co"] {
            assert_eq!(
                FormatVariant::classify(payload),
                FormatVariant::classify(payload)
            );
        }
    }
}
