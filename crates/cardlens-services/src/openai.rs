//! OpenAI vision-backed contact extraction provider.
//!
//! Uses the Chat Completions API twice per card: once with the image to
//! pull contact fields, and once more (text only) to enrich the company
//! with a short analysis when a company name was found.

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use regex::Regex;
use serde::{Deserialize, Serialize};

use cardlens_core::{CompanyAnalysis, FieldMap, OcrExtraction};

use crate::vision::ContactVisionProvider;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const EXTRACTION_MAX_TOKENS: u32 = 500;
const ANALYSIS_MAX_TOKENS: u32 = 150;

const EXTRACTION_SYSTEM_PROMPT: &str = "You are an expert at extracting contact information from business cards. Extract all available information and return it as a JSON object.";
const EXTRACTION_PROMPT: &str = "Extract the following information from this business card: name, title, company, email, phone, address, website. Return as JSON.";
const ANALYSIS_SYSTEM_PROMPT: &str =
    "You are a business analyst. Provide brief insights about companies.";

/// Fields the extraction prompt asks for; the manual fallback parser only
/// looks for these.
const CONTACT_FIELDS: [&str; 7] = [
    "name", "title", "company", "email", "phone", "address", "website",
];

static EMBEDDED_JSON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());
static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"(name|title|company|email|phone|address|website)"\s*:\s*"([^"]*)""#)
        .unwrap()
});

#[derive(Clone)]
pub struct OpenAiVisionService {
    api_key: String,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

// Chat Completions API request/response
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

impl OpenAiVisionService {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_api_base(api_key, model, OPENAI_API_BASE.to_string())
    }

    pub fn with_api_base(api_key: String, model: String, api_base: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            api_key,
            api_base,
            model,
            client,
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    async fn call_chat(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String> {
        let body = ChatRequest {
            model: self.model.clone(),
            max_tokens,
            messages,
        };

        let response = self
            .client
            .post(self.chat_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send Chat Completions request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "OpenAI Chat Completions failed with status {}: {}",
                status,
                error_text
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Failed to parse Chat Completions response")?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("Chat Completions response carried no content"))
    }

    async fn analyze_company(&self, company_name: &str) -> CompanyAnalysis {
        let prompt = format!(
            "Provide a brief analysis of {company_name}: What industry are they in? What do they do? Keep it under 100 words."
        );
        let messages = vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(ANALYSIS_SYSTEM_PROMPT.to_string()),
            },
            ChatMessage {
                role: "user",
                content: MessageContent::Text(prompt),
            },
        ];

        match self.call_chat(messages, ANALYSIS_MAX_TOKENS).await {
            Ok(analysis) => {
                let industry = extract_industry(&analysis);
                CompanyAnalysis {
                    industry: Some(industry),
                    analysis: Some(analysis),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, company = company_name, "Company analysis failed");
                CompanyAnalysis {
                    industry: Some("Unknown".to_string()),
                    analysis: Some("Unable to analyze company".to_string()),
                }
            }
        }
    }
}

#[async_trait]
impl ContactVisionProvider for OpenAiVisionService {
    async fn extract_contact(&self, image: &[u8]) -> Result<OcrExtraction> {
        let base64_image = STANDARD.encode(image);
        let data_url = format!("data:image/jpeg;base64,{base64_image}");

        let messages = vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(EXTRACTION_SYSTEM_PROMPT.to_string()),
            },
            ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: EXTRACTION_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ]),
            },
        ];

        let content = self.call_chat(messages, EXTRACTION_MAX_TOKENS).await?;
        let fields = parse_contact_fields(&content);

        let company_analysis = match fields.get("company") {
            Some(company) => Some(self.analyze_company(company).await),
            None => None,
        };

        Ok(OcrExtraction {
            fields,
            company_analysis,
            error: None,
        })
    }
}

/// Parses the model's reply into contact fields.
///
/// Prefers an embedded JSON object; falls back to scraping quoted
/// key/value pairs for the known field names. Empty values are dropped
/// either way.
fn parse_contact_fields(content: &str) -> FieldMap {
    if let Some(m) = EMBEDDED_JSON.find(content) {
        if let Ok(serde_json::Value::Object(object)) =
            serde_json::from_str::<serde_json::Value>(m.as_str())
        {
            let mut fields = FieldMap::new();
            for (key, value) in object {
                if let Some(value) = value.as_str() {
                    let value = value.trim();
                    if !value.is_empty() {
                        fields.insert(key, value.to_string());
                    }
                }
            }
            return fields;
        }
    }

    let mut fields = FieldMap::new();
    for captures in FIELD_LINE.captures_iter(content) {
        let key = captures[1].to_lowercase();
        let value = captures[2].trim();
        if !value.is_empty() && CONTACT_FIELDS.contains(&key.as_str()) {
            fields.entry(key).or_insert_with(|| value.to_string());
        }
    }
    fields
}

/// Keyword-based industry classification of a company analysis.
fn extract_industry(analysis: &str) -> String {
    const INDUSTRY_KEYWORDS: [(&str, &[&str]); 6] = [
        ("technology", &["tech", "software", "it", "digital", "ai"]),
        ("finance", &["bank", "finance", "investment", "capital"]),
        ("healthcare", &["health", "medical", "pharma", "hospital"]),
        ("retail", &["retail", "store", "shop", "commerce"]),
        ("manufacturing", &["manufacturing", "production", "factory"]),
        ("consulting", &["consulting", "advisory", "services"]),
    ];

    let probe = analysis.to_lowercase();
    for (industry, keywords) in INDUSTRY_KEYWORDS {
        if keywords.iter().any(|keyword| probe.contains(keyword)) {
            return industry.to_string();
        }
    }
    "General Business".to_string()
}
