//! Environment-driven service configuration.

use anyhow::{bail, Context, Result};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_VISION_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_MAX_IMAGE_SIZE_MB: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub openai_api_key: String,
    /// Override for the chat completions endpoint, mainly for proxies.
    pub openai_api_base: Option<String>,
    pub vision_model: String,
    pub max_image_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server_port = std::env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse::<u16>()
            .context("PORT must be a valid number")?;

        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let openai_api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        let openai_api_base = std::env::var("OPENAI_API_BASE").ok();

        let vision_model =
            std::env::var("VISION_MODEL").unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string());

        let max_image_size_mb = std::env::var("MAX_IMAGE_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_IMAGE_SIZE_MB.to_string())
            .parse::<usize>()
            .context("MAX_IMAGE_SIZE_MB must be a valid number")?;

        let config = Config {
            server_port,
            environment,
            openai_api_key,
            openai_api_base,
            vision_model,
            max_image_size_bytes: max_image_size_mb * 1024 * 1024,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            bail!("OPENAI_API_KEY is required");
        }
        if self.max_image_size_bytes == 0 {
            bail!("MAX_IMAGE_SIZE_MB must be greater than zero");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
