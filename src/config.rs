use std::env;

use anyhow::{Context, Result};
use url::Url;

use crate::media::PLACEHOLDER_URL;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub backend_url: Url,
    pub api_key: String,
    pub placeholder_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let backend_url = env::var("GALLERY_BACKEND_URL")
            .context("GALLERY_BACKEND_URL must be set")?
            .parse::<Url>()
            .context("GALLERY_BACKEND_URL must be a valid URL")?;
        let api_key =
            env::var("GALLERY_BACKEND_API_KEY").context("GALLERY_BACKEND_API_KEY must be set")?;
        let placeholder_url =
            env::var("GALLERY_PLACEHOLDER_URL").unwrap_or_else(|_| PLACEHOLDER_URL.to_string());

        Ok(Self {
            backend_url,
            api_key,
            placeholder_url,
        })
    }

    pub fn redacted_api_key(&self) -> String {
        redact_api_key(&self.api_key)
    }
}

fn redact_api_key(raw: &str) -> String {
    if raw.len() <= 8 {
        "*****".to_string()
    } else {
        format!("{}*****", &raw[..4])
    }
}
