use anyhow::{anyhow, Context, Result};
use reqwest::{Response, Url};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, Credentials};
use crate::stats::LanguageStat;

#[derive(Debug, Error)]
pub enum TransifexError {
    #[error("Transifex API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    content: String,
}

/// Client for a single Transifex resource (API v2)
pub struct TransifexClient {
    client: reqwest::Client,
    api_url: String,
    credentials: Credentials,
}

impl TransifexClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            credentials: config.credentials.clone(),
        }
    }

    /// Fetch translated/untranslated counts for every language of the resource
    pub async fn fetch_stats(&self) -> Result<BTreeMap<String, LanguageStat>> {
        let url = self.endpoint(&["stats"])?;
        let response = self.get(url).await.context("Failed to fetch Transifex stats")?;

        response
            .json()
            .await
            .context("Failed to parse Transifex stats response")
    }

    /// Fetch the translated resource content for one language
    pub async fn fetch_translation(&self, code: &str) -> Result<String> {
        let url = self.endpoint(&["translation", code])?;
        let response = self
            .get(url)
            .await
            .with_context(|| format!("Failed to fetch translation for {:?}", code))?;

        let translation: TranslationResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse translation response for {:?}", code))?;

        Ok(translation.content)
    }

    /// Resource URL with each segment appended percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid Transifex API URL {:?}", self.api_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Transifex API URL {:?} cannot be a base", self.api_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Response> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.pass))
            .send()
            .await
            .context("Failed to send request to Transifex API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransifexError::Api { status, body }.into());
        }

        Ok(response)
    }
}
