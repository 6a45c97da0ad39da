//! Remote joke source (JokeAPI v2)

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;

use super::display::ANY_CATEGORY;
use crate::config::UserConfig;

const USER_AGENT: &str = concat!("jokebox/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid joke api url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Something that can hand out raw joke responses
#[async_trait]
pub trait JokeProvider: Send + Sync {
    async fn fetch(&self, category: &str) -> Result<Value, FetchError>;
}

/// Build the request url for a category
pub fn joke_url(base: &str, category: &str, blacklist_flags: &[String]) -> Result<Url, FetchError> {
    let category = if category.trim().is_empty() {
        ANY_CATEGORY
    } else {
        category
    };

    let mut url = Url::parse(base).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .push("joke")
        .push(category);

    if !blacklist_flags.is_empty() {
        url.set_query(Some(&format!("blacklistFlags={}", blacklist_flags.join(","))));
    }

    Ok(url)
}

/// JokeAPI client
pub struct JokeApiClient {
    client: Client,
    base_url: String,
    blacklist_flags: Vec<String>,
}

impl JokeApiClient {
    pub fn new(base_url: impl Into<String>, blacklist_flags: Vec<String>) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
            blacklist_flags,
        }
    }

    pub fn from_config(config: &UserConfig) -> Self {
        Self::new(config.joke_api_url.clone(), config.blacklist_flags.clone())
    }
}

#[async_trait]
impl JokeProvider for JokeApiClient {
    async fn fetch(&self, category: &str) -> Result<Value, FetchError> {
        let url = joke_url(&self.base_url, category, &self.blacklist_flags)?;
        tracing::debug!("Fetching joke from {}", url);

        // JokeAPI reports "no match" as a JSON body on a 4xx status,
        // so the body is decoded whatever the status
        let body = self.client.get(url).send().await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
