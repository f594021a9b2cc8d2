use crate::errors::{fetch_context, parse_context};
use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client with built-in rate limiting, shareable across concurrent fetches
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        self.rate_limiter.wait().await;
        self.send_get_request(url).await
    }

    /// GET and decode a JSON body; any non-2xx status is an error
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.get(url).await?;
        Self::ensure_success(&response, url)?;
        Self::decode(response, url).await
    }

    /// Like `get_json`, but 404/204 mean "nothing here" rather than failure
    pub async fn get_optional_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        let response = self.get(url).await?;

        if Self::is_absent(response.status()) {
            debug!("No content at {} ({})", url, response.status());
            return Ok(None);
        }

        Self::ensure_success(&response, url)?;
        Self::decode(response, url).await.map(Some)
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .with_context(|| fetch_context(url))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T> {
        response
            .json::<T>()
            .await
            .with_context(|| parse_context(&format!("JSON body from {}", url)))
    }

    fn ensure_success(response: &reqwest::Response, url: &str) -> Result<()> {
        if !response.status().is_success() {
            anyhow::bail!("API returned status {} for {}", response.status(), url);
        }
        Ok(())
    }

    fn is_absent(status: StatusCode) -> bool {
        status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT
    }
}
