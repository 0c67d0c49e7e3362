use super::ReleaseSource;
use crate::config::Config;
use crate::error::Result;
use crate::models::Release;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use std::env;
use std::time::Duration;

const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Release source backed by the Discogs REST API.
/// The API base may be overridden by the DISCOGS_API_BASE env var (useful for tests).
pub struct DiscogsProvider {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl DiscogsProvider {
    pub fn new(api_base: impl Into<String>, user_agent: &str, token: Option<String>) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        let base = env::var("DISCOGS_API_BASE").unwrap_or_else(|_| cfg.api_base.clone());
        Self::new(base, &cfg.user_agent, cfg.token.clone())
    }

    fn release_url(&self, id: u64) -> String {
        format!("{}/releases/{}", self.api_base, id)
    }
}

#[async_trait]
impl ReleaseSource for DiscogsProvider {
    fn name(&self) -> &str {
        "discogs"
    }

    async fn fetch_release(&self, id: u64) -> Result<Release> {
        let url = self.release_url(id);
        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!("GET {} (attempt {})", url, attempt);
            let mut req = self.client.get(&url).header(ACCEPT, "application/json");
            if let Some(token) = &self.token {
                req = req.header(AUTHORIZATION, format!("Discogs token={}", token));
            }
            let resp = req.send().await?;

            if resp.status() == StatusCode::TOO_MANY_REQUESTS && attempt <= MAX_RATE_LIMIT_RETRIES {
                let retry_after = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(2);
                warn!("Discogs rate limit hit; retrying release {} in {}s", id, retry_after);
                tokio::time::sleep(Duration::from_secs(retry_after)).await;
                continue;
            }

            let body = resp.error_for_status()?.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }
    }
}
