use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

use super::{profile_url, FetchError, Profile, ProfileSource};
use crate::config::AppConfig;

/// Unauthenticated client for the GitHub users endpoint
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: String,
}

impl GitHubClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        // GitHub rejects requests without a User-Agent
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
        })
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError> {
        let url = profile_url(&self.api_base, username);
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Lookup for {:?} failed with {}", username, status);
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let profile = serde_json::from_str(&body)?;
        Ok(profile)
    }
}
