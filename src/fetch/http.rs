use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::{PageFetcher, ResponseCache};
use crate::settings::Settings;
use crate::error::FetchError;

const BASE_BACKOFF_MS: u64 = 2000;

/// reqwest-backed fetcher with optional response cache and retry on 429/5xx.
pub struct HttpFetcher {
    client: reqwest::Client,
    cache: Option<ResponseCache>,
    max_retries: u32,
}

impl HttpFetcher {
    pub fn new(settings: &Settings, cache: Option<ResponseCache>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            cache,
            max_retries: settings.max_retries,
        })
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|source| FetchError::Transport { url: url.to_string(), source })?;

            let status = response.status();
            if status.is_success() {
                return response
                    .text()
                    .await
                    .map_err(|source| FetchError::Transport { url: url.to_string(), source });
            }

            if !should_retry(status) || attempt >= self.max_retries {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let backoff = backoff_for(attempt);
            warn!(
                "HTTP {} on {} (attempt {}/{}), backing off {:.1}s",
                status,
                url,
                attempt + 1,
                self.max_retries,
                backoff.as_secs_f64()
            );
            tokio::time::sleep(backoff).await;
            attempt += 1;
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        if let Some(cache) = &self.cache {
            match cache.get(url) {
                Ok(Some(body)) => {
                    debug!("Cache hit for {}", url);
                    return Ok(body);
                }
                Ok(None) => {}
                Err(e) => warn!("Cache read failed for {}: {:#}", url, e),
            }
        }

        let body = self.fetch_with_retry(url).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(url, &body) {
                warn!("Cache write failed for {}: {:#}", url, e);
            }
        }
        Ok(body)
    }
}

fn should_retry(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn backoff_for(attempt: u32) -> Duration {
    Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt))
}
