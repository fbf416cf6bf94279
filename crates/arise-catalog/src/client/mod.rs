//! Fetches catalog documents over HTTP or from the local filesystem.

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::CatalogError;
use crate::retry::retry_with_backoff;
use crate::source::{CatalogSource, SourceLocation};
use crate::types::parse_document;

/// Reads `products.json` documents for a [`CatalogSource`].
///
/// HTTP sources get the configured timeout and `User-Agent`; 429, 5xx and
/// network failures are retried with exponential backoff up to `max_retries`
/// additional attempts. Filesystem sources are read once.
pub struct CatalogClient {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl CatalogClient {
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches one source and splits it into raw record values.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`]: HTTP 404 (not retried).
    /// - [`CatalogError::RateLimited`] / [`CatalogError::UnexpectedStatus`]:
    ///   after retries are exhausted for 429 / 5xx.
    /// - [`CatalogError::Http`]: network failure after retries.
    /// - [`CatalogError::Io`]: unreadable file.
    /// - [`CatalogError::Deserialize`] / [`CatalogError::UnexpectedShape`]:
    ///   body is not an accepted document.
    pub async fn fetch_document(
        &self,
        source: &CatalogSource,
    ) -> Result<Vec<serde_json::Value>, CatalogError> {
        let body = match &source.location {
            SourceLocation::Http(url) => self.fetch_http(url).await?,
            SourceLocation::File(path) => read_file(path).await?,
        };
        parse_document(&body, &source.location.to_string())
    }

    async fn fetch_http(&self, url: &Url) -> Result<String, CatalogError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "application/json")
                    .header(reqwest::header::CACHE_CONTROL, "no-cache")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(CatalogError::RateLimited {
                        url: url.to_string(),
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(CatalogError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(CatalogError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }
}

async fn read_file(path: &Path) -> Result<String, CatalogError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
