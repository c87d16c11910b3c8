//! HTTP fetcher for product pages.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// HTTP client for retailer product pages.
///
/// One request per call with a fixed timeout. There is no retry: a failed
/// fetch is reported to the caller, which skips that product.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a `PageClient` with the given overall timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `url` is not an absolute http(s) URL.
    /// - [`ScraperError::UnexpectedStatus`] if any non-2xx status.
    /// - [`ScraperError::Http`] if connection failure, timeout, or body read error.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let parsed = Self::page_url(url)?;

        let response = self
            .client
            .get(parsed)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    fn page_url(url: &str) -> Result<reqwest::Url, ScraperError> {
        let parsed = reqwest::Url::parse(url.trim()).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(ScraperError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{other}\""),
            }),
        }
    }
}
