use crate::config::OdsaySettings;
use crate::core::UpstreamQuery;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling ODsay
///
/// None of the messages carry the request URL, since it contains the API key.
#[derive(Debug, Error)]
pub enum OdsayError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("No ODsay API key configured, refusing to send an unauthenticated request")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    ClientInit(String),
}

/// ODsay public transit path search client
///
/// Wraps one pooled `reqwest::Client` with the API key and endpoint injected
/// at construction.
pub struct OdsayClient {
    api_url: String,
    api_key: String,
    timeout_secs: u64,
    client: Client,
}

impl fmt::Debug for OdsayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdsayClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OdsayClient {
    /// Create a new ODsay client
    pub fn new(settings: &OdsaySettings) -> Result<Self, OdsayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| OdsayError::ClientInit(e.without_url().to_string()))?;

        Ok(Self {
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            timeout_secs: settings.timeout_secs,
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Run an intercity bus-only path search and return the raw payload
    ///
    /// Any transport failure, non-success status or non-JSON body is an error;
    /// the payload itself is left for the extractor to interpret.
    pub async fn search_path(&self, query: &UpstreamQuery) -> Result<Value, OdsayError> {
        if self.api_key.trim().is_empty() {
            return Err(OdsayError::MissingApiKey);
        }

        tracing::debug!(
            "Searching ODsay paths: ({}, {}) -> ({}, {}), lang {}",
            query.start.lat,
            query.start.lon,
            query.end.lat,
            query.end.lon,
            query.lang.code()
        );

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(&query.params())
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("ODsay returned {}: {}", status, truncate(&body, 200));
            return Err(OdsayError::ApiError(format!("HTTP {}", status)));
        }

        let body = response.text().await.map_err(|e| self.map_request_error(e))?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("ODsay returned a non-JSON body: {}", truncate(&body, 200));
            OdsayError::InvalidResponse(format!("body is not valid JSON: {}", e))
        })
    }

    fn map_request_error(&self, e: reqwest::Error) -> OdsayError {
        if e.is_timeout() {
            OdsayError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            OdsayError::RequestError(e.without_url())
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
