// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! Handles authentication headers and retries transient failures
//! (429, 500, 503, 529) once after a short delay.

use std::time::Duration;

use recall_core::RecallError;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

const API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// Extraction calls are short; this bounds a hung connection, not generation time.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for Anthropic API communication.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    max_retries: u32,
    retry_delay: Duration,
    timeout: Duration,
    base_url: String,
}

impl AnthropicClient {
    /// Creates a client that authenticates with `api_key` against `api_version`.
    pub fn new(api_key: &str, api_version: &str) -> Result<Self, RecallError> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", header_value("API key", api_key)?);
        headers.insert("anthropic-version", header_value("API version", api_version)?);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RecallError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            max_retries: 1,
            retry_delay: Duration::from_secs(1),
            timeout: REQUEST_TIMEOUT,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different endpoint (wiremock in tests).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self.retry_delay = Duration::from_millis(10);
        self
    }

    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sends a non-streaming request and returns the parsed response.
    pub async fn complete_message(
        &self,
        request: &MessageRequest,
    ) -> Result<MessageResponse, RecallError> {
        let mut req = request.clone();
        req.stream = false;

        let mut attempt = 0;
        loop {
            let response = self
                .client
                .post(&self.base_url)
                .json(&req)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| self.send_error(e))?;

            let status = response.status();
            debug!(status = %status, attempt, model = %req.model, "completion response received");

            if status.is_success() {
                return response
                    .json::<MessageResponse>()
                    .await
                    .map_err(|e| RecallError::Provider {
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    });
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %body, "transient error, will retry");
                attempt += 1;
                tokio::time::sleep(self.retry_delay).await;
                continue;
            }

            return Err(RecallError::Provider {
                message: describe_failure(status, &body),
                source: None,
            });
        }
    }
}

impl AnthropicClient {
    fn send_error(&self, e: reqwest::Error) -> RecallError {
        if e.is_timeout() {
            return RecallError::Timeout {
                duration: self.timeout,
            };
        }
        RecallError::Provider {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

fn header_value(what: &str, value: &str) -> Result<HeaderValue, RecallError> {
    HeaderValue::from_str(value)
        .map_err(|e| RecallError::Config(format!("invalid {what} header value: {e}")))
}

/// Prefers the structured API error over the raw body.
fn describe_failure(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!(
            "Anthropic API error ({}): {}",
            api_err.error.type_, api_err.error.message
        ),
        Err(_) => format!("API returned {status}: {body}"),
    }
}

fn is_transient_error(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}
