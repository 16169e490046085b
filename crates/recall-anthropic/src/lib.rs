// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider adapter for Recall.
//!
//! Implements [`ProviderAdapter`] over the Anthropic Messages API. Only
//! single-shot completions are supported; name extraction and
//! summarization never stream.

pub mod client;
pub mod types;

use async_trait::async_trait;
use recall_config::RecallConfig;
use recall_core::error::RecallError;
use recall_core::traits::{PluginAdapter, ProviderAdapter};
use recall_core::types::{
    AdapterType, HealthStatus, ProviderRequest, ProviderResponse, TokenUsage,
};
use tracing::{debug, info};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Anthropic Claude provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config, then `ANTHROPIC_API_KEY`, then error.
pub struct AnthropicProvider {
    client: AnthropicClient,
    default_model: String,
}

impl AnthropicProvider {
    /// Creates a provider from the `[anthropic]` config section.
    pub fn new(config: &RecallConfig) -> Result<Self, RecallError> {
        let api_key = resolve_api_key(config.anthropic.api_key.as_deref())?;
        let client = AnthropicClient::new(&api_key, &config.anthropic.api_version)?;

        info!(
            model = %config.anthropic.default_model,
            "Anthropic provider initialized"
        );

        Ok(Self {
            client,
            default_model: config.anthropic.default_model.clone(),
        })
    }

    #[cfg(test)]
    fn with_client(client: AnthropicClient, default_model: &str) -> Self {
        Self {
            client,
            default_model: default_model.to_string(),
        }
    }

    /// Model used when a request leaves `model` empty.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn to_message_request(&self, request: ProviderRequest) -> MessageRequest {
        let model = if request.model.trim().is_empty() {
            self.default_model.clone()
        } else {
            request.model
        };

        MessageRequest {
            model,
            messages: request
                .messages
                .into_iter()
                .map(|m| ApiMessage {
                    role: m.role,
                    content: m.content,
                })
                .collect(),
            system: request.system_prompt,
            max_tokens: request.max_tokens,
            stream: false,
        }
    }
}

#[async_trait]
impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    /// Reports healthy without calling the API, so checks cost no tokens.
    async fn health_check(&self) -> Result<HealthStatus, RecallError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RecallError> {
        debug!("Anthropic provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, RecallError> {
        let api_request = self.to_message_request(request);
        let response = self.client.complete_message(&api_request).await?;
        let content = response.text();

        Ok(ProviderResponse {
            id: response.id,
            content,
            model: response.model,
            stop_reason: response.stop_reason,
            usage: TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            },
        })
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: Option<&str>) -> Result<String, RecallError> {
    match config_key {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            RecallError::Config(
                "Anthropic API key not found. Set anthropic.api_key in config or ANTHROPIC_API_KEY environment variable.".into(),
            )
        }),
    }
}
