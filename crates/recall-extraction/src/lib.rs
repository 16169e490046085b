// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM-backed collaborators for the conversation manager.
//!
//! [`LlmNameExtractor`] finds self-introductions in a transcript and
//! [`LlmSummarizer`] condenses a finished conversation. Both issue a single
//! completion through any [`recall_core::ProviderAdapter`].

pub mod names;
pub mod parse;
pub mod prompts;
pub mod summary;

use recall_config::RecallConfig;
use recall_core::types::{ProviderMessage, ProviderRequest};

pub use names::LlmNameExtractor;
pub use parse::{parse_names_response, parse_summary_response};
pub use summary::{LlmSummarizer, SUMMARY_UNAVAILABLE};

/// Model and token limit for extraction and summarization calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSettings {
    pub model: String,
    pub max_tokens: u32,
}

impl ExtractionSettings {
    /// Uses `extraction.model`, falling back to `anthropic.default_model`.
    pub fn from_config(config: &RecallConfig) -> Self {
        Self {
            model: config.extraction_model().to_string(),
            max_tokens: config.extraction.max_tokens,
        }
    }

    pub(crate) fn request(&self, prompt: String) -> ProviderRequest {
        ProviderRequest {
            model: self.model.clone(),
            system_prompt: None,
            messages: vec![ProviderMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        }
    }
}
