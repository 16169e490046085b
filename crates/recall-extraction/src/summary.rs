// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-of-session summarization over a provider.

use std::sync::Arc;

use async_trait::async_trait;
use recall_core::traits::ProviderAdapter;
use recall_core::{ConversationSummarizer, ConversationSummary, RecallError};
use tracing::{debug, warn};

use crate::ExtractionSettings;
use crate::parse::parse_summary_response;
use crate::prompts::{SUMMARY_PROMPT, render};

/// Summary text stored when the provider could not be reached.
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable";

/// Summarizes a finished conversation with the extraction model.
///
/// Never fails: provider errors produce an empty summary whose text is
/// [`SUMMARY_UNAVAILABLE`], and unparseable replies produce the zero value.
pub struct LlmSummarizer {
    provider: Arc<dyn ProviderAdapter>,
    settings: ExtractionSettings,
}

impl LlmSummarizer {
    pub fn new(provider: Arc<dyn ProviderAdapter>, settings: ExtractionSettings) -> Self {
        Self { provider, settings }
    }
}

#[async_trait]
impl ConversationSummarizer for LlmSummarizer {
    async fn summarize_conversation(
        &self,
        transcript: &str,
    ) -> Result<ConversationSummary, RecallError> {
        let prompt = render(SUMMARY_PROMPT, transcript);
        match self.provider.complete(self.settings.request(prompt)).await {
            Ok(response) => {
                let summary = parse_summary_response(&response.content);
                debug!(topics = summary.main_topics.len(), "conversation summarized");
                Ok(summary)
            }
            Err(e) => {
                warn!(error = %e, "summarization failed");
                Ok(ConversationSummary {
                    summary: SUMMARY_UNAVAILABLE.to_string(),
                    ..ConversationSummary::default()
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_test_utils::MockProvider;

    fn summarizer(provider: Arc<MockProvider>) -> LlmSummarizer {
        LlmSummarizer::new(
            provider,
            ExtractionSettings {
                model: "claude-haiku-4-5".into(),
                max_tokens: 512,
            },
        )
    }

    #[tokio::test]
    async fn parses_summary_reply() {
        let provider = Arc::new(MockProvider::with_responses(vec![
            r#"{"mainTopics": ["coffee"], "keyPoints": ["likes espresso"], "summary": "Coffee chat"}"#
                .into(),
        ]));
        let summary = summarizer(provider.clone())
            .summarize_conversation("A: I love espresso")
            .await
            .unwrap();
        assert_eq!(summary.main_topics, vec!["coffee"]);
        assert_eq!(summary.summary, "Coffee chat");
        assert!(provider.requests().await[0].messages[0]
            .content
            .contains("A: I love espresso"));
    }

    #[tokio::test]
    async fn provider_failure_yields_marker_summary() {
        let provider = Arc::new(MockProvider::new());
        provider.add_error("overloaded").await;
        let summary = summarizer(provider)
            .summarize_conversation("A: hi")
            .await
            .unwrap();
        assert_eq!(summary.summary, SUMMARY_UNAVAILABLE);
        assert!(summary.main_topics.is_empty());
        assert!(summary.key_points.is_empty());
    }

    #[tokio::test]
    async fn garbage_reply_yields_zero_value() {
        let provider = Arc::new(MockProvider::new());
        let summary = summarizer(provider)
            .summarize_conversation("A: hi")
            .await
            .unwrap();
        assert_eq!(summary, ConversationSummary::default());
    }
}
