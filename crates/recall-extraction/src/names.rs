// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Self-introduction extraction over a provider.

use std::sync::Arc;

use async_trait::async_trait;
use recall_core::traits::ProviderAdapter;
use recall_core::{ExtractedName, NameExtractor, RecallError};
use tracing::debug;

use crate::ExtractionSettings;
use crate::parse::parse_names_response;
use crate::prompts::{NAME_EXTRACTION_PROMPT, render};

/// Finds self-introduced names by asking the extraction model.
///
/// Provider failures are returned as errors; unparseable replies become an
/// empty list.
pub struct LlmNameExtractor {
    provider: Arc<dyn ProviderAdapter>,
    settings: ExtractionSettings,
}

impl LlmNameExtractor {
    pub fn new(provider: Arc<dyn ProviderAdapter>, settings: ExtractionSettings) -> Self {
        Self { provider, settings }
    }
}

#[async_trait]
impl NameExtractor for LlmNameExtractor {
    async fn extract_names(&self, transcript: &str) -> Result<Vec<ExtractedName>, RecallError> {
        if transcript.trim().is_empty() {
            return Ok(Vec::new());
        }

        let prompt = render(NAME_EXTRACTION_PROMPT, transcript);
        let response = self.provider.complete(self.settings.request(prompt)).await?;
        let names = parse_names_response(&response.content);
        debug!(
            count = names.len(),
            output_tokens = response.usage.output_tokens,
            "name extraction complete"
        );
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::Confidence;
    use recall_test_utils::MockProvider;

    fn extractor(provider: Arc<MockProvider>) -> LlmNameExtractor {
        LlmNameExtractor::new(
            provider,
            ExtractionSettings {
                model: "claude-haiku-4-5".into(),
                max_tokens: 256,
            },
        )
    }

    #[tokio::test]
    async fn extracts_names_from_reply() {
        let provider = Arc::new(MockProvider::with_responses(vec![
            r#"[{"name": "James", "confidence": "high"}]"#.into(),
        ]));
        let names = extractor(provider.clone())
            .extract_names("A: Hi, I'm James")
            .await
            .unwrap();
        assert_eq!(names, vec![ExtractedName::new("James", Confidence::High)]);

        let requests = provider.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "claude-haiku-4-5");
        assert_eq!(requests[0].max_tokens, 256);
        assert!(requests[0].messages[0].content.contains("A: Hi, I'm James"));
    }

    #[tokio::test]
    async fn blank_transcript_skips_provider() {
        let provider = Arc::new(MockProvider::new());
        let names = extractor(provider.clone()).extract_names("  \n").await.unwrap();
        assert!(names.is_empty());
        assert!(provider.requests().await.is_empty());
    }

    #[tokio::test]
    async fn provider_failure_is_an_error() {
        let provider = Arc::new(MockProvider::new());
        provider.add_error("rate limited").await;
        assert!(extractor(provider).extract_names("A: hello").await.is_err());
    }

    #[tokio::test]
    async fn garbage_reply_is_empty() {
        let provider = Arc::new(MockProvider::new());
        let names = extractor(provider).extract_names("A: hello").await.unwrap();
        assert!(names.is_empty());
    }
}
