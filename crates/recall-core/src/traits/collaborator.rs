// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language-model collaborators consumed by the conversation manager.

use async_trait::async_trait;

use crate::error::RecallError;
use crate::types::{ConversationSummary, ExtractedName};

/// Finds first-person self-introductions ("I'm James") in a transcript.
///
/// Returns an empty list when nobody introduced themselves. Third-person
/// mentions must never be reported.
#[async_trait]
pub trait NameExtractor: Send + Sync {
    async fn extract_names(&self, transcript: &str) -> Result<Vec<ExtractedName>, RecallError>;
}

/// Produces topics, key points, and a short summary of a transcript.
#[async_trait]
pub trait ConversationSummarizer: Send + Sync {
    async fn summarize_conversation(
        &self,
        transcript: &str,
    ) -> Result<ConversationSummary, RecallError>;
}
