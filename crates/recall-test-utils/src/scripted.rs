// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction and summarization collaborators with queued results.
//!
//! Each call pops the next scripted result; an empty queue yields the
//! empty name list or the zero-value summary. Inputs are recorded.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use recall_core::{
    ConversationSummarizer, ConversationSummary, ExtractedName, NameExtractor, RecallError,
};

fn scripted_error(message: String) -> RecallError {
    RecallError::Extraction { message }
}

/// A [`NameExtractor`] that replays queued results.
#[derive(Clone, Default)]
pub struct ScriptedExtractor {
    results: Arc<Mutex<VecDeque<Result<Vec<ExtractedName>, String>>>>,
    transcripts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_names(&self, names: Vec<ExtractedName>) {
        self.results.lock().await.push_back(Ok(names));
    }

    pub async fn push_error(&self, message: impl Into<String>) {
        self.results.lock().await.push_back(Err(message.into()));
    }

    /// Transcripts passed to `extract_names`, oldest first.
    pub async fn transcripts(&self) -> Vec<String> {
        self.transcripts.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.transcripts.lock().await.len()
    }
}

#[async_trait]
impl NameExtractor for ScriptedExtractor {
    async fn extract_names(&self, transcript: &str) -> Result<Vec<ExtractedName>, RecallError> {
        self.transcripts.lock().await.push(transcript.to_string());
        match self.results.lock().await.pop_front() {
            Some(result) => result.map_err(scripted_error),
            None => Ok(Vec::new()),
        }
    }
}

/// A [`ConversationSummarizer`] that replays queued results.
#[derive(Clone, Default)]
pub struct ScriptedSummarizer {
    results: Arc<Mutex<VecDeque<Result<ConversationSummary, String>>>>,
    transcripts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_summary(&self, summary: ConversationSummary) {
        self.results.lock().await.push_back(Ok(summary));
    }

    pub async fn push_error(&self, message: impl Into<String>) {
        self.results.lock().await.push_back(Err(message.into()));
    }

    pub async fn transcripts(&self) -> Vec<String> {
        self.transcripts.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.transcripts.lock().await.len()
    }
}

#[async_trait]
impl ConversationSummarizer for ScriptedSummarizer {
    async fn summarize_conversation(
        &self,
        transcript: &str,
    ) -> Result<ConversationSummary, RecallError> {
        self.transcripts.lock().await.push(transcript.to_string());
        match self.results.lock().await.pop_front() {
            Some(result) => result.map_err(scripted_error),
            None => Ok(ConversationSummary::default()),
        }
    }
}
