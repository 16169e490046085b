// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `recall replay` command implementation.
//!
//! Feeds a recorded transcript through one conversation session, printing
//! greetings for recognized speakers and the end-of-session summary.

use std::path::Path;
use std::sync::Arc;

use recall_anthropic::AnthropicProvider;
use recall_config::RecallConfig;
use recall_conversation::ConversationManager;
use recall_core::{ConversationSummary, PluginAdapter, ProcessOutcome, ProviderAdapter, RecallError};
use recall_extraction::{ExtractionSettings, LlmNameExtractor, LlmSummarizer};
use recall_storage::SqliteIdentityStore;
use serde::Deserialize;
use tracing::info;

/// One line of a JSONL transcript.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranscriptEvent {
    pub speaker: String,
    pub text: String,
    #[serde(default = "default_is_final")]
    pub is_final: bool,
}

fn default_is_final() -> bool {
    true
}

/// What a replayed session produced.
#[derive(Debug, Default)]
pub struct ReplayReport {
    /// `(speaker, context)` for each speaker recognized mid-session.
    pub greetings: Vec<(String, String)>,
    /// `(speaker, name)` bindings at session end.
    pub bindings: Vec<(String, String)>,
    pub summary: Option<ConversationSummary>,
}

/// Parses JSONL, skipping blank lines and `#` comments.
pub fn parse_transcript(content: &str) -> Result<Vec<TranscriptEvent>, RecallError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| {
                RecallError::Internal(format!("transcript line {}: {e}", index + 1))
            })
        })
        .collect()
}

/// Runs every event through `manager`, then ends the session.
pub async fn replay_events(
    manager: &mut ConversationManager,
    events: &[TranscriptEvent],
) -> ReplayReport {
    let mut report = ReplayReport::default();

    for event in events {
        let outcome = manager
            .process_transcription(&event.speaker, &event.text, event.is_final)
            .await;
        if let ProcessOutcome::SpeakerRecognized { speaker, .. } = outcome {
            let context = manager.get_speaker_context(&speaker).await;
            report.greetings.push((speaker, context));
        }
    }

    report.bindings = manager.bound_speakers();
    report.summary = manager.end_conversation().await;
    report
}

/// Run the `recall replay` command.
pub async fn run_replay(config: &RecallConfig, path: &Path) -> Result<(), RecallError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RecallError::Internal(format!("cannot read {}: {e}", path.display())))?;
    let events = parse_transcript(&content)?;

    let store = Arc::new(SqliteIdentityStore::open(config.storage.clone()).await?);
    let provider: Arc<dyn ProviderAdapter> = Arc::new(AnthropicProvider::new(config)?);
    let settings = ExtractionSettings::from_config(config);

    let mut manager = ConversationManager::new(
        store.clone(),
        Arc::new(LlmNameExtractor::new(provider.clone(), settings.clone())),
        Arc::new(LlmSummarizer::new(provider, settings)),
        &config.session,
    );

    info!(
        session = %manager.session_id(),
        events = events.len(),
        "replaying transcript"
    );
    let report = replay_events(&mut manager, &events).await;
    print!("{}", render_report(&report));

    store.shutdown().await
}

fn render_report(report: &ReplayReport) -> String {
    let mut out = String::new();

    for (speaker, context) in &report.greetings {
        out.push_str(&format!("Recognized {speaker}:\n"));
        for line in context.lines() {
            out.push_str(&format!("  {line}\n"));
        }
    }

    if !report.bindings.is_empty() {
        out.push_str("People in this conversation:\n");
        for (speaker, name) in &report.bindings {
            out.push_str(&format!("  {speaker} -> {name}\n"));
        }
    }

    match &report.summary {
        Some(summary) => {
            if !summary.summary.is_empty() {
                out.push_str(&format!("Summary: {}\n", summary.summary));
            }
            if !summary.main_topics.is_empty() {
                out.push_str(&format!("Topics: {}\n", summary.main_topics.join(", ")));
            }
        }
        None => out.push_str("Nothing was said.\n"),
    }
    out
}
