// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain and adapter types shared across the Recall workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a live conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

// --- Conversation types ---

/// One finalized unit of transcribed speech, already prefixed with its speaker label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// `"{speaker}: {content}"`.
    pub text: String,
    /// When the final transcription event arrived.
    pub timestamp: DateTime<Utc>,
}

impl Utterance {
    /// Creates an utterance stamped with the current time.
    pub fn new(speaker: &str, text: &str) -> Self {
        Self {
            text: format!("{speaker}: {text}"),
            timestamp: Utc::now(),
        }
    }
}

/// A past conversation appended to a person's history at session end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// When the conversation ended.
    pub date: DateTime<Utc>,
    /// Buffered transcript at session end.
    pub transcript: String,
    /// Main topics reported by the summarizer.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Key points reported by the summarizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
    /// Seconds from the first final utterance to session end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
}

/// A durable person record.
///
/// `name` is the identity key and is matched case-insensitively by stores.
/// `last_conversation` and `last_topics` mirror the newest history entry for
/// readers that predate `conversation_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    /// Last-known session-local speaker label.
    pub speaker_id: String,
    /// Opaque voice sample supplied by the device, if any.
    #[serde(skip)]
    pub voice_reference: Option<Vec<u8>>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationEntry>,
    #[serde(default)]
    pub last_met: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_conversation: Option<String>,
    #[serde(default)]
    pub last_topics: Vec<String>,
}

impl Person {
    /// Creates a freshly met person with an empty history.
    pub fn new(name: impl Into<String>, speaker_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            speaker_id: speaker_id.into(),
            voice_reference: None,
            conversation_history: Vec::new(),
            last_met: Some(Utc::now()),
            last_conversation: None,
            last_topics: Vec::new(),
        }
    }

    /// Appends a finished conversation and refreshes the mirror fields.
    ///
    /// A blank `summary` clears `last_conversation`.
    pub fn record_conversation(
        &mut self,
        speaker_id: &str,
        entry: ConversationEntry,
        summary: &str,
    ) {
        self.speaker_id = speaker_id.to_string();
        self.last_met = Some(entry.date);
        self.last_conversation = if summary.trim().is_empty() {
            None
        } else {
            Some(summary.to_string())
        };
        self.last_topics = entry.topics.clone();
        self.conversation_history.push(entry);
    }

    /// The most recently appended conversation, if any.
    pub fn latest_conversation(&self) -> Option<&ConversationEntry> {
        self.conversation_history.last()
    }

    /// Case-insensitive identity comparison.
    pub fn is_named(&self, name: &str) -> bool {
        name_key(&self.name) == name_key(name)
    }
}

/// Identity key for a person's name: trimmed and lowercased.
///
/// Lowercasing is Unicode-aware, so `"Émile"` and `"émile"` share a key.
/// Multi-character folds such as `ß` / `SS` are not unified.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// How confident the extractor is that a name was a self-introduction.
///
/// Variants are ordered `Low < Medium < High`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Confidence {
    #[default]
    Low,
    Medium,
    High,
}

/// A self-introduced name found in a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedName {
    pub name: String,
    /// Always `"unknown"`: attribution is done by the conversation manager.
    #[serde(default = "unknown_speaker")]
    pub speaker: String,
    #[serde(default)]
    pub confidence: Confidence,
}

impl ExtractedName {
    pub fn new(name: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            name: name.into(),
            speaker: unknown_speaker(),
            confidence,
        }
    }
}

fn unknown_speaker() -> String {
    "unknown".to_string()
}

/// Structured summary of a finished conversation.
///
/// The `Default` value is what summarizers return when they cannot produce one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    #[serde(default)]
    pub main_topics: Vec<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

/// Result of handling one transcription event.
///
/// The surrounding application uses `SpeakerRecognized` to trigger a greeting.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// A previously unbound speaker was matched to a stored person.
    SpeakerRecognized { speaker: String, person: Person },
    /// Nothing for the caller to act on.
    TranscriptionProcessed,
}

impl ProcessOutcome {
    /// Wire name of the action, as reported to device clients.
    pub fn action(&self) -> &'static str {
        match self {
            ProcessOutcome::SpeakerRecognized { .. } => "speaker_recognized",
            ProcessOutcome::TranscriptionProcessed => "transcription_processed",
        }
    }
}

// --- Provider types ---

/// A single message sent to an LLM provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
}

/// A single-shot completion request to an LLM provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub model: String,
    pub system_prompt: Option<String>,
    pub messages: Vec<ProviderMessage>,
    pub max_tokens: u32,
}

/// Token accounting reported by a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A completion returned by an LLM provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub id: String,
    /// Concatenated text content.
    pub content: String,
    pub model: String,
    pub stop_reason: Option<String>,
    pub usage: TokenUsage,
}
