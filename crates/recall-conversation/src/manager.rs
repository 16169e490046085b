// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session conversation state machine.
//!
//! A [`ConversationManager`] is created for each connected device. It buffers
//! final utterances, periodically asks the [`NameExtractor`] for
//! self-introductions, binds discovered names to speakers, and on session end
//! summarizes the conversation into every bound person's history.
//!
//! Every method takes `&mut self`, so one event is handled to completion
//! before the next. Collaborator failures are logged and replaced with safe
//! defaults; nothing here returns an error.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use recall_config::model::SessionConfig;
use recall_core::{
    Confidence, ConversationEntry, ConversationSummarizer, ConversationSummary, IdentityStore,
    NameExtractor, Person, ProcessOutcome, SessionId, Utterance,
};
use tracing::{debug, info, warn};

use crate::buffer::UtteranceBuffer;
use crate::context::{UNKNOWN_SPEAKER, format_speaker_context};

/// Conversation and speaker-identity state for one live session.
pub struct ConversationManager {
    session_id: SessionId,
    store: Arc<dyn IdentityStore>,
    extractor: Arc<dyn NameExtractor>,
    summarizer: Arc<dyn ConversationSummarizer>,
    extraction_interval: u64,
    min_confidence: Confidence,
    buffer: UtteranceBuffer,
    /// Insertion-ordered; the last element receives extracted names.
    active_speakers: Vec<String>,
    /// Speaker label -> person name. First binding wins for the session.
    speaker_names: HashMap<String, String>,
    utterance_count: u64,
    session_started: Option<DateTime<Utc>>,
}

fn new_session_id() -> SessionId {
    SessionId(uuid::Uuid::new_v4().to_string())
}

impl ConversationManager {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        extractor: Arc<dyn NameExtractor>,
        summarizer: Arc<dyn ConversationSummarizer>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            session_id: new_session_id(),
            store,
            extractor,
            summarizer,
            extraction_interval: config.extraction_interval.max(1),
            min_confidence: config.min_confidence,
            buffer: UtteranceBuffer::new(config.buffer_capacity),
            active_speakers: Vec::new(),
            speaker_names: HashMap::new(),
            utterance_count: 0,
            session_started: None,
        }
    }

    /// Handles one transcription event.
    ///
    /// Interim (`is_final == false`) events are ignored. A final event is
    /// buffered and counted, may trigger an extraction cycle, and returns
    /// [`ProcessOutcome::SpeakerRecognized`] when a previously unbound speaker
    /// matches a stored person.
    pub async fn process_transcription(
        &mut self,
        speaker: &str,
        text: &str,
        is_final: bool,
    ) -> ProcessOutcome {
        if !is_final {
            return ProcessOutcome::TranscriptionProcessed;
        }

        let utterance = Utterance::new(speaker, text);
        if self.session_started.is_none() {
            self.session_started = Some(utterance.timestamp);
        }
        if let Some(evicted) = self.buffer.push(utterance) {
            debug!(session = %self.session_id, evicted = %evicted.text, "buffer full, evicted oldest utterance");
        }

        self.utterance_count += 1;
        if !self.active_speakers.iter().any(|s| s == speaker) {
            self.active_speakers.push(speaker.to_string());
        }

        if self.utterance_count % self.extraction_interval == 0 {
            self.run_extraction_cycle().await;
        }

        if self.speaker_names.contains_key(speaker) {
            return ProcessOutcome::TranscriptionProcessed;
        }

        match self.store.get_person(speaker).await {
            Ok(Some(person)) => {
                info!(session = %self.session_id, speaker, name = %person.name, "speaker recognized");
                self.speaker_names
                    .insert(speaker.to_string(), person.name.clone());
                ProcessOutcome::SpeakerRecognized {
                    speaker: speaker.to_string(),
                    person,
                }
            }
            Ok(None) => ProcessOutcome::TranscriptionProcessed,
            Err(e) => {
                warn!(session = %self.session_id, speaker, error = %e, "speaker lookup failed");
                ProcessOutcome::TranscriptionProcessed
            }
        }
    }

    /// Asks the extractor for names in the buffer and binds them.
    ///
    /// Every candidate is attributed to the most recently added active
    /// speaker. Already-bound speakers keep their binding.
    pub(crate) async fn run_extraction_cycle(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let transcript = self.buffer.transcript();
        let candidates = match self.extractor.extract_names(&transcript).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(session = %self.session_id, error = %e, "name extraction failed");
                return;
            }
        };
        debug!(
            session = %self.session_id,
            utterances = self.utterance_count,
            candidates = candidates.len(),
            "extraction cycle"
        );

        for candidate in candidates {
            let name = candidate.name.trim();
            if name.is_empty() {
                continue;
            }
            if candidate.confidence < self.min_confidence {
                debug!(name, confidence = %candidate.confidence, "below minimum confidence, skipped");
                continue;
            }
            let Some(speaker) = self.active_speakers.last().cloned() else {
                debug!(name, "no active speaker, skipped");
                continue;
            };
            if let Some(bound) = self.speaker_names.get(&speaker) {
                debug!(speaker = %speaker, bound = %bound, name, "speaker already bound, identity protected");
                continue;
            }

            match self.store.find_person_by_name(name).await {
                Ok(Some(existing)) => {
                    info!(session = %self.session_id, speaker = %speaker, name = %existing.name, "returning person identified");
                    self.speaker_names.insert(speaker, existing.name);
                }
                Ok(None) => {
                    let person = Person::new(name, speaker.as_str());
                    match self.store.store_person(&person).await {
                        Ok(()) => {
                            info!(session = %self.session_id, speaker = %speaker, name, "new person met");
                            self.speaker_names.insert(speaker, person.name);
                        }
                        Err(e) => {
                            warn!(session = %self.session_id, name, error = %e, "failed to store new person");
                        }
                    }
                }
                Err(e) => {
                    warn!(session = %self.session_id, name, error = %e, "person lookup failed");
                }
            }
        }
    }

    /// Closes the session.
    ///
    /// Summarizes the buffered transcript, appends it to the history of every
    /// bound person, and resets all session state. Returns `None` without
    /// touching the store when nothing was said.
    pub async fn end_conversation(&mut self) -> Option<ConversationSummary> {
        if self.buffer.is_empty() {
            self.reset();
            return None;
        }

        let transcript = self.buffer.transcript();
        let ended_at = Utc::now();
        let duration_secs = self
            .session_started
            .map(|start| u64::try_from((ended_at - start).num_seconds()).unwrap_or(0));

        let summary = match self.summarizer.summarize_conversation(&transcript).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(session = %self.session_id, error = %e, "summarization failed");
                ConversationSummary::default()
            }
        };

        for (speaker, name) in self.bound_speakers() {
            let Some(mut person) = self.resolve_person(&speaker, &name).await else {
                warn!(session = %self.session_id, speaker = %speaker, name = %name, "bound person not found, history not saved");
                continue;
            };

            let entry = ConversationEntry {
                date: ended_at,
                transcript: transcript.clone(),
                topics: summary.main_topics.clone(),
                key_points: if summary.key_points.is_empty() {
                    None
                } else {
                    Some(summary.key_points.clone())
                },
                duration_secs,
            };
            person.record_conversation(&speaker, entry, &summary.summary);

            match self.store.store_person(&person).await {
                Ok(()) => info!(
                    session = %self.session_id,
                    speaker = %speaker,
                    name = %person.name,
                    conversations = person.conversation_history.len(),
                    "conversation saved"
                ),
                Err(e) => warn!(session = %self.session_id, name = %person.name, error = %e, "failed to save conversation"),
            }
        }

        self.reset();
        Some(summary)
    }

    /// Greeting context for `speaker`, or `"Unknown speaker"`.
    ///
    /// An unbound speaker found in the store becomes bound.
    pub async fn get_speaker_context(&mut self, speaker: &str) -> String {
        if let Some(name) = self.speaker_names.get(speaker).cloned() {
            return match self.resolve_person(speaker, &name).await {
                Some(person) => format_speaker_context(&person),
                None => name,
            };
        }

        match self.store.get_person(speaker).await {
            Ok(Some(person)) => {
                self.speaker_names
                    .insert(speaker.to_string(), person.name.clone());
                format_speaker_context(&person)
            }
            Ok(None) => UNKNOWN_SPEAKER.to_string(),
            Err(e) => {
                warn!(session = %self.session_id, speaker, error = %e, "speaker lookup failed");
                UNKNOWN_SPEAKER.to_string()
            }
        }
    }

    /// The name bound to `speaker` this session.
    pub fn get_speaker_name(&self, speaker: &str) -> Option<&str> {
        self.speaker_names.get(speaker).map(String::as_str)
    }

    /// Looks up the record behind a binding: by speaker label if it carries
    /// the bound name, otherwise by name.
    async fn resolve_person(&self, speaker: &str, name: &str) -> Option<Person> {
        match self.store.get_person(speaker).await {
            Ok(Some(person)) if person.is_named(name) => return Some(person),
            Ok(_) => {}
            Err(e) => {
                warn!(session = %self.session_id, speaker, error = %e, "person lookup by speaker failed");
            }
        }

        match self.store.find_person_by_name(name).await {
            Ok(person) => person,
            Err(e) => {
                warn!(session = %self.session_id, name, error = %e, "person lookup by name failed");
                None
            }
        }
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.active_speakers.clear();
        self.speaker_names.clear();
        self.utterance_count = 0;
        self.session_started = None;
        self.session_id = new_session_id();
    }

    // --- Introspection ---

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn buffer(&self) -> &UtteranceBuffer {
        &self.buffer
    }

    /// Final utterances seen since the session started.
    pub fn utterance_count(&self) -> u64 {
        self.utterance_count
    }

    pub fn active_speakers(&self) -> &[String] {
        &self.active_speakers
    }

    /// The speaker that extracted names are attributed to.
    pub fn last_active_speaker(&self) -> Option<&str> {
        self.active_speakers.last().map(String::as_str)
    }

    /// `(speaker, name)` bindings sorted by speaker label.
    pub fn bound_speakers(&self) -> Vec<(String, String)> {
        let mut bound: Vec<(String, String)> = self
            .speaker_names
            .iter()
            .map(|(speaker, name)| (speaker.clone(), name.clone()))
            .collect();
        bound.sort();
        bound
    }

    pub fn transcript(&self) -> String {
        self.buffer.transcript()
    }

    /// True when no final utterance has been buffered this session.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
