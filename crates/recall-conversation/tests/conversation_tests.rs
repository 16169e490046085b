// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the conversation manager against in-memory collaborators.

use std::sync::Arc;

use proptest::prelude::*;
use recall_config::model::SessionConfig;
use recall_conversation::{ConversationManager, UNKNOWN_SPEAKER};
use recall_core::{Confidence, ConversationSummary, ExtractedName, Person, ProcessOutcome};
use recall_test_utils::{MockIdentityStore, ScriptedExtractor, ScriptedSummarizer, StoreCall};

struct Session {
    manager: ConversationManager,
    store: MockIdentityStore,
    extractor: ScriptedExtractor,
    summarizer: ScriptedSummarizer,
}

fn session_with(store: MockIdentityStore) -> Session {
    let extractor = ScriptedExtractor::new();
    let summarizer = ScriptedSummarizer::new();
    let manager = ConversationManager::new(
        Arc::new(store.clone()),
        Arc::new(extractor.clone()),
        Arc::new(summarizer.clone()),
        &SessionConfig::default(),
    );
    Session {
        manager,
        store,
        extractor,
        summarizer,
    }
}

fn session() -> Session {
    session_with(MockIdentityStore::new())
}

/// Person last seen under a different session's label.
fn stored(name: &str) -> Person {
    Person::new(name, "Q")
}

async fn chat(manager: &mut ConversationManager, speaker: &str, count: usize) {
    for i in 0..count {
        manager
            .process_transcription(speaker, &format!("small talk {i}"), true)
            .await;
    }
}

fn james() -> Vec<ExtractedName> {
    vec![ExtractedName::new("James", Confidence::High)]
}

proptest! {
    #[test]
    fn buffer_never_exceeds_capacity(n in 0usize..60) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let mut s = session();
            for i in 1..=n {
                s.manager.process_transcription("A", &format!("line {i}"), true).await;
            }
            prop_assert!(s.manager.buffer().len() <= 20);
            prop_assert_eq!(s.manager.buffer().len(), n.min(20));
            if n > 20 {
                let oldest = s.manager.buffer().iter().next().unwrap();
                prop_assert_eq!(&oldest.text, &format!("A: line {}", n - 19));
            }
            Ok(())
        })?;
    }
}

#[tokio::test]
async fn non_final_events_are_ignored() {
    let mut s = session();
    for _ in 0..25 {
        let outcome = s.manager.process_transcription("A", "partial", false).await;
        assert_eq!(outcome, ProcessOutcome::TranscriptionProcessed);
    }

    assert_eq!(s.manager.utterance_count(), 0);
    assert!(s.manager.is_empty());
    assert!(s.manager.active_speakers().is_empty());
    assert_eq!(s.extractor.call_count().await, 0);
    assert!(s.store.calls().await.is_empty());
}

#[tokio::test]
async fn extraction_fires_every_tenth_final_utterance() {
    let mut s = session();
    for i in 1..=30u64 {
        s.manager.process_transcription("A", "hello", true).await;
        // Interim events between finals must not shift the cadence.
        s.manager.process_transcription("A", "hel", false).await;
        assert_eq!(s.extractor.call_count().await as u64, i / 10, "after {i}");
    }
    assert_eq!(s.manager.utterance_count(), 30);
}

#[tokio::test]
async fn extraction_sees_chronological_transcript() {
    let mut s = session();
    s.manager.process_transcription("A", "first", true).await;
    s.manager.process_transcription("B", "second", true).await;
    chat(&mut s.manager, "A", 8).await;

    let transcripts = s.extractor.transcripts().await;
    let lines: Vec<&str> = transcripts[0].lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "A: first");
    assert_eq!(lines[1], "B: second");
}

#[tokio::test]
async fn new_person_is_created_and_bound() {
    let mut s = session();
    s.extractor
        .push_names(vec![ExtractedName::new("John", Confidence::High)])
        .await;
    chat(&mut s.manager, "A", 10).await;

    assert_eq!(s.manager.get_speaker_name("A"), Some("John"));
    let writes = s.store.writes().await;
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].name, "John");
    assert_eq!(writes[0].speaker_id, "A");
    assert!(writes[0].conversation_history.is_empty());
    assert!(writes[0].last_met.is_some());
}

#[tokio::test]
async fn returning_person_is_bound_without_creating() {
    let mut s = session_with(MockIdentityStore::with_people(vec![stored("John")]));
    s.extractor
        .push_names(vec![ExtractedName::new("john", Confidence::High)])
        .await;
    chat(&mut s.manager, "A", 10).await;

    assert_eq!(s.manager.get_speaker_name("A"), Some("John"));
    assert!(s.store.writes().await.is_empty());
    assert!(
        s.store
            .calls()
            .await
            .contains(&StoreCall::FindPersonByName("john".into()))
    );
}

#[tokio::test]
async fn names_go_to_most_recently_added_speaker() {
    let mut s = session();
    s.extractor.push_names(james()).await;
    s.manager.process_transcription("A", "Hi, I'm James", true).await;
    s.manager.process_transcription("B", "Nice to meet you", true).await;
    // A speaks last, but B was added to the active set last.
    chat(&mut s.manager, "A", 8).await;

    assert_eq!(s.manager.last_active_speaker(), Some("B"));
    assert_eq!(s.manager.get_speaker_name("B"), Some("James"));
    assert_eq!(s.manager.get_speaker_name("A"), None);
}

#[tokio::test]
async fn stored_speaker_is_recognized() {
    let mut s = session_with(MockIdentityStore::with_people(vec![Person::new("John", "A")]));

    let outcome = s.manager.process_transcription("A", "Hey again", true).await;
    match &outcome {
        ProcessOutcome::SpeakerRecognized { speaker, person } => {
            assert_eq!(speaker, "A");
            assert_eq!(person.name, "John");
        }
        other => panic!("expected recognition, got {other:?}"),
    }
    assert_eq!(outcome.action(), "speaker_recognized");

    // Already bound: no further recognition or lookups for A.
    s.store.clear_calls().await;
    let outcome = s.manager.process_transcription("A", "Still me", true).await;
    assert_eq!(outcome, ProcessOutcome::TranscriptionProcessed);
    assert!(s.store.calls().await.is_empty());
}

#[tokio::test]
async fn recognized_speaker_keeps_identity_through_extraction() {
    let mut s = session_with(MockIdentityStore::with_people(vec![Person::new("John", "A")]));
    s.extractor
        .push_names(vec![ExtractedName::new("Mike", Confidence::High)])
        .await;
    chat(&mut s.manager, "A", 10).await;

    assert_eq!(s.manager.get_speaker_name("A"), Some("John"));
    assert!(s.store.person("Mike").await.is_none());
}

#[tokio::test]
async fn end_on_empty_buffer_is_a_no_op() {
    let mut s = session();
    s.manager.process_transcription("A", "interim", false).await;

    assert!(s.manager.end_conversation().await.is_none());
    assert!(s.store.calls().await.is_empty());
    assert_eq!(s.summarizer.call_count().await, 0);
}

#[tokio::test]
async fn end_resets_session_state() {
    let mut s = session();
    s.extractor.push_names(james()).await;
    chat(&mut s.manager, "A", 12).await;
    assert!(s.manager.get_speaker_name("A").is_some());

    s.manager.end_conversation().await;

    assert!(s.manager.is_empty());
    assert_eq!(s.manager.utterance_count(), 0);
    assert!(s.manager.active_speakers().is_empty());
    assert!(s.manager.bound_speakers().is_empty());
    assert_eq!(s.manager.get_speaker_name("A"), None);

    // The next session starts its cadence from zero.
    chat(&mut s.manager, "B", 9).await;
    assert_eq!(s.extractor.call_count().await, 1);
    chat(&mut s.manager, "B", 1).await;
    assert_eq!(s.extractor.call_count().await, 2);
}

#[tokio::test]
async fn end_appends_history_for_each_bound_person() {
    let mut s = session_with(MockIdentityStore::with_people(vec![
        Person::new("John", "A"),
        stored("Ada"),
    ]));
    s.extractor
        .push_names(vec![ExtractedName::new("Ada", Confidence::High)])
        .await;
    s.summarizer
        .push_summary(ConversationSummary {
            main_topics: vec!["hiking".into()],
            key_points: vec!["Trip in May".into()],
            summary: "Planned a hike".into(),
        })
        .await;

    s.manager.process_transcription("A", "Hey", true).await;
    s.manager.process_transcription("B", "I'm Ada", true).await;
    chat(&mut s.manager, "A", 8).await;
    assert_eq!(
        s.manager.bound_speakers(),
        vec![
            ("A".to_string(), "John".to_string()),
            ("B".to_string(), "Ada".to_string())
        ]
    );

    let summary = s.manager.end_conversation().await.unwrap();
    assert_eq!(summary.summary, "Planned a hike");

    let john = s.store.person("John").await.unwrap();
    assert_eq!(john.conversation_history.len(), 1);
    assert_eq!(john.last_conversation.as_deref(), Some("Planned a hike"));
    assert_eq!(john.last_topics, vec!["hiking"]);

    let ada = s.store.person("Ada").await.unwrap();
    assert_eq!(ada.speaker_id, "B");
    let entry = ada.latest_conversation().unwrap();
    assert!(entry.transcript.starts_with("A: Hey\nB: I'm Ada"));
    assert_eq!(entry.key_points.as_deref(), Some(&["Trip in May".to_string()][..]));
    assert!(entry.duration_secs.is_some());
}

#[tokio::test]
async fn history_accumulates_across_sessions() {
    let mut s = session_with(MockIdentityStore::with_people(vec![Person::new("John", "A")]));
    for topic in ["coffee", "rust"] {
        s.summarizer
            .push_summary(ConversationSummary {
                main_topics: vec![topic.into()],
                key_points: Vec::new(),
                summary: format!("Talked about {topic}"),
            })
            .await;
        chat(&mut s.manager, "A", 3).await;
        s.manager.end_conversation().await;
    }

    let john = s.store.person("John").await.unwrap();
    assert_eq!(john.conversation_history.len(), 2);
    assert_eq!(john.conversation_history[0].topics, vec!["coffee"]);
    assert_eq!(john.last_topics, vec!["rust"]);
    assert_eq!(john.conversation_history[1].key_points, None);
}

#[tokio::test]
async fn collaborator_failures_are_swallowed() {
    let mut s = session();
    s.extractor.push_error("model offline").await;
    s.summarizer.push_error("model offline").await;

    chat(&mut s.manager, "A", 10).await;
    assert_eq!(s.manager.get_speaker_name("A"), None);

    s.store.set_failing(true);
    let outcome = s.manager.process_transcription("A", "still here", true).await;
    assert_eq!(outcome, ProcessOutcome::TranscriptionProcessed);
    assert_eq!(s.manager.get_speaker_context("A").await, UNKNOWN_SPEAKER);

    let summary = s.manager.end_conversation().await.unwrap();
    assert_eq!(summary, ConversationSummary::default());
    assert!(s.manager.is_empty());
}

#[tokio::test]
async fn store_failure_at_end_still_resets() {
    let mut s = session();
    s.extractor.push_names(james()).await;
    chat(&mut s.manager, "A", 10).await;
    assert_eq!(s.manager.get_speaker_name("A"), Some("James"));

    s.store.set_failing(true);
    assert!(s.manager.end_conversation().await.is_some());
    assert!(s.manager.is_empty());
    assert!(s.manager.bound_speakers().is_empty());
}

#[tokio::test]
async fn unknown_speaker_context() {
    let mut s = session();
    assert_eq!(s.manager.get_speaker_context("Z").await, "Unknown speaker");
    assert_eq!(s.manager.get_speaker_name("Z"), None);
}

#[tokio::test]
async fn speaker_context_formats_stored_record() {
    let mut john = Person::new("John", "A");
    john.last_conversation = Some("Talked about hiking".into());
    john.last_topics = vec!["hiking".into(), "Yosemite".into()];
    let mut s = session_with(MockIdentityStore::with_people(vec![john]));

    let context = s.manager.get_speaker_context("A").await;
    assert_eq!(
        context,
        "John\nLast: Talked about hiking\nTopics: hiking, Yosemite"
    );
    // Lookup bound the speaker.
    assert_eq!(s.manager.get_speaker_name("A"), Some("John"));
    assert_eq!(s.manager.get_speaker_context("A").await, context);
}

#[tokio::test]
async fn bound_context_falls_back_to_name() {
    let mut s = session();
    s.extractor.push_names(james()).await;
    chat(&mut s.manager, "A", 10).await;

    s.store.set_failing(true);
    assert_eq!(s.manager.get_speaker_context("A").await, "James");
}

#[tokio::test]
async fn introduction_on_third_utterance_binds_at_tenth() {
    let mut s = session();
    s.extractor.push_names(james()).await;

    for i in 1..=10 {
        let text = if i == 3 {
            "Hi, I'm James".to_string()
        } else {
            format!("generic chat {i}")
        };
        s.manager.process_transcription("A", &text, true).await;
    }

    let transcripts = s.extractor.transcripts().await;
    assert_eq!(transcripts.len(), 1);
    assert!(transcripts[0].contains("A: Hi, I'm James"));

    let writes = s.store.writes().await;
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].name, "James");
    assert_eq!(s.manager.get_speaker_name("A"), Some("James"));
}
