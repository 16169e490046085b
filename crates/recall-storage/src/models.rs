// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row shapes for the `people` table and their conversion to domain types.

use chrono::{DateTime, SecondsFormat, Utc};
use recall_core::{ConversationEntry, Person, RecallError};

/// A `people` row as stored, with JSON columns still encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRow {
    pub name: String,
    pub speaker_id: String,
    pub voice_reference: Option<Vec<u8>>,
    pub conversation_history: String,
    pub last_met: Option<String>,
    pub last_conversation: Option<String>,
    pub last_topics: String,
}

/// Formats a timestamp the way every column in this crate stores it.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RecallError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(RecallError::storage)
}

impl PersonRow {
    /// Encodes a person for storage.
    pub fn from_person(person: &Person) -> Result<Self, RecallError> {
        Ok(Self {
            name: person.name.clone(),
            speaker_id: person.speaker_id.clone(),
            voice_reference: person.voice_reference.clone(),
            conversation_history: serde_json::to_string(&person.conversation_history)
                .map_err(RecallError::storage)?,
            last_met: person.last_met.as_ref().map(format_timestamp),
            last_conversation: person.last_conversation.clone(),
            last_topics: serde_json::to_string(&person.last_topics)
                .map_err(RecallError::storage)?,
        })
    }

    /// Decodes the JSON columns into a [`Person`].
    pub fn into_person(self) -> Result<Person, RecallError> {
        let conversation_history: Vec<ConversationEntry> =
            serde_json::from_str(&self.conversation_history).map_err(RecallError::storage)?;
        let last_topics: Vec<String> =
            serde_json::from_str(&self.last_topics).map_err(RecallError::storage)?;
        let last_met = self.last_met.as_deref().map(parse_timestamp).transpose()?;

        Ok(Person {
            name: self.name,
            speaker_id: self.speaker_id,
            voice_reference: self.voice_reference,
            conversation_history,
            last_met,
            last_conversation: self.last_conversation,
            last_topics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_use_millisecond_utc_format() {
        let ts = DateTime::parse_from_rfc3339("2026-03-01T10:15:30.123456Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(&ts), "2026-03-01T10:15:30.123Z");
    }

    #[test]
    fn person_survives_row_encoding() {
        let mut person = Person::new("Ada", "B");
        person.voice_reference = Some(vec![7, 7]);
        person.record_conversation(
            "B",
            ConversationEntry {
                date: Utc::now(),
                transcript: "B: I'm Ada".into(),
                topics: vec!["engines".into()],
                key_points: Some(vec!["likes engines".into()]),
                duration_secs: Some(12),
            },
            "Talked about engines",
        );

        let row = PersonRow::from_person(&person).unwrap();
        assert!(row.conversation_history.contains("engines"));
        let decoded = row.into_person().unwrap();
        assert_eq!(decoded.name, "Ada");
        assert_eq!(decoded.voice_reference, Some(vec![7, 7]));
        assert_eq!(decoded.conversation_history.len(), 1);
        assert_eq!(decoded.last_topics, vec!["engines"]);
        assert_eq!(decoded.last_conversation.as_deref(), Some("Talked about engines"));
    }

    #[test]
    fn corrupt_history_is_a_storage_error() {
        let row = PersonRow {
            name: "Ada".into(),
            speaker_id: "B".into(),
            voice_reference: None,
            conversation_history: "not json".into(),
            last_met: None,
            last_conversation: None,
            last_topics: "[]".into(),
        };
        assert!(matches!(row.into_person(), Err(RecallError::Storage { .. })));
    }
}
