// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Person CRUD operations.

use recall_core::{RecallError, name_key};
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};
use crate::models::PersonRow;

const PERSON_COLUMNS: &str = "name, speaker_id, voice_reference, conversation_history, \
     last_met, last_conversation, last_topics";

fn row_to_person(row: &rusqlite::Row<'_>) -> Result<PersonRow, rusqlite::Error> {
    Ok(PersonRow {
        name: row.get(0)?,
        speaker_id: row.get(1)?,
        voice_reference: row.get(2)?,
        conversation_history: row.get(3)?,
        last_met: row.get(4)?,
        last_conversation: row.get(5)?,
        last_topics: row.get(6)?,
    })
}

/// Insert a person, or replace every mutable column if the name already exists.
///
/// Names collide by [`name_key`]; the originally stored casing is kept.
pub async fn upsert_person(db: &Database, row: PersonRow) -> Result<(), RecallError> {
    let key = name_key(&row.name);
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO people (name_key, name, speaker_id, voice_reference,
                                     conversation_history, last_met, last_conversation, last_topics)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(name_key) DO UPDATE SET
                     speaker_id = excluded.speaker_id,
                     voice_reference = excluded.voice_reference,
                     conversation_history = excluded.conversation_history,
                     last_met = excluded.last_met,
                     last_conversation = excluded.last_conversation,
                     last_topics = excluded.last_topics,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![
                    key,
                    row.name,
                    row.speaker_id,
                    row.voice_reference,
                    row.conversation_history,
                    row.last_met,
                    row.last_conversation,
                    row.last_topics,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Most recently met person last seen under `speaker_id`.
pub async fn get_by_speaker(
    db: &Database,
    speaker_id: &str,
) -> Result<Option<PersonRow>, RecallError> {
    let speaker_id = speaker_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<PersonRow>, rusqlite::Error> {
            conn.query_row(
                &format!(
                    "SELECT {PERSON_COLUMNS} FROM people WHERE speaker_id = ?1
                     ORDER BY last_met DESC, updated_at DESC LIMIT 1"
                ),
                params![speaker_id],
                row_to_person,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Case-insensitive lookup by name.
pub async fn get_by_name(db: &Database, name: &str) -> Result<Option<PersonRow>, RecallError> {
    let key = name_key(name);
    db.connection()
        .call(move |conn| -> Result<Option<PersonRow>, rusqlite::Error> {
            conn.query_row(
                &format!("SELECT {PERSON_COLUMNS} FROM people WHERE name_key = ?1"),
                params![key],
                row_to_person,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// All people ordered by name.
pub async fn list_people(db: &Database) -> Result<Vec<PersonRow>, RecallError> {
    db.connection()
        .call(|conn| -> Result<Vec<PersonRow>, rusqlite::Error> {
            let mut stmt =
                conn.prepare(&format!("SELECT {PERSON_COLUMNS} FROM people ORDER BY name"))?;
            let rows = stmt.query_map([], row_to_person)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a person by name. Returns whether a row was removed.
pub async fn delete_person(db: &Database, name: &str) -> Result<bool, RecallError> {
    let key = name_key(name);
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let affected = conn.execute("DELETE FROM people WHERE name_key = ?1", params![key])?;
            Ok(affected > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Number of stored people.
pub async fn count_people(db: &Database) -> Result<i64, RecallError> {
    db.connection()
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row("SELECT COUNT(*) FROM people", [], |row| row.get(0))
        })
        .await
        .map_err(map_tr_err)
}
