// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the IdentityStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use recall_config::model::StorageConfig;
use recall_core::{AdapterType, HealthStatus, IdentityStore, Person, PluginAdapter, RecallError};

use crate::database::Database;
use crate::models::PersonRow;
use crate::queries::people;

/// SQLite-backed identity store.
///
/// The database is opened lazily by [`SqliteIdentityStore::initialize`];
/// every other operation fails with a storage error until then.
pub struct SqliteIdentityStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteIdentityStore {
    /// Create a store for the configured database without opening it.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Create and initialize a store in one step.
    pub async fn open(config: StorageConfig) -> Result<Self, RecallError> {
        let store = Self::new(config);
        store.initialize().await?;
        Ok(store)
    }

    /// Open the database and run migrations. Calling this twice is a no-op.
    pub async fn initialize(&self) -> Result<(), RecallError> {
        self.db
            .get_or_try_init(|| {
                Database::open_with_wal(&self.config.database_path, self.config.wal_mode)
            })
            .await?;
        debug!(path = %self.config.database_path, "identity store initialized");
        Ok(())
    }

    fn db(&self) -> Result<&Database, RecallError> {
        self.db.get().ok_or_else(|| RecallError::Storage {
            source: "identity store not initialized -- call initialize() first".into(),
        })
    }

    /// All stored people, ordered by name.
    pub async fn list_people(&self) -> Result<Vec<Person>, RecallError> {
        people::list_people(self.db()?)
            .await?
            .into_iter()
            .map(PersonRow::into_person)
            .collect()
    }

    /// Removes a person by case-insensitive name. Returns whether one existed.
    pub async fn delete_person(&self, name: &str) -> Result<bool, RecallError> {
        let removed = people::delete_person(self.db()?, name).await?;
        debug!(name, removed, "delete person");
        Ok(removed)
    }

    /// Number of stored people.
    pub async fn count(&self) -> Result<i64, RecallError> {
        people::count_people(self.db()?).await
    }
}

#[async_trait]
impl IdentityStore for SqliteIdentityStore {
    async fn get_person(&self, key: &str) -> Result<Option<Person>, RecallError> {
        let db = self.db()?;
        let row = match people::get_by_speaker(db, key).await? {
            Some(row) => Some(row),
            None => people::get_by_name(db, key).await?,
        };
        row.map(PersonRow::into_person).transpose()
    }

    async fn find_person_by_name(&self, name: &str) -> Result<Option<Person>, RecallError> {
        people::get_by_name(self.db()?, name)
            .await?
            .map(PersonRow::into_person)
            .transpose()
    }

    async fn store_person(&self, person: &Person) -> Result<(), RecallError> {
        let row = PersonRow::from_person(person)?;
        people::upsert_person(self.db()?, row).await?;
        debug!(
            name = %person.name,
            speaker = %person.speaker_id,
            conversations = person.conversation_history.len(),
            "person stored"
        );
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for SqliteIdentityStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, RecallError> {
        let db = self.db().map_err(health_check_failed)?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(health_check_failed)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RecallError> {
        if let Some(db) = self.db.get() {
            db.checkpoint().await?;
        }
        Ok(())
    }
}

fn health_check_failed<E>(e: E) -> RecallError
where
    E: std::error::Error + Send + Sync + 'static,
{
    RecallError::HealthCheckFailed {
        name: "sqlite".to_string(),
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use recall_core::ConversationEntry;
    use tempfile::tempdir;

    fn config_in(dir: &tempfile::TempDir) -> StorageConfig {
        StorageConfig {
            database_path: dir.path().join("people.db").to_string_lossy().into_owned(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn uninitialized_store_returns_storage_error() {
        let dir = tempdir().unwrap();
        let store = SqliteIdentityStore::new(config_in(&dir));
        let err = store.get_person("A").await.unwrap_err();
        assert!(err.to_string().contains("not initialized"));
    }

    #[tokio::test]
    async fn adapter_metadata() {
        let dir = tempdir().unwrap();
        let store = SqliteIdentityStore::new(config_in(&dir));
        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.adapter_type(), AdapterType::Storage);
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
    }

    #[tokio::test]
    async fn health_check_after_initialize() {
        let dir = tempdir().unwrap();
        let store = SqliteIdentityStore::open(config_in(&dir)).await.unwrap();
        store.initialize().await.unwrap();
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
        store.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn health_check_fails_before_initialize() {
        let dir = tempdir().unwrap();
        let store = SqliteIdentityStore::new(config_in(&dir));
        match store.health_check().await {
            Err(RecallError::HealthCheckFailed { name, source }) => {
                assert_eq!(name, "sqlite");
                assert!(source.to_string().contains("not initialized"));
            }
            other => panic!("expected HealthCheckFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_person_matches_speaker_then_name() {
        let dir = tempdir().unwrap();
        let store = SqliteIdentityStore::open(config_in(&dir)).await.unwrap();
        store.store_person(&Person::new("John", "A")).await.unwrap();

        let by_speaker = store.get_person("A").await.unwrap().unwrap();
        assert_eq!(by_speaker.name, "John");
        let by_name = store.get_person("john").await.unwrap().unwrap();
        assert_eq!(by_name.speaker_id, "A");
        assert!(store.get_person("B").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn history_round_trips_through_store() {
        let dir = tempdir().unwrap();
        let store = SqliteIdentityStore::open(config_in(&dir)).await.unwrap();

        let mut person = Person::new("John", "A");
        person.record_conversation(
            "B",
            ConversationEntry {
                date: Utc::now(),
                transcript: "B: Hi".into(),
                topics: vec!["hiking".into()],
                key_points: None,
                duration_secs: Some(90),
            },
            "Talked about hiking",
        );
        store.store_person(&person).await.unwrap();

        let loaded = store.find_person_by_name("JOHN").await.unwrap().unwrap();
        assert_eq!(loaded.speaker_id, "B");
        assert_eq!(loaded.conversation_history.len(), 1);
        assert_eq!(loaded.conversation_history[0].duration_secs, Some(90));
        assert_eq!(loaded.last_topics, vec!["hiking"]);
        assert_eq!(loaded.last_conversation.as_deref(), Some("Talked about hiking"));
    }

    #[tokio::test]
    async fn data_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = SqliteIdentityStore::open(config_in(&dir)).await.unwrap();
            store.store_person(&Person::new("Ada", "C")).await.unwrap();
            store.shutdown().await.unwrap();
        }
        let store = SqliteIdentityStore::open(config_in(&dir)).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.list_people().await.unwrap()[0].name, "Ada");
        assert!(store.delete_person("ADA").await.unwrap());
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
