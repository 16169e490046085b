// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory identity store that records every call.
//!
//! Lookup semantics match the SQLite store: `get_person` prefers the most
//! recently met person last seen under the speaker label, then falls back to
//! a case-insensitive name match.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use recall_core::{IdentityStore, Person, RecallError};

/// One recorded call against [`MockIdentityStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    GetPerson(String),
    FindPersonByName(String),
    StorePerson(Person),
}

#[derive(Default)]
struct Inner {
    people: Vec<Person>,
    calls: Vec<StoreCall>,
}

/// An [`IdentityStore`] backed by a `Vec<Person>`.
#[derive(Clone, Default)]
pub struct MockIdentityStore {
    inner: Arc<Mutex<Inner>>,
    failing: Arc<AtomicBool>,
}

impl MockIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `people`. Seeding is not recorded as calls.
    pub fn with_people(people: Vec<Person>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                people,
                calls: Vec::new(),
            })),
            failing: Arc::default(),
        }
    }

    /// When set, every trait call is recorded and then fails with a storage error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of the stored people.
    pub async fn people(&self) -> Vec<Person> {
        self.inner.lock().await.people.clone()
    }

    /// Case-insensitive lookup that is not recorded as a call.
    pub async fn person(&self, name: &str) -> Option<Person> {
        self.inner
            .lock()
            .await
            .people
            .iter()
            .find(|p| p.is_named(name))
            .cloned()
    }

    /// Every call received so far, oldest first.
    pub async fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().await.calls.clone()
    }

    /// Only the `store_person` calls.
    pub async fn writes(&self) -> Vec<Person> {
        self.inner
            .lock()
            .await
            .calls
            .iter()
            .filter_map(|call| match call {
                StoreCall::StorePerson(person) => Some(person.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn clear_calls(&self) {
        self.inner.lock().await.calls.clear();
    }

    fn check_failing(&self) -> Result<(), RecallError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RecallError::Storage {
                source: "mock identity store failure".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for MockIdentityStore {
    async fn get_person(&self, key: &str) -> Result<Option<Person>, RecallError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push(StoreCall::GetPerson(key.to_string()));
        self.check_failing()?;

        let by_speaker = inner
            .people
            .iter()
            .filter(|p| p.speaker_id == key)
            .max_by_key(|p| p.last_met);
        Ok(by_speaker
            .or_else(|| inner.people.iter().find(|p| p.is_named(key)))
            .cloned())
    }

    async fn find_person_by_name(&self, name: &str) -> Result<Option<Person>, RecallError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push(StoreCall::FindPersonByName(name.to_string()));
        self.check_failing()?;

        Ok(inner.people.iter().find(|p| p.is_named(name)).cloned())
    }

    async fn store_person(&self, person: &Person) -> Result<(), RecallError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push(StoreCall::StorePerson(person.clone()));
        self.check_failing()?;

        match inner.people.iter_mut().find(|p| p.is_named(&person.name)) {
            Some(existing) => {
                let name = std::mem::take(&mut existing.name);
                *existing = person.clone();
                existing.name = name;
            }
            None => inner.people.push(person.clone()),
        }
        Ok(())
    }
}
