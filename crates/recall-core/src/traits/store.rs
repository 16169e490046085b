// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity store contract used by the conversation manager.

use async_trait::async_trait;

use crate::error::RecallError;
use crate::types::Person;

/// Durable repository of [`Person`] records.
///
/// `Ok(None)` means "not found" and is never an error. Implementations may be
/// shared across concurrently active sessions and are responsible for the
/// atomicity of conflicting writes to the same name.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Looks up a person by key.
    ///
    /// The key is matched against the last-known speaker label first and
    /// then, case-insensitively, against the person's name.
    async fn get_person(&self, key: &str) -> Result<Option<Person>, RecallError>;

    /// Looks up a person by exact, case-insensitive name.
    async fn find_person_by_name(&self, name: &str) -> Result<Option<Person>, RecallError>;

    /// Inserts or replaces the person keyed by `person.name`.
    async fn store_person(&self, person: &Person) -> Result<(), RecallError>;
}
