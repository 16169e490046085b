// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Recall integration tests.
//!
//! Provides in-memory collaborators so the conversation manager can be
//! exercised deterministically without a database or network.
//!
//! # Components
//!
//! - [`MockProvider`] - LLM provider with queued replies
//! - [`MockIdentityStore`] - In-memory identity store that records every call
//! - [`ScriptedExtractor`] / [`ScriptedSummarizer`] - Collaborators with queued results

pub mod mock_provider;
pub mod mock_store;
pub mod scripted;

pub use mock_provider::MockProvider;
pub use mock_store::{MockIdentityStore, StoreCall};
pub use scripted::{ScriptedExtractor, ScriptedSummarizer};
