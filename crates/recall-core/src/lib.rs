// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Recall.
//!
//! This crate provides the error type, the person/conversation domain types,
//! and the traits for every collaborator the conversation manager talks to:
//! the identity store, the name extractor, the summarizer, and the LLM
//! provider those two are built on.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RecallError;
pub use types::{
    AdapterType, Confidence, ConversationEntry, ConversationSummary, ExtractedName,
    HealthStatus, Person, ProcessOutcome, SessionId, Utterance, name_key,
};

pub use traits::{
    ConversationSummarizer, IdentityStore, NameExtractor, PluginAdapter, ProviderAdapter,
};
