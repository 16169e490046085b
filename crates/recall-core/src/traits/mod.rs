// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter and collaborator trait definitions.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility, so the
//! conversation manager can hold `Arc<dyn ...>` collaborators.

pub mod adapter;
pub mod collaborator;
pub mod provider;
pub mod store;

pub use adapter::PluginAdapter;
pub use collaborator::{ConversationSummarizer, NameExtractor};
pub use provider::ProviderAdapter;
pub use store::IdentityStore;
