// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation buffering and speaker identity binding for Recall.
//!
//! The [`ConversationManager`] turns a diarized transcript stream into
//! durable person records: it remembers who introduced themselves and what
//! was discussed, so a returning speaker can be greeted with context.

pub mod buffer;
pub mod context;
pub mod manager;

pub use buffer::UtteranceBuffer;
pub use context::{UNKNOWN_SPEAKER, format_speaker_context};
pub use manager::ConversationManager;
