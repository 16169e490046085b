// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite identity store for Recall.
//!
//! Persists [`recall_core::Person`] records with their conversation history
//! as JSON columns. All access goes through a single `tokio-rusqlite`
//! connection; schema changes are refinery migrations embedded at build time.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

pub use database::Database;
pub use store::SqliteIdentityStore;
