// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `recall person` and `recall forget` command implementations.

use recall_config::RecallConfig;
use recall_core::{IdentityStore, Person, PluginAdapter, RecallError};
use recall_storage::SqliteIdentityStore;

/// Run the `recall person` command.
pub async fn run_person(config: &RecallConfig, name: &str) -> Result<(), RecallError> {
    let store = SqliteIdentityStore::open(config.storage.clone()).await?;
    match store.find_person_by_name(name).await? {
        Some(person) => print!("{}", format_person(&person)),
        None => println!("No one named {name} is remembered."),
    }
    store.shutdown().await
}

/// Run the `recall forget` command.
pub async fn run_forget(config: &RecallConfig, name: &str) -> Result<(), RecallError> {
    let store = SqliteIdentityStore::open(config.storage.clone()).await?;
    if store.delete_person(name).await? {
        println!("Forgot {name}.");
    } else {
        println!("No one named {name} is remembered.");
    }
    store.shutdown().await
}

fn format_person(person: &Person) -> String {
    let mut out = format!("{} (last seen as speaker {})\n", person.name, person.speaker_id);
    if let Some(last_met) = person.last_met {
        out.push_str(&format!("Last met: {}\n", last_met.format("%Y-%m-%d %H:%M UTC")));
    }
    if person.voice_reference.is_some() {
        out.push_str("Voice sample on file\n");
    }

    if person.conversation_history.is_empty() {
        out.push_str("No conversations yet.\n");
        return out;
    }

    out.push_str(&format!(
        "Conversations: {}\n",
        person.conversation_history.len()
    ));
    for entry in person.conversation_history.iter().rev() {
        let minutes = entry.duration_secs.map(|s| s.div_ceil(60)).unwrap_or(0);
        out.push_str(&format!(
            "  {} ({minutes} min): {}\n",
            entry.date.format("%Y-%m-%d"),
            if entry.topics.is_empty() {
                "no topics".to_string()
            } else {
                entry.topics.join(", ")
            }
        ));
        for point in entry.key_points.iter().flatten() {
            out.push_str(&format!("    - {point}\n"));
        }
    }
    out
}
