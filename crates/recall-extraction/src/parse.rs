// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tolerant parsing of model output.
//!
//! Models wrap JSON in code fences or prose often enough that strict parsing
//! is useless. Anything that still fails to parse normalizes to the empty
//! result.

use std::str::FromStr;

use recall_core::{Confidence, ConversationSummary, ExtractedName, name_key};
use serde_json::Value;
use tracing::{debug, warn};

/// The span from the first `open` to the last `close`, or the trimmed input.
fn json_span(response: &str, open: char, close: char) -> &str {
    let trimmed = response.trim();
    match (trimmed.find(open), trimmed.rfind(close)) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Parses a name extraction reply into candidates.
///
/// Entries may be objects (`{"name", "confidence"}`) or bare strings.
/// Blank names are dropped, unknown confidences become `low`, and repeated
/// names keep their first occurrence.
pub fn parse_names_response(response: &str) -> Vec<ExtractedName> {
    let entries = match serde_json::from_str::<Vec<Value>>(json_span(response, '[', ']')) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to parse name extraction response: {e}");
            debug!("Raw response: {response}");
            return Vec::new();
        }
    };

    let mut names: Vec<ExtractedName> = Vec::new();
    for entry in entries {
        let (name, confidence) = match &entry {
            Value::String(name) => (name.as_str(), None),
            Value::Object(fields) => (
                fields.get("name").and_then(Value::as_str).unwrap_or_default(),
                fields.get("confidence").and_then(Value::as_str),
            ),
            _ => continue,
        };

        let name = name.trim();
        if name.is_empty() || names.iter().any(|n| name_key(&n.name) == name_key(name)) {
            continue;
        }
        let confidence = confidence
            .and_then(|c| Confidence::from_str(c.trim()).ok())
            .unwrap_or(Confidence::Low);
        names.push(ExtractedName::new(name, confidence));
    }
    names
}

/// Parses a summarization reply. Malformed input yields the zero value.
pub fn parse_summary_response(response: &str) -> ConversationSummary {
    match serde_json::from_str::<ConversationSummary>(json_span(response, '{', '}')) {
        Ok(mut summary) => {
            summary.main_topics.retain(|t| !t.trim().is_empty());
            summary.key_points.retain(|p| !p.trim().is_empty());
            summary.summary = summary.summary.trim().to_string();
            summary
        }
        Err(e) => {
            warn!("Failed to parse summary response: {e}");
            debug!("Raw response: {response}");
            ConversationSummary::default()
        }
    }
}
