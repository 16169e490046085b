// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates. `{conversation}` is replaced with the buffered transcript.

pub const NAME_EXTRACTION_PROMPT: &str = r#"Find every person in this conversation who introduces THEMSELVES by name. Output as JSON array.

Count only first-person self-introductions such as:
- "I'm Sarah"
- "My name is David"
- "Call me Alex"

Do NOT include people who are only mentioned by someone else ("you should meet Tom", "James said...").

For each self-introduction:
- "name": The name exactly as the speaker gave it
- "confidence": "high" for an explicit introduction, "medium" if it is likely, "low" if unsure

If nobody introduces themselves, return an empty array: []

Conversation:
{conversation}

Output JSON array only, no explanation:"#;

pub const SUMMARY_PROMPT: &str = r#"Summarize this conversation so it can be recalled the next time these people meet. Output as a JSON object with these fields:
- "mainTopics": Up to 5 short topic labels
- "keyPoints": Specific facts worth remembering (plans, preferences, news)
- "summary": One or two sentences describing the conversation

Conversation:
{conversation}

Output JSON object only, no explanation:"#;

/// Substitutes the transcript into a template.
pub fn render(template: &str, transcript: &str) -> String {
    template.replace("{conversation}", transcript)
}
