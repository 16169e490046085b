// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Greeting context shown for a recognized speaker.

use recall_core::Person;

/// Returned for a speaker with no binding and no stored record.
pub const UNKNOWN_SPEAKER: &str = "Unknown speaker";

/// Formats `name`, then `Last:` and `Topics:` lines when present.
pub fn format_speaker_context(person: &Person) -> String {
    let mut context = person.name.clone();

    if let Some(last) = person
        .last_conversation
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        context.push_str("\nLast: ");
        context.push_str(last);
    }

    if !person.last_topics.is_empty() {
        context.push_str("\nTopics: ");
        context.push_str(&person.last_topics.join(", "));
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_only() {
        assert_eq!(format_speaker_context(&Person::new("John", "A")), "John");
    }

    #[test]
    fn full_context() {
        let mut person = Person::new("John", "A");
        person.last_conversation = Some("Talked about hiking".into());
        person.last_topics = vec!["hiking".into(), "Yosemite".into()];
        assert_eq!(
            format_speaker_context(&person),
            "John\nLast: Talked about hiking\nTopics: hiking, Yosemite"
        );
    }

    #[test]
    fn topics_without_summary() {
        let mut person = Person::new("John", "A");
        person.last_conversation = Some("  ".into());
        person.last_topics = vec!["coffee".into()];
        assert_eq!(format_speaker_context(&person), "John\nTopics: coffee");
    }
}
