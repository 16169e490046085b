// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded FIFO of the most recent final utterances.

use std::collections::VecDeque;

use recall_core::Utterance;

/// Rolling utterance window. Pushing past capacity evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct UtteranceBuffer {
    entries: VecDeque<Utterance>,
    capacity: usize,
}

impl UtteranceBuffer {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an utterance, returning the evicted one if the window was full.
    pub fn push(&mut self, utterance: Utterance) -> Option<Utterance> {
        self.entries.push_back(utterance);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// Utterance texts, oldest first, joined with newlines.
    pub fn transcript(&self) -> String {
        self.entries
            .iter()
            .map(|u| u.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Utterance> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
