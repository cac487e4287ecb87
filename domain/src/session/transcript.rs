//! Transcript and per-session state store

use super::entities::Message;
use std::collections::VecDeque;

/// Ordered chat transcript, newest message first.
///
/// Backed by a `VecDeque` so that prepending is O(1) amortized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: VecDeque<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a message at the head of the transcript.
    pub fn append_front(&mut self, message: Message) {
        self.messages.push_front(message);
    }

    /// Iterate head-first (most recent message first).
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn first(&self) -> Option<&Message> {
        self.messages.front()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// State of one chat session: the transcript plus the pending input line.
///
/// A session is owned by exactly one front end and handed to every handler
/// by `&mut`, so there is never more than one writer.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    transcript: Transcript,
    prompt_input: String,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn append_front(&mut self, message: Message) {
        self.transcript.append_front(message);
    }

    /// The query text waiting to be submitted
    pub fn current_input(&self) -> &str {
        &self.prompt_input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.prompt_input = text.into();
    }

    /// Reset the pending input after a submission
    pub fn clear_input(&mut self) {
        self.prompt_input.clear();
    }
}
