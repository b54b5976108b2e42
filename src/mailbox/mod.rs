//! Per-cycle message batches.
//!
//! A [`Mailbox`] holds the messages of exactly one cycle in one direction:
//! the inbound snapshot the physical units delivered, or the outbound list
//! the controller emitted.  Order is preserved.  Nothing is kept across
//! cycles; the external transport fills and drains mailboxes.

pub mod classify;
pub mod message;

use serde::{Deserialize, Serialize};

use crate::app::ports::MessageSink;
pub use message::{Message, MessageKind, ModeAnnouncement};

/// Ordered batch of messages for one cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mailbox {
    messages: Vec<Message>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the end of the batch.
    pub fn send(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    /// Message at position `index`, if any.
    pub fn read(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Borrow the batch as a slice.
    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    /// Remove and return every message, leaving the mailbox empty for the
    /// next cycle.
    pub fn drain(&mut self) -> Vec<Message> {
        core::mem::take(&mut self.messages)
    }

    /// True if any message in the batch equals `msg`.
    pub fn contains(&self, msg: &Message) -> bool {
        self.messages.contains(msg)
    }
}

impl MessageSink for Mailbox {
    fn send(&mut self, msg: Message) {
        Mailbox::send(self, msg);
    }
}

impl FromIterator<Message> for Mailbox {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Message>> for Mailbox {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl<'a> IntoIterator for &'a Mailbox {
    type Item = &'a Message;
    type IntoIter = core::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
