//! The append-only message log.

use crate::message::{Message, Sender};
use serde::Serialize;
use softsell_core::MessageId;

/// An ordered, append-only sequence of messages.
///
/// Always starts with exactly one bot greeting whose id is
/// [`MessageId::FIRST`].
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    messages: Vec<Message>,
    #[serde(skip)]
    next_id: MessageId,
}

impl Conversation {
    /// Creates a conversation seeded with the bot's greeting.
    #[must_use]
    pub fn seeded(greeting: impl Into<String>) -> Self {
        let first = Message::new(MessageId::FIRST, Sender::Bot, greeting);
        Self {
            messages: vec![first],
            next_id: MessageId::FIRST.next(),
        }
    }

    pub(crate) fn append(&mut self, sender: Sender, text: impl Into<String>) -> &Message {
        let id = self.next_id;
        self.next_id = id.next();
        self.messages.push(Message::new(id, sender, text));
        &self.messages[self.messages.len() - 1]
    }

    /// Returns every message in chronological order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
