//! Message types for the chat widget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use softsell_ai::{ChatMessage, ChatRole};
use softsell_core::MessageId;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person using the widget.
    User,
    /// The widget's assistant.
    Bot,
}

impl Sender {
    /// Maps the sender onto the generation service's role vocabulary.
    #[must_use]
    pub fn chat_role(self) -> ChatRole {
        match self {
            Self::User => ChatRole::User,
            Self::Bot => ChatRole::Assistant,
        }
    }
}

/// A message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Position of the message within its conversation.
    pub id: MessageId,
    /// Literal content as typed or generated.
    pub text: String,
    /// Who wrote it.
    pub sender: Sender,
    /// When the message was appended.
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub(crate) fn new(id: MessageId, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            created_at: Utc::now(),
        }
    }

    /// Converts the message into a generation service history entry.
    #[must_use]
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage::new(self.sender.chat_role(), self.text.clone())
    }
}
