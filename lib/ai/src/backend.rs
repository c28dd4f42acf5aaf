//! Generation backend abstraction.
//!
//! The resolver only needs a single request/response exchange: an ordered
//! list of role-tagged messages goes in, the text of the top completion
//! comes out.

use crate::error::GenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use softsell_core::Result;

/// The role of a message sender, in the service's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Fixed instruction describing the assistant's persona.
    System,
    /// User/human message.
    User,
    /// Assistant/bot message.
    Assistant,
}

/// A single role-tagged message sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender.
    pub role: ChatRole,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Creates a message with an explicit role.
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// An ordered request for the generation service.
///
/// The first message is always the system instruction; there is no way to
/// build a request without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    messages: Vec<ChatMessage>,
}

impl GenerationRequest {
    /// Starts a request with the given system instruction.
    #[must_use]
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_instruction)],
        }
    }

    /// Appends prior conversation turns.
    #[must_use]
    pub fn with_history(mut self, history: impl IntoIterator<Item = ChatMessage>) -> Self {
        self.messages.extend(history);
        self
    }

    /// Appends a single message.
    #[must_use]
    pub fn push(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Returns the messages in send order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// Fixed generation parameters.
///
/// These come from configuration at start-up; nothing the user types can
/// change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens to generate.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Trait for text generation backends.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Returns the trimmed text of the top completion for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails for any reason: transport,
    /// non-success status, or a response without usable content.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Returns the model name.
    fn model(&self) -> &str;
}
