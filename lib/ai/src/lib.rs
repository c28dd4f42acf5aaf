//! Generation service boundary for the SoftSell chat widget.
//!
//! This crate provides:
//!
//! - **Backend**: role-tagged chat messages, requests and the
//!   [`GenerationService`] trait the resolver calls through
//! - **Credential**: the single API secret and its placeholder check
//! - **OpenAI client**: an HTTP implementation of [`GenerationService`]
//!   against the chat-completions endpoint

pub mod backend;
pub mod credential;
pub mod error;
pub mod openai;

pub use backend::{
    ChatMessage, ChatRole, GenerationRequest, GenerationService, GenerationSettings,
};
pub use credential::ApiCredential;
pub use error::GenerationError;
pub use openai::OpenAiClient;
