//! Conversation resolver for the SoftSell chat widget.
//!
//! This crate provides:
//!
//! - **Conversation**: the append-only message log, seeded with a greeting
//! - **Knowledge tables**: the domain FAQ, small talk and the offline fallback
//! - **Resolver**: picks one reply per utterance, calling the generation
//!   service only when nothing local matches
//! - **Widget**: owns one conversation and its typing indicator

pub mod conversation;
pub mod error;
pub mod knowledge;
pub mod message;
pub mod persona;
pub mod resolver;
pub mod widget;

pub use conversation::Conversation;
pub use error::ConversationError;
pub use knowledge::{KnowledgeEntry, KnowledgeTable, SmallTalk};
pub use message::{Message, Sender};
pub use persona::Persona;
pub use resolver::{ReplyPacing, Resolution, Resolver, ResponseSource};
pub use widget::{ChatWidget, PendingReply};
