//! Error types for the conversation crate.
//!
//! Both variants are rejections: the widget's state is left exactly as it
//! was. Generation failures never appear here; the resolver absorbs them.

use std::fmt;

/// Reasons a submission is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationError {
    /// The utterance was empty or whitespace only.
    EmptyInput,
    /// A reply to the previous utterance is still being resolved.
    Busy,
}

impl fmt::Display for ConversationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "utterance is empty"),
            Self::Busy => write!(f, "a reply is already being resolved"),
        }
    }
}

impl std::error::Error for ConversationError {}
