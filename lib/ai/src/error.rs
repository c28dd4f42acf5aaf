//! Error types for the generation boundary.
//!
//! Every variant means the same thing to the resolver: the service is
//! unavailable. The detail exists for diagnostics only and is never shown
//! to the person chatting.

use std::fmt;

/// Errors from generation service calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The request could not be sent or the connection failed.
    RequestFailed { reason: String },
    /// The request timed out.
    Timeout,
    /// The service answered with a non-success status.
    Status { status: u16, message: String },
    /// Rate limit exceeded.
    RateLimited,
    /// The response body did not have the expected shape.
    ResponseParseFailed { reason: String },
    /// The top completion was missing or blank.
    EmptyCompletion,
    /// The client could not be built from its configuration.
    InvalidConfig { reason: String },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestFailed { reason } => {
                write!(f, "generation request failed: {reason}")
            }
            Self::Timeout => write!(f, "generation request timed out"),
            Self::Status { status, message } => {
                write!(f, "generation service returned {status}: {message}")
            }
            Self::RateLimited => write!(f, "generation service rate limited the request"),
            Self::ResponseParseFailed { reason } => {
                write!(f, "failed to parse generation response: {reason}")
            }
            Self::EmptyCompletion => write!(f, "generation response had no content"),
            Self::InvalidConfig { reason } => {
                write!(f, "invalid generation configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for GenerationError {}
