//! Domain error types for widget API operations.
//!
//! Each error knows its HTTP status and a user-safe message; internal detail
//! stays in the logs.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Widget-related errors.
#[derive(Debug)]
pub enum WidgetError {
    /// The widget id could not be parsed.
    InvalidId { id: String, reason: String },
    /// No open widget has this id.
    NotFound { id: String },
    /// The widget is still answering the previous message.
    Busy { id: String },
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { id, reason } => write!(f, "invalid widget id '{}': {}", id, reason),
            Self::NotFound { id } => write!(f, "widget '{}' not found", id),
            Self::Busy { id } => write!(f, "widget '{}' is still answering", id),
        }
    }
}

impl std::error::Error for WidgetError {}

impl WidgetError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Busy { .. } => StatusCode::CONFLICT,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "Invalid widget ID",
            Self::NotFound { .. } => "Widget not found",
            Self::Busy { .. } => "Still answering the previous message",
        }
    }
}

impl IntoResponse for WidgetError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.public_message() });
        (self.status(), Json(body)).into_response()
    }
}
