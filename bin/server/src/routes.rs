//! HTTP handlers for the widget API.

use crate::error::WidgetError;
use crate::state::{AppState, SubmitOutcome};
use crate::types::{SubmitMessage, WidgetView};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use softsell_core::WidgetId;
use std::sync::Arc;

fn parse_id(raw: &str) -> Result<WidgetId, WidgetError> {
    raw.parse().map_err(|e: softsell_core::ParseIdError| {
        tracing::debug!(id = %raw, error = %e, "Rejected widget id");
        WidgetError::InvalidId {
            id: raw.to_string(),
            reason: e.reason,
        }
    })
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

/// `POST /api/widgets`
pub async fn open_widget(State(state): State<Arc<AppState>>) -> (StatusCode, Json<WidgetView>) {
    (StatusCode::CREATED, Json(state.open_widget().await))
}

/// `GET /api/widgets/{id}`
pub async fn get_widget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WidgetView>, WidgetError> {
    let id = parse_id(&id)?;
    Ok(Json(state.view(id).await?))
}

/// `POST /api/widgets/{id}/messages`
///
/// Answers 202 once the user message is recorded; poll the widget for the
/// reply. Blank text answers 200 with nothing changed.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<SubmitMessage>,
) -> Result<(StatusCode, Json<WidgetView>), WidgetError> {
    let id = parse_id(&id)?;
    match state.submit(id, &body.text).await? {
        SubmitOutcome::Accepted(view) => Ok((StatusCode::ACCEPTED, Json(view))),
        SubmitOutcome::Ignored(view) => Ok((StatusCode::OK, Json(view))),
    }
}

/// `DELETE /api/widgets/{id}`
pub async fn close_widget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, WidgetError> {
    let id = parse_id(&id)?;
    state.close(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
