//! Router assembly.

use crate::routes;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the widget API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/widgets", post(routes::open_widget))
        .route(
            "/api/widgets/{id}",
            get(routes::get_widget).delete(routes::close_widget),
        )
        .route("/api/widgets/{id}/messages", post(routes::post_message))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
