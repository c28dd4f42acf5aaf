//! Shared application state: the open widgets.
//!
//! Each widget sits behind its own mutex. The mutex is held only to begin
//! or complete a submission, never across the generation call, so clients
//! can watch the typing indicator while a reply is resolved.
//!
//! Clients rarely close their widgets explicitly, so every entry records
//! when it was last used and [`AppState::evict_idle`] drops the stale ones.

use crate::error::WidgetError;
use crate::types::WidgetView;
use softsell_conversation::{ChatWidget, ConversationError, PendingReply, Resolution, Resolver};
use softsell_core::WidgetId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

/// What happened to a submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// User message recorded; the reply is being resolved.
    Accepted(WidgetView),
    /// Blank input; nothing changed.
    Ignored(WidgetView),
}

#[derive(Debug)]
struct WidgetEntry {
    widget: ChatWidget,
    last_active: Instant,
}

impl WidgetEntry {
    fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    fn view(&self) -> WidgetView {
        WidgetView::from(&self.widget)
    }
}

/// Application state shared by all handlers.
#[derive(Debug)]
pub struct AppState {
    resolver: Arc<Resolver>,
    widgets: RwLock<HashMap<WidgetId, Arc<Mutex<WidgetEntry>>>>,
}

impl AppState {
    /// Creates state with no open widgets.
    #[must_use]
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
            widgets: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a new widget and returns its initial view.
    pub async fn open_widget(&self) -> WidgetView {
        let entry = WidgetEntry {
            widget: ChatWidget::new(Arc::clone(&self.resolver)),
            last_active: Instant::now(),
        };
        let view = entry.view();
        self.widgets
            .write()
            .await
            .insert(view.id, Arc::new(Mutex::new(entry)));
        tracing::debug!(widget_id = %view.id, "Opened widget");
        view
    }

    async fn entry(&self, id: WidgetId) -> Result<Arc<Mutex<WidgetEntry>>, WidgetError> {
        self.widgets
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| WidgetError::NotFound { id: id.to_string() })
    }

    /// Returns the current view of a widget.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::NotFound`] if the widget is not open.
    pub async fn view(&self, id: WidgetId) -> Result<WidgetView, WidgetError> {
        let entry = self.entry(id).await?;
        let mut guard = entry.lock().await;
        guard.touch();
        Ok(guard.view())
    }

    /// Accepts an utterance and resolves the reply in the background.
    ///
    /// Blank input is ignored and the unchanged view returned.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::NotFound`] if the widget is not open and
    /// [`WidgetError::Busy`] while a reply is still pending.
    pub async fn submit(
        self: &Arc<Self>,
        id: WidgetId,
        text: &str,
    ) -> Result<SubmitOutcome, WidgetError> {
        let entry = self.entry(id).await?;
        let mut guard = entry.lock().await;
        guard.touch();

        let pending = match guard.widget.begin(text) {
            Ok(pending) => pending,
            Err(ConversationError::EmptyInput) => {
                return Ok(SubmitOutcome::Ignored(guard.view()));
            }
            Err(ConversationError::Busy) => {
                return Err(WidgetError::Busy { id: id.to_string() });
            }
        };
        let view = guard.view();
        drop(guard);

        let state = Arc::clone(self);
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            let resolution = pending.resolve(&state.resolver).await;
            state.finish(id, &pending, resolution).await;
        });

        Ok(SubmitOutcome::Accepted(view))
    }

    async fn finish(&self, id: WidgetId, pending: &PendingReply, resolution: Resolution) {
        let Ok(entry) = self.entry(id).await else {
            tracing::debug!(
                widget_id = %id,
                source = ?resolution.source,
                "Widget closed before its reply was ready, discarding"
            );
            return;
        };
        let mut guard = entry.lock().await;
        guard.touch();
        if let Some(reply) = guard.widget.complete(pending, resolution) {
            tracing::debug!(widget_id = %id, message_id = %reply.id, "Reply appended");
        }
    }

    /// Closes a widget. Replies still in flight for it are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::NotFound`] if the widget is not open.
    pub async fn close(&self, id: WidgetId) -> Result<(), WidgetError> {
        if self.widgets.write().await.remove(&id).is_none() {
            return Err(WidgetError::NotFound { id: id.to_string() });
        }
        tracing::debug!(widget_id = %id, "Closed widget");
        Ok(())
    }

    /// Drops every widget unused for at least `max_idle` and returns how
    /// many were dropped. Widgets waiting on a reply are kept.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let entries: Vec<_> = self
            .widgets
            .read()
            .await
            .iter()
            .map(|(id, entry)| (*id, Arc::clone(entry)))
            .collect();

        let mut idle = Vec::new();
        for (id, entry) in entries {
            let guard = entry.lock().await;
            if !guard.widget.is_typing() && guard.last_active.elapsed() >= max_idle {
                idle.push(id);
            }
        }
        if idle.is_empty() {
            return 0;
        }

        let mut widgets = self.widgets.write().await;
        let evicted = idle
            .iter()
            .filter(|id| widgets.remove(*id).is_some())
            .count();
        tracing::debug!(evicted, remaining = widgets.len(), "Evicted idle widgets");
        evicted
    }

    /// Number of open widgets.
    pub async fn open_widgets(&self) -> usize {
        self.widgets.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use softsell_conversation::ReplyPacing;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(
            Resolver::new(None).with_pacing(ReplyPacing::immediate()),
        ))
    }

    #[tokio::test]
    async fn abandoned_widgets_are_evicted() {
        let state = state();
        for _ in 0..100 {
            state.open_widget().await;
        }
        assert_eq!(state.open_widgets().await, 100);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(state.evict_idle(Duration::from_millis(10)).await, 100);
        assert_eq!(state.open_widgets().await, 0);
    }

    #[tokio::test]
    async fn recently_used_widgets_survive_eviction() {
        let state = state();
        let stale = state.open_widget().await;
        let active = state.open_widget().await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        state.view(active.id).await.expect("view");

        assert_eq!(state.evict_idle(Duration::from_millis(40)).await, 1);
        assert!(matches!(
            state.view(stale.id).await,
            Err(WidgetError::NotFound { .. })
        ));
        assert!(state.view(active.id).await.is_ok());
    }

    #[tokio::test]
    async fn eviction_skips_widgets_awaiting_a_reply() {
        let state = state();
        let view = state.open_widget().await;

        let question = "Is this legal?";
        let outcome = state.submit(view.id, question).await.expect("submit");
        assert!(matches!(outcome, SubmitOutcome::Accepted(_)));

        // The reply task has not run yet on this single-threaded runtime.
        assert_eq!(state.evict_idle(Duration::ZERO).await, 0);
        assert_eq!(state.open_widgets().await, 1);
    }

    #[tokio::test]
    async fn busy_widget_rejects_second_submission() {
        let state = state();
        let view = state.open_widget().await;

        let question = "Is this legal?";
        state.submit(view.id, question).await.expect("submit");
        let err = state.submit(view.id, "hello").await.unwrap_err();
        assert!(matches!(err, WidgetError::Busy { .. }));
    }
}
