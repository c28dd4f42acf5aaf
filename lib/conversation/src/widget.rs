//! The chat widget's state holder.
//!
//! A [`ChatWidget`] exclusively owns one conversation and its typing flag.
//! A submission is split in two so a host can release its lock while the
//! reply is being resolved:
//!
//! - [`ChatWidget::begin`] appends the user message and raises typing
//! - [`ChatWidget::complete`] appends the bot reply and lowers typing
//!
//! Only one submission may be outstanding. A second one while typing is
//! rejected with [`ConversationError::Busy`] and changes nothing.

use crate::conversation::Conversation;
use crate::error::ConversationError;
use crate::message::{Message, Sender};
use crate::resolver::{Resolution, Resolver};
use softsell_core::{MessageId, WidgetId};
use std::sync::Arc;
use tracing::{debug, instrument};

/// An in-flight submission.
///
/// Carries everything needed to resolve the reply without touching the
/// widget again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    user_message: MessageId,
    history: Vec<Message>,
    utterance: String,
}

impl PendingReply {
    /// Resolves the reply and waits out its pacing delay.
    pub async fn resolve(&self, resolver: &Resolver) -> Resolution {
        let resolution = resolver.resolve(&self.history, &self.utterance).await;
        resolver.pace(resolution.source).await;
        resolution
    }
}

/// One chat widget instance.
#[derive(Debug)]
pub struct ChatWidget {
    id: WidgetId,
    conversation: Conversation,
    pending: Option<MessageId>,
    resolver: Arc<Resolver>,
}

impl ChatWidget {
    /// Creates a widget whose conversation holds only the greeting.
    #[must_use]
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self {
            id: WidgetId::new(),
            conversation: Conversation::seeded(resolver.persona().greeting.clone()),
            pending: None,
            resolver,
        }
    }

    /// Returns the widget id.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Returns the conversation.
    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns true while a reply is being resolved.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the shared resolver.
    #[must_use]
    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    /// Header label for this widget.
    #[must_use]
    pub fn label(&self) -> String {
        self.resolver
            .persona()
            .label(self.resolver.generation_enabled())
    }

    /// Accepts an utterance and raises the typing indicator.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationError::EmptyInput`] for blank input and
    /// [`ConversationError::Busy`] while a reply is outstanding. Neither
    /// changes any state.
    #[instrument(skip_all, fields(widget = %self.id))]
    pub fn begin(&mut self, utterance: &str) -> Result<PendingReply, ConversationError> {
        if utterance.trim().is_empty() {
            return Err(ConversationError::EmptyInput);
        }
        if self.pending.is_some() {
            debug!("Rejecting submission while a reply is pending");
            return Err(ConversationError::Busy);
        }

        let history = self.conversation.messages().to_vec();
        let user_message = self.conversation.append(Sender::User, utterance).id;
        self.pending = Some(user_message);

        Ok(PendingReply {
            user_message,
            history,
            utterance: utterance.to_string(),
        })
    }

    /// Appends the reply for `pending` and lowers the typing indicator.
    ///
    /// Returns `None` and changes nothing if `pending` is not the
    /// outstanding submission.
    #[instrument(skip_all, fields(widget = %self.id, source = ?resolution.source))]
    pub fn complete(
        &mut self,
        pending: &PendingReply,
        resolution: Resolution,
    ) -> Option<&Message> {
        if self.pending != Some(pending.user_message) {
            debug!(
                user_message = %pending.user_message,
                "Discarding reply for a submission that is no longer pending"
            );
            return None;
        }

        Some(self.finish(resolution))
    }

    fn finish(&mut self, resolution: Resolution) -> &Message {
        self.pending = None;
        self.conversation.append(Sender::Bot, resolution.text)
    }

    /// Submits an utterance and waits for the reply.
    ///
    /// The typing indicator is raised for at least one scheduler tick
    /// before the reply lands.
    ///
    /// # Errors
    ///
    /// Same as [`ChatWidget::begin`].
    pub async fn submit(&mut self, utterance: &str) -> Result<&Message, ConversationError> {
        let pending = self.begin(utterance)?;
        tokio::task::yield_now().await;

        let resolver = Arc::clone(&self.resolver);
        let resolution = pending.resolve(&resolver).await;

        // &mut self is held throughout, so this submission is still the
        // pending one.
        Ok(self.finish(resolution))
    }
}
