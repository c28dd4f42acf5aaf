//! Request and response bodies of the widget API.

use serde::{Deserialize, Serialize};
use softsell_conversation::{ChatWidget, Message};
use softsell_core::WidgetId;

/// Everything a client needs to render one widget.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WidgetView {
    pub id: WidgetId,
    pub label: String,
    pub example_prompts: Vec<String>,
    pub typing: bool,
    pub messages: Vec<Message>,
}

impl From<&ChatWidget> for WidgetView {
    fn from(widget: &ChatWidget) -> Self {
        Self {
            id: widget.id(),
            label: widget.label(),
            example_prompts: widget.resolver().persona().example_prompts.clone(),
            typing: widget.is_typing(),
            messages: widget.conversation().messages().to_vec(),
        }
    }
}

/// Body of a message submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitMessage {
    pub text: String,
}
