//! Response resolution.
//!
//! Given the history and a new utterance, the resolver picks exactly one
//! reply:
//!
//! 1. the domain FAQ, even when a generation service is configured
//! 2. greeting, thanks or farewell small talk
//! 3. the generation service, if a credential is configured; any failure
//!    becomes the persona's apology
//! 4. otherwise the offline fallback table, then the clarification prompt
//!
//! Resolution never fails. Service errors are logged and absorbed here.

use crate::knowledge::{KnowledgeTable, SmallTalk};
use crate::message::Message;
use crate::persona::Persona;
use serde::{Deserialize, Serialize};
use softsell_ai::{ChatMessage, GenerationRequest, GenerationService};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Which branch produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    /// Domain FAQ table.
    Knowledge,
    /// Greeting, thanks or farewell pattern.
    SmallTalk,
    /// Generation service completion.
    Generated,
    /// Offline fallback table.
    Fallback,
    /// Offline, nothing matched.
    Clarification,
    /// Generation service failed.
    Apology,
}

/// A chosen reply and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Bot message text.
    pub text: String,
    /// Branch that produced it.
    pub source: ResponseSource,
}

impl Resolution {
    fn new(text: impl Into<String>, source: ResponseSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// Artificial reply delays that imitate a natural cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPacing {
    /// Delay for table and small-talk matches, and for the apology.
    #[serde(default = "default_local_ms")]
    pub local_ms: u64,
    /// Delay for generated, fallback and clarification replies.
    #[serde(default = "default_remote_ms")]
    pub remote_ms: u64,
}

fn default_local_ms() -> u64 {
    1000
}

fn default_remote_ms() -> u64 {
    1500
}

impl Default for ReplyPacing {
    fn default() -> Self {
        Self {
            local_ms: default_local_ms(),
            remote_ms: default_remote_ms(),
        }
    }
}

impl ReplyPacing {
    /// No delay at all.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            local_ms: 0,
            remote_ms: 0,
        }
    }

    /// Returns the delay before a reply from `source` becomes visible.
    #[must_use]
    pub fn delay_for(&self, source: ResponseSource) -> Duration {
        match source {
            ResponseSource::Knowledge | ResponseSource::SmallTalk | ResponseSource::Apology => {
                Duration::from_millis(self.local_ms)
            }
            ResponseSource::Generated
            | ResponseSource::Fallback
            | ResponseSource::Clarification => Duration::from_millis(self.remote_ms),
        }
    }
}

/// Decides the reply for each utterance.
///
/// Tables are fixed at construction. The resolver holds no conversation
/// state and can be shared between widgets.
pub struct Resolver {
    faq: KnowledgeTable,
    fallback: KnowledgeTable,
    small_talk: SmallTalk,
    persona: Persona,
    generator: Option<Arc<dyn GenerationService>>,
    pacing: ReplyPacing,
}

impl Resolver {
    /// Creates a resolver with the built-in tables and persona.
    ///
    /// Pass `None` when no credential is configured; the offline fallback
    /// table is used instead of a network call.
    #[must_use]
    pub fn new(generator: Option<Arc<dyn GenerationService>>) -> Self {
        Self {
            faq: KnowledgeTable::faq(),
            fallback: KnowledgeTable::fallback(),
            small_talk: SmallTalk::default(),
            persona: Persona::default(),
            generator,
            pacing: ReplyPacing::default(),
        }
    }

    /// Sets the reply pacing.
    #[must_use]
    pub fn with_pacing(mut self, pacing: ReplyPacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Returns the persona.
    #[must_use]
    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Returns true if unmatched utterances go to the generation service.
    #[must_use]
    pub fn generation_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Steps that never leave the process: FAQ, then small talk.
    #[must_use]
    pub fn resolve_local(&self, utterance: &str) -> Option<Resolution> {
        if let Some(answer) = self.faq.lookup(utterance) {
            return Some(Resolution::new(answer, ResponseSource::Knowledge));
        }
        self.small_talk
            .lookup(utterance)
            .map(|reply| Resolution::new(reply, ResponseSource::SmallTalk))
    }

    /// Resolves the reply to `utterance`.
    ///
    /// `history` is the conversation as it stood before the utterance was
    /// appended.
    #[instrument(skip_all, fields(history = history.len()))]
    pub async fn resolve(&self, history: &[Message], utterance: &str) -> Resolution {
        if let Some(local) = self.resolve_local(utterance) {
            debug!(source = ?local.source, "answered from local tables");
            return local;
        }

        match &self.generator {
            Some(generator) => {
                let request = self.build_request(history, utterance);
                match generator.generate(&request).await {
                    Ok(text) => Resolution::new(text, ResponseSource::Generated),
                    Err(error) => {
                        warn!(
                            error = %error,
                            model = generator.model(),
                            "Generation service unavailable, replying with apology"
                        );
                        Resolution::new(self.persona.apology.clone(), ResponseSource::Apology)
                    }
                }
            }
            None => match self.fallback.lookup(utterance) {
                Some(answer) => Resolution::new(answer, ResponseSource::Fallback),
                None => Resolution::new(
                    self.persona.clarification.clone(),
                    ResponseSource::Clarification,
                ),
            },
        }
    }

    /// Builds the generation request: system instruction, history, utterance.
    #[must_use]
    pub fn build_request(&self, history: &[Message], utterance: &str) -> GenerationRequest {
        GenerationRequest::new(self.persona.system_instruction.clone())
            .with_history(history.iter().map(Message::to_chat_message))
            .push(ChatMessage::user(utterance))
    }

    /// Waits out the configured delay for a reply from `source`.
    pub async fn pace(&self, source: ResponseSource) {
        let delay = self.pacing.delay_for(source);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("faq_entries", &self.faq.entries().len())
            .field("fallback_entries", &self.fallback.entries().len())
            .field("model", &self.generator.as_ref().map(|g| g.model()))
            .field("pacing", &self.pacing)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::conversation::Conversation;
    use crate::message::Sender;
    use async_trait::async_trait;
    use softsell_ai::{ChatRole, GenerationError};
    use std::sync::Mutex;

    /// In-memory generation service that records every request.
    pub(crate) struct ScriptedService {
        reply: std::result::Result<String, GenerationError>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedService {
        pub(crate) fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn failing(error: GenerationError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(error),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn requests(&self) -> Vec<GenerationRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationService for ScriptedService {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> softsell_core::Result<String, GenerationError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(error) => Err(error.clone().into()),
            }
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    fn greeting_history() -> Vec<Message> {
        Conversation::seeded(Persona::default().greeting)
            .messages()
            .to_vec()
    }

    #[tokio::test]
    async fn faq_outranks_greeting() {
        let resolver = Resolver::new(None);
        let reply = resolver
            .resolve(&greeting_history(), "hi, how do i sell my license")
            .await;
        assert_eq!(reply.source, ResponseSource::Knowledge);
        assert!(reply.text.starts_with("To sell your license"));
    }

    #[tokio::test]
    async fn faq_outranks_configured_service() {
        let service = ScriptedService::replying("generated");
        let resolver = Resolver::new(Some(service.clone()));
        let reply = resolver.resolve(&greeting_history(), "Is this legal?").await;
        assert_eq!(reply.source, ResponseSource::Knowledge);
        assert!(service.requests().is_empty());
    }

    #[tokio::test]
    async fn case_does_not_change_the_answer() {
        let resolver = Resolver::new(None);
        let upper = resolver
            .resolve(&greeting_history(), "HOW MUCH IS MY LICENSE WORTH?")
            .await;
        let lower = resolver
            .resolve(&greeting_history(), "how much is my license worth?")
            .await;
        assert_eq!(upper, lower);
        assert_eq!(upper.source, ResponseSource::Knowledge);
    }

    #[tokio::test]
    async fn small_talk_before_service() {
        let service = ScriptedService::replying("generated");
        let resolver = Resolver::new(Some(service.clone()));
        let reply = resolver.resolve(&greeting_history(), "thank you!").await;
        assert_eq!(reply.source, ResponseSource::SmallTalk);
        assert!(service.requests().is_empty());
    }

    #[tokio::test]
    async fn unmatched_goes_to_service_with_full_history() {
        let service = ScriptedService::replying("We buy Autodesk seats too.");
        let resolver = Resolver::new(Some(service.clone()));

        let mut conversation = Conversation::seeded(resolver.persona().greeting.clone());
        conversation.append(Sender::User, "Is this legal?");
        conversation.append(Sender::Bot, "Yes.");

        let reply = resolver
            .resolve(conversation.messages(), "Do you take Autodesk?")
            .await;
        assert_eq!(reply.source, ResponseSource::Generated);
        assert_eq!(reply.text, "We buy Autodesk seats too.");

        let requests = service.requests();
        assert_eq!(requests.len(), 1);
        let roles: Vec<ChatRole> = requests[0].messages().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::System,
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::User
            ]
        );
        assert_eq!(
            requests[0].messages()[0].content,
            resolver.persona().system_instruction
        );
        assert_eq!(requests[0].messages()[4].content, "Do you take Autodesk?");
    }

    #[tokio::test]
    async fn service_failure_becomes_apology() {
        let service = ScriptedService::failing(GenerationError::Status {
            status: 500,
            message: "upstream exploded".to_string(),
        });
        let resolver = Resolver::new(Some(service));
        let reply = resolver
            .resolve(&greeting_history(), "Do you take Autodesk?")
            .await;
        assert_eq!(reply.source, ResponseSource::Apology);
        assert_eq!(reply.text, resolver.persona().apology);
        assert!(!reply.text.contains("upstream"));
    }

    #[tokio::test]
    async fn offline_uses_fallback_table() {
        let resolver = Resolver::new(None);
        let reply = resolver
            .resolve(&greeting_history(), "what payment methods exist")
            .await;
        assert_eq!(reply.source, ResponseSource::Fallback);
        assert!(reply.text.starts_with("We offer multiple payment methods"));
    }

    #[tokio::test]
    async fn offline_without_match_asks_for_more() {
        let resolver = Resolver::new(None);
        let reply = resolver.resolve(&greeting_history(), "what is the weather").await;
        assert_eq!(reply.source, ResponseSource::Clarification);
        assert_eq!(reply.text, resolver.persona().clarification);
    }

    #[test]
    fn pacing_by_source() {
        let pacing = ReplyPacing::default();
        assert_eq!(
            pacing.delay_for(ResponseSource::Knowledge),
            Duration::from_millis(1000)
        );
        assert_eq!(
            pacing.delay_for(ResponseSource::Apology),
            Duration::from_millis(1000)
        );
        assert_eq!(
            pacing.delay_for(ResponseSource::Generated),
            Duration::from_millis(1500)
        );
        assert_eq!(
            pacing.delay_for(ResponseSource::Clarification),
            Duration::from_millis(1500)
        );
        assert!(
            ReplyPacing::immediate()
                .delay_for(ResponseSource::Fallback)
                .is_zero()
        );
    }

    #[test]
    fn resolve_local_is_pure() {
        let resolver = Resolver::new(None);
        assert!(resolver.resolve_local("what is the weather").is_none());
        assert_eq!(
            resolver.resolve_local("bye!").map(|r| r.source),
            Some(ResponseSource::SmallTalk)
        );
    }
}
