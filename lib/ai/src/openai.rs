//! OpenAI chat-completions client.
//!
//! One POST per call, bearer-token auth, no retry. Anything other than a
//! 2xx response carrying a non-blank first choice is an error.

use crate::backend::{ChatMessage, GenerationRequest, GenerationService, GenerationSettings};
use crate::credential::ApiCredential;
use crate::error::GenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use softsell_core::Result;
use std::time::Duration;
use tracing::{debug, instrument};

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    credential: ApiCredential,
    settings: GenerationSettings,
    endpoint: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl OpenAiClient {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        credential: ApiCredential,
        settings: GenerationSettings,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| GenerationError::InvalidConfig {
                reason: e.to_string(),
            })?;

        let endpoint = format!(
            "{}/v1/chat/completions",
            settings.base_url.trim_end_matches('/')
        );

        Ok(Self {
            client,
            credential,
            settings,
            endpoint,
        })
    }

    /// Returns the generation settings this client sends.
    #[must_use]
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    #[instrument(
        skip(self, request),
        fields(model = %self.settings.model, messages = request.messages().len())
    )]
    async fn complete(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = CompletionRequest {
            model: &self.settings.model,
            messages: request.messages(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::RequestFailed {
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        if status.as_u16() == 429 {
            return Err(GenerationError::RateLimited.into());
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let parsed = response
            .json::<CompletionResponse>()
            .await
            .map_err(|e| GenerationError::ResponseParseFailed {
                reason: e.to_string(),
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(GenerationError::EmptyCompletion.into());
        }

        Ok(content)
    }
}

#[async_trait]
impl GenerationService for OpenAiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.complete(request).await
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}
