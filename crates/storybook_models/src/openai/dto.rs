//! OpenAI chat completions data transfer objects.

use serde::{Deserialize, Serialize};
use storybook_core::{FinishReason, GenerateRequest, GenerateResponse, Message, TokenUsage};
use storybook_error::{StorybookResult, TransportError, TransportErrorKind};

/// Chat completions request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<Message>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Converts a provider-neutral request, falling back to `default_model`.
    pub fn from_request(req: &GenerateRequest, default_model: &str) -> Self {
        Self {
            model: req
                .model
                .clone()
                .unwrap_or_else(|| default_model.to_string()),
            messages: req.messages.clone(),
            temperature: req.temperature,
            max_tokens: req.max_tokens,
        }
    }
}

/// Message inside a completion choice.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatChoiceMessage {
    /// Generated text; absent for refusals and tool calls
    #[serde(default)]
    content: Option<String>,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    message: ChatChoiceMessage,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChatUsage {
    /// Prompt tokens consumed
    #[serde(default)]
    prompt_tokens: u32,
    /// Completion tokens generated
    #[serde(default)]
    completion_tokens: u32,
}

/// Chat completions response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    /// Completion choices
    #[serde(default)]
    choices: Vec<ChatChoice>,
    /// Token usage (if reported)
    #[serde(default)]
    usage: Option<ChatUsage>,
}

impl ChatResponse {
    /// Converts the first choice into a provider-neutral response.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no choice or it carries no text.
    pub fn into_response(self) -> StorybookResult<GenerateResponse> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            TransportError::new(TransportErrorKind::EmptyResponse(
                "no choices in completion".to_string(),
            ))
        })?;
        let text = choice.message.content.ok_or_else(|| {
            TransportError::new(TransportErrorKind::EmptyResponse(
                "completion has no content".to_string(),
            ))
        })?;

        Ok(GenerateResponse {
            text,
            finish_reason: choice
                .finish_reason
                .as_deref()
                .map(FinishReason::from_provider),
            usage: self.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
        })
    }
}
