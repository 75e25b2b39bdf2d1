//! Request and response types for text generation.

use crate::{Message, Role};
use serde::{Deserialize, Serialize};
use storybook_error::{BuilderError, BuilderErrorKind};

/// Provider-neutral text generation request.
///
/// # Examples
///
/// ```
/// use storybook_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .temperature(0.7)
///     .model("gpt-4")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.temperature, Some(0.7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(build_fn(private, name = "build_internal"))]
pub struct GenerateRequest {
    /// The conversation messages to send
    #[builder(default)]
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(default, setter(strip_option))]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default, setter(strip_option))]
    pub temperature: Option<f32>,
    /// Model identifier to use
    #[builder(default, setter(into, strip_option))]
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Creates a request holding a single user prompt.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            ..Self::default()
        }
    }

    /// Text of the last user message, if any.
    pub fn prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

impl GenerateRequestBuilder {
    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] if a required field is missing.
    pub fn build(&self) -> Result<GenerateRequest, BuilderError> {
        self.build_internal()
            .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))
    }
}

/// Why the model stopped producing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of output
    Stop,
    /// Output hit the token limit
    Length,
    /// Output was withheld by the provider's content filter
    ContentFilter,
    /// Anything the provider reports that is not modeled above
    Other,
}

impl FinishReason {
    /// Maps a provider finish reason string.
    pub fn from_provider(reason: &str) -> Self {
        match reason {
            "stop" => Self::Stop,
            "length" => Self::Length,
            "content_filter" => Self::ContentFilter,
            _ => Self::Other,
        }
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens produced in the completion
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Total tokens for the call.
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Provider-neutral text generation response.
///
/// # Examples
///
/// ```
/// use storybook_core::GenerateResponse;
///
/// let response = GenerateResponse::from_text("Once upon a time.");
/// assert_eq!(response.text, "Once upon a time.");
/// assert!(response.usage.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated text
    pub text: String,
    /// Why generation stopped, when reported
    pub finish_reason: Option<FinishReason>,
    /// Token usage, when reported
    pub usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Creates a response carrying only text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: None,
            usage: None,
        }
    }
}
