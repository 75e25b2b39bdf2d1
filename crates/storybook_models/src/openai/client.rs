//! OpenAI chat completions client.

use super::dto::{ChatRequest, ChatResponse};
use crate::http;
use async_trait::async_trait;
use reqwest::Client;
use storybook_core::{GenerateRequest, GenerateResponse};
use storybook_error::StorybookResult;
use storybook_interface::TextGenerator;
use tracing::{debug, instrument};

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Default API root.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a client using `OPENAI_API_KEY` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`](storybook_error::AuthError) if the key is not
    /// set, or a transport error if the HTTP client cannot be built.
    #[instrument(skip_all)]
    pub fn from_env(model: impl AsRef<str>) -> StorybookResult<Self> {
        let api_key = http::credential_from_env(OPENAI_API_KEY)?;
        Self::with_api_key(api_key, model.as_ref())
    }

    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_api_key(api_key: impl Into<String>, model: impl Into<String>) -> StorybookResult<Self> {
        Ok(Self {
            client: http::build_client()?,
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            model: model.into(),
        })
    }

    /// Points the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// API root in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    #[instrument(skip(self, req), fields(model = %self.model, messages = req.messages.len()))]
    async fn generate(&self, req: &GenerateRequest) -> StorybookResult<GenerateResponse> {
        let body = ChatRequest::from_request(req, &self.model);
        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(http::request_error)?;

        let response = http::check_status(response, OPENAI_API_KEY).await?;
        let chat: ChatResponse = response.json().await.map_err(http::decode_error)?;
        let response = chat.into_response()?;

        debug!(
            chars = response.text.len(),
            finish_reason = ?response.finish_reason,
            "Received chat completion"
        );
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
