//! Leonardo REST API client.

use super::dto::{CreateGeneration, CreateGenerationResponse, GenerationByPkResponse};
use crate::http;
use async_trait::async_trait;
use reqwest::Client;
use storybook_core::{GenerationJob, ImageRequest};
use storybook_error::{StorybookResult, TransportError, TransportErrorKind};
use storybook_interface::ImageGenerator;
use tracing::{debug, instrument, warn};

/// Environment variable holding the Leonardo API key.
pub const LEONARDO_API_KEY: &str = "LEONARDO_API_KEY";

/// Default API root.
pub const LEONARDO_BASE_URL: &str = "https://cloud.leonardo.ai/api/rest/v1";

/// Client for the Leonardo image generation API.
#[derive(Debug, Clone)]
pub struct LeonardoClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LeonardoClient {
    /// Creates a client using `LEONARDO_API_KEY` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`](storybook_error::AuthError) if the key is not
    /// set, or a transport error if the HTTP client cannot be built.
    #[instrument(skip_all)]
    pub fn from_env() -> StorybookResult<Self> {
        let api_key = http::credential_from_env(LEONARDO_API_KEY)?;
        Self::with_api_key(api_key)
    }

    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_api_key(api_key: impl Into<String>) -> StorybookResult<Self> {
        Ok(Self {
            client: http::build_client()?,
            api_key: api_key.into(),
            base_url: LEONARDO_BASE_URL.to_string(),
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
impl ImageGenerator for LeonardoClient {
    #[instrument(skip(self, req), fields(model = %req.model_id()))]
    async fn submit(&self, req: &ImageRequest) -> StorybookResult<GenerationJob> {
        let url = format!("{}/generations", self.base_url);
        debug!(url = %url, "Submitting image generation");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CreateGeneration::from(req))
            .send()
            .await
            .map_err(http::request_error)?;

        let response = http::check_status(response, LEONARDO_API_KEY).await?;
        let created: CreateGenerationResponse =
            response.json().await.map_err(http::decode_error)?;

        let job = created.sd_generation_job.ok_or_else(|| {
            TransportError::new(TransportErrorKind::EmptyResponse(
                "response has no sdGenerationJob".to_string(),
            ))
        })?;

        debug!(job = %job.generation_id, "Image generation submitted");
        Ok(GenerationJob::new(job.generation_id))
    }

    #[instrument(skip(self, job), fields(job = %job))]
    async fn poll(&self, job: &GenerationJob) -> StorybookResult<Vec<String>> {
        let url = format!("{}/generations/{}", self.base_url, job.id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(http::request_error)?;

        let response = http::check_status(response, LEONARDO_API_KEY).await?;
        let status: GenerationByPkResponse = response.json().await.map_err(http::decode_error)?;

        if status.is_failed() {
            warn!("Provider reports generation failed");
            return Err(TransportError::new(TransportErrorKind::EmptyResponse(format!(
                "generation {} failed",
                job.id
            )))
            .into());
        }

        let urls = status.urls();
        debug!(images = urls.len(), "Polled generation");
        Ok(urls)
    }

    #[instrument(skip(self))]
    async fn download(&self, url: &str) -> StorybookResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(http::request_error)?;

        // Image URLs are unauthenticated CDN links, so a 403 here is not a
        // rejected key.
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(TransportErrorKind::Status {
                status: status.as_u16(),
                body: url.to_string(),
            })
            .into());
        }
        let bytes = response.bytes().await.map_err(http::decode_error)?;

        debug!(size = bytes.len(), "Downloaded image");
        Ok(bytes.to_vec())
    }

    fn provider_name(&self) -> &'static str {
        "leonardo"
    }
}
