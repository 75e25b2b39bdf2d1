//! The generation service the pipeline talks to.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use storybook_core::{GenerateRequest, ImageRequest, Message, PollPolicy};
use storybook_error::{
    BuilderError, BuilderErrorKind, StorybookError, StorybookResult, TimeoutError,
    TransportError, TransportErrorKind,
};
use storybook_interface::{GenerationService, ImageGenerator, TextGenerator};
use storybook_storage::{MediaMetadata, MediaStorage};
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, info, instrument, warn};

/// Model used when no image model is configured.
pub const DEFAULT_IMAGE_MODEL: &str = "e316348f-7773-490e-adcd-46757c738eb7";

/// Image parameters applied to every illustration request.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct ImageSettings {
    /// Provider model identifier
    model_id: String,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
    /// Prompt adherence strength
    guidance_scale: f32,
    /// Number of diffusion steps
    inference_steps: u32,
}

impl ImageSettings {
    /// Creates settings for the given model and dimensions.
    pub fn new(
        model_id: impl Into<String>,
        width: u32,
        height: u32,
        guidance_scale: f32,
        inference_steps: u32,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            width,
            height,
            guidance_scale,
            inference_steps,
        }
    }

    /// Builds a request for one prompt.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] if the request is incomplete.
    pub fn request(&self, prompt: &str) -> Result<ImageRequest, BuilderError> {
        ImageRequest::builder()
            .prompt(prompt)
            .model_id(self.model_id.as_str())
            .width(self.width)
            .height(self.height)
            .guidance_scale(self.guidance_scale)
            .inference_steps(self.inference_steps)
            .build()
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_MODEL, 1024, 1024, 8.0, 30)
    }
}

/// Combines a text backend, an image backend and a content store.
///
/// Text calls send a single user message at the configured temperature.
/// Image calls submit a job, poll it on a fixed interval until the first
/// URL appears, download it and persist it for the page.
#[derive(derive_builder::Builder)]
#[builder(pattern = "owned", build_fn(private, name = "build_internal"))]
pub struct GenerationClient<T, I> {
    /// Text generation backend
    text: T,
    /// Image generation backend
    image: I,
    /// Where downloaded illustrations are written
    storage: Arc<dyn MediaStorage>,
    /// Parameters for every image request
    #[builder(default)]
    image_settings: ImageSettings,
    /// How long to wait for image jobs
    #[builder(default)]
    poll_policy: PollPolicy,
    /// Sampling temperature for text calls
    #[builder(default = "0.7")]
    temperature: f32,
}

impl<T, I> GenerationClientBuilder<T, I> {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] if a backend or the storage is missing.
    pub fn build(self) -> Result<GenerationClient<T, I>, BuilderError> {
        self.build_internal()
            .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))
    }
}

impl<T, I> GenerationClient<T, I> {
    /// Creates a new client builder.
    pub fn builder() -> GenerationClientBuilder<T, I> {
        GenerationClientBuilder::default()
    }

    /// Text backend.
    pub fn text(&self) -> &T {
        &self.text
    }

    /// Image backend.
    pub fn image(&self) -> &I {
        &self.image
    }

    /// Polling policy in use.
    pub fn poll_policy(&self) -> PollPolicy {
        self.poll_policy
    }
}

impl<T, I> GenerationClient<T, I>
where
    T: TextGenerator,
    I: ImageGenerator,
{
    /// Poll `job` until it reports at least one URL.
    ///
    /// Every poll, the first included, waits one interval. Empty results and
    /// poll errors are retried. A rejected credential stops polling at once.
    async fn wait_for_urls(&self, job: &storybook_core::GenerationJob) -> StorybookResult<Vec<String>> {
        let max_attempts = self.poll_policy.max_attempts();
        let strategy = FixedInterval::new(self.poll_policy.interval())
            .take(max_attempts.saturating_sub(1) as usize);

        // A fresh job is never ready; the first check waits like the rest.
        tokio::time::sleep(self.poll_policy.interval()).await;

        let image = &self.image;
        let attempt = AtomicU32::new(0);
        let attempt = &attempt;

        let result = Retry::spawn(strategy, move || async move {
            let n = attempt.fetch_add(1, Ordering::Relaxed) + 1;
            match image.poll(job).await {
                Ok(urls) if !urls.is_empty() => Ok(urls),
                Ok(_) => {
                    debug!(attempt = n, "Image not ready");
                    Err(RetryError::Transient {
                        err: StorybookError::from(TransportError::new(
                            TransportErrorKind::EmptyResponse(format!("job {} pending", job)),
                        )),
                        retry_after: None,
                    })
                }
                Err(e) if e.is_auth() => Err(RetryError::Permanent(e)),
                Err(e) => {
                    warn!(attempt = n, error = %e, "Polling failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
            }
        })
        .await;

        result.map_err(|e| {
            if e.is_auth() {
                e
            } else {
                TimeoutError::new(format!("image generation {}", job), max_attempts).into()
            }
        })
    }
}

#[async_trait]
impl<T, I> GenerationService for GenerationClient<T, I>
where
    T: TextGenerator,
    I: ImageGenerator,
{
    #[instrument(skip(self, prompt), fields(model = self.text.model_name(), prompt_len = prompt.len()))]
    async fn generate_text(&self, prompt: &str) -> StorybookResult<String> {
        let request = GenerateRequest {
            messages: vec![Message::user(prompt)],
            temperature: Some(self.temperature),
            ..GenerateRequest::default()
        };
        let response = self.text.generate(&request).await?;
        debug!(usage = ?response.usage, "Text generated");
        Ok(response.text.trim().to_string())
    }

    #[instrument(skip(self, prompt), fields(provider = self.image.provider_name()))]
    async fn generate_image(&self, prompt: &str, page: usize) -> StorybookResult<PathBuf> {
        let request = self.image_settings.request(prompt)?;
        let job = self.image.submit(&request).await?;
        info!(job = %job, "Image job submitted");

        let urls = self.wait_for_urls(&job).await?;
        let url = urls.first().ok_or_else(|| {
            TransportError::new(TransportErrorKind::EmptyResponse(format!(
                "job {} returned no images",
                job
            )))
        })?;

        let bytes = self.image.download(url).await?;
        let reference = self
            .storage
            .store(&bytes, &MediaMetadata::for_page(page, &bytes))
            .await?;

        info!(path = %reference.storage_path, "Illustration stored");
        Ok(reference.path())
    }
}
