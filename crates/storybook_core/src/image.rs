//! Image generation request types.

use serde::{Deserialize, Serialize};
use storybook_error::{BuilderError, BuilderErrorKind};

/// A request to submit to an asynchronous image generation service.
///
/// # Examples
///
/// ```
/// use storybook_core::ImageRequest;
///
/// let request = ImageRequest::builder()
///     .prompt("A fox in a red scarf")
///     .model_id("e316348f-7773-490e-adcd-46757c738eb7")
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.width(), 1024);
/// assert_eq!(*request.num_images(), 1);
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters, derive_builder::Builder,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct ImageRequest {
    /// Text prompt describing the image
    prompt: String,
    /// Provider model identifier
    model_id: String,
    /// Number of images to generate
    #[builder(default = "1")]
    num_images: u32,
    /// Image width in pixels
    #[builder(default = "1024")]
    width: u32,
    /// Image height in pixels
    #[builder(default = "1024")]
    height: u32,
    /// Prompt adherence strength
    #[builder(default = "8.0")]
    guidance_scale: f32,
    /// Number of diffusion steps
    #[builder(default = "30")]
    inference_steps: u32,
}

impl ImageRequest {
    /// Creates a new request builder.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}

impl ImageRequestBuilder {
    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] if the prompt or model is missing.
    pub fn build(&self) -> Result<ImageRequest, BuilderError> {
        self.build_internal()
            .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))
    }
}

/// Handle to a submitted image generation job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", id)]
pub struct GenerationJob {
    /// Provider job identifier
    pub id: String,
}

impl GenerationJob {
    /// Wraps a provider job identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
