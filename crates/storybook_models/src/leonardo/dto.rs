//! Leonardo REST API data transfer objects.

use serde::{Deserialize, Serialize};
use storybook_core::ImageRequest;

/// Body of `POST /generations`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateGeneration {
    prompt: String,
    #[serde(rename = "modelId")]
    model_id: String,
    num_images: u32,
    width: u32,
    height: u32,
    guidance_scale: f32,
    num_inference_steps: u32,
}

impl From<&ImageRequest> for CreateGeneration {
    fn from(req: &ImageRequest) -> Self {
        Self {
            prompt: req.prompt().clone(),
            model_id: req.model_id().clone(),
            num_images: *req.num_images(),
            width: *req.width(),
            height: *req.height(),
            guidance_scale: *req.guidance_scale(),
            num_inference_steps: *req.inference_steps(),
        }
    }
}

/// Job handle inside the create response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationJobDto {
    #[serde(rename = "generationId")]
    pub generation_id: String,
}

/// Response of `POST /generations`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateGenerationResponse {
    #[serde(rename = "sdGenerationJob")]
    pub sd_generation_job: Option<GenerationJobDto>,
}

/// One generated image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
}

/// Job state as reported by `GET /generations/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct GenerationStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub generated_images: Vec<GeneratedImage>,
}

impl GenerationStatus {
    /// Whether the provider gave up on the job.
    pub fn is_failed(&self) -> bool {
        self.status.as_deref() == Some("FAILED")
    }
}

/// Response of `GET /generations/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationByPkResponse {
    #[serde(default)]
    pub generations_by_pk: Option<GenerationStatus>,
}

impl GenerationByPkResponse {
    /// Image URLs produced so far, in provider order.
    pub fn urls(&self) -> Vec<String> {
        self.generations_by_pk
            .as_ref()
            .map(|g| g.generated_images.iter().map(|i| i.url.clone()).collect())
            .unwrap_or_default()
    }

    /// Whether the job failed on the provider side.
    pub fn is_failed(&self) -> bool {
        self.generations_by_pk
            .as_ref()
            .is_some_and(GenerationStatus::is_failed)
    }
}
