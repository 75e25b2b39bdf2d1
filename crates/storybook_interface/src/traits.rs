//! Trait definitions for generation backends and renderers.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use storybook_core::{
    GenerateRequest, GenerateResponse, GenerationJob, ImageRequest, RenderSummary, Storybook,
};
use storybook_error::StorybookResult;

/// A text generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the given request.
    async fn generate(&self, req: &GenerateRequest) -> StorybookResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4").
    fn model_name(&self) -> &str;
}

/// An asynchronous image generation backend.
///
/// Images are produced by a job: submit it, poll until URLs appear, then
/// download the bytes.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Submit a generation job.
    async fn submit(&self, req: &ImageRequest) -> StorybookResult<GenerationJob>;

    /// Check a job once. An empty list means the job is still running.
    async fn poll(&self, job: &GenerationJob) -> StorybookResult<Vec<String>>;

    /// Fetch the bytes behind an image URL.
    async fn download(&self, url: &str) -> StorybookResult<Vec<u8>>;

    /// Provider name (e.g., "leonardo").
    fn provider_name(&self) -> &'static str;
}

/// The two generation operations a story run depends on.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Send a single prompt and return the trimmed text.
    async fn generate_text(&self, prompt: &str) -> StorybookResult<String>;

    /// Produce an illustration for `page` and return where it was stored.
    async fn generate_image(&self, prompt: &str, page: usize) -> StorybookResult<PathBuf>;
}

/// Turns a storybook into a document on disk.
pub trait StorybookRenderer: Send + Sync {
    /// Render `book` to `path`.
    ///
    /// Returns `Ok(None)` when no page has an image, in which case nothing
    /// is written.
    fn render(&self, book: &Storybook, path: &Path) -> StorybookResult<Option<RenderSummary>>;
}
