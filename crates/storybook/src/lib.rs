//! Storybook: illustrated children's stories from a title and a genre.
//!
//! This crate ties the workspace together and re-exports what a caller needs
//! to run a story end to end:
//!
//! - `storybook_core` - Requests, pages, storybooks and content policy
//! - `storybook_error` - Error types
//! - `storybook_interface` - Generation and rendering traits
//! - `storybook_security` - Banned-topic safety filter
//! - `storybook_storage` - Flat-file image storage
//! - `storybook_models` - OpenAI text and Leonardo image clients
//! - `storybook_narrative` - Prompts, page splitting and the pipeline
//! - `storybook_render` - PDF output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storybook::{
//!     FileSystemStorage, GenerationClient, LeonardoClient, OpenAiClient, PdfRenderer,
//!     StoryPipeline, StoryRequest, StorybookConfig,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorybookConfig::load(None)?;
//! let service = GenerationClient::builder()
//!     .text(OpenAiClient::from_env(&config.text.model)?)
//!     .image(LeonardoClient::from_env()?)
//!     .storage(Arc::new(FileSystemStorage::new(config.image_dir())?))
//!     .poll_policy(config.poll_policy())
//!     .build()?;
//!
//! let pipeline = StoryPipeline::new(service, config.pipeline_config()?)
//!     .with_renderer(PdfRenderer::default());
//! let report = pipeline
//!     .run(&StoryRequest::new("The Brave Fox", "Adventure"))
//!     .await?;
//! println!("{} illustrated pages", report.storybook().illustrated_pages());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;

pub use config::{
    ImageModelConfig, PipelineSettings, StorageConfig, StorybookConfig, TextModelConfig,
};

pub use storybook_core::{
    ContentPolicy, Page, PollPolicy, ReadingLevel, RenderSummary, StoryRequest, Storybook,
};
pub use storybook_error::{StorybookError, StorybookErrorKind, StorybookResult};
pub use storybook_interface::{
    GenerationService, ImageGenerator, StorybookRenderer, TextGenerator,
};
pub use storybook_models::{GenerationClient, ImageSettings, LeonardoClient, OpenAiClient};
pub use storybook_narrative::{
    PipelineConfig, PipelineReport, StoryPipeline, paginate_by_reading_level, prompts,
    split_story_into_pages,
};
pub use storybook_render::PdfRenderer;
pub use storybook_security::SafetyFilter;
pub use storybook_storage::{FileSystemStorage, MediaStorage};
