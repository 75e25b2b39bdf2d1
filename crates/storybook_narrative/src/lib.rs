//! Story generation for Storybook.
//!
//! This crate turns a title and genre into an illustrated storybook:
//!
//! - [`prompts`] builds every prompt sent to the text and image models.
//! - [`split_story_into_pages`] cuts the generated story into a fixed number
//!   of pages.
//! - [`StoryPipeline`] runs the stages in order (validate, character, story,
//!   segment, illustrate, assemble) against any [`GenerationService`].
//!
//! # Example
//!
//! ```rust,ignore
//! use storybook_core::StoryRequest;
//! use storybook_narrative::{PipelineConfig, StoryPipeline};
//!
//! # async fn example(service: impl storybook_interface::GenerationService) -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = StoryPipeline::new(service, PipelineConfig::default());
//! let report = pipeline.run(&StoryRequest::new("The Brave Fox", "Adventure")).await?;
//! println!("{} pages", report.storybook().pages.len());
//! # Ok(())
//! # }
//! ```
//!
//! [`GenerationService`]: storybook_interface::GenerationService

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pipeline;
pub mod prompts;
mod segmenter;

pub use pipeline::{PipelineConfig, PipelineConfigBuilder, PipelineReport, StoryPipeline};
pub use segmenter::{paginate_by_reading_level, split_story_into_pages};
