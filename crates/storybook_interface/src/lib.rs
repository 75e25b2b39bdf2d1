//! Trait definitions for the Storybook generation pipeline.
//!
//! Provider clients implement [`TextGenerator`] and [`ImageGenerator`].
//! The pipeline only depends on [`GenerationService`], which combines the two
//! into the operations a story run needs, and on an optional
//! [`StorybookRenderer`] for the final document.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{GenerationService, ImageGenerator, StorybookRenderer, TextGenerator};
