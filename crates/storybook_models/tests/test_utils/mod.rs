//! Test utilities for storybook_models tests.
//!
//! Mock text and image backends that record how they were called.

pub mod mock_image;
pub mod mock_text;

#[allow(unused_imports)]
pub use mock_image::{MockImageGenerator, PollResponse};
#[allow(unused_imports)]
pub use mock_text::MockTextGenerator;
