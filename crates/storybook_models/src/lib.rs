//! Text and image provider integrations for Storybook.
//!
//! - [`OpenAiClient`] talks to an OpenAI-compatible chat completions API.
//! - [`LeonardoClient`] talks to the Leonardo image generation API, which
//!   works by submitting a job and polling for its result.
//! - [`GenerationClient`] combines one of each with a [`MediaStorage`]
//!   backend into the [`GenerationService`] the pipeline uses.
//!
//! ```no_run
//! use std::sync::Arc;
//! use storybook_interface::GenerationService;
//! use storybook_models::{GenerationClient, LeonardoClient, OpenAiClient};
//! use storybook_storage::FileSystemStorage;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GenerationClient::builder()
//!     .text(OpenAiClient::from_env("gpt-4")?)
//!     .image(LeonardoClient::from_env()?)
//!     .storage(Arc::new(FileSystemStorage::new("images")?))
//!     .build()?;
//!
//! let character = client.generate_text("Describe a brave fox.").await?;
//! let path = client.generate_image(&character, 1).await?;
//! println!("{}", path.display());
//! # Ok(())
//! # }
//! ```
//!
//! [`MediaStorage`]: storybook_storage::MediaStorage
//! [`GenerationService`]: storybook_interface::GenerationService

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generation;
mod http;
mod leonardo;
mod openai;

pub use generation::{DEFAULT_IMAGE_MODEL, GenerationClient, GenerationClientBuilder, ImageSettings};
pub use leonardo::{LEONARDO_API_KEY, LEONARDO_BASE_URL, LeonardoClient};
pub use openai::{OPENAI_API_KEY, OPENAI_BASE_URL, OpenAiClient};
