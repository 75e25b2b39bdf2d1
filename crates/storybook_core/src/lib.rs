//! Core data types for the Storybook generation pipeline.
//!
//! This crate provides the values that flow between pipeline stages: the
//! incoming [`StoryRequest`], the segmented [`Page`]s, the finished
//! [`Storybook`], and the provider-neutral request types used to talk to the
//! text and image services.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod image;
mod message;
mod policy;
mod render;
mod request;
mod role;
mod story;

pub use image::{GenerationJob, ImageRequest, ImageRequestBuilder};
pub use message::Message;
pub use policy::{
    ContentPolicy, DEFAULT_AGE_GROUP, DEFAULT_ART_STYLE, DEFAULT_BANNED_TOPICS, DEFAULT_TONE,
    PollPolicy, ReadingLevel,
};
pub use render::RenderSummary;
pub use request::{
    FinishReason, GenerateRequest, GenerateRequestBuilder, GenerateResponse, TokenUsage,
};
pub use role::Role;
pub use story::{Page, StoryRequest, StoryRequestBuilder, Storybook};
