//! OpenAI chat completions provider.

mod client;
mod dto;

pub use client::{OPENAI_API_KEY, OPENAI_BASE_URL, OpenAiClient};
