//! Leonardo image generation provider.

mod client;
mod dto;

pub use client::{LEONARDO_API_KEY, LEONARDO_BASE_URL, LeonardoClient};
