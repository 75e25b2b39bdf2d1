//! Error types for the Storybook pipeline.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! The four conditions the pipeline reasons about are [`ValidationError`],
//! [`AuthError`], [`TransportError`] and [`TimeoutError`]. The rest cover the
//! ambient concerns (configuration, storage, builders, rendering).
//!
//! # Examples
//!
//! ```
//! use storybook_error::{StorybookResult, TransportError, TransportErrorKind};
//!
//! fn fetch_story() -> StorybookResult<String> {
//!     Err(TransportError::new(TransportErrorKind::Request("connection refused".into())))?
//! }
//!
//! match fetch_story() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod builder;
mod config;
mod error;
mod render;
mod storage;
mod timeout;
mod transport;
mod validation;

pub use auth::AuthError;
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{StorybookError, StorybookErrorKind, StorybookResult};
pub use render::RenderError;
pub use storage::{StorageError, StorageErrorKind};
pub use timeout::TimeoutError;
pub use transport::{TransportError, TransportErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
