//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storybook binary.

mod check;
mod commands;
mod create;
mod extend;
mod titles;

pub use check::check_text;
pub use commands::{Cli, Commands, CreateArgs};
pub use create::create_storybook;
pub use extend::extend_story;
pub use titles::suggest_titles;
