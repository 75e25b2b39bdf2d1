//! Message types for text generation requests.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message in a generation request.
///
/// # Examples
///
/// ```
/// use storybook_core::{Message, Role};
///
/// let message = Message::user("Write a story about a fox.");
/// assert_eq!(message.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text of the message
    pub content: String,
}

impl Message {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}
