//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Sender of a message in a text generation request.
///
/// Serializes in lower case, which is what chat completion APIs expect.
///
/// # Examples
///
/// ```
/// use storybook_core::Role;
///
/// assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
/// assert_eq!(format!("{}", Role::System), "System");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages provide context and instructions
    System,
    /// User messages carry the prompt
    User,
    /// Assistant messages are model output
    Assistant,
}
