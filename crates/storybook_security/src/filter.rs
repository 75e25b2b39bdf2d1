//! Banned-topic filter for user input and generated text.

use storybook_core::ContentPolicy;
use storybook_error::{ValidationError, ValidationErrorKind};
use tracing::{debug, instrument};

/// Case-insensitive substring filter over a banned-topic list.
///
/// # Examples
///
/// ```
/// use storybook_core::ContentPolicy;
/// use storybook_security::SafetyFilter;
///
/// let filter = SafetyFilter::new(&ContentPolicy::default());
/// assert!(filter.is_safe("a story about a kind dragon"));
/// assert!(!filter.is_safe("a story about Violence and blood"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyFilter {
    banned: Vec<String>,
}

impl SafetyFilter {
    /// Create a filter from the policy's banned topics.
    pub fn new(policy: &ContentPolicy) -> Self {
        Self::from_topics(policy.banned_topics())
    }

    /// Create a filter from an explicit topic list.
    pub fn from_topics<S: AsRef<str>>(topics: &[S]) -> Self {
        let banned = topics
            .iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { banned }
    }

    /// Lower-cased banned topics.
    pub fn topics(&self) -> &[String] {
        &self.banned
    }

    /// Returns false iff any banned topic occurs in `text`.
    pub fn is_safe(&self, text: &str) -> bool {
        self.first_match(text).is_none()
    }

    /// Checks several values as one text.
    pub fn is_all_safe<I, S>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.is_safe(&joined)
    }

    /// Every banned topic that occurs in `text`, in policy order.
    pub fn flagged_topics(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.banned
            .iter()
            .filter(|topic| lowered.contains(topic.as_str()))
            .cloned()
            .collect()
    }

    /// Reject a named input field that is empty or mentions a banned topic.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the field and, for unsafe input,
    /// the first banned topic found.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub fn validate(&self, field: &str, text: &str) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            debug!("Input is empty");
            return Err(ValidationError::new(ValidationErrorKind::MissingInput(
                field.to_string(),
            )));
        }
        if let Some(topic) = self.first_match(text) {
            debug!(topic, "Input mentions banned topic");
            return Err(ValidationError::new(ValidationErrorKind::UnsafeInput {
                field: field.to_string(),
                topic: topic.to_string(),
            }));
        }
        Ok(())
    }

    fn first_match(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.banned
            .iter()
            .find(|topic| lowered.contains(topic.as_str()))
            .map(String::as_str)
    }
}
