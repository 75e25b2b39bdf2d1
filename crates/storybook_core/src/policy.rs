//! Content and polling policies.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Topics kept out of every prompt and rejected in user input.
pub const DEFAULT_BANNED_TOPICS: &[&str] = &["violence", "drugs", "kill", "blood", "weapon", "death"];
/// Default narrative tone.
pub const DEFAULT_TONE: &str = "friendly and imaginative";
/// Default illustration style.
pub const DEFAULT_ART_STYLE: &str = "warm, colorful, hand-drawn style suitable for children";
/// Default reader age range.
pub const DEFAULT_AGE_GROUP: &str = "5–10";

fn default_banned_topics() -> Vec<String> {
    DEFAULT_BANNED_TOPICS.iter().map(|t| t.to_string()).collect()
}

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

fn default_art_style() -> String {
    DEFAULT_ART_STYLE.to_string()
}

fn default_age_group() -> String {
    DEFAULT_AGE_GROUP.to_string()
}

fn default_story_pages() -> usize {
    20
}

/// Immutable content settings shared by prompt builders and the safety filter.
///
/// # Examples
///
/// ```
/// use storybook_core::ContentPolicy;
///
/// let policy = ContentPolicy::default();
/// assert_eq!(policy.banned_list(), "violence, drugs, kill, blood, weapon, death");
/// assert_eq!(*policy.story_pages(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ContentPolicy {
    /// Words that must not appear in inputs or prompts
    #[serde(default = "default_banned_topics")]
    banned_topics: Vec<String>,
    /// Narrative tone requested from the text model
    #[serde(default = "default_tone")]
    tone: String,
    /// Illustration style requested from the image model
    #[serde(default = "default_art_style")]
    art_style: String,
    /// Reader age range used when a request does not name one
    #[serde(default = "default_age_group")]
    age_group: String,
    /// Page count requested in the story prompt
    #[serde(default = "default_story_pages")]
    story_pages: usize,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self {
            banned_topics: default_banned_topics(),
            tone: default_tone(),
            art_style: default_art_style(),
            age_group: default_age_group(),
            story_pages: default_story_pages(),
        }
    }
}

impl ContentPolicy {
    /// Returns a copy with a different banned-topic list.
    pub fn with_banned_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.banned_topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Returns a copy with a different tone.
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    /// Returns a copy with a different art style.
    pub fn with_art_style(mut self, art_style: impl Into<String>) -> Self {
        self.art_style = art_style.into();
        self
    }

    /// Returns a copy requesting a different story length.
    pub fn with_story_pages(mut self, story_pages: usize) -> Self {
        self.story_pages = story_pages;
        self
    }

    /// Banned topics joined with `", "`, as embedded in prompts.
    pub fn banned_list(&self) -> String {
        self.banned_topics.join(", ")
    }
}

/// How long to wait for an asynchronous image job.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use storybook_core::PollPolicy;
///
/// let policy = PollPolicy::default();
/// assert_eq!(policy.max_attempts(), 20);
/// assert_eq!(policy.interval(), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    max_attempts: u32,
    interval: Duration,
}

impl PollPolicy {
    /// Creates a policy. At least one attempt is always made.
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    /// Total number of status checks before giving up.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before each status check, including the first, so the longest
    /// wait is `max_attempts * interval`.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(20, Duration::from_secs(2))
    }
}

/// How many sentences a reader at a given level gets per page.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    /// One sentence per page
    Early,
    /// Two sentences per page
    #[default]
    Intermediate,
    /// Four sentences per page
    Advanced,
}

impl ReadingLevel {
    /// Sentences grouped on one page at this level.
    pub fn sentences_per_page(&self) -> usize {
        match self {
            Self::Early => 1,
            Self::Intermediate => 2,
            Self::Advanced => 4,
        }
    }
}
