//! Story inputs and the assembled storybook.

use crate::DEFAULT_AGE_GROUP;
use serde::{Deserialize, Serialize};
use storybook_error::{BuilderError, BuilderErrorKind};

/// What the reader asked for.
///
/// # Examples
///
/// ```
/// use storybook_core::StoryRequest;
///
/// let request = StoryRequest::builder()
///     .title("The Brave Fox")
///     .genre("Adventure")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.age_group(), "5–10");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct StoryRequest {
    /// Story title
    title: String,
    /// Story genre
    genre: String,
    /// Target reader age range
    #[builder(default = "DEFAULT_AGE_GROUP.to_string()")]
    age_group: String,
}

impl StoryRequest {
    /// Creates a new request builder.
    pub fn builder() -> StoryRequestBuilder {
        StoryRequestBuilder::default()
    }

    /// Creates a request for the default age group.
    pub fn new(title: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            age_group: DEFAULT_AGE_GROUP.to_string(),
        }
    }
}

impl StoryRequestBuilder {
    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] if the title or genre is missing.
    pub fn build(&self) -> Result<StoryRequest, BuilderError> {
        self.build_internal()
            .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))
    }
}

/// One page of a storybook.
///
/// `image_prompt` is set once the page has been sent for illustration,
/// whether or not that succeeds. `image` stays `None` unless it succeeds.
/// Both serialize as `null` rather than being omitted.
///
/// # Examples
///
/// ```
/// use storybook_core::Page;
///
/// let page = Page::new(1, "The fox woke up.");
/// let json = serde_json::to_value(&page).unwrap();
/// assert!(json["image"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub index: usize,
    /// Text shown on the page
    pub text: String,
    /// Prompt sent to the image service
    pub image_prompt: Option<String>,
    /// Local path of the downloaded illustration
    pub image: Option<String>,
}

impl Page {
    /// Creates an unillustrated page.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            image_prompt: None,
            image: None,
        }
    }

    /// Whether an illustration was stored for this page.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// The finished artifact of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storybook {
    /// Story title
    pub title: String,
    /// Story genre
    pub genre: String,
    /// Main character description
    pub character: String,
    /// Full story text
    pub story: String,
    /// Pages in reading order
    pub pages: Vec<Page>,
}

impl Storybook {
    /// Number of pages that received an illustration.
    pub fn illustrated_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.has_image()).count()
    }
}
