//! The storybook pipeline.

use crate::prompts::{character_prompt, image_prompt, story_prompt};
use crate::split_story_into_pages;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use storybook_core::{ContentPolicy, Page, RenderSummary, StoryRequest, Storybook};
use storybook_error::{BuilderError, BuilderErrorKind, StorybookResult};
use storybook_interface::{GenerationService, StorybookRenderer};
use storybook_security::SafetyFilter;
use tracing::{debug, error, info, instrument, warn};

/// Settings for one pipeline.
///
/// # Examples
///
/// ```
/// use storybook_narrative::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .total_pages(8_usize)
///     .output_path("fox.pdf")
///     .build()
///     .unwrap();
/// assert_eq!(*config.total_pages(), 8);
/// assert_eq!(*config.max_concurrent_illustrations(), 2);
///
/// assert!(PipelineConfig::builder().total_pages(0_usize).build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters, derive_builder::Builder)]
#[builder(
    setter(into),
    build_fn(private, name = "build_internal", validate = "Self::validate")
)]
pub struct PipelineConfig {
    /// Content policy for prompts and the safety filter
    #[builder(default)]
    policy: ContentPolicy,
    /// Number of pages the story is split into
    #[builder(default = "5")]
    total_pages: usize,
    /// Illustration requests allowed in flight at once
    #[builder(default = "2")]
    max_concurrent_illustrations: usize,
    /// Where the rendered document goes, if rendering is wanted
    #[builder(default, setter(into, strip_option))]
    output_path: Option<PathBuf>,
}

impl PipelineConfig {
    /// Creates a new config builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            policy: ContentPolicy::default(),
            total_pages: 5,
            max_concurrent_illustrations: 2,
            output_path: None,
        }
    }
}

impl PipelineConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.total_pages == Some(0) {
            return Err("total_pages must be at least 1".to_string());
        }
        if self.max_concurrent_illustrations == Some(0) {
            return Err("max_concurrent_illustrations must be at least 1".to_string());
        }
        Ok(())
    }

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] if a count is zero.
    pub fn build(&self) -> Result<PipelineConfig, BuilderError> {
        self.build_internal()
            .map_err(|e| BuilderError::new(BuilderErrorKind::ValidationFailed(e.to_string())))
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct PipelineReport {
    /// The assembled storybook
    storybook: Storybook,
    /// The rendered document, if one was written
    document: Option<RenderSummary>,
}

impl PipelineReport {
    /// Takes the storybook out of the report.
    pub fn into_storybook(self) -> Storybook {
        self.storybook
    }
}

/// Runs a story request through every stage.
///
/// Stages run in order: validate the input, generate the character, generate
/// the story, split it into pages, illustrate each page, assemble and render.
/// Validation and text generation failures end the run. An illustration
/// failure only leaves that page without an image, except for a rejected
/// credential, which ends the run. A render failure leaves the report
/// without a document.
pub struct StoryPipeline<G> {
    service: G,
    config: PipelineConfig,
    filter: SafetyFilter,
    renderer: Option<Arc<dyn StorybookRenderer>>,
}

impl<G: GenerationService> StoryPipeline<G> {
    /// Creates a pipeline over a generation service.
    pub fn new(service: G, config: PipelineConfig) -> Self {
        let filter = SafetyFilter::new(config.policy());
        Self {
            service,
            config,
            filter,
            renderer: None,
        }
    }

    /// Renders each finished storybook to the configured output path.
    pub fn with_renderer(mut self, renderer: impl StorybookRenderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// The generation service.
    pub fn service(&self) -> &G {
        &self.service
    }

    /// The pipeline settings.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline for one request.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or unsafe title or genre, any
    /// error from character or story generation, and an auth error if the
    /// image service rejects its credential.
    #[instrument(skip(self, request), fields(title = %request.title(), genre = %request.genre(), pages = self.config.total_pages))]
    pub async fn run(&self, request: &StoryRequest) -> StorybookResult<PipelineReport> {
        let policy = self.config.policy();

        self.filter.validate("title", request.title())?;
        self.filter.validate("genre", request.genre())?;
        info!("Input validated");

        let character = self
            .service
            .generate_text(&character_prompt(
                policy,
                request.title(),
                request.genre(),
                request.age_group(),
            ))
            .await?;
        self.warn_if_flagged("character", &character);
        info!(chars = character.len(), "Character created");

        let story = self
            .service
            .generate_text(&story_prompt(
                policy,
                request.title(),
                request.genre(),
                &character,
                None,
                request.age_group(),
            ))
            .await?;
        self.warn_if_flagged("story", &story);
        info!(chars = story.len(), "Story generated");

        let pages = split_story_into_pages(&story, self.config.total_pages);
        debug!(pages = pages.len(), "Story segmented");

        let pages = self.illustrate(&character, pages).await?;

        let storybook = Storybook {
            title: request.title().clone(),
            genre: request.genre().clone(),
            character,
            story,
            pages,
        };
        info!(
            pages = storybook.pages.len(),
            illustrated = storybook.illustrated_pages(),
            "Storybook assembled"
        );

        let document = self.render(&storybook).await;
        Ok(PipelineReport {
            storybook,
            document,
        })
    }

    /// Illustrate every page, keeping page order.
    async fn illustrate(&self, character: &str, pages: Vec<Page>) -> StorybookResult<Vec<Page>> {
        let limit = self.config.max_concurrent_illustrations.max(1);
        info!(pages = pages.len(), limit, "Illustrating pages");

        stream::iter(pages.into_iter().map(|page| self.illustrate_page(character, page)))
            .buffered(limit)
            .try_collect()
            .await
    }

    #[instrument(skip(self, character, page), fields(page = page.index))]
    async fn illustrate_page(&self, character: &str, mut page: Page) -> StorybookResult<Page> {
        let prompt = image_prompt(self.config.policy(), character, &page.text, None);

        match self.service.generate_image(&prompt, page.index).await {
            Ok(path) => {
                info!(path = %path.display(), "Page illustrated");
                page.image = Some(path.display().to_string());
            }
            Err(e) if e.is_auth() => return Err(e),
            Err(e) => {
                error!(error = %e, "Illustration failed, continuing without image");
                page.image = None;
            }
        }
        page.image_prompt = Some(prompt);
        Ok(page)
    }

    /// Render on the blocking pool; image decoding and PDF encoding do file IO.
    async fn render(&self, storybook: &Storybook) -> Option<RenderSummary> {
        let (Some(renderer), Some(path)) = (&self.renderer, &self.config.output_path) else {
            return None;
        };

        let renderer = Arc::clone(renderer);
        let book = storybook.clone();
        let target = path.clone();
        let result = tokio::task::spawn_blocking(move || renderer.render(&book, &target)).await;

        match result {
            Ok(Ok(Some(summary))) => {
                info!(
                    path = %summary.path().display(),
                    rendered = summary.rendered_pages(),
                    skipped = summary.skipped_pages(),
                    "Document rendered"
                );
                Some(summary)
            }
            Ok(Ok(None)) => {
                warn!("No pages were available to render");
                None
            }
            Ok(Err(e)) => {
                error!(error = %e, path = %path.display(), "Rendering failed");
                None
            }
            Err(e) => {
                error!(error = %e, path = %path.display(), "Render task did not complete");
                None
            }
        }
    }

    fn warn_if_flagged(&self, what: &str, text: &str) {
        let flagged = self.filter.flagged_topics(text);
        if !flagged.is_empty() {
            warn!(what, topics = ?flagged, "Generated text mentions banned topics");
        }
    }
}
