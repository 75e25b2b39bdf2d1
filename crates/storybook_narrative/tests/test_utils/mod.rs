//! Test utilities for pipeline tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;
use storybook_core::{RenderSummary, Storybook};
use storybook_error::{
    AuthError, RenderError, StorybookResult, TimeoutError, TransportError, TransportErrorKind,
};
use storybook_interface::{GenerationService, StorybookRenderer};

/// How a page's illustration should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum ImageFailure {
    Timeout,
    Transport,
    Auth,
}

/// Mock generation service.
///
/// Text prompts are answered in order from a script. Image calls succeed
/// with a fake path unless the page is listed as failing.
pub struct MockService {
    replies: Mutex<Vec<String>>,
    failures: Vec<(usize, ImageFailure)>,
    text_prompts: Arc<Mutex<Vec<String>>>,
    image_calls: Arc<Mutex<Vec<(usize, String)>>>,
}

impl MockService {
    /// Answer text prompts with `character` then `story`.
    pub fn new(character: &str, story: &str) -> Self {
        Self {
            replies: Mutex::new(vec![story.to_string(), character.to_string()]),
            failures: Vec::new(),
            text_prompts: Arc::new(Mutex::new(Vec::new())),
            image_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail the illustration of `page` with `failure`.
    pub fn failing(mut self, page: usize, failure: ImageFailure) -> Self {
        self.failures.push((page, failure));
        self
    }

    /// Text prompts received so far.
    #[allow(dead_code)]
    pub fn text_prompts(&self) -> Vec<String> {
        self.text_prompts.lock().unwrap().clone()
    }

    /// Number of text calls made.
    pub fn text_calls(&self) -> usize {
        self.text_prompts.lock().unwrap().len()
    }

    /// Pages an illustration was requested for.
    pub fn image_pages(&self) -> HashSet<usize> {
        self.image_calls.lock().unwrap().iter().map(|(p, _)| *p).collect()
    }

    /// Number of image calls made.
    pub fn image_calls(&self) -> usize {
        self.image_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationService for MockService {
    async fn generate_text(&self, prompt: &str) -> StorybookResult<String> {
        self.text_prompts.lock().unwrap().push(prompt.to_string());
        self.replies.lock().unwrap().pop().ok_or_else(|| {
            TransportError::new(TransportErrorKind::Status {
                status: 500,
                body: "no scripted reply".to_string(),
            })
            .into()
        })
    }

    async fn generate_image(&self, prompt: &str, page: usize) -> StorybookResult<PathBuf> {
        self.image_calls
            .lock()
            .unwrap()
            .push((page, prompt.to_string()));

        match self.failures.iter().find(|(p, _)| *p == page).map(|(_, f)| *f) {
            Some(ImageFailure::Timeout) => Err(TimeoutError::new(format!("page {page}"), 20).into()),
            Some(ImageFailure::Transport) => Err(TransportError::new(TransportErrorKind::Status {
                status: 502,
                body: "bad gateway".to_string(),
            })
            .into()),
            Some(ImageFailure::Auth) => Err(AuthError::new("LEONARDO_API_KEY").into()),
            None => Ok(PathBuf::from(format!("/images/page_{page:02}.png"))),
        }
    }
}

/// Renderer that records what it was asked to render.
#[derive(Clone, Default)]
pub struct MockRenderer {
    fail: bool,
    rendered: Arc<Mutex<Vec<Storybook>>>,
    threads: Arc<Mutex<Vec<ThreadId>>>,
}

impl MockRenderer {
    /// A renderer whose every call fails.
    #[allow(dead_code)]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Storybooks rendered so far.
    #[allow(dead_code)]
    pub fn rendered(&self) -> Vec<Storybook> {
        self.rendered.lock().unwrap().clone()
    }

    /// Threads each render ran on.
    #[allow(dead_code)]
    pub fn threads(&self) -> Vec<ThreadId> {
        self.threads.lock().unwrap().clone()
    }
}

impl StorybookRenderer for MockRenderer {
    fn render(&self, book: &Storybook, path: &Path) -> StorybookResult<Option<RenderSummary>> {
        self.threads.lock().unwrap().push(std::thread::current().id());
        if self.fail {
            return Err(RenderError::new("disk full").into());
        }
        self.rendered.lock().unwrap().push(book.clone());
        let illustrated = book.illustrated_pages();
        if illustrated == 0 {
            return Ok(None);
        }
        Ok(Some(RenderSummary::new(
            path,
            illustrated,
            book.pages.len() - illustrated,
        )))
    }
}
