//! Rendering outcome.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a document renderer produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RenderSummary {
    /// Where the document was written
    path: PathBuf,
    /// Pages included in the document
    rendered_pages: usize,
    /// Pages left out because they had no image
    skipped_pages: usize,
}

impl RenderSummary {
    /// Creates a summary.
    pub fn new(path: impl Into<PathBuf>, rendered_pages: usize, skipped_pages: usize) -> Self {
        Self {
            path: path.into(),
            rendered_pages,
            skipped_pages,
        }
    }
}
