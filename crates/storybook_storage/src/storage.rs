//! Storage trait and the values it exchanges.

use std::path::PathBuf;
use storybook_error::StorybookResult;

/// Backend that persists illustration bytes.
#[async_trait::async_trait]
pub trait MediaStorage: Send + Sync {
    /// Store media and return a reference to it.
    async fn store(&self, data: &[u8], metadata: &MediaMetadata)
    -> StorybookResult<MediaReference>;
}

/// What is being stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMetadata {
    /// Page the illustration belongs to
    pub page: usize,
    /// MIME type (e.g., "image/png")
    pub mime_type: String,
}

impl MediaMetadata {
    /// Metadata for a page illustration, with the MIME type sniffed from
    /// the leading bytes. Unknown formats are stored as PNG.
    pub fn for_page(page: usize, data: &[u8]) -> Self {
        let mime_type = if data.starts_with(&[0xff, 0xd8, 0xff]) {
            "image/jpeg"
        } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            "image/webp"
        } else {
            "image/png"
        };
        Self {
            page,
            mime_type: mime_type.to_string(),
        }
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/png" => "png",
            _ => "bin",
        }
    }
}

/// Where a stored illustration ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    /// Backend-specific path to the media
    pub storage_path: String,
    /// MIME type
    pub mime_type: String,
    /// Page the illustration belongs to
    pub page: usize,
}

impl MediaReference {
    /// Storage path as a filesystem path.
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.storage_path)
    }
}
