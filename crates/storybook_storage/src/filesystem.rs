//! Filesystem-based illustration storage.

use crate::{MediaMetadata, MediaReference, MediaStorage};
use std::path::{Path, PathBuf};
use storybook_error::{StorageError, StorageErrorKind, StorybookResult};

/// Stores illustrations as plain files in one directory.
///
/// Files are named `page_{NN}_{timestamp}.{ext}`. Writes go to a temporary
/// file that is renamed into place, so a crash never leaves a partial image
/// under its final name.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base_path: PathBuf,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StorybookResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem storage");
        Ok(Self { base_path })
    }

    /// Root directory for stored images.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn file_name(metadata: &MediaMetadata) -> String {
        let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%3f");
        format!(
            "page_{:02}_{}.{}",
            metadata.page,
            timestamp,
            metadata.extension()
        )
    }
}

#[async_trait::async_trait]
impl MediaStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data, metadata), fields(size = data.len(), page = metadata.page))]
    async fn store(
        &self,
        data: &[u8],
        metadata: &MediaMetadata,
    ) -> StorybookResult<MediaReference> {
        let path = self.base_path.join(Self::file_name(metadata));

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            path = %path.display(),
            size = data.len(),
            "Stored illustration"
        );

        Ok(MediaReference {
            storage_path: path.to_string_lossy().to_string(),
            mime_type: metadata.mime_type.clone(),
            page: metadata.page,
        })
    }
}
