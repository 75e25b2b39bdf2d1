//! Flat-file storage for downloaded illustrations.
//!
//! Each illustration is written once under the image directory with a name
//! derived from its page number and the time it was stored, e.g.
//! `page_03_20250101T120000123.png`.
//!
//! # Example
//!
//! ```rust
//! use storybook_storage::{FileSystemStorage, MediaMetadata, MediaStorage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = std::env::temp_dir().join("storybook-doc");
//! let storage = FileSystemStorage::new(&dir)?;
//! let data = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
//!
//! let reference = storage.store(&data, &MediaMetadata::for_page(3, &data)).await?;
//! assert!(reference.storage_path.contains("page_03_"));
//! assert_eq!(std::fs::read(reference.path())?, data);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod storage;

pub use filesystem::FileSystemStorage;
pub use storage::{MediaMetadata, MediaReference, MediaStorage};
pub use storybook_error::{StorageError, StorageErrorKind};
