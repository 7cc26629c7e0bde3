//! Storage Receiver Port
//!
//! Allocates and opens the files that back canvas items.
//!
//! **Semantic:** one canvas item maps to zero-or-one backing file whose extension
//! is chosen by the paste model that writes it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncSeek, AsyncWrite};

/// Reference to a file, either a canvas backing file or a file dropped onto the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileHandle {
    path: PathBuf,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    /// Lowercase extension without the leading dot.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(|ext| ext.to_ascii_lowercase())
    }
}

/// Readable, writable and seekable handle onto a backing file.
pub trait FileStream: AsyncRead + AsyncWrite + AsyncSeek + Send + Unpin {}

impl<T> FileStream for T where T: AsyncRead + AsyncWrite + AsyncSeek + Send + Unpin {}

pub type BoxedFileStream = Box<dyn FileStream>;

pub type BoxedReadStream = Box<dyn AsyncRead + Send + Unpin>;

#[async_trait]
pub trait StorageReceiverPort: Send + Sync {
    /// Create a new, empty file with the given extension (without the leading dot).
    ///
    /// # Guarantees
    /// - Never returns a handle to a file that already held data
    /// - Failing here leaves every existing file untouched
    async fn allocate_empty_file(&self, extension: &str) -> anyhow::Result<FileHandle>;

    /// Open a file for reading and writing, positioned at its start.
    async fn open_for_read_write(&self, handle: &FileHandle) -> anyhow::Result<BoxedFileStream>;

    /// Open a file read-only. Used for dropped file references and reloads.
    async fn open_for_read(&self, handle: &FileHandle) -> anyhow::Result<BoxedReadStream>;

    /// Remove a file from `allocate_empty_file` that was never adopted.
    ///
    /// A file that is already gone counts as discarded.
    async fn discard(&self, handle: &FileHandle) -> anyhow::Result<()>;
}
