use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use cc_core::ports::{BoxedFileStream, BoxedReadStream, FileHandle, StorageReceiverPort};
use tokio::fs;
use tracing::debug;

/// Allocates backing files as `<root>/<uuid>.<extension>`.
pub struct FsStorageReceiver {
    root: PathBuf,
}

impl FsStorageReceiver {
    /// The directory is created on first allocation.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl StorageReceiverPort for FsStorageReceiver {
    async fn allocate_empty_file(&self, extension: &str) -> Result<FileHandle> {
        fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("create canvas dir failed: {}", self.root.display()))?;

        let id = uuid::Uuid::new_v4();
        let file_name = match extension.trim_start_matches('.') {
            "" => id.to_string(),
            ext => format!("{id}.{ext}"),
        };
        let path = self.root.join(file_name);

        // create_new: never adopt or truncate an existing file.
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .with_context(|| format!("allocate canvas file failed: {}", path.display()))?;

        debug!(file = %path.display(), "Allocated canvas file");
        Ok(FileHandle::new(path))
    }

    async fn open_for_read_write(&self, handle: &FileHandle) -> Result<BoxedFileStream> {
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(handle.path())
            .await
            .with_context(|| format!("open canvas file failed: {}", handle.path().display()))?;
        Ok(Box::new(file))
    }

    async fn open_for_read(&self, handle: &FileHandle) -> Result<BoxedReadStream> {
        let file = fs::File::open(handle.path())
            .await
            .with_context(|| format!("read canvas file failed: {}", handle.path().display()))?;
        Ok(Box::new(file))
    }

    async fn discard(&self, handle: &FileHandle) -> Result<()> {
        match fs::remove_file(handle.path()).await {
            Ok(()) => {
                debug!(file = %handle.path().display(), "Discarded canvas file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("discard canvas file failed: {}", handle.path().display())
            }),
        }
    }
}
