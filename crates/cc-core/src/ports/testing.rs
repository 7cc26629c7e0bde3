//! Test doubles for core ports.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;

use super::{BoxedFileStream, BoxedReadStream, FileHandle, StorageReceiverPort};

/// Storage receiver backed by a temporary directory.
pub(crate) struct TempDirReceiver {
    dir: TempDir,
    allocations: AtomicUsize,
    fail_allocations: AtomicBool,
}

impl TempDirReceiver {
    pub(crate) fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            allocations: AtomicUsize::new(0),
            fail_allocations: AtomicBool::new(false),
        }
    }

    pub(crate) fn fail_allocations(&self, fail: bool) {
        self.fail_allocations.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    pub(crate) fn handle(&self, name: &str) -> FileHandle {
        FileHandle::new(self.dir.path().join(name))
    }

    pub(crate) fn write_file(&self, name: &str, bytes: &[u8]) -> FileHandle {
        let handle = self.handle(name);
        std::fs::write(handle.path(), bytes).unwrap();
        handle
    }

    pub(crate) fn read(&self, handle: &FileHandle) -> Vec<u8> {
        std::fs::read(handle.path()).unwrap()
    }

    pub(crate) fn files(&self) -> Vec<FileHandle> {
        std::fs::read_dir(self.dir.path())
            .unwrap()
            .map(|entry| FileHandle::new(entry.unwrap().path()))
            .collect()
    }
}

#[async_trait]
impl StorageReceiverPort for TempDirReceiver {
    async fn allocate_empty_file(&self, extension: &str) -> anyhow::Result<FileHandle> {
        if self.fail_allocations.load(Ordering::SeqCst) {
            anyhow::bail!("allocation disabled");
        }
        let index = self.allocations.fetch_add(1, Ordering::SeqCst);
        let handle = self.handle(&format!("item-{index}.{extension}"));
        tokio::fs::File::create(handle.path()).await?;
        Ok(handle)
    }

    async fn open_for_read_write(&self, handle: &FileHandle) -> anyhow::Result<BoxedFileStream> {
        let file = tokio::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(handle.path())
            .await?;
        Ok(Box::new(file))
    }

    async fn open_for_read(&self, handle: &FileHandle) -> anyhow::Result<BoxedReadStream> {
        Ok(Box::new(tokio::fs::File::open(handle.path()).await?))
    }

    async fn discard(&self, handle: &FileHandle) -> anyhow::Result<()> {
        match tokio::fs::remove_file(handle.path()).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
