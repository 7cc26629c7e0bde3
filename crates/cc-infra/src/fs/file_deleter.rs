use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use cc_core::ports::{FileDeleterPort, FileHandle};
use tokio::fs;
use tracing::{info, warn};

/// Deletes backing files. A recoverable delete moves the file into `trash_dir`.
pub struct FsFileDeleter {
    trash_dir: PathBuf,
}

impl FsFileDeleter {
    pub fn new(trash_dir: impl Into<PathBuf>) -> Self {
        Self {
            trash_dir: trash_dir.into(),
        }
    }

    async fn move_to_trash(&self, handle: &FileHandle) -> Result<PathBuf> {
        fs::create_dir_all(&self.trash_dir)
            .await
            .with_context(|| format!("create trash dir failed: {}", self.trash_dir.display()))?;

        let file_name = handle.file_name().unwrap_or("item");
        let mut target = self.trash_dir.join(file_name);
        if fs::try_exists(&target).await.unwrap_or(false) {
            target = self
                .trash_dir
                .join(format!("{}-{}", uuid::Uuid::new_v4(), file_name));
        }

        if let Err(e) = fs::rename(handle.path(), &target).await {
            // Rename fails across filesystems; copy then remove instead.
            warn!(error = %e, "rename into trash failed, copying");
            fs::copy(handle.path(), &target).await.with_context(|| {
                format!(
                    "copy to trash failed: {} -> {}",
                    handle.path().display(),
                    target.display()
                )
            })?;
            fs::remove_file(handle.path())
                .await
                .with_context(|| format!("remove after copy failed: {}", handle.path().display()))?;
        }
        Ok(target)
    }
}

#[async_trait]
impl FileDeleterPort for FsFileDeleter {
    async fn delete(&self, handle: &FileHandle, permanently: bool) -> Result<()> {
        if permanently {
            fs::remove_file(handle.path())
                .await
                .with_context(|| format!("delete file failed: {}", handle.path().display()))?;
            info!(file = %handle.path().display(), "Deleted canvas file permanently");
        } else {
            let target = self.move_to_trash(handle).await?;
            info!(
                file = %handle.path().display(),
                trash = %target.display(),
                "Moved canvas file to trash"
            );
        }
        Ok(())
    }
}
