use async_trait::async_trait;

use super::FileHandle;

#[async_trait]
pub trait FileDeleterPort: Send + Sync {
    /// Delete a backing file. A non-permanent delete must be recoverable.
    async fn delete(&self, handle: &FileHandle, permanently: bool) -> anyhow::Result<()>;
}
