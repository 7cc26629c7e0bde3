use async_trait::async_trait;

/// User's answer to a delete confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Primary { delete_permanently: bool },
    Cancel,
}

#[async_trait]
pub trait DialogPort: Send + Sync {
    /// Ask whether `file_name` should be deleted, and how.
    ///
    /// Dismissing the dialog is `Cancel`, not an error.
    async fn confirm_delete(&self, file_name: &str) -> anyhow::Result<DeleteConfirmation>;
}
