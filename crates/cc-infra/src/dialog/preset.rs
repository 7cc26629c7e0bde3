use anyhow::Result;
use async_trait::async_trait;
use cc_core::ports::{DeleteConfirmation, DialogPort};
use tracing::info;

/// Answers every confirmation with a fixed choice. For headless runs where no
/// one can click a dialog.
pub struct PresetDialog {
    answer: DeleteConfirmation,
}

impl PresetDialog {
    pub fn new(answer: DeleteConfirmation) -> Self {
        Self { answer }
    }

    /// Always cancels: nothing is ever deleted through a confirmation.
    pub fn cancelling() -> Self {
        Self::new(DeleteConfirmation::Cancel)
    }
}

#[async_trait]
impl DialogPort for PresetDialog {
    async fn confirm_delete(&self, file_name: &str) -> Result<DeleteConfirmation> {
        info!(file_name, answer = ?self.answer, "Answered delete confirmation");
        Ok(self.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_preset_answer() {
        let dialog = PresetDialog::new(DeleteConfirmation::Primary {
            delete_permanently: true,
        });
        assert_eq!(
            dialog.confirm_delete("a.png").await.unwrap(),
            DeleteConfirmation::Primary {
                delete_permanently: true
            }
        );
        assert_eq!(
            PresetDialog::cancelling().confirm_delete("a.png").await.unwrap(),
            DeleteConfirmation::Cancel
        );
    }
}
