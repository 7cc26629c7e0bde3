use std::sync::Arc;

use cc_core::paste::{Failure, FailureKind, Outcome};
use cc_core::ports::{DeleteConfirmation, DialogPort, FileDeleterPort, SettingsPort};
use cc_core::ItemId;
use tracing::{info, warn};

use crate::session::CanvasSession;

/// Delete a canvas item and its backing file, asking first when the user wants
/// to be asked.
///
/// Without a confirmation the delete is recoverable. A cancelled confirmation
/// changes nothing.
pub struct DeleteCanvasItem {
    session: Arc<CanvasSession>,
    settings: Arc<dyn SettingsPort>,
    dialog: Arc<dyn DialogPort>,
    deleter: Arc<dyn FileDeleterPort>,
}

impl DeleteCanvasItem {
    pub fn from_ports(
        session: Arc<CanvasSession>,
        settings: Arc<dyn SettingsPort>,
        dialog: Arc<dyn DialogPort>,
        deleter: Arc<dyn FileDeleterPort>,
    ) -> Self {
        Self {
            session,
            settings,
            dialog,
            deleter,
        }
    }

    #[tracing::instrument(
        name = "usecase.delete_canvas_item.execute",
        skip(self, item),
        fields(item = %item)
    )]
    pub async fn execute(&self, item: &ItemId) -> Outcome {
        let settings = match self.settings.load().await {
            Ok(settings) => settings,
            Err(e) => {
                return Outcome::Failure(Failure::with_cause(
                    FailureKind::Unknown,
                    "load settings",
                    e,
                ))
            }
        };

        let delete_permanently = if settings.show_delete_confirmation {
            // The dialog is answered without holding the session, so the canvas
            // stays usable while it is open.
            let file_name = match self.session.lock().await.model(item) {
                Some(model) => model
                    .file()
                    .and_then(|f| f.file_name().map(str::to_string))
                    .unwrap_or_else(|| item.to_string()),
                None => return not_on_canvas(item),
            };

            match self.dialog.confirm_delete(&file_name).await {
                Ok(DeleteConfirmation::Primary { delete_permanently }) => delete_permanently,
                Ok(DeleteConfirmation::Cancel) => {
                    info!("Delete cancelled");
                    return Outcome::Cancel;
                }
                Err(e) => {
                    return Outcome::Failure(Failure::with_cause(
                        FailureKind::Unknown,
                        "ask for delete confirmation",
                        e,
                    ))
                }
            }
        } else {
            false
        };

        let mut state = self.session.lock().await;
        let Some(model) = state.model(item) else {
            return not_on_canvas(item);
        };

        if let Some(file) = model.file() {
            if let Err(e) = self.deleter.delete(file, delete_permanently).await {
                warn!(file = %file.path().display(), error = %e, "Failed to delete backing file");
                return Outcome::Failure(Failure::with_cause(
                    FailureKind::IoDenied,
                    format!("delete {}", file.path().display()),
                    e,
                ));
            }
        }

        match state.remove(item) {
            Ok(mut model) => {
                model.dispose();
                self.session.save_layout(&state).await;
                info!(delete_permanently, "Deleted canvas item");
                Outcome::Success(())
            }
            Err(e) => Outcome::Failure(Failure::with_cause(
                FailureKind::Unknown,
                "remove item from canvas",
                e,
            )),
        }
    }
}

fn not_on_canvas(item: &ItemId) -> Outcome {
    Outcome::Failure(Failure::new(
        FailureKind::Unknown,
        format!("item {item} is not on the canvas"),
    ))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use cc_core::canvas::Point;
    use cc_core::ports::{CanvasSettings, FileHandle};
    use cc_core::ClipboardPayload;
    use cc_infra::{FsStorageReceiver, ImageCrateCodec};
    use mockall::predicate::eq;
    use tempfile::TempDir;

    use super::*;
    use crate::usecases::PasteIntoCanvas;

    mockall::mock! {
        Dialog {}

        #[async_trait]
        impl DialogPort for Dialog {
            async fn confirm_delete(&self, file_name: &str) -> anyhow::Result<DeleteConfirmation>;
        }
    }

    mockall::mock! {
        Deleter {}

        #[async_trait]
        impl FileDeleterPort for Deleter {
            async fn delete(&self, handle: &FileHandle, permanently: bool) -> anyhow::Result<()>;
        }
    }

    struct FixedSettings(CanvasSettings);

    #[async_trait]
    impl SettingsPort for FixedSettings {
        async fn load(&self) -> anyhow::Result<CanvasSettings> {
            Ok(self.0.clone())
        }
    }

    struct Fixture {
        _dir: TempDir,
        session: Arc<CanvasSession>,
        item: ItemId,
        file: FileHandle,
    }

    async fn canvas_with_one_item() -> Fixture {
        let dir = TempDir::new().unwrap();
        let session = Arc::new(CanvasSession::new());
        let paste = PasteIntoCanvas::from_ports(
            session.clone(),
            Arc::new(FsStorageReceiver::new(dir.path())),
            Arc::new(ImageCrateCodec::new(64)),
        );
        let Outcome::Success(item) = paste
            .execute(&ClipboardPayload::from_text("delete me"), Point::ORIGIN)
            .await
        else {
            panic!("paste failed");
        };
        let file = session.backing_file(&item).await.unwrap();
        Fixture {
            _dir: dir,
            session,
            item,
            file,
        }
    }

    fn usecase(
        fixture: &Fixture,
        show_delete_confirmation: bool,
        dialog: MockDialog,
        deleter: MockDeleter,
    ) -> DeleteCanvasItem {
        DeleteCanvasItem::from_ports(
            fixture.session.clone(),
            Arc::new(FixedSettings(CanvasSettings {
                show_delete_confirmation,
                ..CanvasSettings::default()
            })),
            Arc::new(dialog),
            Arc::new(deleter),
        )
    }

    #[tokio::test]
    async fn test_cancel_leaves_everything_unchanged() {
        let fixture = canvas_with_one_item().await;
        let mut dialog = MockDialog::new();
        let file_name = fixture.file.file_name().unwrap().to_string();
        dialog
            .expect_confirm_delete()
            .withf(move |name| name == file_name)
            .times(1)
            .returning(|_| Ok(DeleteConfirmation::Cancel));
        let mut deleter = MockDeleter::new();
        deleter.expect_delete().never();

        let outcome = usecase(&fixture, true, dialog, deleter)
            .execute(&fixture.item)
            .await;

        assert!(outcome.is_cancel());
        assert_eq!(fixture.session.len().await, 1);
        assert!(fixture.file.path().exists());
    }

    #[tokio::test]
    async fn test_confirmed_permanent_delete() {
        let fixture = canvas_with_one_item().await;
        let mut dialog = MockDialog::new();
        dialog.expect_confirm_delete().times(1).returning(|_| {
            Ok(DeleteConfirmation::Primary {
                delete_permanently: true,
            })
        });
        let mut deleter = MockDeleter::new();
        deleter
            .expect_delete()
            .with(eq(fixture.file.clone()), eq(true))
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = usecase(&fixture, true, dialog, deleter)
            .execute(&fixture.item)
            .await;

        assert!(outcome.is_success());
        assert!(fixture.session.is_empty().await);
        assert!(fixture.session.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_hidden_confirmation_deletes_recoverably() {
        let fixture = canvas_with_one_item().await;
        let mut dialog = MockDialog::new();
        dialog.expect_confirm_delete().never();
        let mut deleter = MockDeleter::new();
        deleter
            .expect_delete()
            .with(eq(fixture.file.clone()), eq(false))
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = usecase(&fixture, false, dialog, deleter)
            .execute(&fixture.item)
            .await;

        assert!(outcome.is_success());
        assert!(fixture.session.is_empty().await);
    }

    #[tokio::test]
    async fn test_failed_file_delete_keeps_item() {
        let fixture = canvas_with_one_item().await;
        let mut deleter = MockDeleter::new();
        deleter
            .expect_delete()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("permission denied")));

        let outcome = usecase(&fixture, false, MockDialog::new(), deleter)
            .execute(&fixture.item)
            .await;

        let Outcome::Failure(failure) = outcome else {
            panic!("expected failure");
        };
        assert_eq!(failure.kind(), FailureKind::IoDenied);
        assert_eq!(fixture.session.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_item_fails() {
        let fixture = canvas_with_one_item().await;

        let outcome = usecase(&fixture, true, MockDialog::new(), MockDeleter::new())
            .execute(&ItemId::from("ghost"))
            .await;

        assert!(matches!(outcome, Outcome::Failure(_)));
        assert_eq!(fixture.session.len().await, 1);
    }
}
