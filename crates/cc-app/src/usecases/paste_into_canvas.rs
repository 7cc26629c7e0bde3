use std::sync::Arc;

use cc_core::canvas::Point;
use cc_core::paste::{Failure, FailureKind, Outcome, PasteError, PasteModelDispatcher};
use cc_core::ports::{ImageCodecPort, StorageReceiverPort};
use cc_core::{ClipboardPayload, ItemId};
use tracing::{info, warn};

use crate::session::{CanvasSession, CanvasState};

/// Classify a payload, persist it through the matching paste model and place
/// the new item on top of the canvas.
#[derive(Clone)]
pub struct PasteIntoCanvas {
    session: Arc<CanvasSession>,
    dispatcher: PasteModelDispatcher,
}

impl PasteIntoCanvas {
    pub fn from_ports(
        session: Arc<CanvasSession>,
        receiver: Arc<dyn StorageReceiverPort>,
        codec: Arc<dyn ImageCodecPort>,
    ) -> Self {
        Self {
            session,
            dispatcher: PasteModelDispatcher::new(receiver, codec),
        }
    }

    /// Nothing is added to the canvas unless the item was saved.
    #[tracing::instrument(
        name = "usecase.paste_into_canvas.execute",
        skip(self, payload, position),
        fields(x = position.x, y = position.y)
    )]
    pub async fn execute(&self, payload: &ClipboardPayload, position: Point) -> Outcome<ItemId> {
        let mut state = self.session.lock().await;
        self.paste_locked(&mut state, payload, position).await
    }

    /// Same as [`execute`](Self::execute) for a caller already holding the session
    /// of this use case.
    pub(crate) async fn paste_locked(
        &self,
        state: &mut CanvasState,
        payload: &ClipboardPayload,
        position: Point,
    ) -> Outcome<ItemId> {
        let (content_type, mut model) = self.dispatcher.create_for(payload);

        let saved = match model.set_data_from_payload(payload).await {
            Ok(()) => model.try_save().await,
            Err(e) => Err(e),
        };
        let file = match saved {
            Ok(file) => file,
            Err(e) => {
                model.dispose();
                if !e.is_cancelled() {
                    warn!(content_type = %content_type, error = %e, "Paste failed");
                }
                return Outcome::from(Err::<ItemId, PasteError>(e));
            }
        };

        let item = ItemId::new();
        match state.insert(item.clone(), model, position) {
            Ok(z) => {
                self.session.save_layout(state).await;
                info!(
                    item = %item,
                    content_type = %content_type,
                    file = %file.path().display(),
                    z,
                    "Pasted item onto canvas"
                );
                Outcome::Success(item)
            }
            Err(e) => Outcome::Failure(Failure::with_cause(
                FailureKind::Unknown,
                "place pasted item",
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use cc_core::paste::PasteState;
    use cc_core::paste::RenderedContent;
    use cc_infra::{FsStorageReceiver, ImageCrateCodec};
    use tempfile::TempDir;

    use super::*;

    fn usecase(dir: &TempDir) -> (PasteIntoCanvas, Arc<CanvasSession>) {
        let session = Arc::new(CanvasSession::new());
        let usecase = PasteIntoCanvas::from_ports(
            session.clone(),
            Arc::new(FsStorageReceiver::new(dir.path())),
            Arc::new(ImageCrateCodec::new(64)),
        );
        (usecase, session)
    }

    #[tokio::test]
    async fn test_text_paste_lands_on_top_persisted() {
        let dir = TempDir::new().unwrap();
        let (usecase, session) = usecase(&dir);

        let first = usecase
            .execute(&ClipboardPayload::from_text("one"), Point::ORIGIN)
            .await;
        let second = usecase
            .execute(&ClipboardPayload::from_text("two"), Point::new(40.0, 40.0))
            .await;

        let (Outcome::Success(first), Outcome::Success(second)) = (first, second) else {
            panic!("both pastes should succeed");
        };
        assert_eq!(session.placement(&first).await.map(|p| p.z), Some(0));
        let placement = session.placement(&second).await.unwrap();
        assert_eq!(placement.z, 1);
        assert_eq!(placement.position, Point::new(40.0, 40.0));
        assert_eq!(
            session.model_state(&second).await,
            Some(PasteState::Persisted)
        );
        assert_eq!(
            session.render(&second).await.unwrap().unwrap(),
            RenderedContent::Text("two".into())
        );
    }

    #[tokio::test]
    async fn test_failed_paste_adds_nothing() {
        let dir = TempDir::new().unwrap();
        let (usecase, session) = usecase(&dir);

        let outcome = usecase
            .execute(&ClipboardPayload::from_bitmap(vec![1u8, 2, 3]), Point::ORIGIN)
            .await;

        let Outcome::Failure(failure) = outcome else {
            panic!("garbage bitmap must fail");
        };
        assert_eq!(failure.kind(), FailureKind::DecodeUnsupported);
        assert!(session.is_empty().await);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
