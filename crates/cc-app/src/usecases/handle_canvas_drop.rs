use std::sync::Arc;

use cc_core::canvas::{DropOutcome, Point};
use cc_core::paste::Outcome;
use cc_core::{ClipboardPayload, ItemId};
use tracing::info;

use super::PasteIntoCanvas;
use crate::session::CanvasSession;

#[derive(Debug)]
pub enum CanvasDropResult {
    /// An existing item was moved and raised to the top.
    Rearranged {
        item: ItemId,
        position: Point,
        z: usize,
    },
    /// The drop came from outside; this is the result of pasting it.
    Pasted(Outcome<ItemId>),
}

/// Route a drop either to the arrangement (item dragged within the canvas) or
/// to the paste pipeline at the drop point.
pub struct HandleCanvasDrop {
    session: Arc<CanvasSession>,
    paste: PasteIntoCanvas,
}

impl HandleCanvasDrop {
    pub fn from_ports(session: Arc<CanvasSession>, paste: PasteIntoCanvas) -> Self {
        Self { session, paste }
    }

    #[tracing::instrument(
        name = "usecase.handle_canvas_drop.execute",
        skip(self, point, source, payload),
        fields(x = point.x, y = point.y, source = ?source)
    )]
    pub async fn execute(
        &self,
        point: Point,
        source: Option<&ItemId>,
        payload: ClipboardPayload,
    ) -> CanvasDropResult {
        let mut state = self.session.lock().await;
        let outcome = state.arrangement_mut().drop_at(point, source, payload);

        match outcome {
            DropOutcome::Rearranged { item, position, z } => {
                self.session.save_layout(&state).await;
                info!(item = %item, z, "Rearranged canvas item");
                CanvasDropResult::Rearranged { item, position, z }
            }
            DropOutcome::External { point, payload } => {
                let outcome = self.paste.paste_locked(&mut state, &payload, point).await;
                CanvasDropResult::Pasted(outcome)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cc_infra::{FsStorageReceiver, ImageCrateCodec};
    use tempfile::TempDir;

    use super::*;

    fn usecases(dir: &TempDir) -> (HandleCanvasDrop, PasteIntoCanvas, Arc<CanvasSession>) {
        let session = Arc::new(CanvasSession::new());
        let paste = PasteIntoCanvas::from_ports(
            session.clone(),
            Arc::new(FsStorageReceiver::new(dir.path())),
            Arc::new(ImageCrateCodec::new(64)),
        );
        (
            HandleCanvasDrop::from_ports(session.clone(), paste.clone()),
            paste,
            session,
        )
    }

    async fn paste_text(paste: &PasteIntoCanvas, text: &str) -> ItemId {
        match paste
            .execute(&ClipboardPayload::from_text(text), Point::ORIGIN)
            .await
        {
            Outcome::Success(item) => item,
            other => panic!("paste failed: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_internal_drop_moves_by_grab_offset_and_raises() {
        let dir = TempDir::new().unwrap();
        let (drop, paste, session) = usecases(&dir);
        let bottom = paste_text(&paste, "bottom").await;
        let top = paste_text(&paste, "top").await;

        session
            .begin_drag(bottom.clone(), Point::new(10.0, 5.0))
            .await
            .unwrap();
        let result = drop
            .execute(
                Point::new(110.0, 105.0),
                Some(&bottom),
                ClipboardPayload::default(),
            )
            .await;

        assert!(matches!(
            result,
            CanvasDropResult::Rearranged { z: 1, .. }
        ));
        let placement = session.placement(&bottom).await.unwrap();
        assert_eq!(placement.position, Point::new(100.0, 100.0));
        assert_eq!(placement.z, 1);
        assert_eq!(session.placement(&top).await.unwrap().z, 0);
        assert_eq!(session.len().await, 2);
    }

    #[tokio::test]
    async fn test_external_drop_pastes_at_drop_point() {
        let dir = TempDir::new().unwrap();
        let (drop, paste, session) = usecases(&dir);
        paste_text(&paste, "existing").await;

        let result = drop
            .execute(
                Point::new(7.0, 9.0),
                None,
                ClipboardPayload::from_text("dropped from another app"),
            )
            .await;

        let CanvasDropResult::Pasted(Outcome::Success(item)) = result else {
            panic!("external drop should paste");
        };
        let placement = session.placement(&item).await.unwrap();
        assert_eq!(placement.position, Point::new(7.0, 9.0));
        assert_eq!(placement.z, 1);
    }
}
