use std::sync::Arc;

use cc_core::canvas::Point;
use cc_core::paste::{Failure, FailureKind, Outcome, PasteModelDispatcher};
use cc_core::payload::classify_files;
use cc_core::ports::{FileHandle, ImageCodecPort, StorageReceiverPort};
use cc_core::ItemId;
use tracing::{info, warn};

use crate::session::CanvasSession;

/// Put an item back on the canvas from a backing file written earlier.
///
/// The content type comes from the file extension; the model starts out persisted.
/// The saved layout is left alone: reloads happen while the canvas is being
/// rebuilt, and [`CanvasSession::restore_layout`] applies it once that is done.
pub struct ReloadCanvasItem {
    session: Arc<CanvasSession>,
    dispatcher: PasteModelDispatcher,
}

impl ReloadCanvasItem {
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

    #[tracing::instrument(
        name = "usecase.reload_canvas_item.execute",
        skip(self, file, position),
        fields(file = %file.path().display())
    )]
    pub async fn execute(&self, file: FileHandle, position: Point) -> Outcome<ItemId> {
        let mut state = self.session.lock().await;

        let content_type = classify_files(std::slice::from_ref(&file));
        let mut model = self.dispatcher.create(content_type);
        if let Err(e) = model.set_data_from_file(file).await {
            warn!(content_type = %content_type, error = %e, "Failed to reload canvas item");
            model.dispose();
            return Outcome::from(Err(e));
        }

        let item = ItemId::new();
        match state.insert(item.clone(), model, position) {
            Ok(z) => {
                info!(item = %item, content_type = %content_type, z, "Reloaded canvas item");
                Outcome::Success(item)
            }
            Err(e) => Outcome::Failure(Failure::with_cause(
                FailureKind::Unknown,
                "place reloaded item",
                e,
            )),
        }
    }
}
