use tracing::debug;

use super::{ArrangementError, CanvasArrangement, Point};
use crate::ids::ItemId;
use crate::payload::ClipboardPayload;

/// An in-progress drag of an existing item.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub item: ItemId,
    /// Pointer position relative to the item's top-left corner when the drag started.
    pub offset: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// An existing item was moved and brought to the front.
    Rearranged {
        item: ItemId,
        position: Point,
        z: usize,
    },
    /// The drop came from outside the canvas; a new item belongs at `point`.
    External {
        point: Point,
        payload: ClipboardPayload,
    },
}

impl CanvasArrangement {
    pub fn begin_drag(&mut self, item: ItemId, offset: Point) -> Result<(), ArrangementError> {
        if !self.contains(&item) {
            return Err(ArrangementError::UnknownItem(item));
        }
        self.drag = Some(DragSession { item, offset });
        Ok(())
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Finish a drop at `point`.
    ///
    /// `source` is the canvas item the drag originated from, if any. A source that
    /// is not a live item makes the drop external. Always ends the drag session.
    pub fn drop_at(
        &mut self,
        point: Point,
        source: Option<&ItemId>,
        payload: ClipboardPayload,
    ) -> DropOutcome {
        let session = self.drag.take();

        let Some(item) = source.filter(|item| self.contains(item)) else {
            debug!(x = point.x, y = point.y, "External drop onto canvas");
            return DropOutcome::External { point, payload };
        };

        let offset = session
            .filter(|session| &session.item == item)
            .map(|session| session.offset)
            .unwrap_or(Point::ORIGIN);
        let position = point - offset;

        // Both calls only fail for unknown items, and `item` was just checked.
        match self
            .set_position(item, position)
            .and_then(|()| self.bring_to_front(item))
        {
            Ok(z) => DropOutcome::Rearranged {
                item: item.clone(),
                position,
                z,
            },
            Err(_) => DropOutcome::External { point, payload },
        }
    }
}
