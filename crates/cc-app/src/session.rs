use std::collections::HashMap;
use std::sync::Arc;

use cc_core::canvas::{ArrangementError, CanvasArrangement, Placement, PlacementRecord, Point};
use cc_core::paste::{PasteModel, PasteResult, PasteState, RenderedContent};
use cc_core::ports::{FileHandle, LayoutStorePort, SavedPlacement};
use cc_core::ItemId;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Everything one canvas owns: the arrangement and one paste model per live item.
///
/// Items are in the arrangement iff they have a model here.
#[derive(Debug, Default)]
pub struct CanvasState {
    arrangement: CanvasArrangement,
    models: HashMap<ItemId, PasteModel>,
}

impl CanvasState {
    pub fn arrangement(&self) -> &CanvasArrangement {
        &self.arrangement
    }

    pub fn arrangement_mut(&mut self) -> &mut CanvasArrangement {
        &mut self.arrangement
    }

    pub fn model(&self, item: &ItemId) -> Option<&PasteModel> {
        self.models.get(item)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Add a new item on top of the stack.
    pub fn insert(
        &mut self,
        item: ItemId,
        model: PasteModel,
        position: Point,
    ) -> Result<usize, ArrangementError> {
        let z = self.arrangement.insert(item.clone(), position)?;
        self.models.insert(item, model);
        Ok(z)
    }

    /// Take an item off the canvas, handing back its model.
    pub fn remove(&mut self, item: &ItemId) -> Result<PasteModel, ArrangementError> {
        let model = self
            .models
            .remove(item)
            .ok_or_else(|| ArrangementError::UnknownItem(item.clone()))?;
        self.arrangement.remove(item)?;
        Ok(model)
    }

    /// Current layout keyed by backing file name, bottom to top.
    ///
    /// Items without a backing file are left out.
    pub fn layout(&self) -> Vec<SavedPlacement> {
        self.arrangement
            .snapshot()
            .into_iter()
            .filter_map(|record| {
                let file_name = self
                    .models
                    .get(&record.item)?
                    .file()?
                    .file_name()?
                    .to_string();
                Some(SavedPlacement {
                    file_name,
                    position: record.position,
                    z: record.z,
                })
            })
            .collect()
    }

    /// Move and restack items to where `saved` says their backing files were.
    ///
    /// Items found in `saved` take the saved position and are stacked in saved
    /// order. The rest keep their position and go on top, in their current order.
    pub fn apply_layout(&mut self, saved: &[SavedPlacement]) -> Result<(), ArrangementError> {
        let by_name: HashMap<&str, &SavedPlacement> = saved
            .iter()
            .map(|placement| (placement.file_name.as_str(), placement))
            .collect();

        let mut known = Vec::new();
        let mut unknown = Vec::new();
        for record in self.arrangement.snapshot() {
            let found = self
                .models
                .get(&record.item)
                .and_then(PasteModel::file)
                .and_then(FileHandle::file_name)
                .and_then(|name| by_name.get(name));
            match found {
                Some(found) => known.push((
                    found.z,
                    PlacementRecord {
                        position: found.position,
                        ..record
                    },
                )),
                None => unknown.push(record),
            }
        }
        known.sort_by_key(|(z, _)| *z);

        let records = known
            .into_iter()
            .map(|(_, record)| record)
            .chain(unknown)
            .enumerate()
            .map(|(z, record)| PlacementRecord { z, ..record });
        self.arrangement = CanvasArrangement::restore(records)?;
        Ok(())
    }
}

/// Serializes every unit of canvas work behind one async mutex.
///
/// Use cases hold the guard for the whole operation, so a paste, a drop and a
/// delete never interleave. With a layout store attached, every change to the
/// arrangement is saved before the guard is released.
#[derive(Default)]
pub struct CanvasSession {
    state: Mutex<CanvasState>,
    layout_store: Option<Arc<dyn LayoutStorePort>>,
}

impl CanvasSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout_store(layout_store: Arc<dyn LayoutStorePort>) -> Self {
        Self {
            state: Mutex::default(),
            layout_store: Some(layout_store),
        }
    }

    /// Save the layout of `state`. A failed write is logged and otherwise ignored.
    pub async fn save_layout(&self, state: &CanvasState) {
        let Some(store) = &self.layout_store else {
            return;
        };
        if let Err(e) = store.save(&state.layout()).await {
            warn!(error = %e, "Failed to save canvas layout");
        }
    }

    /// Rearrange the items on the canvas by the saved layout, then save the result.
    pub async fn restore_layout(&self) -> Result<(), ArrangementError> {
        let Some(store) = &self.layout_store else {
            return Ok(());
        };
        let saved = match store.load().await {
            Ok(saved) => saved,
            Err(e) => {
                warn!(error = %e, "Failed to load canvas layout, keeping current one");
                Vec::new()
            }
        };

        let mut state = self.lock().await;
        state.apply_layout(&saved)?;
        self.save_layout(&state).await;
        info!(items = state.len(), saved = saved.len(), "Restored canvas layout");
        Ok(())
    }

    pub async fn lock(&self) -> MutexGuard<'_, CanvasState> {
        self.state.lock().await
    }

    pub async fn len(&self) -> usize {
        self.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.lock().await.is_empty()
    }

    pub async fn placement(&self, item: &ItemId) -> Option<Placement> {
        self.lock().await.arrangement.placement(item)
    }

    pub async fn snapshot(&self) -> Vec<PlacementRecord> {
        self.lock().await.arrangement.snapshot()
    }

    pub async fn model_state(&self, item: &ItemId) -> Option<PasteState> {
        self.lock().await.model(item).map(PasteModel::state)
    }

    pub async fn backing_file(&self, item: &ItemId) -> Option<FileHandle> {
        self.lock().await.model(item).and_then(|m| m.file().cloned())
    }

    pub async fn render(&self, item: &ItemId) -> Option<PasteResult<RenderedContent>> {
        let state = self.lock().await;
        match state.model(item) {
            Some(model) => Some(model.render().await),
            None => None,
        }
    }

    /// Record where inside `item` the pointer grabbed it.
    pub async fn begin_drag(&self, item: ItemId, offset: Point) -> Result<(), ArrangementError> {
        debug!(item = %item, "Drag started");
        self.lock().await.arrangement.begin_drag(item, offset)
    }

    pub async fn bring_to_front(&self, item: &ItemId) -> Result<usize, ArrangementError> {
        let mut state = self.lock().await;
        let z = state.arrangement.bring_to_front(item)?;
        self.save_layout(&state).await;
        Ok(z)
    }
}
