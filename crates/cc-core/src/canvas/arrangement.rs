use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ArrangementError, DragSession, Point};
use crate::ids::ItemId;

/// Where an item sits and how high it is stacked. `z = 0` is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Point,
    pub z: usize,
}

/// Saved form of one item's placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub item: ItemId,
    pub position: Point,
    pub z: usize,
}

/// Positions and z-order of the live canvas items.
///
/// Invariant: the z-indices of the `N` live items are exactly `0..N`, each used once.
/// Every operation that returns leaves the table in that shape.
#[derive(Debug, Clone, Default)]
pub struct CanvasArrangement {
    // Insertion order; on lookups the first matching entry is authoritative.
    entries: Vec<(ItemId, Placement)>,
    pub(super) drag: Option<DragSession>,
}

impl CanvasArrangement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from saved records, rejecting anything that is not a dense z-order.
    pub fn restore(
        records: impl IntoIterator<Item = PlacementRecord>,
    ) -> Result<Self, ArrangementError> {
        let mut arrangement = Self::new();
        for record in records {
            if arrangement.contains(&record.item) {
                return Err(ArrangementError::DuplicateItem(record.item));
            }
            arrangement.entries.push((
                record.item,
                Placement {
                    position: record.position,
                    z: record.z,
                },
            ));
        }
        arrangement.validate()?;
        debug!(items = arrangement.len(), "Restored canvas arrangement");
        Ok(arrangement)
    }

    /// Records ordered bottom to top.
    pub fn snapshot(&self) -> Vec<PlacementRecord> {
        let mut records: Vec<PlacementRecord> = self
            .entries
            .iter()
            .map(|(item, placement)| PlacementRecord {
                item: item.clone(),
                position: placement.position,
                z: placement.z,
            })
            .collect();
        records.sort_by_key(|record| record.z);
        records
    }

    /// Check that the z-indices form a permutation of `0..N`.
    pub fn validate(&self) -> Result<(), ArrangementError> {
        let len = self.entries.len();
        let mut holders: HashMap<usize, &ItemId> = HashMap::with_capacity(len);

        for (item, placement) in &self.entries {
            if placement.z >= len {
                return Err(ArrangementError::IndexOutOfRange {
                    item: item.clone(),
                    index: placement.z,
                    len,
                });
            }
            if let Some(first) = holders.insert(placement.z, item) {
                return Err(ArrangementError::DuplicateIndex {
                    index: placement.z,
                    first: first.clone(),
                    second: item.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, item: &ItemId) -> bool {
        self.entries.iter().any(|(id, _)| id == item)
    }

    /// Item ids in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &ItemId> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn placement(&self, item: &ItemId) -> Option<Placement> {
        self.entries
            .iter()
            .find(|(id, _)| id == item)
            .map(|(_, placement)| *placement)
    }

    pub fn position(&self, item: &ItemId) -> Option<Point> {
        self.placement(item).map(|placement| placement.position)
    }

    pub fn z_index(&self, item: &ItemId) -> Option<usize> {
        self.placement(item).map(|placement| placement.z)
    }

    /// Add a new item on top of the stack and return its z-index.
    pub fn insert(&mut self, item: ItemId, position: Point) -> Result<usize, ArrangementError> {
        if self.contains(&item) {
            return Err(ArrangementError::DuplicateItem(item));
        }
        let z = self.entries.len();
        self.entries.push((item, Placement { position, z }));
        Ok(z)
    }

    /// Remove an item; everything stacked above it moves down one.
    pub fn remove(&mut self, item: &ItemId) -> Result<Placement, ArrangementError> {
        let index = self.index_of(item)?;
        let (_, removed) = self.entries.remove(index);

        for (_, placement) in &mut self.entries {
            if placement.z > removed.z {
                placement.z -= 1;
            }
        }
        if self.drag.as_ref().is_some_and(|drag| &drag.item == item) {
            self.drag = None;
        }
        Ok(removed)
    }

    pub fn set_position(&mut self, item: &ItemId, position: Point) -> Result<(), ArrangementError> {
        let index = self.index_of(item)?;
        self.entries[index].1.position = position;
        Ok(())
    }

    /// Put `item` on top, returning its new z-index.
    ///
    /// Every item above it moves down exactly one; items below are untouched.
    pub fn bring_to_front(&mut self, item: &ItemId) -> Result<usize, ArrangementError> {
        let target = self.index_of(item)?;
        let current = self.entries[target].1.z;
        let mut highest = current;

        for (index, (_, placement)) in self.entries.iter_mut().enumerate() {
            highest = highest.max(placement.z);
            if index != target && placement.z > current {
                placement.z -= 1;
            }
        }

        self.entries[target].1.z = highest;
        Ok(highest)
    }

    fn index_of(&self, item: &ItemId) -> Result<usize, ArrangementError> {
        self.entries
            .iter()
            .position(|(id, _)| id == item)
            .ok_or_else(|| ArrangementError::UnknownItem(item.clone()))
    }
}
