//! Layout Store Port
//!
//! Keeps the canvas layout across restarts. Item ids are regenerated on every
//! start, so saved placements are keyed by backing file name.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::canvas::Point;

/// Where one backing file sat on the canvas, and how high it was stacked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlacement {
    pub file_name: String,
    pub position: Point,
    pub z: usize,
}

#[async_trait]
pub trait LayoutStorePort: Send + Sync {
    /// The last saved layout, empty when nothing was saved yet.
    async fn load(&self) -> anyhow::Result<Vec<SavedPlacement>>;

    /// Replace the saved layout.
    async fn save(&self, layout: &[SavedPlacement]) -> anyhow::Result<()>;
}
