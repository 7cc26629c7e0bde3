//! Canvas arrangement: item positions, the dense z-order and drag/drop bookkeeping.

mod arrangement;
mod drag;
mod error;
mod geometry;

pub use arrangement::{CanvasArrangement, Placement, PlacementRecord};
pub use drag::{DragSession, DropOutcome};
pub use error::ArrangementError;
pub use geometry::Point;
