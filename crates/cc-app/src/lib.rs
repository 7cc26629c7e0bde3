//! ClipCanvas application orchestration layer
//!
//! Use cases that drive the canvas core, and the session that serializes them.

pub mod session;
pub mod usecases;

pub use session::{CanvasSession, CanvasState};
pub use usecases::{
    AutopasteResult, CanvasDropResult, DeleteCanvasItem, HandleCanvasDrop, PasteIntoCanvas,
    ProcessAutopaste, ReloadCanvasItem,
};
