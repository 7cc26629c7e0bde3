//! Canvas use cases. Each one runs as a single unit of work on the
//! [`CanvasSession`](crate::session::CanvasSession).
//!
//! clipboard change ─→ ProcessAutopaste ─┐
//! drop ──────────────→ HandleCanvasDrop ┼─→ PasteIntoCanvas
//! paste ───────────────────────────────┘
//! backing file on disk ─→ ReloadCanvasItem
//! delete request ───────→ DeleteCanvasItem

pub mod delete_canvas_item;
pub mod handle_canvas_drop;
pub mod paste_into_canvas;
pub mod process_autopaste;
pub mod reload_canvas_item;

pub use delete_canvas_item::DeleteCanvasItem;
pub use handle_canvas_drop::{CanvasDropResult, HandleCanvasDrop};
pub use paste_into_canvas::PasteIntoCanvas;
pub use process_autopaste::{AutopasteResult, ProcessAutopaste};
pub use reload_canvas_item::ReloadCanvasItem;
