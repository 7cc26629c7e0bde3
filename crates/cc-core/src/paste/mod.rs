//! Paste models: the per-item ingest → persist → render lifecycle.
//!
//! [`PasteModel`] owns the lifecycle and is implemented once. Each content type
//! contributes a [`PasteContent`] implementation supplying only the
//! type-specific operations; [`PasteModelDispatcher`] picks it from a
//! [`ContentTypeTag`](crate::payload::ContentTypeTag).

mod content;
mod dispatcher;
mod error;
mod model;
mod state;
mod stream_io;
pub mod variants;

pub use content::{PasteContent, RenderedContent};
pub use dispatcher::PasteModelDispatcher;
pub use error::{Failure, FailureKind, LifecycleError, Outcome, PasteError, PasteResult};
pub use model::PasteModel;
pub use state::PasteState;
