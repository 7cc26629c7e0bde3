//! # cc-core
//!
//! Core domain models and canvas logic for ClipCanvas.
//!
//! This crate contains pure business logic without any infrastructure dependencies.
//! Every external collaborator (storage, codec, dialogs, settings) is reached through
//! a port in [`ports`].

pub mod autopaste;
pub mod canvas;
pub mod config;
pub mod ids;
pub mod paste;
pub mod payload;
pub mod ports;

// Re-export commonly used types at the crate root
pub use autopaste::{AutopasteDecision, AutopasteEngine, AutopasteRule, AutopasteRuleSet};
pub use canvas::{CanvasArrangement, Placement, Point};
pub use config::CanvasConfig;
pub use ids::ItemId;
pub use paste::{FailureKind, Outcome, PasteError, PasteModel, PasteResult, PasteState};
pub use payload::{classify, is_valid_url, ClipboardPayload, ContentTypeTag, FormatTag};
