use std::fmt;

use super::FailureKind;

/// Lifecycle state of a [`PasteModel`](super::PasteModel).
///
/// ```text
/// Empty ─▶ Ingesting ─▶ Staged ─▶ Persisting ─▶ Persisted
///              │                                   ▲
///              ├──────────── (from file) ──────────┘
///              └─▶ Failed
/// any ─▶ Disposed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteState {
    Empty,
    Ingesting,
    Staged,
    Persisting,
    Persisted,
    Failed(FailureKind),
    Disposed,
}

impl PasteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasteState::Empty => "empty",
            PasteState::Ingesting => "ingesting",
            PasteState::Staged => "staged",
            PasteState::Persisting => "persisting",
            PasteState::Persisted => "persisted",
            PasteState::Failed(_) => "failed",
            PasteState::Disposed => "disposed",
        }
    }

    /// Whether a staged representation is available for rendering.
    pub fn has_content(&self) -> bool {
        matches!(self, PasteState::Staged | PasteState::Persisted)
    }
}

impl fmt::Display for PasteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
