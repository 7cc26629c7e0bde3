//! One [`PasteContent`](super::PasteContent) implementation per content type.

mod fallback;
mod image;
mod media;
mod text;

pub use fallback::FallbackPasteContent;
pub use image::{encode_with_fallback, ImagePasteContent};
pub use media::MediaPasteContent;
pub use text::{MarkdownPasteContent, TextPasteContent};
