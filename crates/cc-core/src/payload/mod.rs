//! Clipboard payload model and content classification.
//!
//! A [`ClipboardPayload`] is captured once per paste or drop event and never mutated
//! afterwards. [`classify`] turns it into the [`ContentTypeTag`] that selects the paste
//! model able to persist and render it.

mod clipboard_payload;
mod content_type;
mod inspector;
mod locator;

pub use clipboard_payload::{ClipboardPayload, ClipboardPayloadBuilder, FormatTag, MediaBlob};
pub use content_type::ContentTypeTag;
pub use inspector::{
    classify, classify_files, file_kind, IMAGE_EXTENSIONS, MARKDOWN_EXTENSIONS,
    MEDIA_EXTENSIONS, TEXT_EXTENSIONS,
};
pub use locator::is_valid_url;
