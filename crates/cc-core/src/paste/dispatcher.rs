use std::sync::Arc;

use tracing::debug;

use super::variants::{
    FallbackPasteContent, ImagePasteContent, MarkdownPasteContent, MediaPasteContent,
    TextPasteContent,
};
use super::{PasteContent, PasteModel};
use crate::payload::{classify, ClipboardPayload, ContentTypeTag};
use crate::ports::{ImageCodecPort, StorageReceiverPort};

/// Creates an empty [`PasteModel`] of the variant registered for a content type.
///
/// The mapping is total: every tag has a model, with `FileSet` backed by the
/// fallback variant.
#[derive(Clone)]
pub struct PasteModelDispatcher {
    receiver: Arc<dyn StorageReceiverPort>,
    codec: Arc<dyn ImageCodecPort>,
}

impl PasteModelDispatcher {
    pub fn new(receiver: Arc<dyn StorageReceiverPort>, codec: Arc<dyn ImageCodecPort>) -> Self {
        Self { receiver, codec }
    }

    pub fn create(&self, tag: ContentTypeTag) -> PasteModel {
        let content: Box<dyn PasteContent> = match tag {
            ContentTypeTag::Image => Box::new(ImagePasteContent::new(self.codec.clone())),
            ContentTypeTag::Text => Box::new(TextPasteContent::new()),
            ContentTypeTag::Markdown => Box::new(MarkdownPasteContent::new()),
            ContentTypeTag::Media => Box::new(MediaPasteContent::new()),
            ContentTypeTag::FileSet => Box::new(FallbackPasteContent::with_tag(tag)),
            ContentTypeTag::Fallback => Box::new(FallbackPasteContent::new()),
        };
        debug!(content_type = %tag, "Created paste model");
        PasteModel::new(content, self.receiver.clone())
    }

    /// Classify `payload` and create the matching empty model.
    pub fn create_for(&self, payload: &ClipboardPayload) -> (ContentTypeTag, PasteModel) {
        let tag = classify(payload);
        (tag, self.create(tag))
    }
}
