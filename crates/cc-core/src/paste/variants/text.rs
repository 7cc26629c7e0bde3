use async_trait::async_trait;

use crate::paste::stream_io::{decode_utf8, read_all, read_reference, write_all};
use crate::paste::{FailureKind, PasteContent, PasteError, PasteResult, RenderedContent};
use crate::payload::{file_kind, ClipboardPayload, ContentTypeTag};
use crate::ports::{BoxedFileStream, BoxedReadStream, FileHandle, StorageReceiverPort};

/// Stage UTF-8 text from the payload's text representation, or else from a single
/// dropped file of `kind`.
async fn stage_utf8(
    payload: &ClipboardPayload,
    receiver: &dyn StorageReceiverPort,
    kind: ContentTypeTag,
    allow_text: bool,
) -> PasteResult<String> {
    if allow_text {
        if let Some(text) = payload.text() {
            return Ok(text.to_string());
        }
    }

    match payload.files() {
        [file] if file_kind(file) == Some(kind) => {
            decode_utf8(read_reference(receiver, file).await?)
        }
        _ => Err(PasteError::failure(
            FailureKind::DecodeUnsupported,
            format!("payload carries no {kind} content"),
        )),
    }
}

#[derive(Debug, Default)]
pub struct TextPasteContent {
    text: Option<String>,
}

impl TextPasteContent {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PasteContent for TextPasteContent {
    fn content_type(&self) -> ContentTypeTag {
        ContentTypeTag::Text
    }

    fn extension(&self) -> String {
        "txt".to_string()
    }

    async fn ingest_payload(
        &mut self,
        payload: &ClipboardPayload,
        receiver: &dyn StorageReceiverPort,
    ) -> PasteResult<()> {
        self.text = Some(stage_utf8(payload, receiver, ContentTypeTag::Text, true).await?);
        Ok(())
    }

    async fn ingest_file(
        &mut self,
        _handle: &FileHandle,
        source: &mut BoxedReadStream,
    ) -> PasteResult<()> {
        self.text = Some(decode_utf8(read_all(source).await?)?);
        Ok(())
    }

    async fn persist(&mut self, target: &mut BoxedFileStream) -> PasteResult<()> {
        let text = self
            .text
            .as_deref()
            .ok_or_else(|| PasteError::failure(FailureKind::Unknown, "no staged text"))?;
        write_all(target, text.as_bytes()).await
    }

    async fn render(&self) -> PasteResult<RenderedContent> {
        self.text
            .clone()
            .map(RenderedContent::Text)
            .ok_or_else(|| PasteError::failure(FailureKind::Unknown, "no staged text"))
    }

    fn release(&mut self) {
        self.text = None;
    }

    fn is_staged(&self) -> bool {
        self.text.is_some()
    }
}

/// Markdown arrives as dropped `.md` files; its source is kept verbatim.
#[derive(Debug, Default)]
pub struct MarkdownPasteContent {
    source: Option<String>,
}

impl MarkdownPasteContent {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PasteContent for MarkdownPasteContent {
    fn content_type(&self) -> ContentTypeTag {
        ContentTypeTag::Markdown
    }

    fn extension(&self) -> String {
        "md".to_string()
    }

    async fn ingest_payload(
        &mut self,
        payload: &ClipboardPayload,
        receiver: &dyn StorageReceiverPort,
    ) -> PasteResult<()> {
        self.source = Some(stage_utf8(payload, receiver, ContentTypeTag::Markdown, false).await?);
        Ok(())
    }

    async fn ingest_file(
        &mut self,
        _handle: &FileHandle,
        source: &mut BoxedReadStream,
    ) -> PasteResult<()> {
        self.source = Some(decode_utf8(read_all(source).await?)?);
        Ok(())
    }

    async fn persist(&mut self, target: &mut BoxedFileStream) -> PasteResult<()> {
        let source = self
            .source
            .as_deref()
            .ok_or_else(|| PasteError::failure(FailureKind::Unknown, "no staged markdown"))?;
        write_all(target, source.as_bytes()).await
    }

    async fn render(&self) -> PasteResult<RenderedContent> {
        self.source
            .clone()
            .map(RenderedContent::Markdown)
            .ok_or_else(|| PasteError::failure(FailureKind::Unknown, "no staged markdown"))
    }

    fn release(&mut self) {
        self.source = None;
    }

    fn is_staged(&self) -> bool {
        self.source.is_some()
    }
}
