use async_trait::async_trait;
use bytes::Bytes;

use super::PasteResult;
use crate::payload::{ClipboardPayload, ContentTypeTag};
use crate::ports::{BoxedFileStream, BoxedReadStream, FileHandle, StorageReceiverPort};

/// What a paste model hands to the display layer. How it gets drawn is not our concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedContent {
    Image {
        png: Bytes,
        thumbnail: Option<Bytes>,
        width: u32,
        height: u32,
    },
    Text(String),
    Markdown(String),
    Media {
        mime: Option<String>,
        bytes: Bytes,
    },
    File {
        name: Option<String>,
        size: usize,
        references: Vec<FileHandle>,
    },
}

/// Content-type specific half of a paste model.
///
/// Implementations only move data between a source, their staged representation and
/// a stream. State tracking, storage allocation and error bookkeeping belong to
/// [`PasteModel`](super::PasteModel) and must not be repeated here.
#[async_trait]
pub trait PasteContent: Send + Sync {
    fn content_type(&self) -> ContentTypeTag;

    /// Extension (without the dot) of a newly allocated backing file.
    fn extension(&self) -> String;

    /// Stage data that arrived with a paste or drop.
    async fn ingest_payload(
        &mut self,
        payload: &ClipboardPayload,
        receiver: &dyn StorageReceiverPort,
    ) -> PasteResult<()>;

    /// Stage the contents of an existing backing file.
    async fn ingest_file(
        &mut self,
        handle: &FileHandle,
        source: &mut BoxedReadStream,
    ) -> PasteResult<()>;

    /// Write the staged representation to a freshly allocated file.
    async fn persist(&mut self, target: &mut BoxedFileStream) -> PasteResult<()>;

    async fn render(&self) -> PasteResult<RenderedContent>;

    /// Drop the staged representation.
    fn release(&mut self);

    fn is_staged(&self) -> bool;
}
