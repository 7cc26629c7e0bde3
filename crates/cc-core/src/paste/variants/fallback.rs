use async_trait::async_trait;
use bytes::Bytes;

use crate::paste::stream_io::{read_all, read_reference, write_all};
use crate::paste::{FailureKind, PasteContent, PasteError, PasteResult, RenderedContent};
use crate::payload::{ClipboardPayload, ContentTypeTag};
use crate::ports::{BoxedFileStream, BoxedReadStream, FileHandle, StorageReceiverPort};

const RAW_EXTENSION: &str = "bin";
const TEXT_EXTENSION: &str = "txt";

/// Raw bytes of whatever the other variants could not take.
///
/// For a set of dropped files the first one is staged and persisted; all of
/// them stay listed as references for display.
#[derive(Debug)]
pub struct FallbackPasteContent {
    tag: ContentTypeTag,
    bytes: Option<Bytes>,
    extension: Option<String>,
    name: Option<String>,
    references: Vec<FileHandle>,
}

impl FallbackPasteContent {
    pub fn new() -> Self {
        Self::with_tag(ContentTypeTag::Fallback)
    }

    /// Fallback content reported under a different tag, used for file sets.
    pub fn with_tag(tag: ContentTypeTag) -> Self {
        Self {
            tag,
            bytes: None,
            extension: None,
            name: None,
            references: Vec::new(),
        }
    }

    fn stage(&mut self, bytes: Vec<u8>, extension: Option<String>, name: Option<String>) {
        self.bytes = Some(Bytes::from(bytes));
        self.extension = extension;
        self.name = name;
    }
}

impl Default for FallbackPasteContent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteContent for FallbackPasteContent {
    fn content_type(&self) -> ContentTypeTag {
        self.tag
    }

    fn extension(&self) -> String {
        self.extension
            .clone()
            .unwrap_or_else(|| RAW_EXTENSION.to_string())
    }

    async fn ingest_payload(
        &mut self,
        payload: &ClipboardPayload,
        receiver: &dyn StorageReceiverPort,
    ) -> PasteResult<()> {
        if let Some(first) = payload.files().first() {
            let bytes = read_reference(receiver, first).await?;
            self.stage(
                bytes,
                first.extension(),
                first.file_name().map(str::to_string),
            );
            self.references = payload.files().to_vec();
            return Ok(());
        }

        if let Some(blob) = payload.media() {
            self.bytes = Some(blob.bytes.clone());
            return Ok(());
        }

        // Typically a URL, which is not plain text for classification purposes.
        if let Some(text) = payload.text() {
            self.stage(
                text.as_bytes().to_vec(),
                Some(TEXT_EXTENSION.to_string()),
                None,
            );
            return Ok(());
        }

        if let Some(bitmap) = payload.bitmap() {
            self.bytes = Some(bitmap.clone());
            return Ok(());
        }

        Err(PasteError::failure(
            FailureKind::DecodeUnsupported,
            "payload carries no representation",
        ))
    }

    async fn ingest_file(
        &mut self,
        handle: &FileHandle,
        source: &mut BoxedReadStream,
    ) -> PasteResult<()> {
        let bytes = read_all(source).await?;
        self.stage(
            bytes,
            handle.extension(),
            handle.file_name().map(str::to_string),
        );
        Ok(())
    }

    async fn persist(&mut self, target: &mut BoxedFileStream) -> PasteResult<()> {
        let bytes = self
            .bytes
            .as_ref()
            .ok_or_else(|| PasteError::failure(FailureKind::Unknown, "no staged bytes"))?;
        write_all(target, bytes).await
    }

    async fn render(&self) -> PasteResult<RenderedContent> {
        let bytes = self
            .bytes
            .as_ref()
            .ok_or_else(|| PasteError::failure(FailureKind::Unknown, "no staged bytes"))?;
        Ok(RenderedContent::File {
            name: self.name.clone(),
            size: bytes.len(),
            references: self.references.clone(),
        })
    }

    fn release(&mut self) {
        self.bytes = None;
        self.references.clear();
    }

    fn is_staged(&self) -> bool {
        self.bytes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::paste::PasteModel;
    use crate::ports::testing::TempDirReceiver;

    #[tokio::test]
    async fn test_unknown_file_keeps_extension() {
        let receiver = Arc::new(TempDirReceiver::new());
        let source = receiver.write_file("archive.zip", b"PK\x03\x04");
        let mut model = PasteModel::new(Box::new(FallbackPasteContent::new()), receiver.clone());

        model
            .set_data_from_payload(&ClipboardPayload::from_files([source.clone()]))
            .await
            .unwrap();
        let saved = model.try_save().await.unwrap();

        assert_eq!(saved.extension().as_deref(), Some("zip"));
        assert_eq!(receiver.read(&saved), b"PK\x03\x04");
        assert_eq!(
            model.render().await.unwrap(),
            RenderedContent::File {
                name: Some("archive.zip".into()),
                size: 4,
                references: vec![source],
            }
        );
    }

    #[tokio::test]
    async fn test_file_set_stages_first_and_lists_all() {
        let receiver = Arc::new(TempDirReceiver::new());
        let photo = receiver.write_file("photo.png", b"png");
        let notes = receiver.write_file("notes.txt", b"some notes");
        let mut model = PasteModel::new(
            Box::new(FallbackPasteContent::with_tag(ContentTypeTag::FileSet)),
            receiver.clone(),
        );

        model
            .set_data_from_payload(&ClipboardPayload::from_files([photo.clone(), notes.clone()]))
            .await
            .unwrap();

        assert_eq!(model.content_type(), ContentTypeTag::FileSet);
        let RenderedContent::File { references, size, .. } = model.render().await.unwrap() else {
            panic!("expected file rendering");
        };
        assert_eq!(references, vec![photo, notes]);
        assert_eq!(size, 3);
    }

    #[tokio::test]
    async fn test_url_text_is_saved_as_txt() {
        let receiver = Arc::new(TempDirReceiver::new());
        let mut model = PasteModel::new(Box::new(FallbackPasteContent::new()), receiver.clone());

        model
            .set_data_from_payload(&ClipboardPayload::from_text("https://example.com"))
            .await
            .unwrap();
        let saved = model.try_save().await.unwrap();

        assert_eq!(saved.extension().as_deref(), Some("txt"));
        assert_eq!(receiver.read(&saved), b"https://example.com");
    }

    #[tokio::test]
    async fn test_empty_payload_fails() {
        let mut model = PasteModel::new(
            Box::new(FallbackPasteContent::new()),
            Arc::new(TempDirReceiver::new()),
        );

        let err = model
            .set_data_from_payload(&ClipboardPayload::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(FailureKind::DecodeUnsupported));
    }
}
