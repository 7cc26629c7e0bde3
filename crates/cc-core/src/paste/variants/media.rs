use async_trait::async_trait;
use bytes::Bytes;

use crate::paste::stream_io::{read_all, read_reference, write_all};
use crate::paste::{FailureKind, PasteContent, PasteError, PasteResult, RenderedContent};
use crate::payload::{file_kind, ClipboardPayload, ContentTypeTag, MEDIA_EXTENSIONS};
use crate::ports::{BoxedFileStream, BoxedReadStream, FileHandle, StorageReceiverPort};

const DEFAULT_MEDIA_EXTENSION: &str = "bin";

/// Guess a file extension from a media MIME type, e.g. `video/mp4` → `mp4`.
fn extension_for_mime(mime: &str) -> Option<String> {
    let subtype = mime.split('/').nth(1)?.split(';').next()?.trim();
    let subtype = match subtype {
        "mpeg" => "mp3",
        "x-matroska" => "mkv",
        "quicktime" => "mov",
        "x-wav" | "wave" => "wav",
        other => other,
    };
    MEDIA_EXTENSIONS
        .contains(&subtype)
        .then(|| subtype.to_string())
}

/// Audio or video bytes, persisted under their source extension.
#[derive(Debug, Default)]
pub struct MediaPasteContent {
    bytes: Option<Bytes>,
    extension: Option<String>,
    mime: Option<String>,
}

impl MediaPasteContent {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PasteContent for MediaPasteContent {
    fn content_type(&self) -> ContentTypeTag {
        ContentTypeTag::Media
    }

    fn extension(&self) -> String {
        self.extension
            .clone()
            .unwrap_or_else(|| DEFAULT_MEDIA_EXTENSION.to_string())
    }

    async fn ingest_payload(
        &mut self,
        payload: &ClipboardPayload,
        receiver: &dyn StorageReceiverPort,
    ) -> PasteResult<()> {
        if let [file] = payload.files() {
            if file_kind(file) == Some(ContentTypeTag::Media) {
                let bytes = read_reference(receiver, file).await?;
                self.bytes = Some(Bytes::from(bytes));
                self.extension = file.extension();
                return Ok(());
            }
        }

        match payload.media() {
            Some(blob) => {
                self.bytes = Some(blob.bytes.clone());
                self.extension = extension_for_mime(&blob.mime);
                self.mime = Some(blob.mime.clone());
                Ok(())
            }
            None => Err(PasteError::failure(
                FailureKind::DecodeUnsupported,
                "payload carries no single media file or media blob",
            )),
        }
    }

    async fn ingest_file(
        &mut self,
        handle: &FileHandle,
        source: &mut BoxedReadStream,
    ) -> PasteResult<()> {
        self.bytes = Some(Bytes::from(read_all(source).await?));
        self.extension = handle.extension();
        Ok(())
    }

    async fn persist(&mut self, target: &mut BoxedFileStream) -> PasteResult<()> {
        let bytes = self
            .bytes
            .as_ref()
            .ok_or_else(|| PasteError::failure(FailureKind::Unknown, "no staged media"))?;
        write_all(target, bytes).await
    }

    async fn render(&self) -> PasteResult<RenderedContent> {
        let bytes = self
            .bytes
            .clone()
            .ok_or_else(|| PasteError::failure(FailureKind::Unknown, "no staged media"))?;
        Ok(RenderedContent::Media {
            mime: self.mime.clone(),
            bytes,
        })
    }

    fn release(&mut self) {
        self.bytes = None;
        self.mime = None;
    }

    fn is_staged(&self) -> bool {
        self.bytes.is_some()
    }
}
