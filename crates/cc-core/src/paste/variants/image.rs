use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;

use crate::paste::stream_io::{read_all, read_reference, write_all};
use crate::paste::{FailureKind, PasteContent, PasteError, PasteResult, RenderedContent};
use crate::payload::{file_kind, ClipboardPayload, ContentTypeTag};
use crate::ports::{
    Bitmap, BoxedFileStream, BoxedReadStream, CodecError, EncodeOptions, EncodedImage, FileHandle,
    ImageCodecPort, StorageReceiverPort,
};

fn codec_failure(message: &str, error: CodecError) -> PasteError {
    let kind = match error {
        CodecError::UnsupportedOperation(_) | CodecError::Decode(_) => {
            FailureKind::DecodeUnsupported
        }
        CodecError::Encode(_) => FailureKind::Unknown,
    };
    PasteError::failure_with_cause(kind, message, error)
}

/// Encode `bitmap` to PNG with a thumbnail, retrying exactly once without the
/// thumbnail if the codec reports the operation as unsupported.
///
/// When the retry fails too, the error reported is the first one.
pub async fn encode_with_fallback(
    codec: &dyn ImageCodecPort,
    bitmap: &Bitmap,
) -> PasteResult<EncodedImage> {
    let original = match codec.encode_png(bitmap, EncodeOptions::default()).await {
        Ok(encoded) => return Ok(encoded),
        Err(error @ CodecError::UnsupportedOperation(_)) => error,
        Err(error) => return Err(codec_failure("encode image", error)),
    };

    warn!(error = %original, "Retrying image encode without thumbnail generation");
    let without_thumbnail = EncodeOptions {
        generate_thumbnail: false,
    };
    match codec.encode_png(bitmap, without_thumbnail).await {
        Ok(encoded) => Ok(encoded),
        Err(fallback) => {
            warn!(error = %fallback, "Image encode fallback failed");
            Err(codec_failure("encode image", original))
        }
    }
}

/// Bitmap content, persisted as PNG.
pub struct ImagePasteContent {
    codec: Arc<dyn ImageCodecPort>,
    bitmap: Option<Bitmap>,
    // PNG bytes matching `bitmap`, once known (after a save or a reload).
    encoded: Option<EncodedImage>,
}

impl ImagePasteContent {
    pub fn new(codec: Arc<dyn ImageCodecPort>) -> Self {
        Self {
            codec,
            bitmap: None,
            encoded: None,
        }
    }

    async fn decode(&mut self, bytes: &[u8]) -> PasteResult<()> {
        let bitmap = self
            .codec
            .decode(bytes)
            .await
            .map_err(|e| codec_failure("decode image", e))?;
        self.bitmap = Some(bitmap);
        Ok(())
    }

    fn staged_bitmap(&self) -> PasteResult<&Bitmap> {
        self.bitmap
            .as_ref()
            .ok_or_else(|| PasteError::failure(FailureKind::Unknown, "no staged bitmap"))
    }
}

#[async_trait]
impl PasteContent for ImagePasteContent {
    fn content_type(&self) -> ContentTypeTag {
        ContentTypeTag::Image
    }

    fn extension(&self) -> String {
        "png".to_string()
    }

    async fn ingest_payload(
        &mut self,
        payload: &ClipboardPayload,
        receiver: &dyn StorageReceiverPort,
    ) -> PasteResult<()> {
        if let Some(bitmap) = payload.bitmap() {
            return self.decode(bitmap).await;
        }

        match payload.files() {
            [file] if file_kind(file) == Some(ContentTypeTag::Image) => {
                let bytes = read_reference(receiver, file).await?;
                self.decode(&bytes).await
            }
            _ => Err(PasteError::failure(
                FailureKind::DecodeUnsupported,
                "payload carries no image",
            )),
        }
    }

    async fn ingest_file(
        &mut self,
        handle: &FileHandle,
        source: &mut BoxedReadStream,
    ) -> PasteResult<()> {
        let bytes = read_all(source).await?;
        self.decode(&bytes).await?;
        // Other formats are encoded to PNG on first render.
        if handle.extension().as_deref() == Some("png") {
            self.encoded = Some(EncodedImage {
                png: bytes,
                thumbnail: None,
            });
        }
        Ok(())
    }

    async fn persist(&mut self, target: &mut BoxedFileStream) -> PasteResult<()> {
        let encoded = encode_with_fallback(self.codec.as_ref(), self.staged_bitmap()?).await?;
        write_all(target, &encoded.png).await?;
        self.encoded = Some(encoded);
        Ok(())
    }

    async fn render(&self) -> PasteResult<RenderedContent> {
        let bitmap = self.staged_bitmap()?;
        let encoded = match &self.encoded {
            Some(encoded) => encoded.clone(),
            None => encode_with_fallback(self.codec.as_ref(), bitmap).await?,
        };

        Ok(RenderedContent::Image {
            png: Bytes::from(encoded.png),
            thumbnail: encoded.thumbnail.map(Bytes::from),
            width: bitmap.width,
            height: bitmap.height,
        })
    }

    fn release(&mut self) {
        self.bitmap = None;
        self.encoded = None;
    }

    fn is_staged(&self) -> bool {
        self.bitmap.is_some()
    }
}
