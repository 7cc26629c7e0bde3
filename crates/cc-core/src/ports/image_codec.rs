//! Image Codec Port
//!
//! Decodes pasted bitmap bytes and encodes staged bitmaps to PNG.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Also produce a downscaled preview. Optional: some codecs cannot do it for every image.
    pub generate_thumbnail: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            generate_thumbnail: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub png: Vec<u8>,
    pub thumbnail: Option<Vec<u8>>,
}

#[derive(Debug, Error)]
pub enum CodecError {
    /// The codec cannot perform the requested operation for this input.
    #[error("unsupported codec operation: {0}")]
    UnsupportedOperation(String),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),
}

#[async_trait]
pub trait ImageCodecPort: Send + Sync {
    async fn decode(&self, bytes: &[u8]) -> Result<Bitmap, CodecError>;

    /// Encode to PNG.
    ///
    /// Error semantics:
    /// - UnsupportedOperation: retrying with fewer optional features may succeed
    /// - Encode: retrying will not help
    async fn encode_png(
        &self,
        bitmap: &Bitmap,
        options: EncodeOptions,
    ) -> Result<EncodedImage, CodecError>;
}

#[cfg(test)]
mockall::mock! {
    pub ImageCodec {}

    #[async_trait]
    impl ImageCodecPort for ImageCodec {
        async fn decode(&self, bytes: &[u8]) -> Result<Bitmap, CodecError>;
        async fn encode_png(
            &self,
            bitmap: &Bitmap,
            options: EncodeOptions,
        ) -> Result<EncodedImage, CodecError>;
    }
}
