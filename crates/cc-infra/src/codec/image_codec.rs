use std::io::Cursor;

use async_trait::async_trait;
use bytes::Bytes;
use cc_core::ports::{Bitmap, CodecError, EncodeOptions, EncodedImage, ImageCodecPort};
use image::{imageops::FilterType, ColorType, DynamicImage, ImageError, RgbaImage};
use tracing::debug;

/// [`ImageCodecPort`] backed by the `image` crate.
///
/// Thumbnails are lossless WebP with the longest edge capped at `max_edge`.
pub struct ImageCrateCodec {
    max_edge: u32,
}

impl ImageCrateCodec {
    pub fn new(max_edge: u32) -> Self {
        Self { max_edge }
    }

    fn thumbnail(&self, image: &RgbaImage) -> Result<Vec<u8>, CodecError> {
        if self.max_edge == 0 {
            return Err(CodecError::UnsupportedOperation(
                "thumbnail size is not configured".to_string(),
            ));
        }

        let (original_width, original_height) = image.dimensions();
        let (target_width, target_height) =
            calculate_target_size(original_width, original_height, self.max_edge);

        let resized = if target_width == original_width && target_height == original_height {
            image.clone()
        } else {
            image::imageops::resize(image, target_width, target_height, FilterType::Triangle)
        };

        let mut thumbnail_bytes = Vec::new();
        let encoder = image::codecs::webp::WebPEncoder::new_lossless(&mut thumbnail_bytes);
        encoder
            .encode(
                resized.as_raw(),
                target_width,
                target_height,
                ColorType::Rgba8.into(),
            )
            .map_err(|e| map_image_error(e, CodecError::Encode))?;

        Ok(thumbnail_bytes)
    }
}

#[async_trait]
impl ImageCodecPort for ImageCrateCodec {
    async fn decode(&self, bytes: &[u8]) -> Result<Bitmap, CodecError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| map_image_error(e, CodecError::Decode))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Bitmap {
            width,
            height,
            rgba: Bytes::from(rgba.into_raw()),
        })
    }

    async fn encode_png(
        &self,
        bitmap: &Bitmap,
        options: EncodeOptions,
    ) -> Result<EncodedImage, CodecError> {
        let image = RgbaImage::from_raw(bitmap.width, bitmap.height, bitmap.rgba.to_vec())
            .ok_or_else(|| {
                CodecError::Encode(format!(
                    "{} bytes do not hold a {}x{} RGBA image",
                    bitmap.rgba.len(),
                    bitmap.width,
                    bitmap.height
                ))
            })?;

        let thumbnail = if options.generate_thumbnail {
            Some(self.thumbnail(&image)?)
        } else {
            None
        };

        let mut png = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| map_image_error(e, CodecError::Encode))?;

        debug!(
            width = bitmap.width,
            height = bitmap.height,
            png_bytes = png.len(),
            thumbnail = thumbnail.is_some(),
            "Encoded bitmap to PNG"
        );
        Ok(EncodedImage { png, thumbnail })
    }
}

/// `image` reports formats and operations it cannot handle as `Unsupported`;
/// everything else is a hard failure.
fn map_image_error(error: ImageError, otherwise: fn(String) -> CodecError) -> CodecError {
    match error {
        ImageError::Unsupported(e) => CodecError::UnsupportedOperation(e.to_string()),
        other => otherwise(other.to_string()),
    }
}

fn calculate_target_size(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    if width >= height {
        let scaled_height = ((height as f64) * (max_edge as f64) / (width as f64)).round() as u32;
        (max_edge, scaled_height.max(1))
    } else {
        let scaled_width = ((width as f64) * (max_edge as f64) / (height as f64)).round() as u32;
        (scaled_width.max(1), max_edge)
    }
}
