//! Thumbnail generation.
//!
//! Decodes arbitrary input formats, flattens them to 8-bit RGB, resizes to
//! an exact target size, and re-encodes as JPEG.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use thiserror::Error;
use thumbforge_common::TargetSize;
use tracing::warn;

/// JPEG quality used for every stored thumbnail.
pub const JPEG_QUALITY: u8 = 75;

/// Resampling filter (bicubic).
const FILTER: FilterType = FilterType::CatmullRom;

#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode JPEG: {0}")]
    Encode(#[source] image::ImageError),
}

/// Resize a single encoded image to exactly `target`, returning JPEG bytes.
///
/// The source format is auto-detected. Anything that is not 8-bit RGB
/// (grayscale, alpha, palette, 16-bit) is converted to RGB first; alpha is
/// dropped, not composited. Aspect ratio is not preserved.
pub fn resize_image(data: &[u8], target: TargetSize) -> Result<Vec<u8>, ResizeError> {
    let img = image::load_from_memory(data).map_err(ResizeError::Decode)?;

    let rgb = match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    };

    let resized = image::imageops::resize(&rgb, target.width, target.height, FILTER);

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    encoder.encode_image(&resized).map_err(ResizeError::Encode)?;

    Ok(buf)
}

/// Resize every present image, keeping the per-image outcome.
///
/// Absent positions are dropped; the remaining results keep input order.
pub fn resize_batch(
    images: &[Option<Bytes>],
    target: TargetSize,
) -> Vec<Result<Vec<u8>, ResizeError>> {
    images
        .iter()
        .flatten()
        .map(|data| resize_image(data, target))
        .collect()
}

/// Resize every present image, skipping absent and undecodable ones.
///
/// A corrupt image never aborts the batch: it is logged and contributes
/// nothing, so the output can be shorter than the input.
pub fn resize_images(images: Vec<Option<Bytes>>, target: TargetSize) -> Vec<Vec<u8>> {
    resize_batch(&images, target)
        .into_iter()
        .enumerate()
        .filter_map(|(i, result)| match result {
            Ok(jpeg) => Some(jpeg),
            Err(e) => {
                warn!(index = i, "Skipping image: {}", e);
                None
            }
        })
        .collect()
}
