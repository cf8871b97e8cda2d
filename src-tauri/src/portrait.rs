//! Portrait preparation for host and measurement profiles.
//!
//! The frontend hands over the picked file as base64. Portraits are
//! downsized to at most 512px on the longest edge and returned as a JPEG
//! data URL that the UI embeds directly.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::info;

use crate::error::MeasurementError;

/// Maximum dimension (width or height) of a stored portrait.
pub const MAX_PORTRAIT_DIMENSION: u32 = 512;

const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Decode base64 image data, downsize and re-encode it as a JPEG data URL.
pub fn prepare_portrait(image_base64: &str) -> Result<String, MeasurementError> {
    let image_bytes = STANDARD
        .decode(strip_data_url(image_base64))
        .map_err(|e| MeasurementError::Portrait(format!("Invalid base64 image data: {}", e)))?;

    let img = image::load_from_memory(&image_bytes).map_err(|e| {
        MeasurementError::Portrait(format!(
            "Failed to load image: {}. Ensure it's a valid JPEG/PNG/WebP.",
            e
        ))
    })?;
    info!("Loaded portrait: {}x{}", img.width(), img.height());

    let resized = resize_if_needed(img, MAX_PORTRAIT_DIMENSION);
    let jpeg_bytes = encode_to_jpeg(&resized)?;
    info!(
        "Portrait encoded: {}x{}, {} bytes",
        resized.width(),
        resized.height(),
        jpeg_bytes.len()
    );

    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(&jpeg_bytes)))
}

/// Accept either bare base64 or a full `data:...;base64,` URL.
fn strip_data_url(input: &str) -> &str {
    match input.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => input.trim(),
    }
}

/// Resize image if either dimension exceeds max, maintaining aspect ratio.
fn resize_if_needed(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());

    if width <= max_dimension && height <= max_dimension {
        return img;
    }

    let scale = max_dimension as f32 / width.max(height) as f32;
    let new_width = ((width as f32 * scale) as u32).max(1);
    let new_height = ((height as f32 * scale) as u32).max(1);

    img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
}

/// JPEG has no alpha channel, so the image is flattened to RGB first.
fn encode_to_jpeg(img: &DynamicImage) -> Result<Vec<u8>, MeasurementError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| MeasurementError::Portrait(format!("Failed to encode JPEG: {}", e)))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_base64(img: DynamicImage) -> String {
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        STANDARD.encode(buffer.into_inner())
    }

    fn decode_data_url(url: &str) -> DynamicImage {
        let data = url.strip_prefix(DATA_URL_PREFIX).expect("jpeg data url");
        image::load_from_memory(&STANDARD.decode(data).unwrap()).unwrap()
    }

    #[test]
    fn test_prepare_portrait_downsizes_large_image() {
        let url = prepare_portrait(&png_base64(DynamicImage::new_rgb8(2048, 1024))).unwrap();
        let out = decode_data_url(&url);
        assert_eq!(out.width(), 512);
        assert_eq!(out.height(), 256);
    }

    #[test]
    fn test_prepare_portrait_keeps_small_image() {
        let url = prepare_portrait(&png_base64(DynamicImage::new_rgb8(64, 80))).unwrap();
        let out = decode_data_url(&url);
        assert_eq!((out.width(), out.height()), (64, 80));
    }

    #[test]
    fn test_prepare_portrait_flattens_alpha() {
        let url = prepare_portrait(&png_base64(DynamicImage::new_rgba8(40, 40))).unwrap();
        assert!(url.starts_with(DATA_URL_PREFIX));
    }

    #[test]
    fn test_prepare_portrait_accepts_data_url_input() {
        let input = format!(
            "data:image/png;base64,{}",
            png_base64(DynamicImage::new_rgb8(10, 10))
        );
        assert!(prepare_portrait(&input).is_ok());
    }

    #[test]
    fn test_prepare_portrait_rejects_invalid() {
        let err = prepare_portrait(&STANDARD.encode(b"not an image")).unwrap_err();
        assert!(err.to_string().contains("Failed to load image"));

        let err = prepare_portrait("%%%").unwrap_err();
        assert!(err.to_string().contains("Invalid base64"));
    }

    #[test]
    fn test_resize_if_needed_resize_height() {
        let img = DynamicImage::new_rgb8(1000, 2000);
        let resized = resize_if_needed(img, 512);
        assert_eq!(resized.width(), 256);
        assert_eq!(resized.height(), 512);
    }
}
