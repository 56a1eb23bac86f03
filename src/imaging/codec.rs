//! PNG and base64 encoding of request payloads and results
//!
//! Results are written in whatever format the output path's extension
//! names, as long as it is one this build can encode (PNG, JPEG, WebP).

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Encode an image as PNG bytes
pub fn to_png_bytes(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .context("Failed to encode image as PNG")?;
    Ok(buffer.into_inner())
}

/// Encode an image as a base64 PNG string, the format the API expects
pub fn to_base64_png(image: &DynamicImage) -> Result<String> {
    Ok(STANDARD.encode(to_png_bytes(image)?))
}

/// Decode an image returned by the service
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).context("Response body is not a decodable image")
}

/// Format to write for an output path; PNG unless the extension says otherwise
pub fn output_format(path: &Path) -> ImageFormat {
    match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::WebP)) => format,
        _ => ImageFormat::Png,
    }
}

/// Save an image in the format picked by [`output_format`]
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    let format = output_format(path);

    // JPEG has no alpha channel; the WebP encoder wants 8-bit RGB(A)
    let converted = match format {
        ImageFormat::Jpeg => Some(DynamicImage::ImageRgb8(image.to_rgb8())),
        ImageFormat::WebP => Some(DynamicImage::ImageRgba8(image.to_rgba8())),
        _ => None,
    };

    converted
        .as_ref()
        .unwrap_or(image)
        .save_with_format(path, format)
        .with_context(|| format!("Failed to save image to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};

    #[test]
    fn test_base64_png_decodes_back_to_grayscale() {
        let mask = DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 4, Luma([255])));
        let encoded = to_base64_png(&mask).unwrap();

        let bytes = STANDARD.decode(encoded).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 4));
        assert_eq!(decoded.color(), image::ColorType::L8);
    }

    #[test]
    fn test_decode_rejects_non_image() {
        assert!(decode_image(b"{\"detail\":\"oops\"}").is_err());
    }

    #[test]
    fn test_output_format_follows_extension() {
        assert_eq!(output_format(Path::new("out.png")), ImageFormat::Png);
        assert_eq!(output_format(Path::new("out.JPG")), ImageFormat::Jpeg);
        assert_eq!(output_format(Path::new("out.jpeg")), ImageFormat::Jpeg);
        assert_eq!(output_format(Path::new("out.webp")), ImageFormat::WebP);
        assert_eq!(output_format(Path::new("out.bmp")), ImageFormat::Png);
        assert_eq!(output_format(Path::new("test_result")), ImageFormat::Png);
    }

    #[test]
    fn test_save_image_writes_png_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let image = DynamicImage::ImageLuma8(GrayImage::new(2, 2));

        save_image(&image, &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_save_image_writes_jpeg_for_jpg_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 128])));

        save_image(&image, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8]));
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            ImageFormat::Jpeg
        );
    }
}
