//! Sidebar image uploads.
//!
//! Uploads are only inspected: the format label and pixel dimensions are
//! reported back and the bytes are kept for the preview.

use std::io::Cursor;

use bytes::Bytes;
use crop_common::{CropError, CropResult};
use image::ImageFormat;

/// Extensions accepted by the uploader.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// An accepted upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub file_name: String,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Bytes,
}

impl UploadedImage {
    /// Format label shown next to the preview.
    pub fn format_label(&self) -> &'static str {
        format_label(self.format)
    }

    pub fn content_type(&self) -> &'static str {
        match self.format {
            ImageFormat::Png => "image/png",
            _ => "image/jpeg",
        }
    }

    /// "width x height" in pixels.
    pub fn size_label(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }
}

fn format_label(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "PNG",
        ImageFormat::Jpeg => "JPEG",
        _ => "UNKNOWN",
    }
}

/// Validate and inspect an uploaded file.
///
/// The extension must be one of [`ACCEPTED_EXTENSIONS`] and the content must
/// decode as JPEG or PNG. Only the header is decoded.
pub fn inspect(file_name: &str, bytes: Bytes, limit: usize) -> CropResult<UploadedImage> {
    if bytes.is_empty() {
        return Err(CropError::UnsupportedImage("the file is empty".to_string()));
    }
    if bytes.len() > limit {
        return Err(CropError::UploadTooLarge {
            size: bytes.len(),
            limit,
        });
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(CropError::UnsupportedImage(format!(
            "'{}' is not a jpg, jpeg or png file",
            file_name
        )));
    }

    let reader = image::io::Reader::new(Cursor::new(bytes.as_ref()))
        .with_guessed_format()
        .map_err(|e| CropError::UnsupportedImage(e.to_string()))?;

    let format = match reader.format() {
        Some(f @ (ImageFormat::Png | ImageFormat::Jpeg)) => f,
        Some(other) => {
            return Err(CropError::UnsupportedImage(format!(
                "{:?} content is not accepted",
                other
            )))
        }
        None => {
            return Err(CropError::UnsupportedImage(format!(
                "could not recognise '{}' as an image",
                file_name
            )))
        }
    };

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| CropError::UnsupportedImage(e.to_string()))?;

    tracing::info!(
        file = %file_name,
        format = format_label(format),
        width,
        height,
        "Inspected uploaded image"
    );

    Ok(UploadedImage {
        file_name: file_name.to_string(),
        format,
        width,
        height,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Bytes {
        let img = RgbImage::from_pixel(width, height, Rgb([34, 139, 34]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        Bytes::from(out.into_inner())
    }

    #[test]
    fn test_png_dimensions() {
        let image = inspect("field.png", encoded(40, 30, ImageFormat::Png), 1 << 20).unwrap();
        assert_eq!((image.width, image.height), (40, 30));
        assert_eq!(image.format_label(), "PNG");
        assert_eq!(image.content_type(), "image/png");
        assert_eq!(image.size_label(), "40 x 30");
    }

    #[test]
    fn test_jpeg_with_uppercase_extension() {
        let image = inspect("LEAF.JPG", encoded(16, 8, ImageFormat::Jpeg), 1 << 20).unwrap();
        assert_eq!(image.format_label(), "JPEG");
        assert_eq!((image.width, image.height), (16, 8));
    }

    #[test]
    fn test_rejects_other_extensions() {
        let err = inspect("notes.txt", Bytes::from_static(b"hello"), 1 << 20).unwrap_err();
        assert!(matches!(err, CropError::UnsupportedImage(_)));

        let err = inspect("noext", encoded(2, 2, ImageFormat::Png), 1 << 20).unwrap_err();
        assert!(matches!(err, CropError::UnsupportedImage(_)));
    }

    #[test]
    fn test_rejects_content_that_is_not_an_image() {
        let err = inspect("fake.png", Bytes::from_static(b"not really a png"), 1 << 20)
            .unwrap_err();
        assert!(matches!(err, CropError::UnsupportedImage(_)));
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        let err = inspect("empty.png", Bytes::new(), 1 << 20).unwrap_err();
        assert!(matches!(err, CropError::UnsupportedImage(_)));

        let err = inspect("big.png", encoded(20, 20, ImageFormat::Png), 10).unwrap_err();
        assert!(matches!(err, CropError::UploadTooLarge { limit: 10, .. }));
    }
}
