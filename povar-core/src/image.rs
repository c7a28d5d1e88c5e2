//! Encoding user-selected images for inline transport.

use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{ImageFormat, ImageReader};

use crate::error::EncodeError;
use crate::types::EncodedImage;

/// Allowed image formats for recipe photos.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum file size for uploaded images (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Detect the image format from raw bytes and return its content type.
pub fn detect_media_type(data: &[u8]) -> Result<String, EncodeError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(EncodeError::Unreadable)?;

    let format = reader.format().ok_or(EncodeError::UnknownFormat)?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(EncodeError::UnsupportedFormat(format!("{:?}", format)));
    }

    Ok(format.to_mime_type().to_string())
}

/// Encode raw image bytes as a base64 inline payload.
///
/// The media type is detected from the bytes; `declared_type` is only used
/// when detection and declaration disagree, in which case detection wins and
/// the mismatch is logged.
pub fn encode_image_bytes(
    data: &[u8],
    declared_type: Option<&str>,
) -> Result<EncodedImage, EncodeError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(EncodeError::TooLarge {
            size: data.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let media_type = detect_media_type(data)?;

    if let Some(declared) = declared_type {
        if declared != media_type {
            tracing::debug!(declared, detected = %media_type, "declared content type mismatch");
        }
    }

    Ok(EncodedImage {
        data: BASE64.encode(data),
        media_type,
    })
}

/// Read an image file and encode it for inline transport.
pub async fn encode_image_file(path: &Path) -> Result<EncodedImage, EncodeError> {
    let data = tokio::fs::read(path).await?;
    encode_image_bytes(&data, None)
}

impl EncodedImage {
    /// Build from an already base64-encoded payload, stripping any
    /// `data:<type>;base64,` prefix the source may carry.
    pub fn from_base64(data: &str, media_type: &str) -> Result<Self, EncodeError> {
        let stripped = strip_data_uri(data);

        // Reject payloads that are not actually base64.
        BASE64
            .decode(stripped)
            .map_err(|e| EncodeError::InvalidBase64(e.to_string()))?;

        Ok(Self {
            data: stripped.to_string(),
            media_type: media_type.to_string(),
        })
    }
}

fn strip_data_uri(data: &str) -> &str {
    if data.starts_with("data:") {
        match data.split_once(";base64,") {
            Some((_, payload)) => payload,
            None => data,
        }
    } else {
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG.
    const TINY_PNG_BASE64: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn tiny_png() -> Vec<u8> {
        BASE64.decode(TINY_PNG_BASE64).unwrap()
    }

    #[test]
    fn encodes_png_bytes() {
        let encoded = encode_image_bytes(&tiny_png(), None).unwrap();
        assert_eq!(encoded.media_type, "image/png");
        assert_eq!(encoded.data, TINY_PNG_BASE64);
    }

    #[test]
    fn rejects_non_image_bytes() {
        let result = encode_image_bytes(b"not an image", None);
        assert!(matches!(result, Err(EncodeError::UnknownFormat)));
    }

    #[test]
    fn rejects_oversized_payload() {
        let data = vec![0u8; MAX_FILE_SIZE + 1];
        assert!(matches!(
            encode_image_bytes(&data, None),
            Err(EncodeError::TooLarge { .. })
        ));
    }

    #[test]
    fn from_base64_strips_data_uri_prefix() {
        let with_prefix = format!("data:image/png;base64,{}", TINY_PNG_BASE64);
        let encoded = EncodedImage::from_base64(&with_prefix, "image/png").unwrap();
        assert_eq!(encoded.data, TINY_PNG_BASE64);
    }

    #[test]
    fn from_base64_keeps_bare_payload() {
        let encoded = EncodedImage::from_base64(TINY_PNG_BASE64, "image/png").unwrap();
        assert_eq!(encoded.data, TINY_PNG_BASE64);
    }

    #[test]
    fn from_base64_rejects_garbage() {
        assert!(matches!(
            EncodedImage::from_base64("не база64!!!", "image/png"),
            Err(EncodeError::InvalidBase64(_))
        ));
    }

    #[tokio::test]
    async fn unreadable_file_is_an_encoding_error() {
        let result = encode_image_file(Path::new("/nonexistent/recipe.jpg")).await;
        assert!(matches!(result, Err(EncodeError::Unreadable(_))));
    }

    #[tokio::test]
    async fn encodes_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dish.png");
        std::fs::write(&path, tiny_png()).unwrap();

        let encoded = encode_image_file(&path).await.unwrap();
        assert_eq!(encoded.media_type, "image/png");
    }
}
