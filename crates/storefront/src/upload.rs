//! Image upload handling: multipart file field to embedded data URI.
//!
//! Uploaded images (product photos, profile pictures) are stored inline in
//! the JSON stores as `data:` URIs. Uploads are size-limited: the stores
//! live in small JSON files and an unbounded photo would dominate them.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;

/// Maximum accepted upload size.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Errors turning an upload into a data URI.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The upload exceeds [`MAX_IMAGE_BYTES`].
    #[error("image is too large ({size} bytes, max {MAX_IMAGE_BYTES})")]
    TooLarge { size: usize },
    /// The field did not declare an image content type.
    #[error("uploaded file is not an image (content type {content_type})")]
    NotAnImage { content_type: String },
}

/// Encode uploaded bytes as a `data:` URI.
///
/// # Errors
///
/// Returns [`UploadError`] if the upload is too large or not an image.
pub fn to_data_uri(content_type: &str, bytes: &[u8]) -> Result<String, UploadError> {
    if !content_type.starts_with("image/") {
        return Err(UploadError::NotAnImage {
            content_type: content_type.to_owned(),
        });
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge { size: bytes.len() });
    }
    Ok(format!("data:{content_type};base64,{}", BASE64.encode(bytes)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_image_bytes() {
        let uri = to_data_uri("image/png", &[1, 2, 3]).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_rejects_non_image_content_type() {
        assert!(matches!(
            to_data_uri("application/pdf", &[1]),
            Err(UploadError::NotAnImage { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_upload() {
        let big = vec![0_u8; MAX_IMAGE_BYTES + 1];
        assert!(matches!(
            to_data_uri("image/jpeg", &big),
            Err(UploadError::TooLarge { .. })
        ));
    }
}
