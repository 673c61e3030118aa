use aws_sdk_s3 as s3;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::{AppError, Result};

/// Cloudinary-era limit kept for the S3-backed host.
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// Rejects invalid uploads before any upstream call is made. Returns the
/// object extension on success.
pub fn validate_upload(content_type: &str, size: usize) -> Result<&'static str> {
    let extension = extension_for(content_type).ok_or_else(|| {
        AppError::BadRequest(
            "Tipo de archivo no válido. Solo se permiten: JPG, PNG, WEBP, GIF".to_string(),
        )
    })?;

    if size > MAX_UPLOAD_SIZE {
        return Err(AppError::BadRequest(
            "El archivo es demasiado grande. Máximo 10MB".to_string(),
        ));
    }

    Ok(extension)
}

pub async fn put_object(
    client: &s3::Client,
    bucket: &str,
    key: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> std::result::Result<(), s3::Error> {
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type(content_type)
        .body(ByteStream::from(bytes))
        .send()
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_image_types() {
        assert_eq!(validate_upload("image/jpeg", 1024).unwrap(), "jpg");
        assert_eq!(validate_upload("image/jpg", 1024).unwrap(), "jpg");
        assert_eq!(validate_upload("image/png", 1024).unwrap(), "png");
        assert_eq!(validate_upload("image/webp", 1024).unwrap(), "webp");
        assert_eq!(validate_upload("image/gif", 1024).unwrap(), "gif");
    }

    #[test]
    fn rejects_unsupported_type() {
        let err = validate_upload("application/pdf", 1024).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn rejects_oversized_file() {
        // 15MB upload must fail the size check, not reach upstream
        let err = validate_upload("image/png", 15 * 1024 * 1024).unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("demasiado grande")),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn boundary_size_is_accepted() {
        assert!(validate_upload("image/png", MAX_UPLOAD_SIZE).is_ok());
        assert!(validate_upload("image/png", MAX_UPLOAD_SIZE + 1).is_err());
    }
}
