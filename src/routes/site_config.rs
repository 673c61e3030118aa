use axum::{extract::State, Json};
use serde_json::json;

use crate::{
    error::{AppError, Result},
    models::{HeroConfigResponse, UpdateHeroRequest},
    queries::{product_queries, site_config_queries},
    utils::extractors::AdminSession,
    AppState,
};

pub async fn get_hero(State(state): State<AppState>) -> Result<Json<HeroConfigResponse>> {
    let config = site_config_queries::get(&state.db)
        .await?
        .ok_or_else(|| AppError::InternalError("site_config row 'main' is missing".to_string()))?;

    // A dangling reference (product deleted since selection) resolves to null
    let hero_product = match config.hero_product_id {
        Some(id) => product_queries::find_by_id(&state.db, id).await?,
        None => None,
    };

    Ok(Json(HeroConfigResponse {
        hero_product_id: config.hero_product_id,
        hero_product,
    }))
}

pub async fn update_hero(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<UpdateHeroRequest>,
) -> Result<Json<serde_json::Value>> {
    // Validated before touching the row, so a bad id leaves the previous
    // selection intact
    if let Some(id) = payload.hero_product_id {
        if product_queries::find_by_id(&state.db, id).await?.is_none() {
            return Err(AppError::NotFound("Producto no encontrado".to_string()));
        }
    }

    let config = site_config_queries::set_hero(&state.db, payload.hero_product_id).await?;

    Ok(Json(json!({
        "success": true,
        "heroProductId": config.hero_product_id,
    })))
}
