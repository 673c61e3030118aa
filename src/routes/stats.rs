use axum::{extract::State, Json};
use serde_json::json;

use crate::{
    error::Result,
    queries::{category_queries, product_queries},
    utils::extractors::AdminSession,
    AppState,
};

/// Entity counts for the admin dashboard cards.
pub async fn get_stats(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    let products = product_queries::count(&state.db, None, None).await?;
    let active_products = product_queries::count(&state.db, Some(true), None).await?;
    let categories = category_queries::count(&state.db, false).await?;
    let active_categories = category_queries::count(&state.db, true).await?;

    Ok(Json(json!({
        "products": products,
        "activeProducts": active_products,
        "categories": categories,
        "activeCategories": active_categories,
    })))
}
