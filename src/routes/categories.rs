use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{
        Category, CategoryWithCount, CategoryWithProducts, CreateCategoryRequest,
        UpdateCategoryRequest,
    },
    queries::category_queries,
    utils::extractors::AdminSession,
    AppState,
};

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = category_queries::get_all(&state.db, true).await?;

    Ok(Json(categories))
}

pub async fn list_all_categories(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryWithCount>>> {
    let categories = category_queries::get_all_with_counts(&state.db).await?;

    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryWithProducts>> {
    let category = category_queries::find_by_id_with_products(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Categoría no encontrada".to_string()))?;

    Ok(Json(category))
}

pub async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryWithProducts>> {
    let category = category_queries::find_by_slug_with_products(&state.db, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Categoría no encontrada".to_string()))?;

    Ok(Json(category))
}

pub async fn create_category(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    if payload.name.is_none() || payload.slug.is_none() {
        return Err(AppError::BadRequest(
            "Nombre y slug son requeridos".to_string(),
        ));
    }

    if let Some(ref slug) = payload.slug {
        if category_queries::find_by_slug(&state.db, slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Ya existe una categoría con el slug '{}'",
                slug
            )));
        }
    }

    let category = category_queries::create(&state.db, &payload).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>> {
    if let Some(ref slug) = payload.slug {
        if let Some(existing) = category_queries::find_by_slug(&state.db, slug).await? {
            if existing.id != id {
                return Err(AppError::Conflict(format!(
                    "Ya existe otra categoría con el slug '{}'",
                    slug
                )));
            }
        }
    }

    let category = category_queries::update(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Categoría no encontrada".to_string()))?;

    Ok(Json(category))
}

/// Products of a deleted category are left in place with a dangling
/// category_id; the admin UI warns before calling this.
pub async fn delete_category(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let deleted = category_queries::delete(&state.db, id).await?;

    if !deleted {
        return Err(AppError::NotFound("Categoría no encontrada".to_string()));
    }

    Ok(Json(json!({ "success": true })))
}
