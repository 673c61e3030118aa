use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{LimitQuery, PaginatedResponse, Product, ProductFilters, ProductRequest},
    queries::product_queries,
    utils::extractors::AdminSession,
    AppState,
};

pub async fn list_products(
    State(state): State<AppState>,
    Query(filters): Query<ProductFilters>,
) -> Result<Json<PaginatedResponse<Product>>> {
    let page = product_queries::find_all(&state.db, &filters).await?;

    Ok(Json(page))
}

pub async fn featured_products(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = product_queries::find_featured(&state.db, params.limit).await?;

    Ok(Json(products))
}

pub async fn new_products(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = product_queries::find_new(&state.db, params.limit).await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Producto no encontrado".to_string()))?;

    Ok(Json(product))
}

pub async fn get_product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    let product = product_queries::find_by_slug(&state.db, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Producto no encontrado".to_string()))?;

    Ok(Json(product))
}

pub async fn create_product(
    _session: AdminSession,
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    for (field, present) in [
        ("name", payload.name.is_some()),
        ("slug", payload.slug.is_some()),
        ("description", payload.description.is_some()),
        ("price", payload.price.is_some()),
        ("categoryId", payload.category_id.is_some()),
        ("mainImage", payload.main_image.is_some()),
    ] {
        if !present {
            return Err(AppError::BadRequest(format!(
                "Faltan campos requeridos: {}",
                field
            )));
        }
    }

    if let Some(ref slug) = payload.slug {
        if product_queries::find_by_slug(&state.db, slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Ya existe un producto con el slug '{}'",
                slug
            )));
        }
    }

    let product = product_queries::create(&state.db, &payload).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<Product>> {
    if let Some(ref slug) = payload.slug {
        if let Some(existing) = product_queries::find_by_slug(&state.db, slug).await? {
            if existing.id != id {
                return Err(AppError::Conflict(format!(
                    "Ya existe otro producto con el slug '{}'",
                    slug
                )));
            }
        }
    }

    let product = product_queries::update(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Producto no encontrado".to_string()))?;

    Ok(Json(product))
}

pub async fn delete_product(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let deleted = product_queries::delete(&state.db, id).await?;

    if !deleted {
        return Err(AppError::NotFound("Producto no encontrado".to_string()));
    }

    Ok(Json(json!({ "success": true })))
}
