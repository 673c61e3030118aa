use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Product;

/// Singleton configuration row (fixed id `main`), seeded by the initial
/// migration.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub id: String,
    pub hero_product_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroConfigResponse {
    pub hero_product_id: Option<Uuid>,
    pub hero_product: Option<Product>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHeroRequest {
    pub hero_product_id: Option<Uuid>,
}
