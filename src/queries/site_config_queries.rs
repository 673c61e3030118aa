use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::Result, models::SiteConfig};

const CONFIG_ID: &str = "main";

/// The singleton row is seeded by the initial migration, so a plain SELECT
/// is enough here.
pub async fn get(pool: &PgPool) -> Result<Option<SiteConfig>> {
    let config = sqlx::query_as::<_, SiteConfig>("SELECT * FROM site_config WHERE id = $1")
        .bind(CONFIG_ID)
        .fetch_optional(pool)
        .await?;

    Ok(config)
}

/// Idempotent upsert: sets or clears the hero selection, recreating the row
/// if it was ever wiped.
pub async fn set_hero(pool: &PgPool, hero_product_id: Option<Uuid>) -> Result<SiteConfig> {
    let config = sqlx::query_as::<_, SiteConfig>(
        r#"
        INSERT INTO site_config (id, hero_product_id)
        VALUES ($1, $2)
        ON CONFLICT (id)
        DO UPDATE SET hero_product_id = EXCLUDED.hero_product_id, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(CONFIG_ID)
    .bind(hero_product_id)
    .fetch_one(pool)
    .await?;

    Ok(config)
}
