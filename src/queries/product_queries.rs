use std::collections::HashMap;

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::Result,
    models::{
        encode_images, encode_specs, Category, PaginatedResponse, Product, ProductFilters,
        ProductRequest, ProductRow,
    },
};

const DEFAULT_PAGE_SIZE: i64 = 12;
const MAX_PAGE_SIZE: i64 = 100;
const DEFAULT_FEED_LIMIT: i64 = 6;

/// All provided filters are ANDed; `search` matches name OR description.
/// `is_active` defaults to true when absent.
fn push_filters(query: &mut QueryBuilder<Postgres>, filters: &ProductFilters) {
    query.push(" AND is_active = ");
    query.push_bind(filters.is_active.unwrap_or(true));

    if let Some(category_id) = filters.category_id {
        query.push(" AND category_id = ");
        query.push_bind(category_id);
    }

    if let Some(is_featured) = filters.is_featured {
        query.push(" AND is_featured = ");
        query.push_bind(is_featured);
    }

    if let Some(is_new) = filters.is_new {
        query.push(" AND is_new = ");
        query.push_bind(is_new);
    }

    if let Some(ref search) = filters.search {
        query.push(" AND (name ILIKE ");
        query.push_bind(format!("%{}%", search));
        query.push(" OR description ILIKE ");
        query.push_bind(format!("%{}%", search));
        query.push(")");
    }
}

async fn fetch_category(pool: &PgPool, category_id: Option<Uuid>) -> Result<Option<Category>> {
    let Some(id) = category_id else {
        return Ok(None);
    };

    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Batch-fetch the categories for a page of rows and decode each row.
/// Rows with corrupt `images`/`specs` text are logged and skipped instead of
/// failing the whole listing.
async fn attach_categories(pool: &PgPool, rows: Vec<ProductRow>) -> Result<Vec<Product>> {
    let category_ids: Vec<Uuid> = rows.iter().filter_map(|r| r.category_id).collect();

    let mut categories: HashMap<Uuid, Category> = HashMap::new();
    if !category_ids.is_empty() {
        let fetched = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ANY($1)")
            .bind(&category_ids)
            .fetch_all(pool)
            .await?;

        for category in fetched {
            categories.insert(category.id, category);
        }
    }

    let mut products = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        let category = row.category_id.and_then(|cid| categories.get(&cid).cloned());

        match row.into_product(category) {
            Ok(product) => products.push(product),
            Err(e) => tracing::warn!("Skipping product {} with corrupt data: {}", id, e),
        }
    }

    Ok(products)
}

pub async fn find_all(pool: &PgPool, filters: &ProductFilters) -> Result<PaginatedResponse<Product>> {
    let page = filters.page.unwrap_or(1).max(1);
    let page_size = filters
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM products WHERE 1=1");
    push_filters(&mut query, filters);
    query.push(" ORDER BY created_at DESC LIMIT ");
    query.push_bind(page_size);
    query.push(" OFFSET ");
    // Saturate so an absurd page number stays a valid OFFSET instead of
    // overflowing
    query.push_bind((page - 1).saturating_mul(page_size));

    let rows = query.build_query_as::<ProductRow>().fetch_all(pool).await?;

    // Separate count with the same filters so pages past the end still
    // report an accurate total
    let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products WHERE 1=1");
    push_filters(&mut count_query, filters);
    let total: i64 = count_query
        .build_query_scalar()
        .fetch_one(pool)
        .await?;

    let products = attach_categories(pool, rows).await?;

    Ok(PaginatedResponse::new(products, total, page, page_size))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        None => Ok(None),
        Some(row) => {
            let category = fetch_category(pool, row.category_id).await?;
            Ok(Some(row.into_product(category)?))
        }
    }
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    match row {
        None => Ok(None),
        Some(row) => {
            let category = fetch_category(pool, row.category_id).await?;
            Ok(Some(row.into_product(category)?))
        }
    }
}

pub async fn find_featured(pool: &PgPool, limit: Option<i64>) -> Result<Vec<Product>> {
    find_flagged(pool, "is_featured", limit).await
}

pub async fn find_new(pool: &PgPool, limit: Option<i64>) -> Result<Vec<Product>> {
    find_flagged(pool, "is_new", limit).await
}

async fn find_flagged(pool: &PgPool, flag: &str, limit: Option<i64>) -> Result<Vec<Product>> {
    // limit=0 is honored: a capped feed asked for zero items gets zero
    let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(0, MAX_PAGE_SIZE);

    let query = format!(
        "SELECT * FROM products WHERE is_active = TRUE AND {} = TRUE
         ORDER BY created_at DESC LIMIT $1",
        flag
    );

    let rows = sqlx::query_as::<_, ProductRow>(&query)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    attach_categories(pool, rows).await
}

pub async fn create(pool: &PgPool, req: &ProductRequest) -> Result<Product> {
    let images = encode_images(req.images.as_deref())?;
    let specs = encode_specs(req.specs.as_deref())?;

    let stock = req.stock.unwrap_or(0);
    let in_stock = req.in_stock.unwrap_or(stock > 0);

    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        INSERT INTO products (
            name, slug, description, short_desc, price, compare_price,
            main_image, images, specs, meta_title, meta_desc,
            is_active, is_featured, is_new, stock, in_stock, category_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        RETURNING *
        "#,
    )
    .bind(&req.name)
    .bind(&req.slug)
    .bind(&req.description)
    .bind(&req.short_desc)
    .bind(req.price)
    .bind(req.compare_price)
    .bind(&req.main_image)
    .bind(images)
    .bind(specs)
    .bind(&req.meta_title)
    .bind(&req.meta_desc)
    .bind(req.is_active.unwrap_or(true))
    .bind(req.is_featured.unwrap_or(false))
    .bind(req.is_new.unwrap_or(false))
    .bind(stock)
    .bind(in_stock)
    .bind(req.category_id)
    .fetch_one(pool)
    .await?;

    let category = fetch_category(pool, row.category_id).await?;
    row.into_product(category)
}

pub async fn update(pool: &PgPool, id: Uuid, req: &ProductRequest) -> Result<Option<Product>> {
    let images = encode_images(req.images.as_deref())?;
    let specs = encode_specs(req.specs.as_deref())?;

    // Keep in_stock consistent with stock when only the latter changes
    let in_stock = req.in_stock.or(req.stock.map(|s| s > 0));

    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        UPDATE products
        SET
            name = COALESCE($1, name),
            slug = COALESCE($2, slug),
            description = COALESCE($3, description),
            short_desc = COALESCE($4, short_desc),
            price = COALESCE($5, price),
            compare_price = COALESCE($6, compare_price),
            main_image = COALESCE($7, main_image),
            images = COALESCE($8, images),
            specs = COALESCE($9, specs),
            meta_title = COALESCE($10, meta_title),
            meta_desc = COALESCE($11, meta_desc),
            is_active = COALESCE($12, is_active),
            is_featured = COALESCE($13, is_featured),
            is_new = COALESCE($14, is_new),
            stock = COALESCE($15, stock),
            in_stock = COALESCE($16, in_stock),
            category_id = COALESCE($17, category_id),
            updated_at = NOW()
        WHERE id = $18
        RETURNING *
        "#,
    )
    .bind(&req.name)
    .bind(&req.slug)
    .bind(&req.description)
    .bind(&req.short_desc)
    .bind(req.price)
    .bind(req.compare_price)
    .bind(&req.main_image)
    .bind(images)
    .bind(specs)
    .bind(&req.meta_title)
    .bind(&req.meta_desc)
    .bind(req.is_active)
    .bind(req.is_featured)
    .bind(req.is_new)
    .bind(req.stock)
    .bind(in_stock)
    .bind(req.category_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        None => Ok(None),
        Some(row) => {
            let category = fetch_category(pool, row.category_id).await?;
            Ok(Some(row.into_product(category)?))
        }
    }
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count(
    pool: &PgPool,
    is_active: Option<bool>,
    category_id: Option<Uuid>,
) -> Result<i64> {
    let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products WHERE 1=1");

    if let Some(is_active) = is_active {
        query.push(" AND is_active = ");
        query.push_bind(is_active);
    }

    if let Some(category_id) = category_id {
        query.push(" AND category_id = ");
        query.push_bind(category_id);
    }

    let total = query.build_query_scalar().fetch_one(pool).await?;

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_are_anded_with_active_default() {
        let filters = ProductFilters {
            category_id: Some(Uuid::nil()),
            is_featured: Some(true),
            search: Some("kz".to_string()),
            ..Default::default()
        };

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM products WHERE 1=1");
        push_filters(&mut query, &filters);
        let sql = query.sql();

        assert!(sql.contains("AND is_active = $1"));
        assert!(sql.contains("AND category_id = $2"));
        assert!(sql.contains("AND is_featured = $3"));
        assert!(sql.contains("(name ILIKE $4 OR description ILIKE $5)"));
        assert!(!sql.contains("is_new"));
    }

    #[test]
    fn no_filters_still_defaults_to_active() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM products WHERE 1=1");
        push_filters(&mut query, &ProductFilters::default());

        assert_eq!(
            query.sql(),
            "SELECT * FROM products WHERE 1=1 AND is_active = $1"
        );
    }
}
