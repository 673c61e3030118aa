use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{
        Category, CategoryWithCount, CategoryWithProducts, CreateCategoryRequest, Product,
        ProductRow, UpdateCategoryRequest,
    },
};

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Flat listing ordered by display position.
pub async fn get_all(pool: &PgPool, active_only: bool) -> Result<Vec<Category>> {
    let query = if active_only {
        "SELECT * FROM categories WHERE is_active = TRUE ORDER BY display_order ASC, name ASC"
    } else {
        "SELECT * FROM categories ORDER BY display_order ASC, name ASC"
    };

    let categories = sqlx::query_as::<_, Category>(query).fetch_all(pool).await?;

    Ok(categories)
}

/// Admin listing: every category with its product count.
pub async fn get_all_with_counts(pool: &PgPool) -> Result<Vec<CategoryWithCount>> {
    #[derive(sqlx::FromRow)]
    struct CountedRow {
        #[sqlx(flatten)]
        category: Category,
        product_count: i64,
    }

    let rows = sqlx::query_as::<_, CountedRow>(
        "SELECT c.*, COUNT(p.id) AS product_count
         FROM categories c
         LEFT JOIN products p ON p.category_id = c.id
         GROUP BY c.id
         ORDER BY c.display_order ASC, c.name ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| CategoryWithCount {
            category: r.category,
            product_count: r.product_count,
        })
        .collect())
}

/// Category detail with all its products (admin view).
pub async fn find_by_id_with_products(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<CategoryWithProducts>> {
    let Some(category) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let products = products_of(pool, &category, false).await?;

    Ok(Some(CategoryWithProducts { category, products }))
}

/// Category detail for the public catalog: only active products included.
pub async fn find_by_slug_with_products(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<CategoryWithProducts>> {
    let Some(category) = find_by_slug(pool, slug).await? else {
        return Ok(None);
    };

    let products = products_of(pool, &category, true).await?;

    Ok(Some(CategoryWithProducts { category, products }))
}

async fn products_of(pool: &PgPool, category: &Category, active_only: bool) -> Result<Vec<Product>> {
    let query = if active_only {
        "SELECT * FROM products WHERE category_id = $1 AND is_active = TRUE
         ORDER BY created_at DESC"
    } else {
        "SELECT * FROM products WHERE category_id = $1 ORDER BY created_at DESC"
    };

    let rows = sqlx::query_as::<_, ProductRow>(query)
        .bind(category.id)
        .fetch_all(pool)
        .await?;

    let mut products = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        match row.into_product(Some(category.clone())) {
            Ok(product) => products.push(product),
            Err(e) => tracing::warn!("Skipping product {} with corrupt data: {}", id, e),
        }
    }

    Ok(products)
}

pub async fn create(pool: &PgPool, req: &CreateCategoryRequest) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, slug, description, image, display_order, is_active)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(&req.name)
    .bind(&req.slug)
    .bind(&req.description)
    .bind(&req.image)
    .bind(req.display_order.unwrap_or(0))
    .bind(req.is_active.unwrap_or(true))
    .fetch_one(pool)
    .await?;

    Ok(category)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateCategoryRequest,
) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        UPDATE categories
        SET
            name = COALESCE($1, name),
            slug = COALESCE($2, slug),
            description = COALESCE($3, description),
            image = COALESCE($4, image),
            display_order = COALESCE($5, display_order),
            is_active = COALESCE($6, is_active),
            updated_at = NOW()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(&req.name)
    .bind(&req.slug)
    .bind(&req.description)
    .bind(&req.image)
    .bind(req.display_order)
    .bind(req.is_active)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// Removes the category row only. Products keep existing with a dangling
/// category_id (FK sets it to NULL).
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &PgPool, active_only: bool) -> Result<i64> {
    let query = if active_only {
        "SELECT COUNT(*) FROM categories WHERE is_active = TRUE"
    } else {
        "SELECT COUNT(*) FROM categories"
    };

    let total = sqlx::query_scalar::<_, i64>(query).fetch_one(pool).await?;

    Ok(total)
}
