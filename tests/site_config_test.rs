use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use loopz_back::{
    models::{CreateCategoryRequest, ProductRequest},
    queries::{category_queries, product_queries, site_config_queries},
};

async fn make_product(pool: &PgPool) -> Uuid {
    let category = category_queries::create(
        pool,
        &CreateCategoryRequest {
            name: Some("iems".to_string()),
            slug: Some("iems".to_string()),
            description: None,
            image: None,
            display_order: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let request = ProductRequest {
        name: Some("Aria".to_string()),
        slug: Some("aria".to_string()),
        description: Some("desc".to_string()),
        short_desc: None,
        price: Some(Decimal::new(7999, 2)),
        compare_price: None,
        main_image: Some("img.webp".to_string()),
        images: None,
        specs: None,
        meta_title: None,
        meta_desc: None,
        is_active: None,
        is_featured: None,
        is_new: None,
        stock: Some(1),
        in_stock: None,
        category_id: Some(category.id),
    };

    product_queries::create(pool, &request).await.unwrap().id
}

#[sqlx::test]
async fn singleton_row_exists_after_migration(pool: PgPool) {
    let config = site_config_queries::get(&pool).await.unwrap().unwrap();

    assert_eq!(config.id, "main");
    assert!(config.hero_product_id.is_none());
}

#[sqlx::test]
async fn hero_can_be_set_and_cleared(pool: PgPool) {
    let product = make_product(&pool).await;

    let config = site_config_queries::set_hero(&pool, Some(product)).await.unwrap();
    assert_eq!(config.hero_product_id, Some(product));

    let fetched = site_config_queries::get(&pool).await.unwrap().unwrap();
    assert_eq!(fetched.hero_product_id, Some(product));

    let cleared = site_config_queries::set_hero(&pool, None).await.unwrap();
    assert!(cleared.hero_product_id.is_none());
}

#[sqlx::test]
async fn deleting_the_hero_product_clears_the_reference(pool: PgPool) {
    let product = make_product(&pool).await;
    site_config_queries::set_hero(&pool, Some(product)).await.unwrap();

    product_queries::delete(&pool, product).await.unwrap();

    let config = site_config_queries::get(&pool).await.unwrap().unwrap();
    assert!(config.hero_product_id.is_none());
}
