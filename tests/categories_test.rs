use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use loopz_back::{
    models::{CreateCategoryRequest, ProductRequest, UpdateCategoryRequest},
    queries::{category_queries, product_queries},
};

async fn make_category(pool: &PgPool, slug: &str, order: i32, active: bool) -> Uuid {
    category_queries::create(
        pool,
        &CreateCategoryRequest {
            name: Some(slug.to_string()),
            slug: Some(slug.to_string()),
            description: None,
            image: None,
            display_order: Some(order),
            is_active: Some(active),
        },
    )
    .await
    .unwrap()
    .id
}

async fn make_product(pool: &PgPool, slug: &str, category_id: Uuid, active: bool) -> Uuid {
    let request = ProductRequest {
        name: Some(slug.to_string()),
        slug: Some(slug.to_string()),
        description: Some("desc".to_string()),
        short_desc: None,
        price: Some(Decimal::new(1000, 2)),
        compare_price: None,
        main_image: Some("img.webp".to_string()),
        images: None,
        specs: None,
        meta_title: None,
        meta_desc: None,
        is_active: Some(active),
        is_featured: None,
        is_new: None,
        stock: Some(1),
        in_stock: None,
        category_id: Some(category_id),
    };

    product_queries::create(pool, &request).await.unwrap().id
}

#[sqlx::test]
async fn listing_orders_by_display_order(pool: PgPool) {
    make_category(&pool, "accesorios", 4, true).await;
    make_category(&pool, "in-ear-monitors", 1, true).await;
    make_category(&pool, "cables", 2, true).await;
    make_category(&pool, "oculta", 3, false).await;

    let active = category_queries::get_all(&pool, true).await.unwrap();
    let slugs: Vec<_> = active.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["in-ear-monitors", "cables", "accesorios"]);

    let all = category_queries::get_all(&pool, false).await.unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[2].slug, "oculta");
}

#[sqlx::test]
async fn slug_lookup_filters_inactive_products(pool: PgPool) {
    let category = make_category(&pool, "iems", 1, true).await;
    make_product(&pool, "visible", category, true).await;
    make_product(&pool, "hidden", category, false).await;

    let by_slug = category_queries::find_by_slug_with_products(&pool, "iems")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_slug.products.len(), 1);
    assert_eq!(by_slug.products[0].slug, "visible");

    // the id lookup is the admin view and includes everything
    let by_id = category_queries::find_by_id_with_products(&pool, category)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_id.products.len(), 2);
}

#[sqlx::test]
async fn admin_listing_counts_products(pool: PgPool) {
    let iems = make_category(&pool, "iems", 1, true).await;
    make_category(&pool, "cables", 2, true).await;
    make_product(&pool, "p1", iems, true).await;
    make_product(&pool, "p2", iems, false).await;

    let listing = category_queries::get_all_with_counts(&pool).await.unwrap();

    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].category.slug, "iems");
    assert_eq!(listing[0].product_count, 2);
    assert_eq!(listing[1].product_count, 0);
}

#[sqlx::test]
async fn partial_update_touches_only_provided_fields(pool: PgPool) {
    let id = make_category(&pool, "iems", 1, true).await;

    let update = UpdateCategoryRequest {
        name: Some("In-Ear Monitors".to_string()),
        slug: None,
        description: None,
        image: None,
        display_order: None,
        is_active: None,
    };
    let updated = category_queries::update(&pool, id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "In-Ear Monitors");
    assert_eq!(updated.slug, "iems");
    assert_eq!(updated.display_order, 1);
    assert!(updated.is_active);
}

#[sqlx::test]
async fn deleting_a_category_orphans_its_products(pool: PgPool) {
    let category = make_category(&pool, "iems", 1, true).await;
    let product = make_product(&pool, "orphan", category, true).await;

    assert!(category_queries::delete(&pool, category).await.unwrap());

    let fetched = product_queries::find_by_id(&pool, product)
        .await
        .unwrap()
        .unwrap();
    assert!(fetched.category_id.is_none());
    assert!(fetched.category.is_none());

    assert!(category_queries::find_by_id(&pool, category)
        .await
        .unwrap()
        .is_none());
}
