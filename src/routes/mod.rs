mod categories;
mod health;
mod login;
mod products;
mod site_config;
mod stats;
mod upload;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_router() -> Router<AppState> {
    let api = Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/featured", get(products::featured_products))
        .route("/products/new", get(products::new_products))
        .route("/products/slug/{slug}", get(products::get_product_by_slug))
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/categories/all", get(categories::list_all_categories))
        .route(
            "/categories/slug/{slug}",
            get(categories::get_category_by_slug),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/site-config/hero",
            get(site_config::get_hero).put(site_config::update_hero),
        )
        .route("/auth/login", post(login::login_user))
        .route("/upload", post(upload::upload_image))
        .route("/admin/stats", get(stats::get_stats));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .nest("/api", api)
}
