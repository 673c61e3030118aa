pub mod category_queries;
pub mod product_queries;
pub mod site_config_queries;
pub mod user_queries;
