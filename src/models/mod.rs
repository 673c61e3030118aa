mod category;
mod product;
mod site_config;
mod user;

pub use category::*;
pub use product::*;
pub use site_config::*;
pub use user::*;
