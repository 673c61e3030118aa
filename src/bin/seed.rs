//! Seeds the admin user, the storefront categories and a few sample
//! products. Safe to re-run: existing emails/slugs are skipped.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use loopz_back::{
    config::DatabaseConfig,
    database,
    error::Result,
    models::{CreateCategoryRequest, ProductRequest, ProductSpec},
    queries::{category_queries, product_queries, user_queries},
};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let db_config = match std::env::var("DB_URL") {
        Ok(url) => DatabaseConfig {
            url,
            max_connections: 5,
        },
        Err(_) => {
            tracing::error!("DB_URL not set");
            std::process::exit(1);
        }
    };

    let pool = match database::create_pool(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = seed(&pool).await {
        tracing::error!("Seed failed: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Seed completed");
}

async fn seed(pool: &PgPool) -> Result<()> {
    seed_admin(pool).await?;

    let iems = seed_category(pool, "In-Ear Monitors", "in-ear-monitors", 1,
        "Audífonos in-ear de alta fidelidad para profesionales y audiófilos").await?;
    seed_category(pool, "Cables Premium", "cables-premium", 2,
        "Cables de alta calidad para mejorar tu experiencia de audio").await?;
    seed_category(pool, "DACs & Amplificadores", "dacs-amplificadores", 3,
        "Convertidores y amplificadores portátiles de audio").await?;
    seed_category(pool, "Accesorios", "accesorios", 4,
        "Tips, estuches y accesorios para tus IEMs").await?;

    seed_product(pool, SampleProduct {
        name: "KZ ZS10 Pro X",
        slug: "kz-zs10-pro-x",
        description: "Los KZ ZS10 Pro X son la evolución de los legendarios ZS10 Pro. \
            Con 5 drivers por lado ofrecen un sonido detallado y equilibrado.",
        short_desc: "IEM híbrido 5 drivers - El favorito de los audiófilos",
        price: Decimal::new(4599, 2),
        compare_price: Some(Decimal::new(5999, 2)),
        specs: vec![
            ("Drivers", "4BA + 1DD"),
            ("Impedancia", "24Ω"),
            ("Sensibilidad", "112dB"),
            ("Conector", "2-pin 0.75mm"),
        ],
        category_id: iems,
        is_featured: true,
        is_new: true,
    })
    .await?;

    seed_product(pool, SampleProduct {
        name: "Moondrop Aria 2",
        slug: "moondrop-aria-2",
        description: "Los Moondrop Aria 2 montan un driver dinámico de 10mm con \
            diafragma LCP y una respuesta de frecuencia plana y natural.",
        short_desc: "Driver dinámico LCP - Sonido neutral y detallado",
        price: Decimal::new(7999, 2),
        compare_price: None,
        specs: vec![
            ("Driver", "10mm LCP"),
            ("Impedancia", "32Ω"),
            ("Sensibilidad", "122dB/Vrms"),
            ("Conector", "2-pin 0.78mm"),
        ],
        category_id: iems,
        is_featured: true,
        is_new: false,
    })
    .await?;

    seed_product(pool, SampleProduct {
        name: "Shuoer S12 Pro",
        slug: "shuoer-s12-pro",
        description: "Los Shuoer S12 Pro utilizan un driver planar magnético de \
            14.8mm con resolución excepcional y gran velocidad de respuesta.",
        short_desc: "Driver planar 14.8mm - Resolución excepcional",
        price: Decimal::new(16999, 2),
        compare_price: Some(Decimal::new(19999, 2)),
        specs: vec![
            ("Driver", "14.8mm Planar"),
            ("Impedancia", "16Ω"),
            ("Sensibilidad", "102dB"),
        ],
        category_id: iems,
        is_featured: false,
        is_new: true,
    })
    .await?;

    Ok(())
}

async fn seed_admin(pool: &PgPool) -> Result<()> {
    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@inears.com".to_string());

    if user_queries::find_by_email(pool, &email).await?.is_some() {
        tracing::info!("Admin user {} already exists", email);
        return Ok(());
    }

    let password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let hash = bcrypt::hash(&password, 12)
        .map_err(|e| loopz_back::AppError::InternalError(format!("bcrypt failed: {}", e)))?;

    let user = user_queries::create_admin(pool, &email, "Administrador", &hash).await?;
    tracing::info!("Admin user created: {}", user.email);

    Ok(())
}

async fn seed_category(
    pool: &PgPool,
    name: &str,
    slug: &str,
    order: i32,
    description: &str,
) -> Result<Uuid> {
    if let Some(existing) = category_queries::find_by_slug(pool, slug).await? {
        tracing::info!("Category {} already exists", slug);
        return Ok(existing.id);
    }

    let category = category_queries::create(
        pool,
        &CreateCategoryRequest {
            name: Some(name.to_string()),
            slug: Some(slug.to_string()),
            description: Some(description.to_string()),
            image: None,
            display_order: Some(order),
            is_active: None,
        },
    )
    .await?;

    tracing::info!("Category created: {}", category.slug);

    Ok(category.id)
}

struct SampleProduct {
    name: &'static str,
    slug: &'static str,
    description: &'static str,
    short_desc: &'static str,
    price: Decimal,
    compare_price: Option<Decimal>,
    specs: Vec<(&'static str, &'static str)>,
    category_id: Uuid,
    is_featured: bool,
    is_new: bool,
}

async fn seed_product(pool: &PgPool, sample: SampleProduct) -> Result<()> {
    if product_queries::find_by_slug(pool, sample.slug).await?.is_some() {
        tracing::info!("Product {} already exists", sample.slug);
        return Ok(());
    }

    let specs = sample
        .specs
        .into_iter()
        .map(|(name, value)| ProductSpec {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect();

    let request = ProductRequest {
        name: Some(sample.name.to_string()),
        slug: Some(sample.slug.to_string()),
        description: Some(sample.description.to_string()),
        short_desc: Some(sample.short_desc.to_string()),
        price: Some(sample.price),
        compare_price: sample.compare_price,
        main_image: Some(
            "https://images.unsplash.com/photo-1606220588913?w=500&h=500&fit=crop".to_string(),
        ),
        images: None,
        specs: Some(specs),
        meta_title: None,
        meta_desc: None,
        is_active: Some(true),
        is_featured: Some(sample.is_featured),
        is_new: Some(sample.is_new),
        stock: Some(10),
        in_stock: None,
        category_id: Some(sample.category_id),
    };

    let product = product_queries::create(pool, &request).await?;
    tracing::info!("Product created: {}", product.slug);

    Ok(())
}
