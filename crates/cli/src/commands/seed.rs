//! Seed the catalog with sample products.
//!
//! Useful for local development and demos. Slugs that already exist are left
//! untouched, so the command is safe to run repeatedly.

use secrecy::SecretString;
use sqlx::PgPool;
use tracing::info;

struct SeedProduct {
    slug: &'static str,
    name: &'static str,
    category: &'static str,
    brand: &'static str,
    image: &'static str,
    price: f64,
    count_in_stock: i32,
    description: &'static str,
}

const SAMPLE_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        slug: "wool-scarf",
        name: "Wool Scarf",
        category: "Accessories",
        brand: "Primrose",
        image: "/static/images/wool-scarf.jpg",
        price: 34.5,
        count_in_stock: 20,
        description: "Hand-loomed merino wool scarf in heather grey.",
    },
    SeedProduct {
        slug: "canvas-tote",
        name: "Canvas Tote",
        category: "Bags",
        brand: "Primrose",
        image: "/static/images/canvas-tote.jpg",
        price: 24.0,
        count_in_stock: 35,
        description: "Heavyweight canvas tote with reinforced handles.",
    },
    SeedProduct {
        slug: "ceramic-mug",
        name: "Ceramic Mug",
        category: "Kitchen",
        brand: "Hearthware",
        image: "/static/images/ceramic-mug.jpg",
        price: 18.5,
        count_in_stock: 50,
        description: "Stoneware mug with a speckled glaze, 350 ml.",
    },
    SeedProduct {
        slug: "linen-shirt",
        name: "Linen Shirt",
        category: "Shirts",
        brand: "Fieldline",
        image: "/static/images/linen-shirt.jpg",
        price: 70.0,
        count_in_stock: 15,
        description: "Relaxed-fit shirt in washed European linen.",
    },
    SeedProduct {
        slug: "leather-belt",
        name: "Leather Belt",
        category: "Accessories",
        brand: "Fieldline",
        image: "/static/images/leather-belt.jpg",
        price: 45.0,
        count_in_stock: 25,
        description: "Full-grain leather belt with a brushed brass buckle.",
    },
    SeedProduct {
        slug: "walnut-cutting-board",
        name: "Walnut Cutting Board",
        category: "Kitchen",
        brand: "Hearthware",
        image: "/static/images/walnut-cutting-board.jpg",
        price: 95.0,
        count_in_stock: 8,
        description: "End-grain walnut board, oiled and ready to use.",
    },
];

/// Insert the sample catalog.
///
/// # Errors
///
/// Returns an error if environment variables are missing or inserts fail.
pub async fn products() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "STOREFRONT_DATABASE_URL not set")?;

    use secrecy::ExposeSecret;
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let mut inserted = 0_u32;
    for product in SAMPLE_PRODUCTS {
        let result = sqlx::query(
            r#"
            INSERT INTO storefront.product
                (slug, name, category, brand, image, price, count_in_stock, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(product.slug)
        .bind(product.name)
        .bind(product.category)
        .bind(product.brand)
        .bind(product.image)
        .bind(product.price)
        .bind(product.count_in_stock)
        .bind(product.description)
        .execute(&pool)
        .await?;

        inserted += u32::try_from(result.rows_affected()).unwrap_or(0);
    }

    info!(
        inserted,
        skipped = SAMPLE_PRODUCTS.len() as u32 - inserted,
        "Catalog seeding complete"
    );

    Ok(())
}
