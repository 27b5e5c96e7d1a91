//! Database seeder
//! Imports the fixture data set, or destroys all data with `--destroy`.

use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use storefront_backend::models::CreateProductRequest;
use storefront_backend::store::{OrderStore, PrincipalStore, ProductStore};
use tracing::info;

#[derive(Parser)]
#[command(name = "seed", about = "Seed the storefront database")]
struct Args {
    /// Path to the SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = "storefront.db")]
    database: String,

    /// Clear all data without importing fixtures
    #[arg(short = 'd', long)]
    destroy: bool,
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();

    let principals = PrincipalStore::new(&args.database)?;
    let products = ProductStore::new(&args.database)?;
    let orders = OrderStore::new(&args.database)?;

    orders.clear()?;
    products.clear()?;
    principals.clear()?;

    if args.destroy {
        info!("Data destroyed");
        return Ok(());
    }

    // Seeded accounts keep plaintext records on purpose; the dual-mode
    // comparator accepts them without a hashing migration step.
    principals.create_admin("Admin User", "admin@example.com", "password123")?;
    principals.create_user("John Doe", "john@example.com", "password123")?;
    principals.create_user("Jane Smith", "jane@example.com", "password123")?;
    info!("Principals imported");

    for product in product_fixtures() {
        products.create(&product)?;
    }
    info!("Products imported");

    info!("Data import completed");
    Ok(())
}

fn product_fixtures() -> Vec<CreateProductRequest> {
    let rows: [(&str, f64, &str, &str, &str, i64); 8] = [
        (
            "Wireless Bluetooth Headphones",
            79.99,
            "Premium wireless headphones with active noise cancellation, 30-hour battery life, and crystal-clear sound quality.",
            "🎧",
            "Electronics",
            25,
        ),
        (
            "Smart Fitness Watch",
            199.99,
            "Advanced fitness tracking smartwatch with heart rate monitor, GPS, and 7-day battery life.",
            "⌚",
            "Wearables",
            15,
        ),
        (
            "Ergonomic Laptop Stand",
            29.99,
            "Adjustable aluminum laptop stand for better ergonomics and improved airflow.",
            "💻",
            "Office",
            50,
        ),
        (
            "Wireless Charging Phone Case",
            24.99,
            "Protective phone case with built-in wireless charging capability and drop protection.",
            "📱",
            "Accessories",
            35,
        ),
        (
            "LED Desk Lamp with USB Charging",
            45.99,
            "Adjustable LED desk lamp with multiple brightness levels, color temperature control, and USB charging port.",
            "💡",
            "Office",
            20,
        ),
        (
            "Mechanical Gaming Keyboard",
            89.99,
            "RGB backlit mechanical gaming keyboard with blue switches and programmable keys.",
            "⌨️",
            "Gaming",
            12,
        ),
        (
            "Wireless Gaming Mouse",
            59.99,
            "High-precision wireless gaming mouse with customizable DPI and RGB lighting.",
            "🖱️",
            "Gaming",
            18,
        ),
        (
            "Portable Bluetooth Speaker",
            39.99,
            "Compact waterproof Bluetooth speaker with 12-hour battery and powerful bass.",
            "🔊",
            "Audio",
            30,
        ),
    ];

    rows.into_iter()
        .map(
            |(name, price, description, image, category, stock)| CreateProductRequest {
                name: name.to_string(),
                price,
                description: description.to_string(),
                image: image.to_string(),
                category: category.to_string(),
                stock,
            },
        )
        .collect()
}
