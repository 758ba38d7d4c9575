//! # Sample Menu Seeder
//!
//! Populates the catalog with a small pares house menu for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./pares_dev.db
//! cargo run -p pares-db --bin seed
//!
//! # Specify database path
//! cargo run -p pares-db --bin seed -- --db ./data/pares.db
//! ```
//!
//! Seeds categories, menu items (some with sizes, add-ons or a discount),
//! two payment methods and the site settings row. Refuses to run on a
//! database that already has menu items.

use std::env;

use pares_core::money::Money;
use pares_core::types::{AddOn, Category, MenuItem, PaymentMethod, SiteSettings, Variation};
use pares_core::DEFAULT_STORE_NAME;
use pares_db::{Database, DbConfig};

fn categories() -> Vec<Category> {
    [
        ("pares", "Pares", "🍲"),
        ("mami", "Mami & Noodles", "🍜"),
        ("silog", "Silog Meals", "🍳"),
        ("drinks", "Drinks", "🥤"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, name, icon))| {
        let mut category = Category::new(id, name, icon);
        category.sort_order = i as i64;
        category
    })
    .collect()
}

fn rice_and_egg() -> Vec<AddOn> {
    vec![
        AddOn::new("egg", "Fried Egg", "Extras", Money::from_pesos(15)),
        AddOn::new("chili", "Chili Garlic Oil", "Extras", Money::from_pesos(10)),
        AddOn::new("garlic-rice", "Garlic Rice", "Rice", Money::from_pesos(25)),
        AddOn::new("plain-rice", "Plain Rice", "Rice", Money::from_pesos(15)),
    ]
}

fn menu() -> Vec<MenuItem> {
    let sizes = vec![
        Variation::new("regular", "Regular", Money::zero()),
        Variation::new("large", "Large", Money::from_pesos(30)),
        Variation::new("overload", "Overload", Money::from_pesos(60)),
    ];

    let mut pares = MenuItem::new("beef-pares", "Beef Pares", Money::from_pesos(120), "pares")
        .with_description("Braised beef brisket in sweet-savory sauce, with clear broth")
        .with_variations(sizes.clone())
        .with_add_ons(rice_and_egg());
    pares.popular = true;

    vec![
        pares,
        MenuItem::new("pares-overload", "Pares Overload", Money::from_pesos(199), "pares")
            .with_description("Double beef, tendon and a soft-boiled egg")
            .with_discount(Money::from_pesos(169))
            .with_add_ons(rice_and_egg()),
        MenuItem::new("pares-mami", "Pares Mami", Money::from_pesos(130), "mami")
            .with_description("Pares over egg noodles in beef broth")
            .with_variations(sizes)
            .with_add_ons(vec![AddOn::new("egg", "Boiled Egg", "Extras", Money::from_pesos(15))]),
        MenuItem::new("lomi", "Lomi", Money::from_pesos(110), "mami")
            .with_description("Thick noodles in starchy pork broth"),
        MenuItem::new("tapsilog", "Tapsilog", Money::from_pesos(140), "silog")
            .with_description("Beef tapa, garlic rice, fried egg")
            .with_add_ons(vec![AddOn::new("egg", "Extra Egg", "Extras", Money::from_pesos(15))]),
        MenuItem::new("tocilog", "Tocilog", Money::from_pesos(130), "silog")
            .with_description("Sweet pork tocino, garlic rice, fried egg")
            .unavailable(),
        MenuItem::new("gulaman", "Sago't Gulaman", Money::from_pesos(35), "drinks").with_variations(vec![
            Variation::new("16oz", "16oz", Money::zero()),
            Variation::new("22oz", "22oz", Money::from_pesos(15)),
        ]),
        MenuItem::new("softdrinks", "Softdrinks in Can", Money::from_pesos(45), "drinks"),
    ]
}

fn payment_methods() -> Vec<PaymentMethod> {
    let mut gcash = PaymentMethod::new("gcash", "GCash", "0917 123 4567", "Primo Santos");
    gcash.sort_order = 0;
    let mut maya = PaymentMethod::new("maya", "Maya", "0918 765 4321", "Primo Santos");
    maya.sort_order = 1;
    vec![gcash, maya]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./pares_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pares Storefront Sample Menu Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./pares_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Pares Storefront Seeder");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.menu_items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    if db.categories().count().await? == 0 {
        for category in categories() {
            db.categories().insert(&category).await?;
        }
    }
    println!("✓ Categories");

    let mut inserted = 0;
    for (position, item) in menu().iter().enumerate() {
        if let Err(e) = db.menu_items().insert(item, position as i64).await {
            eprintln!("Failed to insert {}: {}", item.id, e);
            continue;
        }
        inserted += 1;
    }
    println!("✓ {} menu items", inserted);

    for method in payment_methods() {
        if let Err(e) = db.payment_methods().insert(&method).await {
            eprintln!("Failed to insert payment method {}: {}", method.id, e);
        }
    }
    println!("✓ Payment methods");

    db.site_settings()
        .save(&SiteSettings {
            store_name: DEFAULT_STORE_NAME.to_string(),
            logo_url: None,
            store_open: true,
            closed_message: "Sarado pa kami. Balik ka bukas, Primo!".to_string(),
        })
        .await?;
    println!("✓ Site settings");

    db.close().await;
    println!();
    println!("Done.");
    Ok(())
}
