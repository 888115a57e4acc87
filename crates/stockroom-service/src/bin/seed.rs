//! # Seed Data Generator
//!
//! Populates the database with a small workshop for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./stockroom.db (or STOCKROOM_DATABASE_PATH)
//! cargo run -p stockroom-service --bin seed
//!
//! # Specify database path
//! cargo run -p stockroom-service --bin seed -- --db ./data/shed.db
//! ```
//!
//! ## Generated Data
//! - Tools with varied condition (some too worn to lend)
//! - Materials from a few suppliers
//! - Users who then borrow a round of tools

use std::env;
use std::path::PathBuf;

use stockroom_core::{Money, NewItem, NewUser};
use stockroom_db::Database;
use stockroom_service::{telemetry, Inventory, InventoryConfig, UseOutcome};

/// (name, amount, cost in cents, usage, condition)
const TOOLS: &[(&str, u32, i64, &str, u32)] = &[
    ("Claw Hammer", 4, 1599, "Driving and pulling nails", 100),
    ("Cordless Drill", 2, 8999, "Drilling and driving screws", 85),
    ("Hand Saw", 3, 2450, "Cutting timber", 60),
    ("Spirit Level", 2, 1899, "Checking level and plumb", 95),
    ("Tile Cutter", 1, 12900, "Scoring ceramic tiles", 15),
    ("Socket Set", 1, 6450, "Nuts and bolts", 40),
];

/// (name, amount, cost in cents, supplier, quality)
const MATERIALS: &[(&str, u32, i64, &str, &str)] = &[
    ("Plywood Sheet", 20, 3200, "Northwood Timber", "A"),
    ("Wood Screws 4x40", 500, 4, "FixIt Supplies", "Standard"),
    ("Wood Glue", 12, 799, "FixIt Supplies", "Premium"),
    ("Sandpaper P120", 50, 65, "Abrasive Co", "B"),
    ("Masking Tape", 30, 349, "Abrasive Co", "Standard"),
];

/// (name, age)
const USERS: &[(&str, u32)] = &[("alice", 34), ("bob", 27), ("carol", 45)];

/// (user, tool)
const BORROWS: &[(&str, &str)] = &[
    ("alice", "Claw Hammer"),
    ("bob", "Cordless Drill"),
    ("alice", "Hand Saw"),
    ("carol", "Tile Cutter"),
    ("bob", "Claw Hammer"),
    ("carol", "Wood Glue"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let mut config = InventoryConfig::from_env()?;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./stockroom.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::connect(config.db_config()).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let item_count = db.items().count().await?;
    let user_count = db.users().count().await?;
    if item_count > 0 || user_count > 0 {
        println!(
            "⚠ Database already has {} items and {} users",
            item_count, user_count
        );
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let inventory = Inventory::from_database(&db, config);

    println!();
    println!("Creating items...");

    for (name, amount, cents, usage, condition) in TOOLS {
        let request = NewItem::tool(*name, *amount, Money::from_cents(*cents), *usage, *condition);
        if let Err(e) = inventory.create_item(request).await {
            eprintln!("Failed to create {}: {}", name, e);
        }
    }

    for (name, amount, cents, supplier, quality) in MATERIALS {
        let request =
            NewItem::material(*name, *amount, Money::from_cents(*cents), *supplier, *quality);
        if let Err(e) = inventory.create_item(request).await {
            eprintln!("Failed to create {}: {}", name, e);
        }
    }

    for (name, age) in USERS {
        inventory.create_user(NewUser::new(*name, *age)).await?;
    }

    println!("✓ {} tools, {} materials, {} users", TOOLS.len(), MATERIALS.len(), USERS.len());

    println!();
    println!("Lending tools...");
    for (user, item) in BORROWS {
        let outcome = inventory.use_item(user, item).await?;
        match outcome {
            UseOutcome::Borrowed { condition } => {
                println!("  {user} took {item} (condition now {condition})")
            }
            UseOutcome::Declined { condition } => {
                println!("  {item} declined for {user}: condition {condition}")
            }
            UseOutcome::NotATool => println!("  {item} is not a tool"),
            UseOutcome::ItemNotFound | UseOutcome::UserNotFound => {
                println!("  {user}/{item}: not found")
            }
        }
    }

    println!();
    for (user, _) in USERS {
        let used = inventory.used_items(user).await?.unwrap_or_default();
        println!("  {user}: {used:?}");
    }

    println!();
    println!("✓ Inventory worth: {}", inventory.inventory_worth().await?);
    println!("✓ Seed complete!");

    Ok(())
}
