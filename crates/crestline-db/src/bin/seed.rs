//! # Seed Data Generator
//!
//! Populates the database with demo sales for development.
//!
//! ## Usage
//! ```bash
//! # Generate 8 weeks of sales (default)
//! cargo run -p crestline-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p crestline-db --bin seed -- --weeks 12 --per-week 10
//!
//! # Specify database path
//! cargo run -p crestline-db --bin seed -- --db ./data/crestline.db
//! ```
//!
//! ## Generated Sales
//! Deterministic demo data across the trailing commission weeks:
//! - A realistic salesperson roster including the house entry ("Key")
//! - A mix of single-salesperson sales and 60/40 or 50/50 splits
//! - Mostly "Sale" and trade types, with the occasional "Name Change"
//!   (which the bonus calculator must ignore)
//! - Varied down payments spanning both formula tiers

use chrono::{Duration, Utc};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crestline_core::calendar::commission_week_range;
use crestline_core::{Sale, SplitEntry};
use crestline_db::{Database, DbConfig};

/// Salesperson roster; "Key" is the house entry.
const SALESPEOPLE: &[&str] = &[
    "Alex Romero",
    "Sam Whitfield",
    "Dana Okafor",
    "Marcus Lee",
    "Priya Natarajan",
    "Key",
];

/// Vehicle stock for demo descriptions.
const VEHICLES: &[(i32, &str, &str)] = &[
    (2021, "Honda", "Civic"),
    (2019, "Toyota", "Camry"),
    (2022, "Ford", "F-150"),
    (2018, "Chevrolet", "Malibu"),
    (2020, "Nissan", "Altima"),
    (2023, "Hyundai", "Tucson"),
    (2017, "Jeep", "Wrangler"),
    (2021, "Kia", "Sorento"),
    (2016, "Ram", "1500"),
    (2022, "Subaru", "Outback"),
];

/// Sale types, weighted towards plain sales. "Name Change" exercises the
/// bonus calculator's exclusion path.
const SALE_TYPES: &[&str] = &[
    "Sale",
    "Sale",
    "Sale",
    "Trade-In",
    "Sale",
    "Trade",
    "Sale",
    "Name Change",
];

/// Down payments spanning the flat tier, the boundary, and the 5% tier.
const DOWN_PAYMENTS_CENTS: &[i64] = &[
    150_000, 250_000, 300_000, 350_000, 420_000, 80_000, 500_000, 650_000, 1_200_000,
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut weeks: usize = 8;
    let mut per_week: usize = 9;
    let mut db_path = String::from("./crestline_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--weeks" | "-w" => {
                if i + 1 < args.len() {
                    weeks = args[i + 1].parse().unwrap_or(8);
                    i += 1;
                }
            }
            "--per-week" | "-p" => {
                if i + 1 < args.len() {
                    per_week = args[i + 1].parse().unwrap_or(9);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Crestline DMS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -w, --weeks <N>     Commission weeks to cover (default: 8)");
                println!("  -p, --per-week <N>  Sales per week (default: 9)");
                println!("  -d, --db <PATH>     Database file path (default: ./crestline_dev.db)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Crestline DMS Seed Data Generator");
    println!("====================================");
    println!("Database: {}", db_path);
    println!("Weeks:    {}", weeks);
    println!("Per week: {}", per_week);
    println!();

    // Connect to database
    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing sales
    let existing = db.sales().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} sales", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate sales
    println!();
    println!("Generating sales...");

    let repo = db.sales();
    let anchor = commission_week_range(Utc::now().date_naive()).start;
    let mut generated = 0usize;
    let start = std::time::Instant::now();

    for week in 0..weeks {
        let week_start = anchor - Duration::weeks(week as i64);

        for slot in 0..per_week {
            let index = week * per_week + slot;
            let now = Utc::now();

            let (year, make, model) = VEHICLES[index % VEHICLES.len()];
            let sale_date = week_start + Duration::days((index * 3 % 7) as i64);

            // Every fifth sale is a two-way split
            let (salesperson, split) = if index % 5 == 0 {
                let first = SALESPEOPLE[index % SALESPEOPLE.len()];
                let second = SALESPEOPLE[(index + 1) % SALESPEOPLE.len()];
                let (a, b) = if index % 2 == 0 { (60.0, 40.0) } else { (50.0, 50.0) };
                (
                    None,
                    Some(vec![
                        SplitEntry {
                            name: Some(first.to_string()),
                            share: Some(a),
                        },
                        SplitEntry {
                            name: Some(second.to_string()),
                            share: Some(b),
                        },
                    ]),
                )
            } else {
                (
                    Some(SALESPEOPLE[index % SALESPEOPLE.len()].to_string()),
                    None,
                )
            };

            let sale = Sale {
                id: Uuid::new_v4().to_string(),
                account_number: Some(format!("{}", 10_000 + index * 7)),
                vin: Some(format!("1CRST{:012}", 400_000 + index)),
                stock_number: Some(format!("STK-{:04}", 1_000 + index)),
                sale_date: sale_date.format("%Y-%m-%d").to_string(),
                sale_type: Some(SALE_TYPES[index % SALE_TYPES.len()].to_string()),
                year: Some(year),
                make: Some(make.to_string()),
                model: Some(model.to_string()),
                sale_down_payment_cents: Some(
                    DOWN_PAYMENTS_CENTS[index % DOWN_PAYMENTS_CENTS.len()],
                ),
                down_payment_cents: None,
                sale_price_cents: Some(900_000 + (index as i64 * 37_500) % 2_500_000),
                salesperson,
                salesperson_split: split,
                created_at: now,
                updated_at: now,
            };

            repo.insert(&sale).await?;
            generated += 1;
        }
    }

    info!(generated, "Seed complete");

    println!();
    println!("✓ Generated {} sales in {:?}", generated, start.elapsed());
    println!();
    println!("Next steps:");
    println!("  1. Point the app at {}", db_path);
    println!("  2. Open the commission report and pick a week");

    Ok(())
}
