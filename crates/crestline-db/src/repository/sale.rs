//! # Sale Repository
//!
//! Database operations for the sale history.
//!
//! ## Read-Mostly Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The report engine never mutates sales. This repository exposes:        │
//! │                                                                         │
//! │  READS (the engine's contract)                                         │
//! │     └── list_all()              → full history (bonus lookback,        │
//! │                                    week buckets)                       │
//! │     └── list_between(start,end) → one commission week's sales          │
//! │     └── get_by_id()             → single record                        │
//! │                                                                         │
//! │  WRITES (seed/import tooling only)                                     │
//! │     └── insert()                                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The salesperson_split Column
//! Split lists persist as a JSON array (`[{"name":"Alex","share":60}]`),
//! exactly as the upstream editor records them. Normalization is the
//! core's job; this layer only round-trips the raw entries.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crestline_core::{Sale, SplitEntry};

/// Column list shared by every SELECT in this repository.
const SALE_COLUMNS: &str = "id, account_number, vin, stock_number, sale_date, sale_type, \
     year, make, model, sale_down_payment_cents, down_payment_cents, sale_price_cents, \
     salesperson, salesperson_split, created_at, updated_at";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a sale record (seed/import tooling).
    pub async fn insert(&self, sale: &Sale) -> DbResult<()> {
        debug!(id = %sale.id, sale_date = %sale.sale_date, "Inserting sale");

        let split_json = sale
            .salesperson_split
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, account_number, vin, stock_number, sale_date, sale_type,
                year, make, model,
                sale_down_payment_cents, down_payment_cents, sale_price_cents,
                salesperson, salesperson_split,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.account_number)
        .bind(&sale.vin)
        .bind(&sale.stock_number)
        .bind(&sale.sale_date)
        .bind(&sale.sale_type)
        .bind(sale.year)
        .bind(&sale.make)
        .bind(&sale.model)
        .bind(sale.sale_down_payment_cents)
        .bind(sale.down_payment_cents)
        .bind(sale.sale_price_cents)
        .bind(&sale.salesperson)
        .bind(split_json)
        .bind(sale.created_at)
        .bind(sale.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let row = sqlx::query(&format!("SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(sale_from_row).transpose()
    }

    /// Gets the full sale history, newest first.
    ///
    /// ## When To Call
    /// Week buckets and the bonus lookback both need everything; the
    /// history for one dealership stays small enough to hold in memory.
    pub async fn list_all(&self) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY sale_date DESC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(sale_from_row).collect()
    }

    /// Gets sales dated within an inclusive range.
    ///
    /// `sale_date` is ISO-8601 text, so lexicographic BETWEEN matches
    /// chronological order; unparsable dates simply never match and are
    /// skipped by the core anyway.
    pub async fn list_between(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<Sale>> {
        let rows = sqlx::query(&format!(
            "SELECT {SALE_COLUMNS} FROM sales \
             WHERE sale_date >= ?1 AND sale_date <= ?2 \
             ORDER BY sale_date ASC, created_at ASC"
        ))
        .bind(start.format("%Y-%m-%d").to_string())
        .bind(end.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(sale_from_row).collect()
    }

    /// Counts sale records (seed duplicate guard).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Maps a sales row to the domain type, parsing the split JSON column.
fn sale_from_row(row: &SqliteRow) -> DbResult<Sale> {
    let split_json: Option<String> = row.try_get("salesperson_split")?;
    let salesperson_split = match split_json.as_deref().map(str::trim) {
        Some(json) if !json.is_empty() => Some(serde_json::from_str::<Vec<SplitEntry>>(json)?),
        _ => None,
    };

    Ok(Sale {
        id: row.try_get("id")?,
        account_number: row.try_get("account_number")?,
        vin: row.try_get("vin")?,
        stock_number: row.try_get("stock_number")?,
        sale_date: row.try_get("sale_date")?,
        sale_type: row.try_get("sale_type")?,
        year: row.try_get("year")?,
        make: row.try_get("make")?,
        model: row.try_get("model")?,
        sale_down_payment_cents: row.try_get("sale_down_payment_cents")?,
        down_payment_cents: row.try_get("down_payment_cents")?,
        sale_price_cents: row.try_get("sale_price_cents")?,
        salesperson: row.try_get("salesperson")?,
        salesperson_split,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
