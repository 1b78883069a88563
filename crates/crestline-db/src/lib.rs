//! # crestline-db: Database Layer for Crestline DMS
//!
//! This crate provides database access for the commission report engine.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Crestline DMS Data Flow                            │
//! │                                                                         │
//! │  ReportService (crestline-reports)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   crestline-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌──────────────────────┐  ┌───────────┐ │   │
//! │  │   │   Database    │   │    Repositories      │  │Migrations │ │   │
//! │  │   │   (pool.rs)   │   │ SaleRepository       │  │ (embedded)│ │   │
//! │  │   │               │◄──│ CollectionsBonus-    │  │ 001_init  │ │   │
//! │  │   │ SqlitePool    │   │ Repository           │  │  .sql     │ │   │
//! │  │   └───────────────┘   └──────────────────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │                        SQLite Database                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (sales, collections bonus)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crestline_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/crestline.db")).await?;
//! let sales = db.sales().list_all().await?;
//! let state = db.collections_bonus().get(&week_key).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::collections_bonus::CollectionsBonusRepository;
pub use repository::sale::SaleRepository;
