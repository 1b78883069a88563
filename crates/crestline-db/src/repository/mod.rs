//! # Repository Module
//!
//! Database repository implementations for Crestline DMS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  ReportService                                                         │
//! │       │                                                                 │
//! │       │  db.sales().list_between(start, end)                           │
//! │       │  db.collections_bonus().get(&week_key)                         │
//! │       ▼                                                                 │
//! │  SaleRepository / CollectionsBonusRepository                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL is isolated in one place                                        │
//! │  • Easy to test against an in-memory database                          │
//! │  • The service layer sees domain types, never rows                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`sale::SaleRepository`] - Sale history reads (and seed-time writes)
//! - [`collections_bonus::CollectionsBonusRepository`] - Per-week bonus
//!   selection/lock state

pub mod collections_bonus;
pub mod sale;
