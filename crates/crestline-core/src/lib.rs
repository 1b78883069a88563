//! # crestline-core: Pure Business Logic for Crestline DMS
//!
//! This crate is the **heart** of the Crestline commission report engine.
//! It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Crestline DMS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Frontend (Web UI)                           │   │
//! │  │    Week Selector ──► Report Grid ──► Notes ──► Bonus Panel     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 crestline-reports (services)                    │   │
//! │  │    list_weeks, build_report, save_collections_selection        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ crestline-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐ ┌────────┐ │   │
//! │  │   │ calendar │ │ formula  │ │  split  │ │ bonus  │ │ report │ │   │
//! │  │   │  weeks   │ │ override │ │ shares  │ │ deals  │ │snapshot│ │   │
//! │  │   └──────────┘ └──────────┘ └─────────┘ └────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  crestline-db (Database Layer)                  │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, SalespersonName, CollectionsBonusState)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`calendar`] - Commission/bonus week windowing and week keys
//! - [`formula`] - Base commission formula and override note parsing
//! - [`split`] - Salesperson split normalization
//! - [`bonus`] - Weekly sales-volume bonus with deal de-duplication
//! - [`report`] - Snapshot assembly (the report pipeline)
//! - [`validation`] - Input validation at write boundaries
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input =
//!    same output (the one exception is `generated_at` on a fresh snapshot)
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Final monetary values are cents (i64); floats exist
//!    only inside the formula pipeline before the single clamp point
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bonus;
pub mod calendar;
pub mod error;
pub mod formula;
pub mod money;
pub mod report;
pub mod split;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use crestline_core::Money` instead of
// `use crestline_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name of the house/aggregate salesperson.
///
/// The entry whose name normalizes to this value receives dealership-level
/// bonuses (collections bonus, weekly sales bonus) in addition to its own
/// commission rows. Matching is case-insensitive.
pub const HOUSE_SALESPERSON: &str = "Key";

/// Name assigned to sales with no salesperson on record.
pub const UNASSIGNED_SALESPERSON: &str = "Unassigned";

/// Flat commission paid on any positive down payment up to the ceiling.
pub const FLAT_COMMISSION_CENTS: i64 = 10_000;

/// Down payment ceiling for the flat commission tier ($3,000).
pub const FLAT_COMMISSION_CEILING_CENTS: i64 = 300_000;

/// Commission rate applied above the flat tier ceiling.
pub const COMMISSION_RATE: f64 = 0.05;

/// Distinct deals a salesperson must close in a bonus week before the
/// per-deal bonus starts accruing.
pub const WEEKLY_DEAL_THRESHOLD: u32 = 5;

/// Bonus paid per deal over the weekly threshold ($50).
pub const WEEKLY_BONUS_PER_DEAL_CENTS: i64 = 5_000;
