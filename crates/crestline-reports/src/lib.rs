//! # crestline-reports: Report Orchestration
//!
//! The service layer between the UI and the commission engine.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Report Orchestration                              │
//! │                                                                         │
//! │  UI picks a commission week                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReportService::build_report(week_key, notes)                          │
//! │       │                                                                 │
//! │       ├── SaleSource::fetch_between     ← that week's sales            │
//! │       ├── SaleSource::fetch_all         ← full history (bonus lookback)│
//! │       ├── BonusStateStore::get          ← collections selection/lock   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  crestline_core::report::build_snapshot  (pure)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CommissionReportSnapshot → UI renders / edits notes → rebuild         │
//! │                                                                         │
//! │  Nothing here mutates sales; the only writes are the per-week          │
//! │  collections-bonus selection and its lock flag.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `SaleSource` / `BonusStateStore` traits and the sqlx impls
//! - [`service`] - `ReportService`, the entry point callers use
//! - [`error`] - `ReportError`

pub mod error;
pub mod service;
pub mod store;

pub use error::ReportError;
pub use service::ReportService;
pub use store::{BonusStateStore, SaleSource};
