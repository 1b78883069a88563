//! # Store Traits
//!
//! The injected interfaces the service depends on, with the sqlx
//! repositories as the reference implementations.
//!
//! ## Why Traits?
//! The engine's persistence needs are tiny: filtered sale reads and a
//! per-week KV record. Abstracting them keeps the service testable against
//! any store (file, database row, distributed cache) without touching
//! calculation logic — the concrete mechanism is a deployment detail.

use chrono::NaiveDate;

use crate::error::ReportResult;
use crestline_core::calendar::WeekKey;
use crestline_core::{CollectionsBonusState, Sale};
use crestline_db::{CollectionsBonusRepository, SaleRepository};

// =============================================================================
// Sale Source
// =============================================================================

/// Read-only access to the sale history.
#[allow(async_fn_in_trait)]
pub trait SaleSource {
    /// The full sale history (week buckets, bonus lookback).
    async fn fetch_all(&self) -> ReportResult<Vec<Sale>>;

    /// Sales dated within an inclusive range (one commission week).
    async fn fetch_between(&self, start: NaiveDate, end: NaiveDate) -> ReportResult<Vec<Sale>>;
}

impl SaleSource for SaleRepository {
    async fn fetch_all(&self) -> ReportResult<Vec<Sale>> {
        Ok(self.list_all().await?)
    }

    async fn fetch_between(&self, start: NaiveDate, end: NaiveDate) -> ReportResult<Vec<Sale>> {
        Ok(self.list_between(start, end).await?)
    }
}

// =============================================================================
// Bonus State Store
// =============================================================================

/// Per-week collections-bonus state, behind the narrow get/set/clear
/// contract. Last write wins at this level; the lock flag is enforced by
/// the service above.
#[allow(async_fn_in_trait)]
pub trait BonusStateStore {
    async fn get(&self, week_key: &WeekKey) -> ReportResult<Option<CollectionsBonusState>>;

    async fn set(
        &self,
        week_key: &WeekKey,
        value_cents: i64,
        locked: bool,
    ) -> ReportResult<CollectionsBonusState>;

    async fn clear(&self, week_key: &WeekKey) -> ReportResult<()>;
}

impl BonusStateStore for CollectionsBonusRepository {
    async fn get(&self, week_key: &WeekKey) -> ReportResult<Option<CollectionsBonusState>> {
        Ok(CollectionsBonusRepository::get(self, week_key).await?)
    }

    async fn set(
        &self,
        week_key: &WeekKey,
        value_cents: i64,
        locked: bool,
    ) -> ReportResult<CollectionsBonusState> {
        Ok(CollectionsBonusRepository::set(self, week_key, value_cents, locked).await?)
    }

    async fn clear(&self, week_key: &WeekKey) -> ReportResult<()> {
        Ok(CollectionsBonusRepository::clear(self, week_key).await?)
    }
}
