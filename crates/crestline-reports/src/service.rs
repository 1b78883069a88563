//! # Report Service
//!
//! The entry point surrounding UI code calls. Each method awaits the
//! external reads/writes, then hands pure data to `crestline-core`.
//!
//! ## Recompute-On-Edit
//! Snapshot building is cheap and idempotent, so the service exposes no
//! incremental update path: every note keystroke or bonus change simply
//! calls `build_report` again and the previous snapshot is discarded.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{ReportError, ReportResult};
use crate::store::{BonusStateStore, SaleSource};
use crestline_core::calendar::{week_buckets, WeekBucket, WeekKey};
use crestline_core::report::{build_snapshot, CommissionReportSnapshot, ReportContext};
use crestline_core::validation::validate_collections_bonus_cents;
use crestline_core::{CollectionsBonusState, SalespersonName};
use crestline_db::Database;

// =============================================================================
// Report Service
// =============================================================================

/// Orchestrates sale reads, collections-bonus state, and snapshot builds.
#[derive(Debug, Clone)]
pub struct ReportService<S, B> {
    sales: S,
    bonus_store: B,
}

impl ReportService<crestline_db::SaleRepository, crestline_db::CollectionsBonusRepository> {
    /// Service backed by the SQLite repositories.
    pub fn for_database(db: &Database) -> Self {
        ReportService {
            sales: db.sales(),
            bonus_store: db.collections_bonus(),
        }
    }
}

impl<S: SaleSource, B: BonusStateStore> ReportService<S, B> {
    /// Service over any store implementations.
    pub fn new(sales: S, bonus_store: B) -> Self {
        ReportService { sales, bonus_store }
    }

    /// Commission weeks present in the sale history, newest first.
    /// Drives the UI week selector.
    pub async fn list_weeks(&self) -> ReportResult<Vec<WeekBucket>> {
        let all = self.sales.fetch_all().await?;
        Ok(week_buckets(&all))
    }

    /// Builds the snapshot for one commission week.
    ///
    /// ## Arguments
    /// * `week_key` - `YYYY-MM-DD`; any date normalizes to its week
    /// * `notes` - manual notes keyed by report row key
    pub async fn build_report(
        &self,
        week_key: &str,
        notes: &HashMap<String, String>,
    ) -> ReportResult<CommissionReportSnapshot> {
        let key = WeekKey::parse(week_key)?;
        let range = key.range();

        let week_sales = self.sales.fetch_between(range.start, range.end).await?;
        let history = self.sales.fetch_all().await?;

        let mut collections: HashMap<SalespersonName, CollectionsBonusState> = HashMap::new();
        if let Some(state) = self.bonus_store.get(&key).await? {
            collections.insert(SalespersonName::house(), state);
        }

        debug!(
            week = %key,
            week_sales = week_sales.len(),
            history = history.len(),
            "Building commission report"
        );

        Ok(build_snapshot(
            &week_sales,
            notes,
            &range,
            ReportContext {
                collections: Some(&collections),
                all_sales: Some(&history),
            },
        ))
    }

    /// The persisted collections-bonus state for a week, if any.
    pub async fn collections_state(
        &self,
        week_key: &str,
    ) -> ReportResult<Option<CollectionsBonusState>> {
        let key = WeekKey::parse(week_key)?;
        self.bonus_store.get(&key).await
    }

    /// Saves the week's collections-bonus selection, optionally locking it.
    ///
    /// ## Lock Rule
    /// Once a week's selection is locked, every further save is refused
    /// with [`ReportError::SelectionLocked`]. Use
    /// [`clear_collections_selection`](Self::clear_collections_selection)
    /// for an administrative reset.
    pub async fn save_collections_selection(
        &self,
        week_key: &str,
        value_cents: i64,
        lock: bool,
    ) -> ReportResult<CollectionsBonusState> {
        validate_collections_bonus_cents(value_cents)?;
        let key = WeekKey::parse(week_key)?;

        if let Some(existing) = self.bonus_store.get(&key).await? {
            if existing.locked {
                return Err(ReportError::SelectionLocked {
                    week_key: key.to_string(),
                });
            }
        }

        let state = self.bonus_store.set(&key, value_cents, lock).await?;
        info!(week = %key, value_cents, lock, "Collections selection saved");
        Ok(state)
    }

    /// Removes the week's selection entirely, locked or not.
    pub async fn clear_collections_selection(&self, week_key: &str) -> ReportResult<()> {
        let key = WeekKey::parse(week_key)?;
        self.bonus_store.clear(&key).await?;
        info!(week = %key, "Collections selection cleared");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crestline_core::{Sale, SplitEntry};
    use crestline_db::DbConfig;
    use uuid::Uuid;

    fn sale(date: &str, down_cents: i64, salesperson: &str) -> Sale {
        let now = Utc::now();
        Sale {
            id: Uuid::new_v4().to_string(),
            account_number: None,
            vin: None,
            stock_number: None,
            sale_date: date.to_string(),
            sale_type: Some("Sale".to_string()),
            year: Some(2021),
            make: Some("Honda".to_string()),
            model: Some("Civic".to_string()),
            sale_down_payment_cents: Some(down_cents),
            down_payment_cents: None,
            sale_price_cents: None,
            salesperson: Some(salesperson.to_string()),
            salesperson_split: None,
            created_at: now,
            updated_at: now,
        }
    }

    async fn service_with(
        sales: Vec<Sale>,
    ) -> ReportService<crestline_db::SaleRepository, crestline_db::CollectionsBonusRepository>
    {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.sales();
        for sale in &sales {
            repo.insert(sale).await.unwrap();
        }
        ReportService::for_database(&db)
    }

    #[tokio::test]
    async fn test_build_report_end_to_end() {
        let mut split = sale("2024-06-08", 200_000, "");
        split.salesperson = None;
        split.salesperson_split = Some(vec![
            SplitEntry {
                name: Some("Alex".to_string()),
                share: Some(60.0),
            },
            SplitEntry {
                name: Some("Sam".to_string()),
                share: Some(40.0),
            },
        ]);

        let service = service_with(vec![
            sale("2024-06-07", 350_000, "Key"),
            split,
            // Outside the selected week; must not appear in rows
            sale("2024-05-31", 350_000, "Alex"),
        ])
        .await;

        let snapshot = service
            .build_report("2024-06-07", &HashMap::new())
            .await
            .unwrap();

        assert_eq!(snapshot.period_start.to_string(), "2024-06-07");
        assert_eq!(snapshot.period_end.to_string(), "2024-06-13");

        let names: Vec<&str> = snapshot
            .salespeople
            .iter()
            .map(|sp| sp.name.as_str())
            .collect();
        assert_eq!(names, vec!["Key", "Alex", "Sam"]);

        // Key: $3,500 down → $175
        assert_eq!(
            snapshot.salespeople[0].total_adjusted_commission.cents(),
            17_500
        );
        // Alex: 60% of the flat $100
        assert_eq!(
            snapshot.salespeople[1].total_adjusted_commission.cents(),
            6_000
        );
        assert_eq!(
            snapshot.salespeople[1].rows[0].notes,
            "Commission split: Alex 60% | Sam 40%"
        );

        // No selection saved yet
        assert!(!snapshot.totals.collections_complete);
    }

    #[tokio::test]
    async fn test_collections_selection_reaches_the_snapshot() {
        let service = service_with(vec![sale("2024-06-07", 350_000, "Key")]).await;

        service
            .save_collections_selection("2024-06-07", 50_000, true)
            .await
            .unwrap();

        let snapshot = service
            .build_report("2024-06-07", &HashMap::new())
            .await
            .unwrap();

        assert_eq!(
            snapshot.totals.collections_bonus.map(|m| m.cents()),
            Some(50_000)
        );
        assert!(snapshot.totals.collections_complete);
        assert_eq!(
            snapshot.salespeople[0].collections_bonus.map(|m| m.cents()),
            Some(50_000)
        );
    }

    #[tokio::test]
    async fn test_locked_week_refuses_edits() {
        let service = service_with(vec![]).await;

        // Unlocked saves may repeat
        service
            .save_collections_selection("2024-06-07", 25_000, false)
            .await
            .unwrap();
        service
            .save_collections_selection("2024-06-07", 50_000, true)
            .await
            .unwrap();

        // Locked: every further save refused
        let err = service
            .save_collections_selection("2024-06-07", 75_000, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::SelectionLocked { .. }));

        // Administrative reset reopens the week
        service
            .clear_collections_selection("2024-06-07")
            .await
            .unwrap();
        service
            .save_collections_selection("2024-06-07", 75_000, false)
            .await
            .unwrap();

        let state = service.collections_state("2024-06-07").await.unwrap().unwrap();
        assert_eq!(state.value_cents, 75_000);
        assert!(!state.locked);
    }

    #[tokio::test]
    async fn test_negative_selection_is_rejected() {
        let service = service_with(vec![]).await;
        let err = service
            .save_collections_selection("2024-06-07", -1, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
    }

    #[tokio::test]
    async fn test_manual_note_overrides_through_the_service() {
        let target = sale("2024-06-07", 350_000, "Alex");
        let row_key = format!("{}|Alex", target.sale_key());
        let service = service_with(vec![target]).await;

        let notes: HashMap<String, String> = [(row_key, "50/50 with Sam".to_string())].into();
        let snapshot = service.build_report("2024-06-07", &notes).await.unwrap();

        let row = &snapshot.salespeople[0].rows[0];
        assert_eq!(row.base_commission.cents(), 17_500);
        assert_eq!(row.adjusted_commission.cents(), 8_750);
        assert!(row.override_applied);
    }

    #[tokio::test]
    async fn test_list_weeks_newest_first() {
        let service = service_with(vec![
            sale("2024-06-07", 100_000, "Alex"),
            sale("2024-06-10", 100_000, "Sam"),
            sale("2024-05-31", 100_000, "Alex"),
        ])
        .await;

        let weeks = service.list_weeks().await.unwrap();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].key.to_string(), "2024-06-07");
        assert_eq!(weeks[0].sale_count, 2);
        assert_eq!(weeks[1].key.to_string(), "2024-05-31");
    }

    #[tokio::test]
    async fn test_bad_week_key_is_a_core_error() {
        let service = service_with(vec![]).await;
        let err = service
            .build_report("junk", &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Core(_)));
    }
}
