//! # Collections Bonus Repository
//!
//! Persisted collections-bonus selection and lock state, one row per
//! commission week.
//!
//! ## The Narrow Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get(week_key)              → Option<CollectionsBonusState>            │
//! │  set(week_key, cents, lock) → upsert, stamps saved_at                  │
//! │  clear(week_key)            → delete                                   │
//! │                                                                         │
//! │  That's the whole surface. Any per-key KV store satisfies it; SQLite   │
//! │  is the reference implementation. Last write wins — the lock flag is   │
//! │  a business rule enforced above this layer, not a write guard here.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crestline_core::calendar::WeekKey;
use crestline_core::CollectionsBonusState;

/// Repository for per-week collections-bonus state.
#[derive(Debug, Clone)]
pub struct CollectionsBonusRepository {
    pool: SqlitePool,
}

impl CollectionsBonusRepository {
    /// Creates a new CollectionsBonusRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CollectionsBonusRepository { pool }
    }

    /// Gets the persisted state for a week, if any.
    pub async fn get(&self, week_key: &WeekKey) -> DbResult<Option<CollectionsBonusState>> {
        let row = sqlx::query(
            "SELECT value_cents, locked, saved_at FROM collections_bonus WHERE week_key = ?1",
        )
        .bind(week_key.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(CollectionsBonusState {
                value_cents: row.try_get("value_cents")?,
                locked: row.try_get("locked")?,
                saved_at: row.try_get("saved_at")?,
            })
        })
        .transpose()
    }

    /// Upserts the selection for a week and stamps `saved_at`.
    ///
    /// ## Returns
    /// The state as persisted.
    pub async fn set(
        &self,
        week_key: &WeekKey,
        value_cents: i64,
        locked: bool,
    ) -> DbResult<CollectionsBonusState> {
        let saved_at = Utc::now();
        debug!(week_key = %week_key, value_cents, locked, "Saving collections bonus");

        sqlx::query(
            r#"
            INSERT INTO collections_bonus (week_key, value_cents, locked, saved_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(week_key) DO UPDATE SET
                value_cents = excluded.value_cents,
                locked = excluded.locked,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(week_key.to_string())
        .bind(value_cents)
        .bind(locked)
        .bind(saved_at)
        .execute(&self.pool)
        .await?;

        Ok(CollectionsBonusState {
            value_cents,
            locked,
            saved_at,
        })
    }

    /// Removes the selection for a week.
    pub async fn clear(&self, week_key: &WeekKey) -> DbResult<()> {
        debug!(week_key = %week_key, "Clearing collections bonus");

        sqlx::query("DELETE FROM collections_bonus WHERE week_key = ?1")
            .bind(week_key.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
