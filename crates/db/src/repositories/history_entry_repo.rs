//! Repository for the `history_entries` table (append-only log).

use eggwatch_core::readings::NewHistoryEntry;
use eggwatch_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::history::HistoryEntryRow;

/// Column list for `history_entries` SELECT queries.
const COLUMNS: &str = "id, temperature, humidity, observed_at, recorded_at";

/// Provides query operations for the history log.
pub struct HistoryEntryRepo;

impl HistoryEntryRepo {
    /// Append one entry. `recorded_at` is assigned by the database.
    pub async fn insert(
        pool: &PgPool,
        entry: &NewHistoryEntry,
    ) -> Result<HistoryEntryRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO history_entries (temperature, humidity, observed_at) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryEntryRow>(&query)
            .bind(entry.temperature)
            .bind(entry.humidity)
            .bind(entry.observed_at)
            .fetch_one(pool)
            .await
    }

    /// The `limit` most recently recorded entries, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<HistoryEntryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM history_entries \
             ORDER BY recorded_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, HistoryEntryRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Total number of entries in the log.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM history_entries")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Delete entries recorded before the cutoff. Only the optional retention
    /// job calls this; the monitoring cycle never prunes.
    ///
    /// Returns the number of rows deleted.
    pub async fn delete_recorded_before(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM history_entries WHERE recorded_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
